//! Entity identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field that marks a stored reference in normalized values.
pub const REF_FIELD: &str = "__ref";

/// Field carrying an object's GraphQL type name.
pub const TYPENAME_FIELD: &str = "__typename";

/// Identity of one logical entity: `(typename, id)`.
///
/// Rendered as `Typename:id`, which is also the form stored in references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub typename: String,
    pub id: String,
}

impl EntityKey {
    pub fn new(typename: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            id: id.into(),
        }
    }

    /// Parses the `Typename:id` form. The id may itself contain colons.
    pub fn parse(s: &str) -> Option<Self> {
        let (typename, id) = s.split_once(':')?;
        if typename.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(typename, id))
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.typename, self.id)
    }
}
