use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Type name of the root query record.
pub const ROOT_QUERY: &str = "Query";

/// How a read consults the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Serve from cache when present, otherwise fetch.
    CacheFirst,
    /// Serve from cache when present and refresh from the network in the
    /// background; fetch when absent.
    CacheAndNetwork,
    /// Always fetch; never serve cached data.
    NetworkOnly,
}

impl FetchPolicy {
    /// Whether reads under this policy may be answered from the cache.
    pub fn reads_cache(self) -> bool {
        !matches!(self, FetchPolicy::NetworkOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FetchPolicy::CacheFirst => "cache-first",
            FetchPolicy::CacheAndNetwork => "cache-and-network",
            FetchPolicy::NetworkOnly => "network-only",
        }
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cache-first" => Ok(FetchPolicy::CacheFirst),
            "cache-and-network" => Ok(FetchPolicy::CacheAndNetwork),
            "network-only" => Ok(FetchPolicy::NetworkOnly),
            other => Err(format!("unknown fetch policy: {other}")),
        }
    }
}

/// How an incoming field value combines with the stored one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMerge {
    /// The incoming value wholly replaces the stored value (default).
    #[default]
    Replace,
    /// For lists: keep stored items and append incoming items not already
    /// present. Non-list values are replaced.
    Union,
}

/// Cache behaviour for one GraphQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePolicy {
    /// Fields that identify an entity. Empty means objects of this type are
    /// stored inline in their parent rather than normalized.
    #[serde(default)]
    pub key_fields: Vec<String>,
    /// Per-field merge overrides.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldMerge>,
}

impl TypePolicy {
    /// A policy that normalizes objects by the given key fields.
    pub fn keyed(key_fields: &[&str]) -> Self {
        Self {
            key_fields: key_fields.iter().map(|f| (*f).to_string()).collect(),
            fields: BTreeMap::new(),
        }
    }

    /// A policy with no identity, used for root types.
    pub fn unkeyed() -> Self {
        Self {
            key_fields: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, merge: FieldMerge) -> Self {
        self.fields.insert(field.into(), merge);
        self
    }

    pub fn is_keyed(&self) -> bool {
        !self.key_fields.is_empty()
    }
}

/// The full set of type policies for a cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub type_policies: BTreeMap<String, TypePolicy>,
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, typename: impl Into<String>, policy: TypePolicy) -> Self {
        self.type_policies.insert(typename.into(), policy);
        self
    }

    pub fn policy(&self, typename: &str) -> Option<&TypePolicy> {
        self.type_policies.get(typename)
    }

    /// Merge rule for `typename.field`, defaulting to [`FieldMerge::Replace`].
    pub fn field_merge(&self, typename: &str, field: &str) -> FieldMerge {
        self.policy(typename)
            .and_then(|p| p.fields.get(field).copied())
            .unwrap_or_default()
    }

    /// Key fields declared for `typename`, if it is normalized.
    pub fn key_fields(&self, typename: &str) -> Option<&[String]> {
        self.policy(typename)
            .filter(|p| p.is_keyed())
            .map(|p| p.key_fields.as_slice())
    }
}
