//! Normalized result cache.
//!
//! - [`NormalizedCache`] - the record store, keyed by entity identity
//! - [`CacheConfig`] / [`TypePolicy`] - which types are normalized and how
//!   their fields merge
//! - [`FetchPolicy`] - how a read consults the cache
//!
//! Repeated reads of the same `(typename, id)` across different operations
//! converge on one stored record, so every result that mentions an entity
//! sees its latest known fields.

mod key;
mod policy;
mod store;

pub use key::{EntityKey, REF_FIELD, TYPENAME_FIELD};
pub use policy::{CacheConfig, FetchPolicy, FieldMerge, TypePolicy, ROOT_QUERY};
pub use store::{storage_key, NormalizedCache, ROOT_QUERY_ID};
