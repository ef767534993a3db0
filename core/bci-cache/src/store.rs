//! The normalized record store.
//!
//! Results are split into records: every object whose type declares key
//! fields becomes one record addressed by its [`EntityKey`], and its place in
//! the parent is taken by a `{"__ref": "Type:id"}` marker. Root query fields
//! live in a single root record keyed by field name and arguments. Reading
//! reverses the process.

use crate::key::{EntityKey, REF_FIELD, TYPENAME_FIELD};
use crate::policy::{CacheConfig, FieldMerge, ROOT_QUERY};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use tracing::{debug, trace};

/// Record id of the root query record.
pub const ROOT_QUERY_ID: &str = "ROOT_QUERY";

/// Nesting limit for reads, guarding against reference cycles.
const MAX_DEPTH: usize = 64;

type Record = Map<String, Value>;

#[derive(Debug, Default)]
struct Store {
    records: HashMap<String, Record>,
}

/// Process-lifetime cache of operation results, normalized by entity identity.
///
/// Reads never fail: anything missing or inconsistent is reported as a miss.
/// There is no eviction; [`NormalizedCache::reset`] drops everything.
#[derive(Debug)]
pub struct NormalizedCache {
    config: CacheConfig,
    store: RwLock<Store>,
}

impl Default for NormalizedCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl NormalizedCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            store: RwLock::new(Store::default()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Stores the value of a root query field for the given arguments.
    pub fn write_query(&self, field: &str, args: &Value, value: &Value) {
        let mut store = self.store.write().unwrap_or_else(|p| p.into_inner());
        let normalized = normalize(&self.config, &mut store, value);
        let merge = self.config.field_merge(ROOT_QUERY, field);
        let root = store.records.entry(ROOT_QUERY_ID.to_string()).or_default();
        let key = storage_key(field, args);
        let merged = merge_value(root.get(&key), normalized, merge);
        root.insert(key.clone(), merged);
        debug!("cache write {} ({} records)", key, store.records.len());
    }

    /// Reads a root query field for the given arguments.
    ///
    /// Returns `None` if the field was never written or any entity it refers
    /// to is missing.
    pub fn read_query(&self, field: &str, args: &Value) -> Option<Value> {
        let store = self.store.read().ok()?;
        let key = storage_key(field, args);
        let value = store.records.get(ROOT_QUERY_ID)?.get(&key)?;
        let result = denormalize(&store.records, value, 0);
        trace!("cache {} {}", if result.is_some() { "hit" } else { "miss" }, key);
        result
    }

    /// Merges every identifiable entity inside `value` into the store without
    /// recording a root field. Used for mutation payloads.
    pub fn write_entities(&self, value: &Value) {
        let mut store = self.store.write().unwrap_or_else(|p| p.into_inner());
        normalize(&self.config, &mut store, value);
    }

    /// Reads one entity with its references resolved.
    pub fn read_entity(&self, key: &EntityKey) -> Option<Value> {
        let store = self.store.read().ok()?;
        let record = store.records.get(&key.to_string())?;
        denormalize_object(&store.records, record, 0)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.store
            .read()
            .map(|s| s.records.contains_key(&key.to_string()))
            .unwrap_or(false)
    }

    /// Keys of all stored entities, sorted.
    pub fn entity_keys(&self) -> Vec<EntityKey> {
        let Ok(store) = self.store.read() else {
            return Vec::new();
        };
        let mut keys: Vec<EntityKey> = store
            .records
            .keys()
            .filter(|k| k.as_str() != ROOT_QUERY_ID)
            .filter_map(|k| EntityKey::parse(k))
            .collect();
        keys.sort();
        keys
    }

    pub fn entity_count(&self) -> usize {
        self.entity_keys().len()
    }

    /// Raw normalized records, keyed by record id. For diagnostics.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        let Ok(store) = self.store.read() else {
            return BTreeMap::new();
        };
        store
            .records
            .iter()
            .map(|(id, record)| (id.clone(), Value::Object(record.clone())))
            .collect()
    }

    /// Drops every record.
    pub fn reset(&self) {
        let mut store = self.store.write().unwrap_or_else(|p| p.into_inner());
        store.records.clear();
        debug!("cache reset");
    }
}

/// Storage key of a root field: the bare field name, or `field(args)` with
/// the arguments rendered as canonical JSON.
pub fn storage_key(field: &str, args: &Value) -> String {
    match args {
        Value::Null => field.to_string(),
        Value::Object(map) if map.is_empty() => field.to_string(),
        other => format!("{field}({})", canonical_json(other)),
    }
}

fn canonical_json(value: &Value) -> String {
    // Absent and null arguments are equivalent for lookup.
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonical_json(v)))
                .collect();
            let body = sorted
                .iter()
                .map(|(k, v)| format!("{}:{}", Value::String((*k).clone()), v))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items.iter().map(canonical_json).collect::<Vec<_>>().join(",");
            format!("[{body}]")
        }
        other => other.to_string(),
    }
}

fn identify(config: &CacheConfig, object: &Record) -> Option<EntityKey> {
    let typename = object.get(TYPENAME_FIELD)?.as_str()?;
    let key_fields = config.key_fields(typename)?;
    let mut parts = Vec::with_capacity(key_fields.len());
    for field in key_fields {
        match object.get(field)? {
            Value::String(s) => parts.push(s.clone()),
            Value::Number(n) => parts.push(n.to_string()),
            _ => return None,
        }
    }
    Some(EntityKey::new(typename, parts.join(":")))
}

fn normalize(config: &CacheConfig, store: &mut Store, value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize(config, store, item))
                .collect(),
        ),
        Value::Object(object) => {
            let normalized: Record = object
                .iter()
                .map(|(field, v)| (field.clone(), normalize(config, store, v)))
                .collect();
            match identify(config, &normalized) {
                Some(key) => {
                    merge_record(config, store, &key, normalized);
                    reference(&key)
                }
                None => Value::Object(normalized),
            }
        }
        other => other.clone(),
    }
}

/// Field-wise merge into an entity record: incoming fields win according to
/// their merge rule, stored fields absent from the incoming object are kept.
fn merge_record(config: &CacheConfig, store: &mut Store, key: &EntityKey, incoming: Record) {
    let record = store.records.entry(key.to_string()).or_default();
    for (field, value) in incoming {
        let merge = config.field_merge(&key.typename, &field);
        let merged = merge_value(record.get(&field), value, merge);
        record.insert(field, merged);
    }
}

fn merge_value(existing: Option<&Value>, incoming: Value, merge: FieldMerge) -> Value {
    match (merge, existing, incoming) {
        (FieldMerge::Union, Some(Value::Array(stored)), Value::Array(items)) => {
            let mut combined = stored.clone();
            for item in items {
                if !combined.contains(&item) {
                    combined.push(item);
                }
            }
            Value::Array(combined)
        }
        (_, _, incoming) => incoming,
    }
}

fn reference(key: &EntityKey) -> Value {
    let mut map = Map::new();
    map.insert(REF_FIELD.to_string(), Value::String(key.to_string()));
    Value::Object(map)
}

fn reference_target(object: &Record) -> Option<&str> {
    if object.len() != 1 {
        return None;
    }
    object.get(REF_FIELD)?.as_str()
}

fn denormalize(records: &HashMap<String, Record>, value: &Value, depth: usize) -> Option<Value> {
    if depth > MAX_DEPTH {
        return None;
    }
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| denormalize(records, item, depth + 1))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        Value::Object(object) => match reference_target(object) {
            Some(target) => denormalize_object(records, records.get(target)?, depth + 1),
            None => denormalize_object(records, object, depth + 1),
        },
        other => Some(other.clone()),
    }
}

fn denormalize_object(
    records: &HashMap<String, Record>,
    object: &Record,
    depth: usize,
) -> Option<Value> {
    let mut out = Map::with_capacity(object.len());
    for (field, value) in object {
        out.insert(field.clone(), denormalize(records, value, depth)?);
    }
    Some(Value::Object(out))
}
