//! Ordered key/value attribute storage with read-only enforcement.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::error::{AttributeError, AttributeOperation};
use super::policy::ReadOnlyPolicy;

/// Dynamic attribute storage embedded by value in an owning type.
///
/// Keys keep their insertion order. Every mutating operation consults the
/// store's [`ReadOnlyPolicy`] for the key being touched; reads never do.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStore<V = Value> {
    attributes: IndexMap<String, V>,
    policy: ReadOnlyPolicy,
}

impl<V> Default for AttributeStore<V> {
    fn default() -> Self {
        Self {
            attributes: IndexMap::new(),
            policy: ReadOnlyPolicy::AllWritable,
        }
    }
}

impl<V> AttributeStore<V> {
    /// Create an empty, fully writable store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the read-only policy.
    pub fn with_policy(mut self, policy: ReadOnlyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a store pre-seeded with `attributes`.
    ///
    /// Seeding is the owner's constructor path and bypasses `policy`, so it
    /// is the only way to populate an [`ReadOnlyPolicy::AllReadOnly`] store.
    pub fn seeded<I, K>(attributes: I, policy: ReadOnlyPolicy) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            policy,
        }
    }

    pub fn policy(&self) -> &ReadOnlyPolicy {
        &self.policy
    }

    pub fn is_read_only(&self, key: &str) -> bool {
        self.policy.is_read_only(key)
    }

    /// Apply each entry as an individual [`set`](Self::set).
    ///
    /// Stops at the first read-only key. Entries applied before it stay in
    /// place.
    pub fn fill<I, K>(&mut self, attributes: I) -> Result<&mut Self, AttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        for (key, value) in attributes {
            self.set(key, value)?;
        }
        Ok(self)
    }

    /// Soft read: `None` when the key is unset.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.attributes.get(key)
    }

    /// Insert or overwrite. Overwriting keeps the key's original position.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<(), AttributeError> {
        let key = key.into();
        self.check_writable(&key, AttributeOperation::Modify)?;
        self.attributes.insert(key, value);
        Ok(())
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Remove `key`. Absent keys are a no-op, read-only keys are not.
    pub fn unset(&mut self, key: &str) -> Result<(), AttributeError> {
        self.check_writable(key, AttributeOperation::Unset)?;
        self.attributes.shift_remove(key);
        Ok(())
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Strict read: a missing key is an [`AttributeError::UndefinedAttribute`].
    pub fn get_attribute(&self, key: &str) -> Result<&V, AttributeError> {
        self.attributes
            .get(key)
            .ok_or_else(|| AttributeError::UndefinedAttribute {
                key: key.to_string(),
            })
    }

    pub fn get_optional_attribute(&self, key: &str) -> Option<&V> {
        self.attributes.get(key)
    }

    // Indexed access, same semantics as get/set/has/unset.

    pub fn read(&self, index: &str) -> Option<&V> {
        self.get(index)
    }

    pub fn write(&mut self, index: impl Into<String>, value: V) -> Result<(), AttributeError> {
        self.set(index, value)
    }

    pub fn exists(&self, index: &str) -> bool {
        self.has(index)
    }

    pub fn remove(&mut self, index: &str) -> Result<(), AttributeError> {
        self.unset(index)
    }

    fn check_writable(
        &self,
        key: &str,
        operation: AttributeOperation,
    ) -> Result<(), AttributeError> {
        if self.is_read_only(key) {
            return Err(AttributeError::ReadOnlyViolation {
                key: key.to_string(),
                operation,
            });
        }
        Ok(())
    }
}

impl<V: Clone> AttributeStore<V> {
    /// Copy of the current attributes, insertion order preserved.
    pub fn to_array(&self) -> IndexMap<String, V> {
        self.attributes.clone()
    }

    /// Independent copy with the same attributes and policy.
    pub fn replicate(&self) -> Self {
        self.clone()
    }
}

impl<V: Serialize> AttributeStore<V> {
    /// Flat JSON object of the attributes.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<V: Serialize> Serialize for AttributeStore<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for AttributeStore<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::seeded(iter, ReadOnlyPolicy::AllWritable)
    }
}

impl<'a, V> IntoIterator for &'a AttributeStore<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

static NULL: Value = Value::Null;

/// Bracket reads; absent keys read as `null`.
impl std::ops::Index<&str> for AttributeStore<Value> {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.attributes.get(key).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> AttributeStore {
        let mut store = AttributeStore::new();
        store
            .fill([("name", json!("John")), ("age", json!(30))])
            .unwrap();
        store
    }

    #[test]
    fn fill_and_get() {
        let store = person();
        assert_eq!(store.get("name"), Some(&json!("John")));
        assert_eq!(store.get_attribute("age").unwrap(), &json!(30));
        assert_eq!(store.read("age"), Some(&json!(30)));
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.get_optional_attribute("missing"), None);
    }

    #[test]
    fn fill_returns_receiver_for_chaining() {
        let mut store = AttributeStore::new();
        let len = store
            .fill([("a", json!(1))])
            .unwrap()
            .fill([("b", json!(2))])
            .unwrap()
            .len();
        assert_eq!(len, 2);
    }

    #[test]
    fn keys_in_insertion_order() {
        let mut store = person();
        store.set("city", json!("Berlin")).unwrap();
        store.set("name", json!("Alice")).unwrap();
        assert_eq!(store.keys(), vec!["name", "age", "city"]);
    }

    #[test]
    fn unset_keeps_order_of_remaining_keys() {
        let mut store = person();
        store.set("city", json!("Berlin")).unwrap();
        store.unset("name").unwrap();
        assert_eq!(store.keys(), vec!["age", "city"]);
        assert!(!store.has("name"));
    }

    #[test]
    fn unset_missing_key_is_noop() {
        let mut store = person();
        store.unset("missing").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn has_checks_presence_not_truthiness() {
        let mut store = AttributeStore::new();
        store.set("nothing", Value::Null).unwrap();
        store.set("zero", json!(0)).unwrap();
        assert!(store.has("nothing"));
        assert!(store.exists("zero"));
        assert_eq!(store.get_attribute("nothing").unwrap(), &Value::Null);
    }

    #[test]
    fn strict_read_of_missing_key_fails() {
        let store = person();
        let err = store.get_attribute("missing").unwrap_err();
        assert_eq!(
            err,
            AttributeError::UndefinedAttribute {
                key: "missing".into()
            }
        );
    }

    #[test]
    fn indexed_write_and_remove() {
        let mut store = AttributeStore::new();
        store.write("name", json!("John")).unwrap();
        assert_eq!(store["name"], json!("John"));
        assert!(store.exists("name"));

        store.remove("name").unwrap();
        assert!(!store.exists("name"));
        assert_eq!(store["name"], Value::Null);
    }

    #[test]
    fn all_read_only_rejects_every_mutation() {
        let policy = ReadOnlyPolicy::AllReadOnly;
        let mut store = AttributeStore::seeded([("name", json!("John"))], policy);

        for key in ["name", "missing"] {
            let err = store.set(key, json!(1)).unwrap_err();
            assert!(err.is_read_only_violation());
            let err = store.write(key, json!(1)).unwrap_err();
            assert!(err.is_read_only_violation());
            let err = store.unset(key).unwrap_err();
            assert!(err.is_read_only_violation());
            let err = store.remove(key).unwrap_err();
            assert!(err.is_read_only_violation());
        }
        assert_eq!(store.to_array(), person_name_only());
    }

    fn person_name_only() -> IndexMap<String, Value> {
        IndexMap::from([("name".to_string(), json!("John"))])
    }

    #[test]
    fn read_only_keys_policy() {
        let mut store = person().with_policy(ReadOnlyPolicy::for_keys(["age"]));

        store.set("name", json!("Alice")).unwrap();
        assert_eq!(store["name"], json!("Alice"));

        let err = store.set("age", json!(55)).unwrap_err();
        assert_eq!(
            err,
            AttributeError::ReadOnlyViolation {
                key: "age".into(),
                operation: AttributeOperation::Modify,
            }
        );
        let err = store.unset("age").unwrap_err();
        assert_eq!(err.to_string(), "Cannot unset read-only attribute: age");
        assert_eq!(store["age"], json!(30));
    }

    #[test]
    fn fill_applies_entries_up_to_first_violation() {
        let policy = ReadOnlyPolicy::for_keys(["b"]);
        let mut store: AttributeStore = AttributeStore::new().with_policy(policy);

        let err = store
            .fill([("a", json!(1)), ("b", json!(2)), ("c", json!(3))])
            .unwrap_err();

        assert_eq!(err.key(), "b");
        assert_eq!(store.keys(), vec!["a"]);
        assert!(!store.has("c"));
    }

    #[test]
    fn reads_ignore_policy() {
        let store = person().with_policy(ReadOnlyPolicy::AllReadOnly);
        assert_eq!(store.get("name"), Some(&json!("John")));
        assert!(store.has("age"));
        assert_eq!(store.keys(), vec!["name", "age"]);
    }

    #[test]
    fn to_json_matches_to_array() {
        let store = person();
        let json = store.to_json().unwrap();
        assert_eq!(json, json!({"name": "John", "age": 30}));

        let from_array = serde_json::to_value(store.to_array()).unwrap();
        assert_eq!(json, from_array);
        let rendered = store.to_json_string().unwrap();
        assert_eq!(rendered, r#"{"name":"John","age":30}"#);
    }

    #[test]
    fn replicate_is_independent() {
        let original = person().with_policy(ReadOnlyPolicy::for_keys(["age"]));
        let mut copy = original.replicate();

        assert_eq!(copy.to_array(), original.to_array());
        assert_eq!(copy.policy(), original.policy());

        copy.set("name", json!("Alice")).unwrap();
        copy.set("city", json!("Berlin")).unwrap();
        assert_eq!(original["name"], json!("John"));
        assert!(!original.has("city"));
        assert!(copy.set("age", json!(1)).is_err());
    }

    #[test]
    fn generic_values() {
        let mut store: AttributeStore<u32> = [("a", 1), ("b", 2)].into_iter().collect();
        store.set("c", 3).unwrap();
        assert_eq!(store.get_attribute("c"), Ok(&3));
        let sum: u32 = store.iter().map(|(_, v)| *v).sum();
        assert_eq!(sum, 6);
    }
}
