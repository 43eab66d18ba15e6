//! Dynamic attribute storage
//!
//! Owning types embed an [`AttributeStore`] by value and implement
//! [`HasAttributes`] to expose map-like, JSON-serializable properties:
//!
//! ```
//! use ob_support::{AttributeStore, HasAttributes, ReadOnlyPolicy};
//! use serde_json::json;
//!
//! struct Person {
//!     attributes: AttributeStore,
//! }
//!
//! impl HasAttributes for Person {
//!     type Value = serde_json::Value;
//!
//!     fn attribute_store(&self) -> &AttributeStore {
//!         &self.attributes
//!     }
//!
//!     fn attribute_store_mut(&mut self) -> &mut AttributeStore {
//!         &mut self.attributes
//!     }
//!
//!     fn from_attribute_store(attributes: AttributeStore) -> Self {
//!         Self { attributes }
//!     }
//! }
//!
//! let mut person = Person::from_attribute_store(
//!     AttributeStore::new().with_policy(ReadOnlyPolicy::for_keys(["id"])),
//! );
//! person.fill([("name", json!("John"))]).unwrap();
//! assert!(person.set("id", json!(7)).is_err());
//! ```

mod error;
mod policy;
mod store;

pub use error::{AttributeError, AttributeOperation};
pub use policy::ReadOnlyPolicy;
pub use store::AttributeStore;

use indexmap::IndexMap;
use serde::Serialize;

/// Capability of a type that owns an [`AttributeStore`].
///
/// Only the three accessors are required; every store operation is
/// provided on top of them.
pub trait HasAttributes: Sized {
    type Value;

    fn attribute_store(&self) -> &AttributeStore<Self::Value>;

    fn attribute_store_mut(&mut self) -> &mut AttributeStore<Self::Value>;

    /// Build a new owner around `store`. Used by [`replicate`](Self::replicate).
    fn from_attribute_store(store: AttributeStore<Self::Value>) -> Self;

    /// Fill multiple attributes at once. Not transactional, see
    /// [`AttributeStore::fill`].
    fn fill<I, K>(&mut self, attributes: I) -> Result<&mut Self, AttributeError>
    where
        I: IntoIterator<Item = (K, Self::Value)>,
        K: Into<String>,
    {
        self.attribute_store_mut().fill(attributes)?;
        Ok(self)
    }

    fn get(&self, key: &str) -> Option<&Self::Value> {
        self.attribute_store().get(key)
    }

    fn set(&mut self, key: impl Into<String>, value: Self::Value) -> Result<(), AttributeError> {
        self.attribute_store_mut().set(key, value)
    }

    fn has(&self, key: &str) -> bool {
        self.attribute_store().has(key)
    }

    fn unset(&mut self, key: &str) -> Result<(), AttributeError> {
        self.attribute_store_mut().unset(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.attribute_store().keys()
    }

    fn get_attribute(&self, key: &str) -> Result<&Self::Value, AttributeError> {
        self.attribute_store().get_attribute(key)
    }

    fn get_optional_attribute(&self, key: &str) -> Option<&Self::Value> {
        self.attribute_store().get_optional_attribute(key)
    }

    fn read(&self, index: &str) -> Option<&Self::Value> {
        self.attribute_store().read(index)
    }

    fn write(
        &mut self,
        index: impl Into<String>,
        value: Self::Value,
    ) -> Result<(), AttributeError> {
        self.attribute_store_mut().write(index, value)
    }

    fn exists(&self, index: &str) -> bool {
        self.attribute_store().exists(index)
    }

    fn remove(&mut self, index: &str) -> Result<(), AttributeError> {
        self.attribute_store_mut().remove(index)
    }

    fn to_array(&self) -> IndexMap<String, Self::Value>
    where
        Self::Value: Clone,
    {
        self.attribute_store().to_array()
    }

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>
    where
        Self::Value: Serialize,
    {
        self.attribute_store().to_json()
    }

    /// New owner of the same type with a copy of the attributes and policy.
    fn replicate(&self) -> Self
    where
        Self::Value: Clone,
    {
        Self::from_attribute_store(self.attribute_store().replicate())
    }
}

/// Read-only configuration of an attribute owner.
pub trait HasReadOnlyAttributes {
    fn read_only_attributes(&self) -> &ReadOnlyPolicy;
}

impl<T: HasAttributes> HasReadOnlyAttributes for T {
    fn read_only_attributes(&self) -> &ReadOnlyPolicy {
        self.attribute_store().policy()
    }
}

impl<V> HasAttributes for AttributeStore<V> {
    type Value = V;

    fn attribute_store(&self) -> &AttributeStore<V> {
        self
    }

    fn attribute_store_mut(&mut self) -> &mut AttributeStore<V> {
        self
    }

    fn from_attribute_store(store: AttributeStore<V>) -> Self {
        store
    }
}
