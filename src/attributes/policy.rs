//! Read-only policies for attribute stores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which attribute keys reject mutation.
///
/// On the wire the policy keeps the loose configuration shape:
/// `true` is [`ReadOnlyPolicy::AllReadOnly`], `false` is
/// [`ReadOnlyPolicy::AllWritable`] and a list of strings is
/// [`ReadOnlyPolicy::ReadOnlyKeys`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "PolicyShape", into = "PolicyShape")]
pub enum ReadOnlyPolicy {
    /// Every key may be mutated.
    #[default]
    AllWritable,
    /// No key may be mutated, including keys not yet present.
    AllReadOnly,
    /// Only the listed keys are read-only (exact match).
    ReadOnlyKeys(BTreeSet<String>),
}

impl ReadOnlyPolicy {
    /// Policy protecting exactly the given keys.
    pub fn for_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        ReadOnlyPolicy::ReadOnlyKeys(keys.into_iter().map(Into::into).collect())
    }

    /// Check whether `key` is read-only under this policy.
    pub fn is_read_only(&self, key: &str) -> bool {
        match self {
            ReadOnlyPolicy::AllWritable => false,
            ReadOnlyPolicy::AllReadOnly => true,
            ReadOnlyPolicy::ReadOnlyKeys(keys) => keys.contains(key),
        }
    }

    /// Get human-readable policy name
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadOnlyPolicy::AllWritable => "all_writable",
            ReadOnlyPolicy::AllReadOnly => "all_read_only",
            ReadOnlyPolicy::ReadOnlyKeys(_) => "read_only_keys",
        }
    }
}

impl std::fmt::Display for ReadOnlyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadOnlyPolicy::ReadOnlyKeys(keys) => {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                write!(f, "{}[{}]", self.as_str(), keys.join(", "))
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PolicyShape {
    Flag(bool),
    Keys(Vec<String>),
}

impl From<PolicyShape> for ReadOnlyPolicy {
    fn from(shape: PolicyShape) -> Self {
        match shape {
            PolicyShape::Flag(true) => ReadOnlyPolicy::AllReadOnly,
            PolicyShape::Flag(false) => ReadOnlyPolicy::AllWritable,
            PolicyShape::Keys(keys) => ReadOnlyPolicy::for_keys(keys),
        }
    }
}

impl From<ReadOnlyPolicy> for PolicyShape {
    fn from(policy: ReadOnlyPolicy) -> Self {
        match policy {
            ReadOnlyPolicy::AllWritable => PolicyShape::Flag(false),
            ReadOnlyPolicy::AllReadOnly => PolicyShape::Flag(true),
            ReadOnlyPolicy::ReadOnlyKeys(keys) => PolicyShape::Keys(keys.into_iter().collect()),
        }
    }
}
