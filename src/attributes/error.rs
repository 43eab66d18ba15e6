//! Attribute store errors.

use thiserror::Error;

/// Mutating operation rejected by a read-only policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperation {
    /// Insert or overwrite (`set`, `write`, `fill`).
    Modify,
    /// Removal (`unset`, `remove`).
    Unset,
}

impl AttributeOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeOperation::Modify => "modify",
            AttributeOperation::Unset => "unset",
        }
    }
}

impl std::fmt::Display for AttributeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by [`AttributeStore`](super::AttributeStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Cannot {operation} read-only attribute: {key}")]
    ReadOnlyViolation {
        key: String,
        operation: AttributeOperation,
    },

    #[error("Undefined attribute: {key}")]
    UndefinedAttribute { key: String },
}

impl AttributeError {
    /// The attribute key the error refers to.
    pub fn key(&self) -> &str {
        match self {
            AttributeError::ReadOnlyViolation { key, .. } => key,
            AttributeError::UndefinedAttribute { key } => key,
        }
    }

    pub fn is_read_only_violation(&self) -> bool {
        matches!(self, AttributeError::ReadOnlyViolation { .. })
    }

    pub fn is_undefined_attribute(&self) -> bool {
        matches!(self, AttributeError::UndefinedAttribute { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = AttributeError::ReadOnlyViolation {
            key: "age".into(),
            operation: AttributeOperation::Modify,
        };
        assert_eq!(err.to_string(), "Cannot modify read-only attribute: age");

        let err = AttributeError::ReadOnlyViolation {
            key: "age".into(),
            operation: AttributeOperation::Unset,
        };
        assert_eq!(err.to_string(), "Cannot unset read-only attribute: age");

        let err = AttributeError::UndefinedAttribute {
            key: "missing".into(),
        };
        assert_eq!(err.to_string(), "Undefined attribute: missing");
    }

    #[test]
    fn key_and_kind() {
        let err = AttributeError::UndefinedAttribute { key: "x".into() };
        assert_eq!(err.key(), "x");
        assert!(err.is_undefined_attribute());
        assert!(!err.is_read_only_violation());
    }
}
