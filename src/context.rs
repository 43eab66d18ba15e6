//! Errors carrying a mergeable diagnostic context.
//!
//! [`ContextualError`] adds a key/value context map to the usual
//! message/code/cause triple. Other error types can adopt the same
//! capability by embedding a [`ContextMap`] and implementing [`HasContext`].

use indexmap::IndexMap;
use serde_json::Value;
use std::error::Error as StdError;
use thiserror::Error;

/// Diagnostic key/value pairs attached to an error.
pub type ContextMap = IndexMap<String, Value>;

/// Boxed cause of a [`ContextualError`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Capability of an error type that carries a [`ContextMap`].
pub trait HasContext {
    fn context(&self) -> &ContextMap;

    fn context_mut(&mut self) -> &mut ContextMap;

    /// Merge `additional` into the context, last write wins per key.
    ///
    /// Returns the same receiver.
    fn merge_context<I, K, V>(&mut self, additional: I) -> &mut Self
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.context_mut()
            .extend(additional.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Error with a message, a numeric code, an optional cause and a context map.
#[derive(Error, Debug, Default)]
#[error("{message}")]
pub struct ContextualError {
    message: String,
    code: i64,
    #[source]
    cause: Option<BoxedCause>,
    context: ContextMap,
}

impl ContextualError {
    /// Create an error with an empty context and code 0
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Create an error with every field set directly.
    pub fn from_parts(
        message: impl Into<String>,
        context: ContextMap,
        code: i64,
        cause: Option<BoxedCause>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            cause,
            context,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Chain a prior error as this error's source.
    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Builder form of [`HasContext::merge_context`]. Consumes `self`; use
    /// `merge_context` when the same instance must be returned.
    pub fn with_context<I, K, V>(mut self, additional: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.merge_context(additional);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// This error followed by its cause chain.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        let first: &(dyn StdError + 'static) = self;
        std::iter::successors(Some(first), |&err| err.source())
    }
}

impl HasContext for ContextualError {
    fn context(&self) -> &ContextMap {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ContextMap {
        &mut self.context
    }
}
