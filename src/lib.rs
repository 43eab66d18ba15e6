//! OB Support - Level 1 helper types
//!
//! Two independent building blocks that any type can adopt by composition:
//!
//! - **Attributes** ([`AttributeStore`], [`HasAttributes`]): ordered dynamic
//!   key/value storage with a [`ReadOnlyPolicy`], strict and soft reads,
//!   indexed access, JSON export and replication.
//! - **Context** ([`ContextualError`], [`HasContext`]): an error carrying a
//!   mergeable key/value context next to its message, code and cause.
//!
//! The [`config`] module loads pre-seeded stores from YAML or JSON files.
//!
//! ## Critical Rules
//!
//! 1. **NO WORKSPACE DEPENDENCIES** - Cannot depend on other workspace crates
//! 2. **NO LOGGING IN CORE TYPES** - Only the config loader emits tracing events
//! 3. **SINGLE OWNER** - Mutation takes `&mut self`; no internal locking

pub mod attributes;
pub mod config;
pub mod context;

pub use attributes::{
    AttributeError, AttributeOperation, AttributeStore, HasAttributes, HasReadOnlyAttributes,
    ReadOnlyPolicy,
};
pub use context::{BoxedCause, ContextMap, ContextualError, HasContext};
