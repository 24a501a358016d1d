//! Engine-level error types.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderingError>;

/// Errors produced by the ordering engine (construction + ordering).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    // ------ Construction errors ------

    /// A task descriptor has an empty name.
    #[error("task at position {position} has an empty name")]
    EmptyTaskName { position: usize },

    /// A task lists an empty string among its dependencies.
    #[error("task '{task}' lists an empty dependency name")]
    EmptyDependencyName { task: String },

    /// Two task descriptors share the same name.
    #[error("duplicate task name: '{0}'")]
    DuplicateTask(String),

    // ------ Ordering errors ------

    /// The traversal could not resolve every name; the graph has a cycle.
    #[error(
        "dependency cycle detected, unable to order tasks: {}",
        unresolved.join(", ")
    )]
    CycleDetected {
        /// Names left unresolved when the traversal ran dry.
        unresolved: Vec<String>,
    },
}

impl OrderingError {
    /// True for the ordering-time cycle failure.
    pub fn is_cycle(&self) -> bool {
        matches!(self, OrderingError::CycleDetected { .. })
    }
}
