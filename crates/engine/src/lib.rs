//! `task-order` crate: task descriptors, the dependency ordering engine,
//! and its error type.

pub mod models;
pub mod error;
pub mod ordering;

pub use models::TaskDescriptor;
pub use error::{OrderingError, Result};
pub use ordering::{compute_ordering, TaskOrdering};
