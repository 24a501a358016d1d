//! Task descriptors accepted by the ordering engine.
//!
//! These types are the source of truth for what a task list looks like
//! in memory.  They can be serialised to/from a JSON array of
//! `{ "name": ..., "depends_on": [...] }` objects.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TaskDescriptor
// ---------------------------------------------------------------------------

/// A single named step plus the names of the steps that must precede it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDescriptor {
    /// Unique identifier among the descriptors of one task list.
    pub name: String,
    /// Names of tasks that must appear earlier in the order.
    /// Listing order is significant for tie-breaking.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl TaskDescriptor {
    /// Task with no prerequisites.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
        }
    }

    /// Task that depends on each of `deps`, in the order given.
    pub fn with_deps<I, S>(name: impl Into<String>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            depends_on: deps.into_iter().map(Into::into).collect(),
        }
    }
}

/// The build pipeline used by the CLI `demo` command:
/// `compile`, `lint`, `package` and `test`, with `check_build_script`
/// only ever referenced as a dependency.
pub fn build_pipeline() -> Vec<TaskDescriptor> {
    vec![
        TaskDescriptor::with_deps("compile", ["check_build_script", "lint"]),
        TaskDescriptor::with_deps("lint", ["check_build_script"]),
        TaskDescriptor::with_deps("package", ["compile"]),
        TaskDescriptor::with_deps("test", ["package"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depends_on_defaults_to_empty() {
        let task: TaskDescriptor = serde_json::from_str(r#"{ "name": "lint" }"#).unwrap();
        assert_eq!(task, TaskDescriptor::new("lint"));
    }

    #[test]
    fn dependency_order_is_preserved() {
        let task: TaskDescriptor =
            serde_json::from_str(r#"{ "name": "compile", "depends_on": ["lint", "check"] }"#)
                .unwrap();
        assert_eq!(task.depends_on, vec!["lint", "check"]);
    }

    #[test]
    fn null_dependency_is_rejected_by_serde() {
        let parsed: Result<TaskDescriptor, _> =
            serde_json::from_str(r#"{ "name": "compile", "depends_on": ["lint", null] }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<TaskDescriptor, _> =
            serde_json::from_str(r#"{ "name": "compile", "needs": ["lint"] }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_name_is_rejected() {
        let parsed: Result<TaskDescriptor, _> = serde_json::from_str(r#"{ "depends_on": [] }"#);
        assert!(parsed.is_err());
    }
}
