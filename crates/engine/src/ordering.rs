//! Dependency ordering: build once from a task list, then order once.
//!
//! Construction rules enforced:
//! 1. Task names must be non-empty and unique within the list.
//! 2. Dependency names must be non-empty; they need not be declared as tasks.
//!
//! The in-degree of a name counts how many times it is *listed as a
//! dependency*, not how many dependencies it has.  The traversal therefore
//! walks from tasks nothing depends on toward their prerequisites, and the
//! result is reversed so prerequisites come first.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, instrument, warn};

use crate::error::{OrderingError, Result};
use crate::models::TaskDescriptor;

/// Order `tasks` in one call.
///
/// # Errors
/// Any construction error from [`TaskOrdering::new`], or
/// [`OrderingError::CycleDetected`] from [`TaskOrdering::compute_ordering`].
pub fn compute_ordering<I>(tasks: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = TaskDescriptor>,
{
    TaskOrdering::new(tasks)?.compute_ordering()
}

/// Single-use ordering engine over one task list.
#[derive(Debug, Clone)]
pub struct TaskOrdering {
    /// Task name -> dependency names, as listed.
    graph: HashMap<String, Vec<String>>,
    /// Every referenced name, in first-seen order.  Indexes `in_degree`.
    names: Vec<String>,
    /// Name -> position in `names`.
    slots: HashMap<String, usize>,
    /// Times each name is listed as a dependency.
    in_degree: Vec<usize>,
}

impl TaskOrdering {
    /// Build the dependency graph and in-degree table.
    ///
    /// # Errors
    /// - [`OrderingError::EmptyTaskName`] if a descriptor has an empty name.
    /// - [`OrderingError::EmptyDependencyName`] if a dependency name is empty.
    /// - [`OrderingError::DuplicateTask`] if two descriptors share a name.
    #[instrument(skip_all)]
    pub fn new<I>(tasks: I) -> Result<Self>
    where
        I: IntoIterator<Item = TaskDescriptor>,
    {
        let mut ordering = Self {
            graph: HashMap::new(),
            names: Vec::new(),
            slots: HashMap::new(),
            in_degree: Vec::new(),
        };

        for (position, task) in tasks.into_iter().enumerate() {
            if task.name.is_empty() {
                return Err(OrderingError::EmptyTaskName { position });
            }
            if ordering.graph.contains_key(&task.name) {
                return Err(OrderingError::DuplicateTask(task.name));
            }
            if task.depends_on.iter().any(String::is_empty) {
                return Err(OrderingError::EmptyDependencyName { task: task.name });
            }

            ordering.slot(&task.name);
            for dep in &task.depends_on {
                let slot = ordering.slot(dep);
                ordering.in_degree[slot] += 1;
            }
            ordering.graph.insert(task.name, task.depends_on);
        }

        debug!(
            tasks = ordering.graph.len(),
            names = ordering.names.len(),
            "dependency graph built"
        );
        Ok(ordering)
    }

    /// Number of distinct names, declared or referenced.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// How many times `name` is listed as a dependency, if it is known.
    pub fn in_degree(&self, name: &str) -> Option<usize> {
        self.slots.get(name).map(|&slot| self.in_degree[slot])
    }

    /// Produce an order in which every dependency precedes the tasks
    /// listing it.  Consumes the engine; build a new one per task list.
    ///
    /// # Errors
    /// [`OrderingError::CycleDetected`] if some names can never be resolved.
    /// No partial order is returned.
    #[instrument(skip(self), fields(names = self.names.len()))]
    pub fn compute_ordering(mut self) -> Result<Vec<String>> {
        // Seed with names nothing depends on, in table order.
        let mut queue: VecDeque<usize> = self
            .in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(slot, _)| slot)
            .collect();

        let mut visited: Vec<usize> = Vec::with_capacity(self.names.len());

        while let Some(slot) = queue.pop_front() {
            visited.push(slot);

            if let Some(deps) = self.graph.get(&self.names[slot]) {
                for dep in deps {
                    let dep_slot = self.slots[dep.as_str()];
                    let degree = &mut self.in_degree[dep_slot];
                    *degree -= 1;
                    if *degree == 0 {
                        debug!(task = %dep, "dependency resolved");
                        queue.push_back(dep_slot);
                    }
                }
            }
        }

        // Anything never reaching zero sits on or behind a cycle.
        if visited.len() != self.names.len() {
            let unresolved: Vec<String> = self
                .names
                .iter()
                .zip(&self.in_degree)
                .filter(|(_, &degree)| degree > 0)
                .map(|(name, _)| name.clone())
                .collect();
            warn!(?unresolved, "dependency cycle detected");
            return Err(OrderingError::CycleDetected { unresolved });
        }

        let order: Vec<String> = visited
            .into_iter()
            .rev()
            .map(|slot| std::mem::take(&mut self.names[slot]))
            .collect();

        info!("ordered {} tasks: {:?}", order.len(), order);
        Ok(order)
    }

    /// Position of `name` in the in-degree table, inserting it at zero.
    fn slot(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_owned());
        self.slots.insert(name.to_owned(), slot);
        self.in_degree.push(0);
        slot
    }
}
