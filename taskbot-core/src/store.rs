//! In-memory ordered task list.
//!
//! [`TaskStore`] is the sole source of truth for the task list while the
//! bot process is running. Insertion order is display order, and all
//! outward-facing positions are 1-indexed. Completing a task removes it;
//! there is no per-task status field.

use thiserror::Error;

/// Errors that can occur during task store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// A task position outside `[1, count]` was given.
    #[error("task number {position} is out of range (you have {count} tasks)")]
    OutOfRange {
        /// The 1-indexed position that was requested.
        position: usize,
        /// The number of tasks currently in the list.
        count: usize,
    },
}

/// The authoritative ordered list of task descriptions.
///
/// Descriptions are stored verbatim: duplicates are allowed, and no
/// trimming or length cap is applied. Empty descriptions are accepted
/// here; rejecting them is the command layer's choice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<String>,
}

impl TaskStore {
    /// Creates an empty task store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Creates a store from an already-loaded task list, preserving order.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<String>) -> Self {
        Self { tasks }
    }

    /// Appends a task to the end of the list and returns the new total count.
    ///
    /// Never fails; the description is taken verbatim.
    pub fn add(&mut self, description: impl Into<String>) -> usize {
        self.tasks.push(description.into());
        self.tasks.len()
    }

    /// Returns a snapshot of the list as `(position, description)` pairs,
    /// 1-indexed in insertion order. An empty list yields an empty vec.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, &str)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (i + 1, t.as_str()))
            .collect()
    }

    /// Removes and returns the task at the given 1-indexed position.
    ///
    /// All subsequent tasks shift down by one position; relative order is
    /// preserved. The list is left unchanged on error — positions are
    /// never clamped or wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::OutOfRange`] if `position < 1` or
    /// `position > count`.
    pub fn complete(&mut self, position: usize) -> Result<String, TaskError> {
        if position < 1 || position > self.tasks.len() {
            return Err(TaskError::OutOfRange {
                position,
                count: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(position - 1))
    }

    /// Returns the number of tasks in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the raw descriptions in display order, for persistence.
    #[must_use]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }
}
