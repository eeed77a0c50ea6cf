//! Serialized access to the task store and its persistence.
//!
//! [`TaskService`] wraps the store and the task file behind a single
//! [`tokio::sync::Mutex`], so each mutation and its save run as one
//! critical section. Two commands arriving concurrently can never lose
//! an update, and a `list` can never observe a half-applied mutation.
//!
//! A failed save is logged and swallowed: the in-memory list stays
//! authoritative and the user's command still succeeds. Durability
//! resumes on the next successful save.

use tokio::sync::Mutex;

use taskbot_core::{TaskError, TaskFile, TaskStore};

/// The task list and its storage, guarded by a single writer lock.
pub struct TaskService {
    inner: Mutex<Inner>,
}

struct Inner {
    store: TaskStore,
    file: TaskFile,
}

impl TaskService {
    /// Creates a service whose store is loaded from the given task file.
    ///
    /// A missing or unreadable file yields an empty list; startup never
    /// fails on account of the task file.
    #[must_use]
    pub fn new(file: TaskFile) -> Self {
        let store = TaskStore::from_tasks(file.load());
        Self {
            inner: Mutex::new(Inner { store, file }),
        }
    }

    /// Appends a task and persists the list. Returns the new total count.
    pub async fn add(&self, description: impl Into<String>) -> usize {
        let mut inner = self.inner.lock().await;
        let count = inner.store.add(description);
        Self::persist(&inner);
        count
    }

    /// Returns a snapshot of the list as `(position, description)` pairs,
    /// 1-indexed in insertion order.
    pub async fn list(&self) -> Vec<(usize, String)> {
        let inner = self.inner.lock().await;
        inner
            .store
            .entries()
            .into_iter()
            .map(|(position, description)| (position, description.to_string()))
            .collect()
    }

    /// Removes the task at the given 1-indexed position and persists the
    /// list. Returns the removed description and the remaining count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::OutOfRange`] if the position is outside the
    /// list; the store is untouched and nothing is saved.
    pub async fn complete(&self, position: usize) -> Result<(String, usize), TaskError> {
        let mut inner = self.inner.lock().await;
        let description = inner.store.complete(position)?;
        Self::persist(&inner);
        Ok((description, inner.store.len()))
    }

    /// Returns the current task count.
    pub async fn count(&self) -> usize {
        self.inner.lock().await.store.len()
    }

    fn persist(inner: &Inner) {
        if let Err(err) = inner.file.save(inner.store.tasks()) {
            tracing::error!(
                error = %err,
                "failed to save task list; in-memory state remains authoritative"
            );
        }
    }
}
