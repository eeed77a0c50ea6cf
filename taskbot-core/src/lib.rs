//! Task list state and durable persistence for Taskbot.
//!
//! This crate knows nothing about chat platforms. It holds the in-memory
//! task list ([`store::TaskStore`]) and materializes it to disk with
//! backup-protected saves ([`persist::TaskFile`]).

pub mod persist;
pub mod store;

pub use persist::{PersistError, TaskFile};
pub use store::{TaskError, TaskStore};
