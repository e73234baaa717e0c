//! In-memory adapters for task management.

mod task;

pub use task::InMemoryTaskStore;
