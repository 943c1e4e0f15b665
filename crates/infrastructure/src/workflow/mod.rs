pub mod sqlite_queue;

pub use sqlite_queue::SqliteWorkflowQueue;
