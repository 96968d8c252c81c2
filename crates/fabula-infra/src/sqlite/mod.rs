//! SQLite persistence for the chat service.

pub mod dialog;
pub mod pool;

pub use dialog::SqliteDialogRepository;
pub use pool::DatabasePool;
