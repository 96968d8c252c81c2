//! Chat service: persisted dialogs with replayed history.

pub mod repository;
pub mod service;

pub use repository::DialogRepository;
pub use service::ChatService;
