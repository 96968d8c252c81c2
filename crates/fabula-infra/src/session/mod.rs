//! Session storage for the story service.

pub mod memory;

pub use memory::InMemorySessionStore;
