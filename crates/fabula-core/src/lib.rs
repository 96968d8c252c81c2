//! Business logic for Fabula.
//!
//! This crate defines the trait seams (`DialogRepository`, `SessionStore`,
//! `CompletionBackend`) and the two services built on them. Concrete
//! implementations live in `fabula-infra`; this crate never performs I/O
//! of its own.

pub mod chat;
pub mod llm;
pub mod story;
