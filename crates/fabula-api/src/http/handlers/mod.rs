//! Request handlers, one module per surface.
//!
//! Handlers are thin: extract, delegate to a service, shape the JSON
//! response. No handler holds state across calls.

pub mod chat;
pub mod dialog;
pub mod story;
