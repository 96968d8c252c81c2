//! YandexGPT foundation-models completion backend.

pub mod client;
pub mod types;

pub use client::YandexGptBackend;
