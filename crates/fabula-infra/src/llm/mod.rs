//! Completion backend implementations.

pub mod yandex;

pub use yandex::YandexGptBackend;
