//! SessionStore trait definition.
//!
//! Keyed access to a session's running narrative context. The in-process
//! implementation lives in fabula-infra; the trait keeps call sites
//! unchanged if an external keyed store replaces it later, which is why
//! the operations are fallible even though the in-memory backend cannot
//! fail.
//!
//! A turn reads the context, waits on the completion call, then writes
//! the appended context back. Concurrent turns on the same key are not
//! mutually excluded: the writes interleave and the last writer wins.

use fabula_types::error::RepositoryError;

/// Keyed store of narrative-context strings.
pub trait SessionStore: Send + Sync {
    /// The context for `key`, initializing an unseen key to the fixed
    /// opening scene first.
    fn get_or_init(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;

    /// Replace the context for `key`.
    fn update(
        &self,
        key: &str,
        context: String,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
