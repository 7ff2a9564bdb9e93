//! Repository trait for shortened URL storage.

use crate::domain::entities::UrlEntity;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for [`UrlEntity`] records.
///
/// Lookups return entities regardless of `is_active`; filtering by activity
/// is the service's job. Implementations must enforce global uniqueness of
/// both `key` and `secret_key` atomically with the insert.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new entity and returns it with storage-assigned fields populated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyAlreadyExists`] if the key or secret key is taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, url: UrlEntity) -> Result<UrlEntity, AppError>;

    /// Finds an entity by its public key, active or not.
    async fn get_by_key(&self, key: &str) -> Result<Option<UrlEntity>, AppError>;

    /// Finds an entity by its secret key, active or not.
    async fn get_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlEntity>, AppError>;

    /// Persists `target_url`, `clicks` and `is_active` of the entity matched by `key`.
    ///
    /// An inactive stored entity stays inactive even if `url.is_active` is true.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlEntity))` with the stored state after the update
    /// - `Ok(None)` if no entity has that key
    async fn update(&self, url: UrlEntity) -> Result<Option<UrlEntity>, AppError>;

    /// Returns every stored entity, including deactivated ones.
    async fn get_all(&self) -> Result<Vec<UrlEntity>, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
