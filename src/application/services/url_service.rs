//! Short URL creation, lookup, click accounting and deactivation.

use std::iter;
use std::sync::Arc;

use crate::domain::entities::UrlEntity;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::key_generator::{
    DEFAULT_KEY_LENGTH, EXTENDED_KEY_LENGTH, generate_key, generate_secret_key, is_reserved_key,
    validate_custom_key,
};
use crate::utils::url_validator::check_url;
use serde_json::json;
use tracing::{info, warn};

/// Candidate keys tried per length before escalating or giving up.
pub const MAX_KEY_ATTEMPTS: usize = 10;

/// Service orchestrating the lifecycle of shortened URLs.
///
/// # Concurrency
///
/// Key uniqueness is ultimately guaranteed by the repository: a lost race
/// between the existence check and the insert comes back as
/// [`AppError::KeyAlreadyExists`] and is retried with a fresh key.
///
/// Click counting is a read-modify-write of the entity passed in by the
/// caller. Concurrent redirects of the same key can overwrite each other and
/// under-count. This is an accepted trade-off.
pub struct UrlService<R: UrlRepository + ?Sized> {
    url_repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    pub fn new(url_repository: Arc<R>) -> Self {
        Self { url_repository }
    }

    /// Creates a short URL with a randomly generated key.
    ///
    /// Tries up to [`MAX_KEY_ATTEMPTS`] keys of length 5, then up to
    /// [`MAX_KEY_ATTEMPTS`] keys of length 12.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the target URL fails validation
    /// - [`AppError::KeySpaceExhausted`] if every candidate key was taken
    /// - [`AppError::Internal`] on storage errors
    pub async fn create_short_url(&self, target_url: &str) -> Result<UrlEntity, AppError> {
        info!(target_url, "Creating short URL");
        ensure_valid_target(target_url)?;

        let candidate_lengths = iter::repeat_n(DEFAULT_KEY_LENGTH, MAX_KEY_ATTEMPTS)
            .chain(iter::repeat_n(EXTENDED_KEY_LENGTH, MAX_KEY_ATTEMPTS));

        for length in candidate_lengths {
            let key = generate_key(length);

            if is_reserved_key(&key) || self.url_repository.get_by_key(&key).await?.is_some() {
                continue;
            }

            let secret_key = generate_secret_key(&key);
            let url = UrlEntity::new(target_url.to_string(), key, secret_key);

            match self.url_repository.create(url).await {
                Ok(created) => {
                    info!(key = %created.key, target_url, "Successfully created short URL");
                    return Ok(created);
                }
                Err(AppError::KeyAlreadyExists { details, .. }) => {
                    warn!(%details, "Key taken between check and insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(target_url, "Key space exhausted");
        Err(AppError::key_space_exhausted(2 * MAX_KEY_ATTEMPTS))
    }

    /// Creates a short URL under a caller-chosen key.
    ///
    /// The key is checked against every stored entity, deactivated ones
    /// included, so a retired key is never handed to a new owner.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the target URL fails validation
    /// - [`AppError::Validation`] if the key format is invalid
    /// - [`AppError::KeyAlreadyExists`] if the key is taken
    pub async fn create_custom_short_url(
        &self,
        target_url: &str,
        custom_key: &str,
    ) -> Result<UrlEntity, AppError> {
        info!(target_url, custom_key, "Creating custom short URL");
        ensure_valid_target(target_url)?;
        validate_custom_key(custom_key)?;

        if self.url_repository.get_by_key(custom_key).await?.is_some() {
            warn!(custom_key, "Attempt to create duplicate custom key");
            return Err(AppError::key_already_exists(custom_key));
        }

        let secret_key = generate_secret_key(custom_key);
        let url = UrlEntity::new(target_url.to_string(), custom_key.to_string(), secret_key);

        let created = self
            .url_repository
            .create(url)
            .await
            .map_err(|e| match e {
                AppError::KeyAlreadyExists { .. } => AppError::key_already_exists(custom_key),
                other => other,
            })?;

        info!(custom_key, target_url, "Successfully created custom short URL");
        Ok(created)
    }

    /// Returns the active entity for `key`, or `None` if it is missing or
    /// deactivated. The two cases are deliberately indistinguishable.
    pub async fn get_url_by_key(&self, key: &str) -> Result<Option<UrlEntity>, AppError> {
        let url = self
            .url_repository
            .get_by_key(key)
            .await?
            .filter(|url| url.is_active);

        if url.is_some() {
            info!(key, "Found active URL for key");
        } else {
            info!(key, "No active URL found for key");
        }

        Ok(url)
    }

    /// Adds one click to `url` and persists it.
    ///
    /// The caller is expected to pass an entity it just obtained from
    /// [`Self::get_url_by_key`]; activity is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entity vanished from storage.
    pub async fn increment_click_count(&self, mut url: UrlEntity) -> Result<UrlEntity, AppError> {
        url.increment_clicks();
        let key = url.key.clone();

        let updated = self.url_repository.update(url).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "key": key }))
        })?;

        info!(key = %updated.key, clicks = updated.clicks, "Updated click count");
        Ok(updated)
    }

    /// Returns the active entity owning `secret_key`, or `None`.
    pub async fn get_url_by_secret_key(
        &self,
        secret_key: &str,
    ) -> Result<Option<UrlEntity>, AppError> {
        let preview = secret_key_preview(secret_key);
        let url = self
            .url_repository
            .get_by_secret_key(secret_key)
            .await?
            .filter(|url| url.is_active);

        if url.is_some() {
            info!(secret_key_preview = preview, "Found active URL for secret key");
        } else {
            info!(secret_key_preview = preview, "No active URL found for secret key");
        }

        Ok(url)
    }

    /// Deactivates the entity owning `secret_key`.
    ///
    /// Already-deactivated entities are found too, so repeating the call
    /// succeeds and returns the same inactive entity. Returns `None` only if
    /// the secret key never existed.
    pub async fn delete_url_by_secret_key(
        &self,
        secret_key: &str,
    ) -> Result<Option<UrlEntity>, AppError> {
        let preview = secret_key_preview(secret_key);
        info!(secret_key_preview = preview, "Deactivating URL by secret key");

        let Some(mut url) = self.url_repository.get_by_secret_key(secret_key).await? else {
            warn!(secret_key_preview = preview, "Attempt to deactivate non-existent URL");
            return Ok(None);
        };

        url.deactivate();
        let updated = self.url_repository.update(url).await?;

        if updated.is_some() {
            info!(secret_key_preview = preview, "Successfully deactivated URL");
        }

        Ok(updated)
    }

    /// Lists every stored URL, deactivated ones included.
    pub async fn list_urls(&self) -> Result<Vec<UrlEntity>, AppError> {
        self.url_repository.get_all().await
    }

    /// Returns true if the storage backend answers.
    pub async fn health_check(&self) -> bool {
        match self.url_repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                false
            }
        }
    }
}

fn ensure_valid_target(target_url: &str) -> Result<(), AppError> {
    check_url(target_url).map(|_| ()).map_err(|e| {
        warn!(target_url, reason = %e, "Rejected target URL");
        AppError::invalid_url(
            format!("Invalid URL format: {}", target_url),
            json!({ "reason": e.to_string() }),
        )
    })
}

/// The key part of a secret key, safe to write to logs.
fn secret_key_preview(secret_key: &str) -> &str {
    secret_key
        .rsplit_once('_')
        .map_or("", |(key, _)| key)
}
