//! Process-local URL repository.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data lives only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::UrlEntity;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    by_key: HashMap<String, UrlEntity>,
    /// secret key -> key
    secret_index: HashMap<String, String>,
    /// Keys in insertion order.
    order: Vec<String>,
}

/// In-memory repository guarded by a single async `RwLock`.
///
/// The uniqueness check and the insert happen under the same write lock, so
/// concurrent creators of the same key cannot both succeed.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    store: RwLock<Store>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, mut url: UrlEntity) -> Result<UrlEntity, AppError> {
        let mut store = self.store.write().await;

        if store.by_key.contains_key(&url.key) {
            return Err(AppError::key_already_exists(&url.key));
        }
        if store.secret_index.contains_key(&url.secret_key) {
            return Err(AppError::key_already_exists(&url.key));
        }

        url.created_at = Some(Utc::now());
        store
            .secret_index
            .insert(url.secret_key.clone(), url.key.clone());
        store.order.push(url.key.clone());
        store.by_key.insert(url.key.clone(), url.clone());

        Ok(url)
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<UrlEntity>, AppError> {
        Ok(self.store.read().await.by_key.get(key).cloned())
    }

    async fn get_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlEntity>, AppError> {
        let store = self.store.read().await;

        Ok(store
            .secret_index
            .get(secret_key)
            .and_then(|key| store.by_key.get(key))
            .cloned())
    }

    async fn update(&self, url: UrlEntity) -> Result<Option<UrlEntity>, AppError> {
        let mut store = self.store.write().await;

        let Some(stored) = store.by_key.get_mut(&url.key) else {
            return Ok(None);
        };

        stored.target_url = url.target_url;
        stored.clicks = url.clicks;
        stored.is_active = stored.is_active && url.is_active;

        Ok(Some(stored.clone()))
    }

    async fn get_all(&self) -> Result<Vec<UrlEntity>, AppError> {
        let store = self.store.read().await;

        Ok(store
            .order
            .iter()
            .filter_map(|key| store.by_key.get(key))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
