//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlEntity;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for shortened URLs.
///
/// Uniqueness of `key` and `secret_key` is enforced by table constraints, so a
/// concurrent insert of the same key fails with [`AppError::KeyAlreadyExists`]
/// instead of producing a duplicate. Each query checks out its own pooled
/// connection.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    key: String,
    secret_key: String,
    target_url: String,
    is_active: bool,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlEntity {
    fn from(row: UrlRow) -> Self {
        UrlEntity {
            target_url: row.target_url,
            key: row.key,
            secret_key: row.secret_key,
            is_active: row.is_active,
            clicks: row.clicks,
            created_at: Some(row.created_at),
        }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, url: UrlEntity) -> Result<UrlEntity, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (key, secret_key, target_url, is_active, clicks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING key, secret_key, target_url, is_active, clicks, created_at
            "#,
        )
        .bind(&url.key)
        .bind(&url.secret_key)
        .bind(&url.target_url)
        .bind(url.is_active)
        .bind(url.clicks)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<UrlEntity>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT key, secret_key, target_url, is_active, clicks, created_at
            FROM urls
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlEntity::from))
    }

    async fn get_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlEntity>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT key, secret_key, target_url, is_active, clicks, created_at
            FROM urls
            WHERE secret_key = $1
            "#,
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlEntity::from))
    }

    async fn update(&self, url: UrlEntity) -> Result<Option<UrlEntity>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET target_url = $2,
                clicks = $3,
                is_active = is_active AND $4
            WHERE key = $1
            RETURNING key, secret_key, target_url, is_active, clicks, created_at
            "#,
        )
        .bind(&url.key)
        .bind(&url.target_url)
        .bind(url.clicks)
        .bind(url.is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlEntity::from))
    }

    async fn get_all(&self) -> Result<Vec<UrlEntity>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT key, secret_key, target_url, is_active, clicks, created_at
            FROM urls
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlEntity::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
