//! Shortened URL entity and its activation lifecycle.

use chrono::{DateTime, Utc};

/// A shortened URL mapping.
///
/// Starts active. [`UrlEntity::deactivate`] is the only state transition and it
/// is one-way: no operation turns an inactive entity back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntity {
    pub target_url: String,
    pub key: String,
    pub secret_key: String,
    pub is_active: bool,
    pub clicks: i64,
    /// Assigned by storage on insert.
    pub created_at: Option<DateTime<Utc>>,
}

impl UrlEntity {
    /// Creates a fresh, active entity with zero clicks.
    pub fn new(target_url: String, key: String, secret_key: String) -> Self {
        Self {
            target_url,
            key,
            secret_key,
            is_active: true,
            clicks: 0,
            created_at: None,
        }
    }

    /// Soft-deletes the entity. Calling it on an inactive entity is a no-op.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn increment_clicks(&mut self) {
        self.clicks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UrlEntity {
        UrlEntity::new(
            "https://example.com".to_string(),
            "abc12".to_string(),
            "abc12_XyZ98765".to_string(),
        )
    }

    #[test]
    fn test_new_entity_defaults() {
        let url = sample();

        assert_eq!(url.target_url, "https://example.com");
        assert_eq!(url.key, "abc12");
        assert_eq!(url.secret_key, "abc12_XyZ98765");
        assert!(url.is_active);
        assert_eq!(url.clicks, 0);
        assert!(url.created_at.is_none());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut url = sample();

        url.deactivate();
        assert!(!url.is_active);

        url.deactivate();
        assert!(!url.is_active);
    }

    #[test]
    fn test_increment_clicks() {
        let mut url = sample();

        for _ in 0..3 {
            url.increment_clicks();
        }

        assert_eq!(url.clicks, 3);
    }
}
