use sqlx::PgPool;
use std::sync::Arc;
use tinyurl::domain::entities::UrlEntity;
use tinyurl::domain::repositories::UrlRepository;
use tinyurl::error::AppError;
use tinyurl::infrastructure::persistence::PgUrlRepository;

fn sample(key: &str, secret_key: &str) -> UrlEntity {
    UrlEntity::new(
        "https://example.com".to_string(),
        key.to_string(),
        secret_key.to_string(),
    )
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_url(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let created = repo.create(sample("abc12", "abc12_AbCd1234")).await.unwrap();

    assert_eq!(created.key, "abc12");
    assert_eq!(created.secret_key, "abc12_AbCd1234");
    assert_eq!(created.target_url, "https://example.com");
    assert!(created.is_active);
    assert_eq!(created.clicks, 0);
    assert!(created.created_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_by_key_and_secret_key(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let created = repo.create(sample("abc12", "abc12_AbCd1234")).await.unwrap();

    let by_key = repo.get_by_key("abc12").await.unwrap();
    let by_secret = repo.get_by_secret_key("abc12_AbCd1234").await.unwrap();

    assert_eq!(by_key, Some(created.clone()));
    assert_eq!(by_secret, Some(created));
    assert!(repo.get_by_key("nope1").await.unwrap().is_none());
    assert!(repo.get_by_secret_key("nope1_x").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_key_is_key_already_exists(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.create(sample("abc12", "abc12_first000")).await.unwrap();

    let result = repo.create(sample("abc12", "abc12_second00")).await;

    match result {
        Err(AppError::KeyAlreadyExists { details, .. }) => {
            assert_eq!(details["constraint"], "urls_key_key");
        }
        other => panic!("expected KeyAlreadyExists, got {other:?}"),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_clicks_and_deactivate(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let mut url = repo.create(sample("abc12", "abc12_AbCd1234")).await.unwrap();

    url.clicks = 5;
    url.deactivate();
    let updated = repo.update(url).await.unwrap().unwrap();

    assert_eq!(updated.clicks, 5);
    assert!(!updated.is_active);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_cannot_reactivate(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let mut url = repo.create(sample("abc12", "abc12_AbCd1234")).await.unwrap();

    url.deactivate();
    repo.update(url.clone()).await.unwrap();

    url.is_active = true;
    let updated = repo.update(url).await.unwrap().unwrap();

    assert!(!updated.is_active);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_missing_returns_none(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.update(sample("ghost", "ghost_00000000")).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_all_and_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.create(sample("first", "first_00000000")).await.unwrap();
    repo.create(sample("second", "second_0000000")).await.unwrap();

    let keys: Vec<String> = repo
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|url| url.key)
        .collect();

    assert_eq!(keys, vec!["first", "second"]);
    assert!(repo.ping().await.is_ok());
}
