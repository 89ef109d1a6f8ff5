//! PostgreSQL user repository tests. Need `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use blog_platform::domain::entities::NewUser;
use blog_platform::domain::repositories::UserRepository;
use blog_platform::error::AppError;
use blog_platform::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$hash".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    }
}

#[sqlx::test(migrations = "migrations/auth")]
#[ignore]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("ada", "ada@example.com")).await.unwrap();

    assert!(user.is_active);
    assert_eq!(
        repo.find_by_username("ada").await.unwrap().unwrap().id,
        user.id
    );
    assert_eq!(
        repo.find_by_id(user.id).await.unwrap().unwrap().email,
        "ada@example.com"
    );
    assert!(repo.username_exists("ada").await.unwrap());
    assert!(repo.email_exists("ADA@example.com").await.unwrap());
    assert!(!repo.email_exists("grace@example.com").await.unwrap());
}

#[sqlx::test(migrations = "migrations/auth")]
#[ignore]
async fn test_duplicate_username_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("ada", "ada@example.com")).await.unwrap();

    let result = repo.create(new_user("ada", "other@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
