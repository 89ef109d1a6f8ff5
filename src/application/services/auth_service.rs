//! User registration, login and token handling for the auth service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::application::services::token_service::{TokenPair, TokenService, TokenType};
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Already-validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Service for account creation and credential checks.
///
/// Passwords are hashed with bcrypt on the blocking thread pool. Logout is
/// client-side only: tokens stay valid until they expire.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repository: Arc<R>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            tokens,
            bcrypt_cost,
        }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a field message when the username
    /// or email is already taken.
    pub async fn register(&self, input: Registration) -> Result<User, AppError> {
        if self.repository.username_exists(&input.username).await? {
            return Err(AppError::field(
                "username",
                "A user with that username already exists.",
            ));
        }

        if self.repository.email_exists(&input.email).await? {
            return Err(AppError::field(
                "email",
                "A user with that email already exists.",
            ));
        }

        let password_hash = hash_password(input.password, self.bcrypt_cost).await?;

        let new_user = NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
        };

        // A concurrent registration can still win the race to the unique index.
        self.repository.create(new_user).await.map_err(|e| match e {
            AppError::Conflict { .. } => {
                AppError::field("username", "A user with that username already exists.")
            }
            other => other,
        })
    }

    /// Checks credentials and returns the active user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown username, a wrong
    /// password or an inactive account, without saying which.
    pub async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(bad_credentials)?;

        let valid = verify_password(password.to_string(), user.password_hash.clone()).await?;

        if !valid || !user.is_active {
            return Err(bad_credentials());
        }

        Ok(user)
    }

    /// Checks credentials and issues a token pair.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, TokenPair), AppError> {
        let user = self.authenticate_credentials(username, password).await?;
        let pair = self.tokens.issue_pair(user.id, Utc::now())?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, pair))
    }

    /// Exchanges a refresh token for a new access token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        Ok(self
            .tokens
            .issue(claims.user_id, TokenType::Access, Utc::now())?)
    }

    /// Resolves an access token to its active user.
    pub async fn user_for_access_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token, TokenType::Access)?;

        match self.repository.find_by_id(claims.user_id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AppError::unauthorized(
                "User not found",
                json!({ "code": "user_not_found" }),
            )),
        }
    }
}

fn bad_credentials() -> AppError {
    AppError::unauthorized(
        "No active account found with the given credentials",
        json!({}),
    )
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password hashing task failed",
                json!({ "reason": e.to_string() }),
            )
        })?
        .map_err(|e| {
            AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
        })
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password check task failed",
                json!({ "reason": e.to_string() }),
            )
        })?;

    // A malformed stored hash never authenticates.
    Ok(outcome.unwrap_or(false))
}
