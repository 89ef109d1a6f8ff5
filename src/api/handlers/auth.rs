//! Handlers for the auth service: accounts and JWT tokens.

use axum::{Extension, Json, body::Bytes, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{
    AccessResponse, LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RefreshRequest,
    RegisterRequest, RegisterResponse, UserResponse,
};
use crate::api::middleware::AuthUser;
use crate::application::services::TokenPair;
use crate::error::AppError;
use crate::state::AuthState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /register/`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "ana",
///   "email": "ana@example.com",
///   "password": "correct horse",
///   "password2": "correct horse",
///   "first_name": "Ana",
///   "last_name": "López"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with field details for invalid input, a password mismatch or
/// a username or email that is already taken.
pub async fn register_handler(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state.auth_service.register(payload.into()).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            message: "User created successfully",
        }),
    ))
}

/// Checks credentials and returns the user with a token pair.
///
/// # Endpoint
///
/// `POST /login/`
///
/// # Errors
///
/// Returns 401 for unknown users, wrong passwords and inactive accounts.
pub async fn login_handler(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (user, tokens) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: user.into(),
        refresh: tokens.refresh,
        access: tokens.access,
    }))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /me/` (Bearer access token required)
pub async fn me_handler(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserResponse> {
    Json(user.into())
}

/// Acknowledges a logout.
///
/// Tokens are not revoked server-side; the client discards them and they
/// expire on their own.
///
/// # Endpoint
///
/// `POST /logout/` (Bearer access token required)
pub async fn logout_handler(
    Extension(AuthUser(user)): Extension<AuthUser>,
    body: Bytes,
) -> Json<MessageResponse> {
    // The body is optional and never rejected.
    let with_refresh = serde_json::from_slice::<LogoutRequest>(&body)
        .ok()
        .and_then(|req| req.refresh)
        .is_some_and(|token| !token.is_empty());
    tracing::info!(user_id = user.id, with_refresh, "User logged out");

    Json(MessageResponse {
        message: "Logout successful. Please discard your tokens on the client side.",
    })
}

/// Issues a token pair for valid credentials.
///
/// # Endpoint
///
/// `POST /token/`
pub async fn token_obtain_handler(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    payload.validate()?;

    let (_, tokens) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(tokens))
}

/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// `POST /token/refresh/`
///
/// # Errors
///
/// Returns 401 when `refresh` is not a valid unexpired refresh token.
pub async fn token_refresh_handler(
    State(state): State<AuthState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AccessResponse>, AppError> {
    payload.validate()?;

    let access = state.auth_service.refresh(&payload.refresh)?;

    Ok(Json(AccessResponse { access }))
}
