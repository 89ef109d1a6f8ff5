//! DTOs for the auth service endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::Registration;
use crate::domain::entities::User;

/// Letters, digits and `@ . + - _`.
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    ))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(
        min = 8,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    #[validate(must_match(other = "password2", message = "Password fields didn't match."))]
    pub password: String,

    pub password2: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Body of `POST /login/` and `POST /token/`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// The refresh token is accepted but not stored anywhere.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_joined: user.date_joined,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "username": "ana.lopez",
            "email": "ana@example.com",
            "password": "correct horse",
            "password2": "correct horse"
        })
    }

    #[test]
    fn test_valid_registration() {
        let req = register(valid());
        assert!(req.validate().is_ok());
        assert_eq!(req.first_name, "");
    }

    #[test]
    fn test_password_mismatch() {
        let mut body = valid();
        body["password2"] = json!("something else");

        let errors = register(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_short_password() {
        let mut body = valid();
        body["password"] = json!("short");
        body["password2"] = json!("short");

        let errors = register(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_username_characters() {
        for bad in ["ana lopez", "ana/lopez", ""] {
            let mut body = valid();
            body["username"] = json!(bad);
            let errors = register(body).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("username"), "{bad:?}");
        }

        let mut body = valid();
        body["username"] = json!("a".repeat(151));
        assert!(register(body).validate().is_err());

        let mut body = valid();
        body["username"] = json!("ana+test@x_y-z");
        assert!(register(body).validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut body = valid();
        body["email"] = json!("not-an-email");

        let errors = register(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_blank_login_fields() {
        let req: LoginRequest =
            serde_json::from_value(json!({"username": "", "password": ""})).unwrap();
        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
