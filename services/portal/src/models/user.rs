//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    validation::{
        optional_text, required_text, validate_account, validate_email, validate_password,
        validate_username,
    },
};

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub account: String,
    pub username: String,
    pub gender: String,
    pub email: String,
    pub password_hash: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub account: String,
    pub username: String,
    pub gender: String,
    pub email: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            account: user.account,
            username: user.username,
            gender: user.gender,
            email: user.email,
            picture: user.picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request for account registration
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub account: Option<String>,
    pub username: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated registration payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub account: String,
    pub username: String,
    pub gender: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<SignupRequest> for NewUser {
    type Error = ApiError;

    fn try_from(req: SignupRequest) -> ApiResult<Self> {
        let account = required_text(req.account, "account")?;
        let password = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::missing_field("password"))?;
        let email = required_text(req.email, "email")?;
        let username = optional_text(req.username).unwrap_or_else(|| account.clone());
        let gender = optional_text(req.gender).unwrap_or_default();

        validate_account(&account).map_err(ApiError::BadRequest)?;
        validate_username(&username).map_err(ApiError::BadRequest)?;
        validate_email(&email).map_err(ApiError::BadRequest)?;
        validate_password(&password).map_err(ApiError::BadRequest)?;

        Ok(Self {
            account,
            username,
            gender,
            email,
            password,
        })
    }
}

/// User login credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub account: Option<String>,
    pub password: Option<String>,
}

/// Request for profile updates; absent fields are left unchanged
#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// Validated profile update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UpdateUser {
    type Error = ApiError;

    fn try_from(req: UpdateUserRequest) -> ApiResult<Self> {
        let username = optional_text(req.username);
        let email = optional_text(req.email);

        if let Some(username) = &username {
            validate_username(username).map_err(ApiError::BadRequest)?;
        }
        if let Some(email) = &email {
            validate_email(email).map_err(ApiError::BadRequest)?;
        }

        Ok(Self {
            username,
            gender: req.gender.map(|g| g.trim().to_string()),
            email,
            picture: req.picture.map(|p| p.trim().to_string()),
        })
    }
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self == &UpdateUser::default()
    }
}

/// Request to change the account password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
