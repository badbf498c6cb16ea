use serde::{Deserialize, Serialize};

use super::school::SchoolSummary;
use crate::error::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Admin,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<SchoolSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub password_confirm: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<i64>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }
        validate_new_password(&self.password, &self.password_confirm)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetVerifyRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
    #[serde(skip)]
    pub new_password_confirm: String,
}

impl PasswordResetVerifyRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.code.trim().is_empty() {
            return Err(ValidationError::Required { field: "code" });
        }
        validate_new_password(&self.new_password, &self.new_password_confirm)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    #[serde(skip)]
    pub new_password_confirm: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current_password.is_empty() {
            return Err(ValidationError::Required { field: "current password" });
        }
        validate_new_password(&self.new_password, &self.new_password_confirm)
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
