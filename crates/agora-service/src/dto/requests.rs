//! Request DTOs for API endpoints
//!
//! Request DTOs implement `Deserialize`, and `Validate` where the endpoint
//! checks its input. Missing string fields deserialize as empty so the
//! "is mandatory" rules report them instead of a JSON error.

use std::borrow::Cow;

use agora_common::auth::credentials::{
    is_strong_password, is_valid_email, is_valid_phone_number, EMAIL_INVALID, EMAIL_REQUIRED,
    FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED, PASSWORD_RULES, PHONE_INVALID, PHONE_REQUIRED,
    USERNAME_REQUIRED,
};
use agora_core::entities::MemberPatch;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// Field rules
// ============================================================================

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn username_present(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", USERNAME_REQUIRED));
    }
    Ok(())
}

fn first_name_present(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", FIRST_NAME_REQUIRED));
    }
    Ok(())
}

fn last_name_present(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", LAST_NAME_REQUIRED));
    }
    Ok(())
}

fn email_rules(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", EMAIL_REQUIRED));
    }
    if !is_valid_email(value) {
        return Err(rule("email", EMAIL_INVALID));
    }
    Ok(())
}

fn phone_rules(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", PHONE_REQUIRED));
    }
    if !is_valid_phone_number(value) {
        return Err(rule("phone", PHONE_INVALID));
    }
    Ok(())
}

fn password_rules(value: &str) -> Result<(), ValidationError> {
    if !is_strong_password(value) {
        return Err(rule("password", PASSWORD_RULES));
    }
    Ok(())
}

/// Blank means "keep the current password" on updates
fn optional_password_rules(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    password_rules(value)
}

fn title_present(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", "Title cannot be empty"));
    }
    Ok(())
}

fn comment_present(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(rule("required", "Comment content cannot be empty"));
    }
    Ok(())
}

/// Flatten validator output into the message list returned to callers,
/// ordered by field name
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map_or_else(|| e.code.to_string(), ToString::to_string)
        })
        .collect()
}

// ============================================================================
// Member Requests
// ============================================================================

/// Registration and admin member-creation request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberRequest {
    /// Accepted for compatibility; ids are always assigned by the store
    pub member_id: Option<i64>,

    #[validate(
        custom(function = "username_present"),
        length(min = 3, max = 50, message = "Username must be between 3 and 50 characters")
    )]
    pub username: String,

    #[validate(custom(function = "first_name_present"))]
    pub first_name: String,

    #[validate(custom(function = "last_name_present"))]
    pub last_name: String,

    #[validate(custom(function = "email_rules"))]
    pub email: String,

    #[validate(custom(function = "phone_rules"))]
    pub phone_number: String,

    #[validate(custom(function = "password_rules"))]
    pub password: String,

    #[validate(custom(function = "password_rules"))]
    pub repeat_password: String,

    /// `user` or `admin`; defaults to `user`
    pub user_role: Option<String>,
}

/// Partial member update (admin edit and own-profile edit)
///
/// Only present fields are applied. `username` and `userRole` are accepted
/// and ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub username: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[validate(custom(function = "email_rules"))]
    pub email: Option<String>,

    #[validate(custom(function = "phone_rules"))]
    pub phone_number: Option<String>,

    /// New identity provider password; blank or absent keeps the current one
    #[validate(custom(function = "optional_password_rules"))]
    pub password: Option<String>,

    pub user_role: Option<String>,
}

impl UpdateMemberRequest {
    /// The profile fields to change
    pub fn patch(&self) -> MemberPatch {
        MemberPatch {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    /// The new password, if a non-blank one was supplied
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Login with username or email
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_identifier: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// `GET /api/auth/check-username` query
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreatePostRequest {
    #[validate(custom(function = "title_present"))]
    pub title: String,

    pub content: String,
}

/// Add comment request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCommentRequest {
    #[validate(custom(function = "comment_present"))]
    pub content: String,
}
