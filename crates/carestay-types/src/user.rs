//! Users, roles, and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{PERSON_NAME_REGEX, PHONE_REGEX};
use crate::Resource;

/// Role of an authenticated user.
///
/// Serialized with its capitalised variant name (`"Patient"`), matching the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// A patient booking care.
    #[default]
    Patient,
    /// A care provider attending appointments.
    Provider,
    /// A facility administrator.
    Admin,
}

impl Role {
    /// Returns the dashboard path a user with this role lands on after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Provider => "/provider/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "Patient"),
            Role::Provider => write!(f, "Provider"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for User {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A user embedded in another resource (e.g. the patient of an appointment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Email, when the server includes it.
    #[serde(default)]
    pub email: Option<String>,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserFilter {
    /// Only users with this role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Login form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// Creates a login payload.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(
        length(min = 2, max = 100, message = "Name must be 2-100 characters"),
        regex(path = *PERSON_NAME_REGEX, message = "Name contains invalid characters")
    )]
    pub name: String,
    /// Account email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Account password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Must equal `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,
    /// Requested role.
    pub role: Role,
    /// Optional contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX, message = "Enter a valid phone number"))]
    pub phone: Option<String>,
}

/// Token and user returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque bearer token.
    #[serde(alias = "access_token")]
    pub token: String,
    /// The authenticated user.
    pub user: User,
}
