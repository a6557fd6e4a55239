use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseEnumError;

/// Examinations the platform serves content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamCategory {
    NeetPg,
    NeetUg,
    Jee,
    Upsc,
}

impl ExamCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NeetPg => "NEET_PG",
            Self::NeetUg => "NEET_UG",
            Self::Jee => "JEE",
            Self::Upsc => "UPSC",
        }
    }

    /// Human readable form, e.g. `NEET PG`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl FromStr for ExamCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEET_PG" => Ok(Self::NeetPg),
            "NEET_UG" => Ok(Self::NeetUg),
            "JEE" => Ok(Self::Jee),
            "UPSC" => Ok(Self::Upsc),
            _ => Err(ParseEnumError::new("exam", s)),
        }
    }
}

impl fmt::Display for ExamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role carried in signed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Whether the role may use the admin console.
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "SUPER_ADMIN" | "SUPERADMIN" => Ok(Self::SuperAdmin),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Manager,
    Cashier,
}

impl AdminRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Cashier => "cashier",
        }
    }
}

impl From<UserRole> for AdminRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin => Self::SuperAdmin,
            UserRole::Admin | UserRole::User => Self::Admin,
        }
    }
}

impl FromStr for AdminRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "cashier" => Ok(Self::Cashier),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a console operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminUserStatus {
    Active,
    Inactive,
    Invited,
    Suspended,
}

impl AdminUserStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Invited => "invited",
            Self::Suspended => "suspended",
        }
    }
}

impl FromStr for AdminUserStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "invited" => Ok(Self::Invited),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

impl fmt::Display for AdminUserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bootstrap admin identity, injected from configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub primary_exam: ExamCategory,
    pub created_at: DateTime<Utc>,
    pub permissions: Vec<String>,
}

/// A console operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub status: AdminUserStatus,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new operator. All are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: AdminRole,
    pub status: AdminUserStatus,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<AdminRole>,
    pub status: Option<AdminUserStatus>,
}

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query over the directory. A zero page or page size falls back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUserFilter {
    pub page: usize,
    pub page_size: usize,
    pub statuses: Vec<AdminUserStatus>,
    pub role: Option<AdminRole>,
    pub username: Option<String>,
}

impl Default for AdminUserFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            statuses: Vec::new(),
            role: None,
            username: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserList {
    pub items: Vec<AdminUser>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteReceipt {
    pub invited: bool,
    pub expires_at: DateTime<Utc>,
}
