use std::fmt;

use chrono::{DateTime, Utc};
use prep_console::model::{AdminProfile, ExamCategory, UserRole};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment: {0}")]
    Env(#[from] envy::Error),
    #[error("ADMIN_USER_ID is not a valid UUID: {0}")]
    AdminId(String),
    #[error("ADMIN_PRIMARY_EXAM is not a known exam: {0}")]
    AdminExam(String),
    #[error("ADMIN_ROLE must be ADMIN or SUPER_ADMIN, got {0}")]
    AdminRole(String),
    #[error("ADMIN_CREATED_AT is not an RFC 3339 timestamp: {0}")]
    AdminCreatedAt(String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Process configuration, read from environment variables.
///
/// Field names map to upper-case variables (`pg_url` -> `PG_URL`).
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    pub app_name: String,
    pub app_version: String,
    #[serde(default)]
    pub env: Environment,
    pub http_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    pub pg_url: String,
    #[serde(default = "default_pg_pool_max")]
    pub pg_pool_max: u32,

    pub jwt_user_secret: String,
    pub jwt_admin_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub jwt_token_ttl_minutes: i64,

    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    #[serde(default = "default_admin_display_name")]
    pub admin_display_name: String,
    #[serde(default = "default_admin_user_id")]
    pub admin_user_id: String,
    #[serde(default = "default_admin_primary_exam")]
    pub admin_primary_exam: String,
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    #[serde(default = "default_admin_permissions")]
    pub admin_permissions: String,
    pub admin_created_at: Option<String>,

    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_pg_pool_max() -> u32 {
    10
}

const fn default_token_ttl_minutes() -> i64 {
    24 * 60
}

fn default_admin_display_name() -> String {
    "Super Admin".to_string()
}

fn default_admin_user_id() -> String {
    "00000000-0000-0000-0000-000000000001".to_string()
}

fn default_admin_primary_exam() -> String {
    ExamCategory::NeetPg.as_str().to_string()
}

fn default_admin_role() -> String {
    UserRole::Admin.as_str().to_string()
}

fn default_admin_permissions() -> String {
    "subjects.read,subjects.write".to_string()
}

fn default_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

const fn default_true() -> bool {
    true
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Build from explicit `(NAME, value)` pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Comma separated `ALLOWED_ORIGINS`, trimmed, empties dropped.
    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        split_list(&self.allowed_origins)
    }

    /// Validate the bootstrap admin fields.
    ///
    /// An unset `ADMIN_CREATED_AT` resolves to the current time.
    pub fn admin_profile(&self) -> Result<AdminProfile, ConfigError> {
        let id = Uuid::parse_str(self.admin_user_id.trim())
            .map_err(|_| ConfigError::AdminId(self.admin_user_id.clone()))?;

        let primary_exam = self
            .admin_primary_exam
            .parse::<ExamCategory>()
            .map_err(|_| ConfigError::AdminExam(self.admin_primary_exam.clone()))?;

        let role = self
            .admin_role
            .parse::<UserRole>()
            .ok()
            .filter(UserRole::is_admin)
            .ok_or_else(|| ConfigError::AdminRole(self.admin_role.clone()))?;

        let created_at = match self.admin_created_at.as_deref().map(str::trim) {
            None | Some("") => Utc::now(),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map_err(|_| ConfigError::AdminCreatedAt(raw.to_string()))?
                .with_timezone(&Utc),
        };

        Ok(AdminProfile {
            id,
            display_name: self.admin_display_name.clone(),
            email: self.admin_email.clone(),
            role,
            primary_exam,
            created_at,
            permissions: split_list(&self.admin_permissions),
        })
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("env", &self.env)
            .field("http_port", &self.http_port)
            .field("pg_pool_max", &self.pg_pool_max)
            .field("admin_username", &self.admin_username)
            .field("allowed_origins", &self.allowed_origins)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let base = [
            ("APP_NAME", "prep-api"),
            ("APP_VERSION", "0.1.0"),
            ("HTTP_PORT", "8080"),
            ("PG_URL", "postgres://localhost/prep"),
            ("JWT_USER_SECRET", "user-secret"),
            ("JWT_ADMIN_SECRET", "admin-secret"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "hunter2"),
            ("ADMIN_EMAIL", "root@prep.test"),
        ];

        base.iter()
            .chain(extra)
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_vars(vars(&[])).expect("config");

        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.pg_pool_max, 10);
        assert_eq!(config.jwt_token_ttl_minutes, 1440);
        assert!(config.metrics_enabled);
        assert_eq!(config.parsed_allowed_origins(), ["http://localhost:3000"]);

        let profile = config.admin_profile().expect("profile");
        assert_eq!(profile.id, Uuid::from_u128(1));
        assert_eq!(profile.display_name, "Super Admin");
        assert_eq!(profile.role, UserRole::Admin);
        assert_eq!(profile.primary_exam, ExamCategory::NeetPg);
        assert_eq!(profile.permissions, ["subjects.read", "subjects.write"]);
    }

    #[test]
    fn test_missing_required_variable() {
        let vars = vars(&[])
            .into_iter()
            .filter(|(k, _)| k != "PG_URL")
            .collect::<Vec<_>>();

        assert!(matches!(ApiConfig::from_vars(vars), Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_admin_profile_overrides() {
        let config = ApiConfig::from_vars(vars(&[
            ("ENV", "production"),
            ("ADMIN_ROLE", "super_admin"),
            ("ADMIN_PRIMARY_EXAM", "jee"),
            ("ADMIN_CREATED_AT", "2024-01-15T10:00:00Z"),
            ("ADMIN_PERMISSIONS", " users.read , ,users.write "),
            ("ALLOWED_ORIGINS", "https://a.test, https://b.test"),
        ]))
        .expect("config");

        assert!(config.env.is_production());
        assert_eq!(
            config.parsed_allowed_origins(),
            ["https://a.test", "https://b.test"]
        );

        let profile = config.admin_profile().expect("profile");
        assert_eq!(profile.role, UserRole::SuperAdmin);
        assert_eq!(profile.primary_exam, ExamCategory::Jee);
        assert_eq!(profile.created_at.to_rfc3339(), "2024-01-15T10:00:00+00:00");
        assert_eq!(profile.permissions, ["users.read", "users.write"]);
    }

    #[test]
    fn test_admin_profile_rejects_bad_values() {
        let config = ApiConfig::from_vars(vars(&[("ADMIN_ROLE", "USER")])).expect("config");
        assert!(matches!(config.admin_profile(), Err(ConfigError::AdminRole(_))));

        let config = ApiConfig::from_vars(vars(&[("ADMIN_USER_ID", "42")])).expect("config");
        assert!(matches!(config.admin_profile(), Err(ConfigError::AdminId(_))));

        let config =
            ApiConfig::from_vars(vars(&[("ADMIN_PRIMARY_EXAM", "GRE")])).expect("config");
        assert!(matches!(config.admin_profile(), Err(ConfigError::AdminExam(_))));

        let config =
            ApiConfig::from_vars(vars(&[("ADMIN_CREATED_AT", "yesterday")])).expect("config");
        assert!(matches!(config.admin_profile(), Err(ConfigError::AdminCreatedAt(_))));
    }
}
