use chrono::{DateTime, Utc};
use prep_console::model::{AdminProfile, ExamCategory, UserRole};
use prep_db::models::UserRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TelegramAuthRequest {
    #[validate(length(min = 1, max = 64, message = "is required"))]
    pub telegram_id: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub display_name: String,
    pub exam: ExamCategory,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<String>,
    pub primary_exam: ExamCategory,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for UserView {
    type Error = ApiError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let primary_exam = record
            .primary_exam
            .parse()
            .map_err(|e| ApiError::Internal(format!("user {}: {e}", record.id)))?;
        let role = record
            .role
            .parse()
            .map_err(|e| ApiError::Internal(format!("user {}: {e}", record.id)))?;

        Ok(Self {
            id: record.id,
            display_name: record.display_name,
            email: record.email,
            telegram_id: record.telegram_id,
            primary_exam,
            role,
            created_at: record.created_at,
        })
    }
}

impl From<&AdminProfile> for UserView {
    fn from(profile: &AdminProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name.clone(),
            email: Some(profile.email.clone()),
            telegram_id: None,
            primary_exam: profile.primary_exam,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserView,
}
