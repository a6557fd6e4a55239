use chrono::{DateTime, Utc};
use prep_console::model::ExamCategory;
use prep_db::models::{ExamProfileRecord, SubjectRecord, TopicRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::models::UserView, error::ApiError};

/// Per-exam progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamProfileView {
    pub exam: ExamCategory,
    pub total_questions: i32,
    pub total_correct: i32,
    pub total_time_seconds: i32,
    pub overall_level: i32,
    pub current_streak_days: i32,
    pub longest_streak_days: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl ExamProfileView {
    /// Profile for a learner with no recorded activity.
    pub const fn empty(exam: ExamCategory) -> Self {
        Self {
            exam,
            total_questions: 0,
            total_correct: 0,
            total_time_seconds: 0,
            overall_level: 0,
            current_streak_days: 0,
            longest_streak_days: 0,
            last_login_at: None,
        }
    }

    pub const fn from_record(exam: ExamCategory, record: &ExamProfileRecord) -> Self {
        Self {
            exam,
            total_questions: record.total_questions,
            total_correct: record.total_correct,
            total_time_seconds: record.total_time_seconds,
            overall_level: record.overall_level,
            current_streak_days: record.current_streak_days,
            longest_streak_days: record.longest_streak_days,
            last_login_at: record.last_login_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserView,
    pub exam_profile: ExamProfileView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub id: Uuid,
    pub exam: ExamCategory,
    pub name: String,
    pub is_active: bool,
}

impl TryFrom<SubjectRecord> for SubjectView {
    type Error = ApiError;

    fn try_from(record: SubjectRecord) -> Result<Self, Self::Error> {
        let exam = record
            .exam
            .parse()
            .map_err(|e| ApiError::Internal(format!("subject {}: {e}", record.id)))?;

        Ok(Self {
            id: record.id,
            exam,
            name: record.name,
            is_active: record.is_active,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicView {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl From<TopicRecord> for TopicView {
    fn from(record: TopicRecord) -> Self {
        Self {
            id: record.id,
            subject_id: record.subject_id,
            name: record.name,
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubjectsQuery {
    pub exam: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsQuery {
    pub subject_id: Option<String>,
}
