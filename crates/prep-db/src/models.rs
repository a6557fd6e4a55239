use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Learner account row. `primary_exam` and `role` hold their wire codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub display_name: String,
    pub email: Option<String>,
    pub telegram_id: Option<String>,
    pub primary_exam: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Per user, per exam counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExamProfileRecord {
    pub user_id: Uuid,
    pub exam: String,
    pub total_questions: i32,
    pub total_correct: i32,
    pub total_time_seconds: i32,
    pub overall_level: i32,
    pub current_streak_days: i32,
    pub longest_streak_days: i32,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubjectRecord {
    pub id: Uuid,
    pub exam: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopicRecord {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
    pub is_active: bool,
}

/// One ranked learner, aggregated over their question attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaderboardEntryRecord {
    pub id: Uuid,
    pub display_name: String,
    pub total_correct: i64,
    pub total_attempt: i64,
    pub score: i64,
    pub earned_rewards: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaderboardStatsRecord {
    pub total_users: i64,
    pub average_accuracy: f64,
    /// Highest single-attempt score, 0 or 1.
    pub range_value: i32,
}

/// Feed post row. `tags` is a comma separated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedPostRecord {
    pub id: Uuid,
    pub post_type: String,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub tags: String,
    pub author: String,
    pub cta: String,
    pub likes: i32,
    pub comments: i32,
    pub read_time: String,
    pub created_at: DateTime<Utc>,
}
