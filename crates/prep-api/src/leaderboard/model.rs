use prep_db::models::{LeaderboardEntryRecord, LeaderboardStatsRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entries returned when no `limit` is given.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub display_name: String,
    pub score: i64,
    pub total_correct: i64,
    pub total_attempt: i64,
    /// Streaks are not tracked per attempt yet; always 0.
    pub day_streak: i64,
    pub earned_rewards: i64,
}

impl From<LeaderboardEntryRecord> for LeaderboardEntry {
    fn from(record: LeaderboardEntryRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            score: record.score,
            total_correct: record.total_correct,
            total_attempt: record.total_attempt,
            day_streak: 0,
            earned_rewards: record.earned_rewards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_users: i64,
    pub average_accuracy: f64,
    pub leaderboard_range: String,
}

impl From<LeaderboardStatsRecord> for LeaderboardStats {
    fn from(record: LeaderboardStatsRecord) -> Self {
        Self {
            total_users: record.total_users,
            average_accuracy: record.average_accuracy,
            leaderboard_range: format!("Top {}", record.range_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub stats: LeaderboardStats,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<String>,
}

impl LeaderboardQuery {
    /// Missing, malformed, or non-positive limits fall back to the default.
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> LeaderboardQuery {
        LeaderboardQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(query(None).limit(), 20);
        assert_eq!(query(Some("5")).limit(), 5);
        assert_eq!(query(Some("0")).limit(), 20);
        assert_eq!(query(Some("-2")).limit(), 20);
        assert_eq!(query(Some("ten")).limit(), 20);
    }

    #[test]
    fn test_entry_from_record() {
        let entry = LeaderboardEntry::from(LeaderboardEntryRecord {
            id: Uuid::nil(),
            display_name: "Asha".to_string(),
            total_correct: 7,
            total_attempt: 9,
            score: 7,
            earned_rewards: 70,
        });

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["displayName"], "Asha");
        assert_eq!(json["totalAttempt"], 9);
        assert_eq!(json["dayStreak"], 0);
        assert_eq!(json["earnedRewards"], 70);
    }

    #[test]
    fn test_stats_range_label() {
        let stats = LeaderboardStats::from(LeaderboardStatsRecord {
            total_users: 3,
            average_accuracy: 0.5,
            range_value: 1,
        });

        assert_eq!(stats.leaderboard_range, "Top 1");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalUsers"], 3);
        assert_eq!(json["averageAccuracy"], 0.5);
    }
}
