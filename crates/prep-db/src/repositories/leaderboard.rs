use sqlx::{Executor, Postgres};

use crate::models::{LeaderboardEntryRecord, LeaderboardStatsRecord};

/// Top `limit` learners by correct answers. Ties keep the higher correct count first.
pub async fn list_entries<'e, E>(executor: E, limit: i64) -> Result<Vec<LeaderboardEntryRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                u.id,
                u.display_name,
                SUM(CASE WHEN a.is_correct THEN 1 ELSE 0 END)::BIGINT AS total_correct,
                COUNT(*) AS total_attempt,
                SUM(CASE WHEN a.is_correct THEN 1 ELSE 0 END)::BIGINT AS score,
                (COALESCE(SUM(CASE WHEN a.is_correct THEN 1 ELSE 0 END), 0) * 10)::BIGINT AS earned_rewards
            FROM question_attempts a
            JOIN users u ON u.id = a.user_id
            GROUP BY u.id, u.display_name
            ORDER BY score DESC, total_correct DESC, u.display_name
            LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Aggregates over every attempt. An empty table yields zeros.
pub async fn stats<'e, E>(executor: E) -> Result<LeaderboardStatsRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                COUNT(DISTINCT user_id) AS total_users,
                COALESCE(AVG(CASE WHEN is_correct THEN 1.0 ELSE 0 END), 0)::FLOAT8 AS average_accuracy,
                COALESCE(MAX(CASE WHEN is_correct THEN 1 ELSE 0 END), 0)::INT4 AS range_value
            FROM question_attempts
        "#,
    )
    .fetch_one(executor)
    .await
}
