use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{SubjectRecord, TopicRecord};

/// Subjects, optionally restricted to one exam, ordered by name. Inactive rows are included.
pub async fn list_subjects<'e, E>(executor: E, exam: Option<&str>) -> Result<Vec<SubjectRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, exam, name, is_active
            FROM subjects
            WHERE $1::VARCHAR IS NULL OR exam = $1
            ORDER BY name
        "#,
    )
    .bind(exam)
    .fetch_all(executor)
    .await
}

/// Every topic of a subject, ordered by name.
pub async fn list_topics<'e, E>(executor: E, subject_id: Uuid) -> Result<Vec<TopicRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, name, is_active
            FROM topics
            WHERE subject_id = $1
            ORDER BY name
        "#,
    )
    .bind(subject_id)
    .fetch_all(executor)
    .await
}
