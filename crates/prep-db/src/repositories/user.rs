use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{ExamProfileRecord, UserRecord};

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<UserRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, display_name, email, telegram_id, primary_exam, role, created_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_telegram_id<'e, E>(
    executor: E,
    telegram_id: &str,
) -> Result<Option<UserRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, display_name, email, telegram_id, primary_exam, role, created_at
            FROM users
            WHERE telegram_id = $1
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(executor)
    .await
}

/// Insert a learner signed up through Telegram.
pub async fn create_telegram_user<'e, E>(
    executor: E,
    telegram_id: &str,
    display_name: &str,
    primary_exam: &str,
    role: &str,
) -> Result<UserRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO users (id, display_name, telegram_id, primary_exam, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, display_name, email, telegram_id, primary_exam, role, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(display_name)
    .bind(telegram_id)
    .bind(primary_exam)
    .bind(role)
    .fetch_one(executor)
    .await
}

/// Create an empty exam profile. Existing rows are left untouched.
pub async fn create_exam_profile<'e, E>(executor: E, user_id: Uuid, exam: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO exam_profiles (user_id, exam, last_login_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, exam) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(exam)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find_exam_profile<'e, E>(
    executor: E,
    user_id: Uuid,
    exam: &str,
) -> Result<Option<ExamProfileRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, exam, total_questions, total_correct, total_time_seconds,
                   overall_level, current_streak_days, longest_streak_days, last_login_at
            FROM exam_profiles
            WHERE user_id = $1 AND exam = $2
        "#,
    )
    .bind(user_id)
    .bind(exam)
    .fetch_optional(executor)
    .await
}

pub async fn touch_last_login<'e, E>(executor: E, user_id: Uuid, exam: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE exam_profiles
            SET last_login_at = NOW()
            WHERE user_id = $1 AND exam = $2
        "#,
    )
    .bind(user_id)
    .bind(exam)
    .execute(executor)
    .await?;

    Ok(())
}
