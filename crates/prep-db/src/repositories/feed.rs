use sqlx::{Executor, Postgres};

use crate::models::FeedPostRecord;

/// All posts, newest first.
pub async fn list_posts<'e, E>(executor: E) -> Result<Vec<FeedPostRecord>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, post_type, title, body, image_url, tags, author, cta, likes, comments, read_time, created_at
            FROM feed_posts
            ORDER BY created_at DESC
        "#,
    )
    .fetch_all(executor)
    .await
}
