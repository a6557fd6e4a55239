use chrono::{DateTime, Utc};
use prep_db::models::FeedPostRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub post_type: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub cta: String,
    pub likes: i32,
    pub comments: i32,
    pub read_time: String,
}

impl From<FeedPostRecord> for FeedPost {
    fn from(record: FeedPostRecord) -> Self {
        let tags = record
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        Self {
            id: record.id,
            post_type: record.post_type,
            title: record.title,
            body: record.body,
            image_url: record.image_url.filter(|url| !url.is_empty()),
            tags,
            created_at: record.created_at,
            author: record.author,
            cta: record.cta,
            likes: record.likes,
            comments: record.comments,
            read_time: record.read_time,
        }
    }
}
