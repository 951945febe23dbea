use serde::{Deserialize, Serialize};

/// A tweet as stored. Owned by `author_id`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub body: String,
    /// Store-assigned `YYYY-MM-DD HH:MM:SS` (UTC).
    pub created_at: String,
}

/// Body of `POST /user/tweets/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweet {
    pub tweet: String,
}

/// One entry of the home feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub username: String,
    pub tweet: String,
    pub date_time: String,
}

/// A tweet with its aggregate counts.
///
/// Returned by `GET /tweets/{id}/` and, as a list, by `GET /user/tweets/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TweetSummary {
    pub tweet: String,
    pub likes: i64,
    pub replies: i64,
    pub date_time: String,
}

/// `GET /tweets/{id}/likes/` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikesView {
    pub likes: Vec<String>,
}

/// One reply, labelled with the replier's display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyEntry {
    pub name: String,
    pub reply: String,
}

/// `GET /tweets/{id}/replies/` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepliesView {
    pub replies: Vec<ReplyEntry>,
}
