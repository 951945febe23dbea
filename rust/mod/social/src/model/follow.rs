use serde::{Deserialize, Serialize};

/// A directed edge: `follower_id` sees the posts of `following_id`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: i64,
    pub following_id: i64,
}

/// Entry of the following / followers lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameEntry {
    pub name: String,
}
