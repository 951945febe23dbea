use serde::{Deserialize, Serialize};

/// JWT claims payload.
///
/// Without a configured TTL the token carries only `username`, so the same
/// user always receives the same token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username of the holder.
    pub username: String,

    /// Issued at (unix timestamp), present only when tokens expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration (unix timestamp), present only when tokens expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}
