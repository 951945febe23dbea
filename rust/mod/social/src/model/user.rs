use serde::{Deserialize, Serialize};

/// A registered account. Immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Store-assigned row id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login name, unique across all users.
    pub username: String,

    /// Argon2id PHC string. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub gender: String,
}

/// Body of `POST /register/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
}

/// Body of `POST /login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
}
