use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

// -- Session --

/// Bearer token claims. `sub` is the owner identity every match is keyed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

// -- Matches --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMatchResponse {
    #[serde(rename = "MatchId")]
    pub match_id: String,
}

pub const DELETE_SUCCESS: &str = "delete success!";

/// Serializes as the bare JSON string `"delete success!"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteMatchResponse;

impl Serialize for DeleteMatchResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(DELETE_SUCCESS)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub limit: Option<u32>,
    /// Cursor: only matches played strictly before this instant.
    pub before: Option<DateTime<Utc>>,
}
