//! Wire types for the rolodex REST API.
//!
//! All types match the JSON bodies of `/users` and
//! `/users/{id}/social-media`. Field names use camelCase via
//! `#[serde(rename_all = "camelCase")]`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Server-assigned identifier as it appears on the wire.
///
/// Backends emit either auto-increment integers or opaque strings
/// (ObjectIds, UUIDs). Both are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

// ── Users ────────────────────────────────────────────────────────────

/// User record: from `GET /users`, `GET /users/{id}`, and write responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /users` and `PATCH /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

// ── Social media ─────────────────────────────────────────────────────

/// Social-media link: from `GET /users/{id}/social-media` and the nested POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaResponse {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Body of `POST /users/{id}/social-media`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaRequest {
    pub name: String,
    pub url: String,
}

// ── Error bodies ─────────────────────────────────────────────────────

/// Error body shape used by most backends for validation failures.
///
/// `message` may be a single string or a list of field messages.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::One(s) => s,
            Self::Many(v) => v.join("; "),
        }
    }
}
