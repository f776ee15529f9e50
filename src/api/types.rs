//! Wire types for the gallery backend REST API.
//!
//! Fields mirror the backend serializers even where the client does not
//! read them all.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A folder as returned by `GET /folders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A photo as returned by `GET /folders/{id}/photos` and the upload endpoint.
///
/// `folder` is the owning folder id; `folder_name` is the server-side
/// denormalized copy of its name. Both are also carried on the library
/// entries so the flat photo list stays self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Server path or URL of the image file.
    pub image: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub folder: i64,
    #[serde(default)]
    pub folder_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Access/refresh pair returned by `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Response of `POST /token/refresh` (only a fresh access token).
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
}

/// The authenticated user, `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login payload for `POST /token`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration payload for `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}
