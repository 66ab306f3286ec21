use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// JWT claims shared between token creation (auth handlers) and token
/// validation (middleware). Canonical definition lives here in gazette-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
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
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- News --

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Detail view: one news item, its comments oldest-first, and the comment
/// submission form. `form` is present only for authenticated requesters;
/// anonymous responses omit the key entirely.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsDetailResponse {
    pub news: NewsItem,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentForm>,
}

// -- Comments --

/// The one-field submission payload for comment create/edit. Doubles as the
/// bound-form echo inside validation error responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

// -- Validation --

pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body of a 422 response: the submitted form as bound, plus per-field
/// error messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormErrorResponse {
    pub form: CommentForm,
    pub errors: FieldErrors,
}
