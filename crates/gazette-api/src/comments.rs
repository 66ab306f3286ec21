use axum::{
    Extension, Json,
    extract::{Path, State},
    response::Redirect,
};
use uuid::Uuid;

use gazette_types::api::{Claims, CommentForm};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::moderation;

/// Create a comment on a news item. Text goes through the moderation
/// filter; on success the client is bounced back to the detail view's
/// comments section.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<CommentForm>,
) -> ApiResult<Redirect> {
    state
        .db
        .get_news(&news_id.to_string())?
        .ok_or(ApiError::NotFound)?;

    let errors = moderation::validate_comment_text(&form.text);
    if !errors.is_empty() {
        return Err(ApiError::Validation { form, errors });
    }

    let comment_id = Uuid::new_v4();
    let created = chrono::Utc::now().to_rfc3339();
    state.db.insert_comment(
        &comment_id.to_string(),
        &news_id.to_string(),
        &claims.sub.to_string(),
        &form.text,
        &created,
    )?;

    Ok(redirect_to_comments(&news_id.to_string()))
}

/// Edit a comment's text. The lookup is scoped to the requester, so a
/// comment authored by someone else reads as not-found and nothing changes.
pub async fn edit_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<CommentForm>,
) -> ApiResult<Redirect> {
    let row = state
        .db
        .get_comment_for_author(&comment_id.to_string(), &claims.sub.to_string())?
        .ok_or(ApiError::NotFound)?;

    let errors = moderation::validate_comment_text(&form.text);
    if !errors.is_empty() {
        return Err(ApiError::Validation { form, errors });
    }

    state
        .db
        .update_comment_text(&comment_id.to_string(), &claims.sub.to_string(), &form.text)?;

    Ok(redirect_to_comments(&row.news_id))
}

/// Delete a comment, owner only. Same not-found masking as edit.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Redirect> {
    let row = state
        .db
        .get_comment_for_author(&comment_id.to_string(), &claims.sub.to_string())?
        .ok_or(ApiError::NotFound)?;

    state
        .db
        .delete_comment(&comment_id.to_string(), &claims.sub.to_string())?;

    Ok(redirect_to_comments(&row.news_id))
}

fn redirect_to_comments(news_id: &str) -> Redirect {
    Redirect::to(&format!("/news/{news_id}#comments"))
}
