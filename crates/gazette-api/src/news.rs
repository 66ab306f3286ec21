use anyhow::anyhow;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gazette_db::models::{CommentRow, NewsRow};
use gazette_types::api::{CommentForm, CommentResponse, NewsDetailResponse, NewsItem};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::MaybeUser;

/// Home listing: at most `home_page_size` news items, newest first.
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsItem>>> {
    let db = state.clone();
    let limit = state.home_page_size;

    // Run the blocking DB read off the async runtime
    let rows = tokio::task::spawn_blocking(move || db.db.list_news(limit))
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    let items = rows
        .into_iter()
        .map(news_item_from_row)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(items))
}

/// Detail view: the news item, its comments oldest first, and a blank
/// submission form for authenticated requesters only.
pub async fn detail(
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
    Extension(MaybeUser(claims)): Extension<MaybeUser>,
) -> ApiResult<Json<NewsDetailResponse>> {
    let db = state.clone();
    let nid = news_id.to_string();

    let (news_row, comment_rows) = tokio::task::spawn_blocking(move || {
        let news = db.db.get_news(&nid)?;
        let comments = if news.is_some() {
            db.db.list_comments_for_news(&nid)?
        } else {
            vec![]
        };
        Ok::<_, anyhow::Error>((news, comments))
    })
    .await
    .map_err(|e| anyhow!("spawn_blocking join error: {e}"))??;

    let news_row = news_row.ok_or(ApiError::NotFound)?;

    Ok(Json(NewsDetailResponse {
        news: news_item_from_row(news_row)?,
        comments: comment_rows
            .into_iter()
            .map(comment_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?,
        form: claims.map(|_| CommentForm::default()),
    }))
}

pub(crate) fn news_item_from_row(row: NewsRow) -> anyhow::Result<NewsItem> {
    Ok(NewsItem {
        id: parse_uuid(&row.id, "news id")?,
        title: row.title,
        text: row.text,
        date: parse_timestamp(&row.date, &row.id, "date")?,
    })
}

pub(crate) fn comment_from_row(row: CommentRow) -> anyhow::Result<CommentResponse> {
    Ok(CommentResponse {
        id: parse_uuid(&row.id, "comment id")?,
        news_id: parse_uuid(&row.news_id, "news_id")?,
        author_id: parse_uuid(&row.author_id, "author_id")?,
        author_username: row.author_username,
        text: row.text,
        created: parse_timestamp(&row.created, &row.id, "created")?,
    })
}

fn parse_uuid(raw: &str, what: &str) -> anyhow::Result<Uuid> {
    raw.parse()
        .map_err(|e| anyhow!("corrupt {what} '{raw}': {e}"))
}

fn parse_timestamp(raw: &str, row_id: &str, what: &str) -> anyhow::Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written through sqlite3 directly come out as
            // "YYYY-MM-DD HH:MM:SS" without a timezone. Parse as naive UTC.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| anyhow!("corrupt {what} '{raw}' on row '{row_id}': {e}"))
}
