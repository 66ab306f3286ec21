/// Database row types — these map directly to SQLite rows.
/// Distinct from gazette-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct NewsRow {
    pub id: String,
    pub title: String,
    pub text: String,
    pub date: String,
}

pub struct CommentRow {
    pub id: String,
    pub news_id: String,
    pub author_id: String,
    pub author_username: String,
    pub text: String,
    pub created: String,
}
