use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS news (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            text        TEXT NOT NULL,
            date        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_news_date
            ON news(date);

        CREATE TABLE IF NOT EXISTS comments (
            id          TEXT PRIMARY KEY,
            news_id     TEXT NOT NULL REFERENCES news(id) ON DELETE CASCADE,
            author_id   TEXT NOT NULL REFERENCES users(id),
            text        TEXT NOT NULL,
            created     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_comments_news
            ON comments(news_id, created);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
