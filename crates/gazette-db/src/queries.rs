use crate::Database;
use crate::models::{CommentRow, NewsRow, UserRow};
use anyhow::Result;

const COMMENT_COLUMNS: &str = "c.id, c.news_id, c.author_id, u.username, c.text, c.created";

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password, created_at FROM users WHERE username = ?1",
            )?;

            let row = stmt
                .query_row([username], |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    // -- News --

    pub fn insert_news(&self, id: &str, title: &str, text: &str, date: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO news (id, title, text, date) VALUES (?1, ?2, ?3, ?4)",
                (id, title, text, date),
            )?;
            Ok(())
        })
    }

    /// Home page listing: newest first, capped at `limit`.
    pub fn list_news(&self, limit: u32) -> Result<Vec<NewsRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, text, date FROM news ORDER BY date DESC LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(NewsRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        text: row.get(2)?,
                        date: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_news(&self, id: &str) -> Result<Option<NewsRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, title, text, date FROM news WHERE id = ?1")?;

            let row = stmt
                .query_row([id], |row| {
                    Ok(NewsRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        text: row.get(2)?,
                        date: row.get(3)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    // -- Comments --

    pub fn insert_comment(
        &self,
        id: &str,
        news_id: &str,
        author_id: &str,
        text: &str,
        created: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, news_id, author_id, text, created)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, news_id, author_id, text, created),
            )?;
            Ok(())
        })
    }

    /// Comments on one news item, oldest first.
    pub fn list_comments_for_news(&self, news_id: &str) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            // JOIN users to fetch author_username in a single query (eliminates N+1)
            let mut stmt = conn.prepare(&format!(
                "SELECT {COMMENT_COLUMNS}
                 FROM comments c
                 LEFT JOIN users u ON c.author_id = u.id
                 WHERE c.news_id = ?1
                 ORDER BY c.created ASC",
            ))?;

            let rows = stmt
                .query_map([news_id], map_comment_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Look a comment up as seen by `author_id`. A comment authored by
    /// someone else is simply not in the requester's set, so this returns
    /// None for non-owners and the caller reports not-found.
    pub fn get_comment_for_author(
        &self,
        comment_id: &str,
        author_id: &str,
    ) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COMMENT_COLUMNS}
                 FROM comments c
                 LEFT JOIN users u ON c.author_id = u.id
                 WHERE c.id = ?1 AND c.author_id = ?2",
            ))?;

            let row = stmt
                .query_row([comment_id, author_id], map_comment_row)
                .optional()?;

            Ok(row)
        })
    }

    /// Returns the number of rows updated: 0 when the comment does not
    /// exist or belongs to a different author.
    pub fn update_comment_text(
        &self,
        comment_id: &str,
        author_id: &str,
        text: &str,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE comments SET text = ?3 WHERE id = ?1 AND author_id = ?2",
                (comment_id, author_id, text),
            )?;
            Ok(n)
        })
    }

    /// Hard delete, owner-scoped. Returns the number of rows removed.
    pub fn delete_comment(&self, comment_id: &str, author_id: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM comments WHERE id = ?1 AND author_id = ?2",
                (comment_id, author_id),
            )?;
            Ok(n)
        })
    }

    pub fn get_comment(&self, id: &str) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COMMENT_COLUMNS}
                 FROM comments c
                 LEFT JOIN users u ON c.author_id = u.id
                 WHERE c.id = ?1",
            ))?;

            let row = stmt.query_row([id], map_comment_row).optional()?;

            Ok(row)
        })
    }

    pub fn count_comments(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))?;
            Ok(count)
        })
    }
}

fn map_comment_row(row: &rusqlite::Row<'_>) -> std::result::Result<CommentRow, rusqlite::Error> {
    Ok(CommentRow {
        id: row.get(0)?,
        news_id: row.get(1)?,
        author_id: row.get(2)?,
        author_username: row.get::<_, Option<String>>(3)?.unwrap_or_else(|| "unknown".to_string()),
        text: row.get(4)?,
        created: row.get(5)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn db_with_user(username: &str) -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        let user_id = Uuid::new_v4().to_string();
        db.create_user(&user_id, username, "hash").unwrap();
        (db, user_id)
    }

    fn add_news(db: &Database, date: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.insert_news(&id, "Заголовок", "Текст новости", date).unwrap();
        id
    }

    #[test]
    fn list_news_orders_newest_first_and_caps() {
        let db = Database::open_in_memory().unwrap();
        for day in 1..=4 {
            add_news(&db, &format!("2026-08-0{day}T00:00:00+00:00"));
        }

        let rows = db.list_news(3).unwrap();
        assert_eq!(rows.len(), 3);
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn comments_listed_oldest_first() {
        let (db, user_id) = db_with_user("author");
        let news_id = add_news(&db, "2026-08-01T00:00:00+00:00");

        for hour in [12, 9, 15] {
            db.insert_comment(
                &Uuid::new_v4().to_string(),
                &news_id,
                &user_id,
                "Текст",
                &format!("2026-08-02T{hour:02}:00:00+00:00"),
            )
            .unwrap();
        }

        let rows = db.list_comments_for_news(&news_id).unwrap();
        let created: Vec<&str> = rows.iter().map(|r| r.created.as_str()).collect();
        let mut sorted = created.clone();
        sorted.sort();
        assert_eq!(created, sorted);
    }

    #[test]
    fn non_owner_sees_no_comment_and_mutates_nothing() {
        let (db, author_id) = db_with_user("author");
        let reader_id = Uuid::new_v4().to_string();
        db.create_user(&reader_id, "reader", "hash").unwrap();

        let news_id = add_news(&db, "2026-08-01T00:00:00+00:00");
        let comment_id = Uuid::new_v4().to_string();
        db.insert_comment(&comment_id, &news_id, &author_id, "Текст комментария", "2026-08-02T00:00:00+00:00")
            .unwrap();

        assert!(db.get_comment_for_author(&comment_id, &reader_id).unwrap().is_none());
        assert_eq!(db.update_comment_text(&comment_id, &reader_id, "x").unwrap(), 0);
        assert_eq!(db.delete_comment(&comment_id, &reader_id).unwrap(), 0);
        assert_eq!(db.count_comments().unwrap(), 1);
        assert_eq!(db.get_comment(&comment_id).unwrap().unwrap().text, "Текст комментария");

        // The owner's view and mutations do work
        assert!(db.get_comment_for_author(&comment_id, &author_id).unwrap().is_some());
        assert_eq!(db.delete_comment(&comment_id, &author_id).unwrap(), 1);
        assert_eq!(db.count_comments().unwrap(), 0);
    }

    #[test]
    fn deleting_news_cascades_to_comments() {
        let (db, user_id) = db_with_user("author");
        let news_id = add_news(&db, "2026-08-01T00:00:00+00:00");
        db.insert_comment(
            &Uuid::new_v4().to_string(),
            &news_id,
            &user_id,
            "Текст",
            "2026-08-02T00:00:00+00:00",
        )
        .unwrap();

        db.with_conn(|conn| {
            conn.execute("DELETE FROM news WHERE id = ?1", [&news_id])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(db.count_comments().unwrap(), 0);
    }
}
