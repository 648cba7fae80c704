//! Feedback store
//!
//! SQLite-backed persistence for feedback records. This is the only durable
//! state in the service: one `feedback` table plus two lookup indexes, and
//! deliberately nothing that could identify a submitter.
//!
//! # Schema
//!
//! ```text
//! feedback
//! ├── id          INTEGER PRIMARY KEY AUTOINCREMENT
//! ├── content     TEXT NOT NULL        (escaped at intake)
//! ├── category    TEXT NOT NULL
//! ├── created_at  INTEGER NOT NULL     (epoch milliseconds)
//! ├── char_count  INTEGER NOT NULL
//! └── status      TEXT DEFAULT 'unread'
//! ```
//!
//! `AUTOINCREMENT` guarantees ids are never reused, even after deletion.
//! `idx_created_at` backs the recency-ordered listing and `idx_status` the
//! unread count in statistics.
//!
//! # Concurrency
//!
//! The store is `Clone` and safe to share across handlers; each operation
//! is a single statement (statistics runs inside one transaction), so
//! SQLite's row-level atomicity is the whole consistency story. Two
//! concurrent writes to the same id serialize in the database and at most
//! one of them observes a changed row.

use std::str::FromStr;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Read status of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// Not yet seen by a moderator.
    Unread,
    /// Marked read by a moderator. There is no way back to unread.
    Read,
}

impl FeedbackStatus {
    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    fn from_db(value: &str) -> Self {
        match value {
            "read" => Self::Read,
            _ => Self::Unread,
        }
    }
}

/// One persisted feedback submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackRecord {
    /// Store-assigned id, monotone and never recycled.
    pub id: i64,
    /// Escaped content as stored.
    pub content: String,
    /// Normalized category tag.
    pub category: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Character count of the stored content.
    pub char_count: i64,
    /// Read status.
    pub status: FeedbackStatus,
}

/// Outcome of [`FeedbackStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedFeedback {
    /// Assigned record id.
    pub id: i64,
    /// Stamped creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Per-category record count.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category tag.
    pub category: String,
    /// Records carrying that tag.
    pub count: i64,
}

/// Aggregate statistics snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeedbackStatistics {
    /// Total records.
    pub total: i64,
    /// Records still unread.
    pub unread: i64,
    /// Counts per category, read and unread alike.
    #[serde(rename = "byCategory")]
    pub by_category: Vec<CategoryCount>,
}

/// SQLite-backed feedback store.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    pool: SqlitePool,
}

impl FeedbackStore {
    /// Open or create the database and prepare the schema.
    ///
    /// Enables WAL mode and the usual pragmas before creating the table
    /// and indexes.
    ///
    /// # Arguments
    ///
    /// * `database_url` - sqlx SQLite URL, e.g. `sqlite:feedback.db`
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous=NORMAL").execute(&pool).await?;
        sqlx::query("PRAGMA foreign_keys=ON").execute(&pool).await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Wrap an existing pool. Used by tests that manage their own pool.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the feedback table and lookup indexes.
    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                char_count INTEGER NOT NULL,
                status TEXT DEFAULT 'unread'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_created_at ON feedback(created_at DESC)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_status ON feedback(status)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Persist one validated submission.
    ///
    /// Stamps the current time, computes the stored character count and
    /// starts the record as unread. A single INSERT, so concurrent readers
    /// never observe a partial record.
    pub async fn create(
        &self,
        content: &str,
        category: &str,
    ) -> Result<CreatedFeedback, sqlx::Error> {
        let created_at = chrono::Utc::now().timestamp_millis();
        let char_count = content.chars().count() as i64;

        let result = sqlx::query(
            r#"
            INSERT INTO feedback (content, category, created_at, char_count, status)
            VALUES (?, ?, ?, ?, 'unread')
            "#,
        )
        .bind(content)
        .bind(category)
        .bind(created_at)
        .bind(char_count)
        .execute(&self.pool)
        .await?;

        Ok(CreatedFeedback {
            id: result.last_insert_rowid(),
            created_at,
        })
    }

    /// List records most-recent-first.
    ///
    /// Equal timestamps fall back to insertion order, so the listing is
    /// stable across calls. An offset past the end returns an empty vector.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<FeedbackRecord>, sqlx::Error> {
        #[derive(sqlx::FromRow)]
        struct FeedbackRow {
            id: i64,
            content: String,
            category: String,
            created_at: i64,
            char_count: i64,
            status: String,
        }

        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT id, content, category, created_at, char_count, status
            FROM feedback
            ORDER BY created_at DESC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FeedbackRecord {
                id: row.id,
                content: row.content,
                category: row.category,
                created_at: row.created_at,
                char_count: row.char_count,
                status: FeedbackStatus::from_db(&row.status),
            })
            .collect())
    }

    /// Total record count.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Aggregate statistics over all records.
    ///
    /// The three queries run inside one transaction so the snapshot is
    /// consistent: the category counts always sum to `total`.
    pub async fn statistics(&self) -> Result<FeedbackStatistics, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&mut *tx)
            .await?;

        let unread: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM feedback WHERE status = 'unread'")
                .fetch_one(&mut *tx)
                .await?;

        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM feedback GROUP BY category ORDER BY category",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(FeedbackStatistics {
            total: total.0,
            unread: unread.0,
            by_category: by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
        })
    }

    /// Mark a record read.
    ///
    /// Returns the number of changed rows: 1 the first time, 0 when the
    /// record is missing or already read. Repeating the call is harmless.
    pub async fn mark_read(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE feedback SET status = 'read' WHERE id = ? AND status = 'unread'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Permanently delete a record.
    ///
    /// Returns the number of deleted rows (0 or 1). The id is never handed
    /// out again.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
