//! SQLite meeting archive adapter

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::application::ports::{ArchiveStore, StoreError};
use crate::domain::meeting::{MeetingId, MeetingRecord, NewMeetingRecord};

use super::schema;

const SELECT_COLUMNS: &str = "SELECT id, name, date, attendee_names, average_hourly_rate, \
     duration_ms, total_cost, started_at, ended_at FROM meetings";

/// Meeting archive backed by a single SQLite file.
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteArchiveStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteArchiveStore {
    /// Open (or create) the archive at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(path).map_err(unavailable)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(unavailable)?;
        schema::run_migrations(&conn).map_err(unavailable)?;
        debug!(path = %path.display(), "archive opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory archive, gone when the last clone is dropped
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        schema::run_migrations(&conn).map_err(unavailable)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Default archive location under the XDG data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("waste-watch")
            .join("archive.db")
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("archive connection poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }
}

#[async_trait]
impl ArchiveStore for SqliteArchiveStore {
    async fn insert(&self, record: NewMeetingRecord) -> Result<MeetingId, StoreError> {
        let duration_ms = i64::try_from(record.duration_milliseconds)
            .map_err(|_| StoreError::QueryFailed("duration out of range".to_string()))?;
        let attendee_names = serde_json::to_string(&record.attendee_names)
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        let date = record.date.to_rfc3339_opts(SecondsFormat::AutoSi, true);

        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO meetings (name, date, attendee_names, average_hourly_rate,
                     duration_ms, total_cost, started_at, ended_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        record.name,
                        date,
                        attendee_names,
                        record.average_hourly_rate,
                        duration_ms,
                        record.total_cost,
                        record.started_at,
                        record.ended_at,
                    ],
                )
                .map_err(query_failed)?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, "meeting archived");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<MeetingRecord>, StoreError> {
        self.with_conn(|conn| {
            let sql = format!("{} ORDER BY ended_at DESC, id DESC", SELECT_COLUMNS);
            let mut stmt = conn.prepare(&sql).map_err(query_failed)?;
            let rows = stmt
                .query_map([], RawRow::from_row)
                .map_err(query_failed)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(query_failed)?;
            rows.into_iter().map(RawRow::into_record).collect()
        })
        .await
    }

    async fn get(&self, id: MeetingId) -> Result<MeetingRecord, StoreError> {
        self.with_conn(move |conn| {
            let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
            conn.query_row(&sql, params![id], RawRow::from_row)
                .optional()
                .map_err(query_failed)?
                .ok_or(StoreError::NotFound(id))?
                .into_record()
        })
        .await
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        let removed = self
            .with_conn(|conn| {
                conn.execute("DELETE FROM meetings", [])
                    .map(|n| n as u64)
                    .map_err(query_failed)
            })
            .await?;

        debug!(removed, "archive cleared");
        Ok(removed)
    }
}

/// Columns as stored, before decoding
struct RawRow {
    id: MeetingId,
    name: String,
    date: String,
    attendee_names: String,
    average_hourly_rate: f64,
    duration_ms: i64,
    total_cost: f64,
    started_at: i64,
    ended_at: i64,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            date: row.get(2)?,
            attendee_names: row.get(3)?,
            average_hourly_rate: row.get(4)?,
            duration_ms: row.get(5)?,
            total_cost: row.get(6)?,
            started_at: row.get(7)?,
            ended_at: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<MeetingRecord, StoreError> {
        let id = self.id;
        let corrupt = |message: String| StoreError::Corrupt { id, message };

        let date = DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| corrupt(format!("date: {}", e)))?
            .with_timezone(&Utc);
        let attendee_names: Vec<String> = serde_json::from_str(&self.attendee_names)
            .map_err(|e| corrupt(format!("attendee names: {}", e)))?;
        let duration_milliseconds = u64::try_from(self.duration_ms)
            .map_err(|_| corrupt(format!("negative duration {}", self.duration_ms)))?;

        Ok(MeetingRecord {
            id,
            name: self.name,
            date,
            attendee_names,
            average_hourly_rate: self.average_hourly_rate,
            duration_milliseconds,
            total_cost: self.total_cost,
            started_at: self.started_at,
            ended_at: self.ended_at,
        })
    }
}

fn unavailable(e: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn query_failed(e: rusqlite::Error) -> StoreError {
    StoreError::QueryFailed(e.to_string())
}
