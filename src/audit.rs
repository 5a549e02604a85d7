use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::PredictError;

const INIT_SQL: &str = "CREATE TABLE IF NOT EXISTS predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    platform TEXT NOT NULL,
    caption TEXT NOT NULL,
    predicted_engagement REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

#[derive(Clone)]
pub struct AuditLog {
    conn: Arc<Mutex<Connection>>,
}

impl AuditLog {
    pub fn open(path: &Path) -> Result<Self, PredictError> {
        let conn = Connection::open(path).map_err(|err| {
            PredictError::Configuration(format!("failed to open audit db {}: {err}", path.display()))
        })?;
        conn.execute(INIT_SQL, []).map_err(|err| {
            PredictError::Configuration(format!("failed to init audit db: {err}"))
        })?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn record(
        &self,
        platform: &str,
        caption: &str,
        predicted_engagement: f64,
    ) -> Result<(), String> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| "audit connection lock poisoned".to_string())?;
        conn.execute(
            "INSERT INTO predictions (platform, caption, predicted_engagement) VALUES (?1, ?2, ?3)",
            rusqlite::params![platform, caption, predicted_engagement],
        )
        .map_err(|err| format!("audit insert failed: {err}"))?;
        Ok(())
    }
}
