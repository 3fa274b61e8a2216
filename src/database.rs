//! Record storage
//!
//! SQLite-backed store for daily health records. The schema is a single
//! `health_records` table with one row per day; queries always return
//! newest-first sequences, which is the order the insight engine expects
//! at its boundary.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{HealthRecord, Mood};

/// Database error types
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate entry for day: {0}")]
    DuplicateDay(String),
}

/// Database connection and management
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create or open a database at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, DatabaseError> {
        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database, used by tests
    pub fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), DatabaseError> {
        // WAL mode for better concurrent access
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS health_records (
                id TEXT PRIMARY KEY,
                recorded_at DATETIME NOT NULL,
                heart_rate REAL,
                sleep_duration REAL,
                water_intake INTEGER,
                stress_level INTEGER,
                activity_level INTEGER,
                mood TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_health_records_recorded_at \
             ON health_records (recorded_at)",
            [],
        )?;

        Ok(())
    }

    /// Insert a record, rejecting a second entry for the same calendar day
    pub fn insert_record(&self, record: &HealthRecord) -> Result<(), DatabaseError> {
        if self.has_record_for_day(record.recorded_at)? {
            return Err(DatabaseError::DuplicateDay(
                record.recorded_at.format("%Y-%m-%d").to_string(),
            ));
        }

        self.conn.execute(
            r#"
            INSERT INTO health_records
                (id, recorded_at, heart_rate, sleep_duration, water_intake,
                 stress_level, activity_level, mood)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id.to_string(),
                record.recorded_at,
                record.heart_rate,
                record.sleep_duration,
                record.water_intake,
                record.stress_level,
                record.activity_level,
                record.mood.map(|m| m.to_string()),
            ],
        )?;

        Ok(())
    }

    /// Whether an entry already exists for the given calendar day
    pub fn has_record_for_day(&self, timestamp: DateTime<Utc>) -> Result<bool, DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM health_records WHERE date(recorded_at) = date(?1)",
            params![timestamp],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All records, newest first
    pub fn fetch_all(&self) -> Result<Vec<HealthRecord>, DatabaseError> {
        self.fetch_with_limit(None)
    }

    /// The most recent `limit` records, newest first
    pub fn fetch_recent(&self, limit: usize) -> Result<Vec<HealthRecord>, DatabaseError> {
        self.fetch_with_limit(Some(limit))
    }

    fn fetch_with_limit(&self, limit: Option<usize>) -> Result<Vec<HealthRecord>, DatabaseError> {
        let sql = match limit {
            Some(_) => {
                "SELECT id, recorded_at, heart_rate, sleep_duration, water_intake, \
                 stress_level, activity_level, mood \
                 FROM health_records ORDER BY recorded_at DESC LIMIT ?1"
            }
            None => {
                "SELECT id, recorded_at, heart_rate, sleep_duration, water_intake, \
                 stress_level, activity_level, mood \
                 FROM health_records ORDER BY recorded_at DESC"
            }
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows = match limit {
            Some(n) => stmt.query_map(params![n as i64], row_to_record)?,
            None => stmt.query_map([], row_to_record)?,
        };

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, DatabaseError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM health_records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete one record by id
    pub fn delete_record(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self.conn.execute(
            "DELETE FROM health_records WHERE id = ?1",
            params![id.to_string()],
        )?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<HealthRecord> {
    let id_text: String = row.get(0)?;
    let id = Uuid::parse_str(&id_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let mood_text: Option<String> = row.get(7)?;
    let mood = match mood_text {
        Some(text) => Some(Mood::from_str(&text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })?),
        None => None,
    };

    Ok(HealthRecord {
        id,
        recorded_at: row.get(1)?,
        heart_rate: row.get(2)?,
        sleep_duration: row.get(3)?,
        water_intake: row.get::<_, Option<i64>>(4)?.map(|v| v as u8),
        stress_level: row.get::<_, Option<i64>>(5)?.map(|v| v as u8),
        activity_level: row.get::<_, Option<i64>>(6)?.map(|v| v as u16),
        mood,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_record(days_ago: i64) -> HealthRecord {
        let mut r = HealthRecord::new(Utc::now() - Duration::days(days_ago));
        r.heart_rate = Some(72.0);
        r.sleep_duration = Some(7.5);
        r.water_intake = Some(8);
        r.stress_level = Some(3);
        r.activity_level = Some(35);
        r.mood = Some(Mood::Happy);
        r
    }

    #[test]
    fn test_insert_and_fetch_roundtrip() {
        let db = Database::in_memory().unwrap();
        let record = sample_record(0);
        db.insert_record(&record).unwrap();

        let fetched = db.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, record.id);
        assert_eq!(fetched[0].sleep_duration, Some(7.5));
        assert_eq!(fetched[0].mood, Some(Mood::Happy));
    }

    #[test]
    fn test_fetch_is_newest_first() {
        let db = Database::in_memory().unwrap();
        for days_ago in [2, 0, 1] {
            db.insert_record(&sample_record(days_ago)).unwrap();
        }

        let fetched = db.fetch_all().unwrap();
        assert_eq!(fetched.len(), 3);
        assert!(fetched[0].recorded_at > fetched[1].recorded_at);
        assert!(fetched[1].recorded_at > fetched[2].recorded_at);
    }

    #[test]
    fn test_duplicate_day_is_rejected() {
        let db = Database::in_memory().unwrap();
        db.insert_record(&sample_record(0)).unwrap();

        let err = db.insert_record(&sample_record(0)).unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateDay(_)));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_fetch_recent_limit() {
        let db = Database::in_memory().unwrap();
        for days_ago in 0..5 {
            db.insert_record(&sample_record(days_ago)).unwrap();
        }

        assert_eq!(db.fetch_recent(3).unwrap().len(), 3);
        assert_eq!(db.fetch_all().unwrap().len(), 5);
    }

    #[test]
    fn test_delete_record() {
        let db = Database::in_memory().unwrap();
        let record = sample_record(0);
        db.insert_record(&record).unwrap();

        db.delete_record(record.id).unwrap();
        assert_eq!(db.count().unwrap(), 0);

        let err = db.delete_record(record.id).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[test]
    fn test_partial_record_roundtrip() {
        let db = Database::in_memory().unwrap();
        let mut record = HealthRecord::new(Utc::now());
        record.sleep_duration = Some(6.0);
        db.insert_record(&record).unwrap();

        let fetched = db.fetch_all().unwrap();
        assert_eq!(fetched[0].heart_rate, None);
        assert_eq!(fetched[0].mood, None);
        assert_eq!(fetched[0].sleep_duration, Some(6.0));
    }

    #[test]
    fn test_file_backed_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wellrs.db");

        {
            let db = Database::new(&path).unwrap();
            db.insert_record(&sample_record(0)).unwrap();
        }

        let db = Database::new(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }
}
