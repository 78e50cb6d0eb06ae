//! Student Data Store
//!
//! Persists the onboarding record (profile, goals, availability) for each
//! user. Path generation never reads or writes this store; it only backs
//! the student CRUD endpoints.

use super::types::{Availability, StudentGoals, StudentProfile};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StudentStoreError {
    #[error("Student database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Corrupt student record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Student data not found")]
    NotFound,

    #[error("Student data already exists. Use PUT to update.")]
    AlreadyExists,

    #[error("Student store lock poisoned")]
    LockPoisoned,
}

pub type StudentResult<T> = Result<T, StudentStoreError>;

/// Full onboarding payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub profile: StudentProfile,
    pub goals: StudentGoals,
    pub availability: Availability,
}

/// Partial update; each supplied section replaces the stored one
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentDataPatch {
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub goals: Option<StudentGoals>,
    #[serde(default)]
    pub availability: Option<Availability>,
}

/// A stored onboarding record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub data: StudentData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// SQLite-backed student store
#[derive(Clone)]
pub struct StudentStore {
    conn: Arc<Mutex<Connection>>,
}

impl StudentStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StudentResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> StudentResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StudentResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS student_data (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                profile TEXT NOT NULL,
                goals TEXT NOT NULL,
                availability TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StudentResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StudentStoreError::LockPoisoned)
    }

    pub fn get(&self, user_id: &str) -> StudentResult<StudentRecord> {
        let conn = self.lock()?;
        Self::find(&conn, user_id)?.ok_or(StudentStoreError::NotFound)
    }

    pub fn create(&self, user_id: &str, data: StudentData) -> StudentResult<StudentRecord> {
        let conn = self.lock()?;
        if Self::find(&conn, user_id)?.is_some() {
            return Err(StudentStoreError::AlreadyExists);
        }

        let now = Utc::now();
        let record = StudentRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            data,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            "INSERT INTO student_data (id, user_id, profile, goals, availability, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.user_id,
                serde_json::to_string(&record.data.profile)?,
                serde_json::to_string(&record.data.goals)?,
                serde_json::to_string(&record.data.availability)?,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        log::info!("Created student data for user {}", user_id);
        Ok(record)
    }

    pub fn update(&self, user_id: &str, patch: StudentDataPatch) -> StudentResult<StudentRecord> {
        let conn = self.lock()?;
        let mut record = Self::find(&conn, user_id)?.ok_or(StudentStoreError::NotFound)?;

        if let Some(profile) = patch.profile {
            record.data.profile = profile;
        }
        if let Some(goals) = patch.goals {
            record.data.goals = goals;
        }
        if let Some(availability) = patch.availability {
            record.data.availability = availability;
        }
        record.updated_at = Utc::now();

        conn.execute(
            "UPDATE student_data
             SET profile = ?2, goals = ?3, availability = ?4, updated_at = ?5
             WHERE user_id = ?1",
            params![
                user_id,
                serde_json::to_string(&record.data.profile)?,
                serde_json::to_string(&record.data.goals)?,
                serde_json::to_string(&record.data.availability)?,
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    fn find(conn: &Connection, user_id: &str) -> StudentResult<Option<StudentRecord>> {
        let row = conn
            .query_row(
                "SELECT id, user_id, profile, goals, availability, created_at, updated_at
                 FROM student_data WHERE user_id = ?1",
                [user_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, user_id, profile, goals, availability, created_at, updated_at)) = row else {
            return Ok(None);
        };

        Ok(Some(StudentRecord {
            id,
            user_id,
            data: StudentData {
                profile: serde_json::from_str(&profile)?,
                goals: serde_json::from_str(&goals)?,
                availability: serde_json::from_str(&availability)?,
            },
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        }))
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> StudentData {
        StudentData {
            profile: StudentProfile {
                name: Some("Asha".to_string()),
                ..Default::default()
            },
            goals: StudentGoals::new(3, "backend"),
            availability: Availability::new(2.0, 4.0, "1-month"),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = StudentStore::in_memory().unwrap();
        let created = store.create("user-1", sample_data()).unwrap();

        let fetched = store.get("user-1").unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.data, sample_data());
        assert!(matches!(store.get("user-2"), Err(StudentStoreError::NotFound)));
    }

    #[test]
    fn test_create_twice_fails() {
        let store = StudentStore::in_memory().unwrap();
        store.create("user-1", sample_data()).unwrap();
        assert!(matches!(
            store.create("user-1", sample_data()),
            Err(StudentStoreError::AlreadyExists)
        ));
    }

    #[test]
    fn test_update_replaces_supplied_sections() {
        let store = StudentStore::in_memory().unwrap();
        store.create("user-1", sample_data()).unwrap();

        let patch = StudentDataPatch {
            goals: Some(StudentGoals::new(5, "dsa")),
            ..Default::default()
        };
        let updated = store.update("user-1", patch).unwrap();
        assert_eq!(updated.data.goals.target_stack.as_deref(), Some("dsa"));
        assert_eq!(updated.data.profile, sample_data().profile);

        let fetched = store.get("user-1").unwrap();
        assert_eq!(fetched.data.goals.current_skill_level, 5);
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[test]
    fn test_update_missing_user() {
        let store = StudentStore::in_memory().unwrap();
        assert!(matches!(
            store.update("ghost", StudentDataPatch::default()),
            Err(StudentStoreError::NotFound)
        ));
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.db");
        {
            let store = StudentStore::open(&path).unwrap();
            store.create("user-1", sample_data()).unwrap();
        }
        let reopened = StudentStore::open(&path).unwrap();
        assert_eq!(reopened.get("user-1").unwrap().data, sample_data());
    }
}
