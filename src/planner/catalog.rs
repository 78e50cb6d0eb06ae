//! Curriculum Catalog
//!
//! Read access to curriculum items for path generation, plus the
//! SQLite-backed store that holds them. The planner only ever asks for
//! "all items of one course, in sequence order" and "the distinct course
//! names", so the trait stays that small.

use super::types::{CurriculumItem, SetType};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to read catalog seed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog seed: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    #[error("Catalog connection lock poisoned")]
    LockPoisoned,
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Source of curriculum items
pub trait CurriculumCatalog {
    /// Every item of `course_name`, ascending by sequence number
    fn fetch_course_items(&self, course_name: &str) -> CatalogResult<Vec<CurriculumItem>>;

    /// Distinct course names present in the catalog
    fn course_names(&self) -> CatalogResult<Vec<String>>;
}

// ============================================================
// SQLITE CATALOG
// ============================================================

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS curriculum_items (
        id TEXT PRIMARY KEY,
        course_name TEXT NOT NULL,
        course_id TEXT,
        topic TEXT,
        topic_id TEXT,
        session_name TEXT,
        set_type TEXT,
        unit_id TEXT,
        duration TEXT,
        languages TEXT,
        session_link TEXT,
        outcomes TEXT,
        prerequisites TEXT,
        sequence_number INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_curriculum_course ON curriculum_items(course_name);
    CREATE INDEX IF NOT EXISTS idx_curriculum_sequence ON curriculum_items(sequence_number);
";

const SELECT_COLUMNS: &str = "id, course_name, course_id, topic, topic_id, session_name, set_type,
     unit_id, duration, languages, session_link, outcomes, prerequisites, sequence_number";

/// SQLite-backed curriculum store
#[derive(Clone)]
pub struct SqliteCatalog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalog {
    /// Open (or create) a catalog database file
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Create an in-memory catalog for testing
    pub fn in_memory() -> CatalogResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> CatalogResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| CatalogError::LockPoisoned)
    }

    /// Insert or replace items in a single transaction
    pub fn insert_items(&self, items: &[CurriculumItem]) -> CatalogResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO curriculum_items (
                    id, course_name, course_id, topic, topic_id, session_name, set_type,
                    unit_id, duration, languages, session_link, outcomes, prerequisites,
                    sequence_number
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for item in items {
                stmt.execute(params![
                    item.id,
                    item.course_name,
                    item.course_id,
                    item.topic,
                    item.topic_id,
                    item.session_name,
                    item.set_type,
                    item.unit_id,
                    item.duration,
                    item.languages,
                    item.session_link,
                    item.outcomes,
                    item.prerequisites,
                    item.sequence_number,
                ])?;
            }
        }
        tx.commit()?;
        Ok(items.len())
    }

    /// Load a JSON array of items.
    ///
    /// Items without an id get a fresh uuid. Items without a sequence number
    /// are numbered after the current maximum in file order, so the file's
    /// row order becomes the curriculum order.
    pub fn import_json<P: AsRef<Path>>(&self, path: P) -> CatalogResult<usize> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<SeedRecord> = serde_json::from_str(&raw)?;

        let mut next_sequence = self.max_sequence_number()? + 1;
        let items: Vec<CurriculumItem> = records
            .into_iter()
            .map(|record| {
                let mut item = record.item;
                item.id = record
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                item.sequence_number = match record.sequence_number {
                    Some(sequence) => sequence,
                    None => {
                        let sequence = next_sequence;
                        next_sequence += 1;
                        sequence
                    }
                };
                item
            })
            .collect();

        let count = self.insert_items(&items)?;
        log::info!("Imported {} curriculum items", count);
        Ok(count)
    }

    fn max_sequence_number(&self) -> CatalogResult<i64> {
        let conn = self.lock()?;
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(sequence_number) FROM curriculum_items",
            [],
            |row| row.get(0),
        )?;
        Ok(max.unwrap_or(0))
    }

    pub fn item_count(&self) -> CatalogResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM curriculum_items", [], |row| {
            row.get(0)
        })?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl CurriculumCatalog for SqliteCatalog {
    fn fetch_course_items(&self, course_name: &str) -> CatalogResult<Vec<CurriculumItem>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM curriculum_items
             WHERE course_name = ?1
             ORDER BY sequence_number ASC, id ASC",
            SELECT_COLUMNS
        ))?;

        let items = stmt
            .query_map([course_name], item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn course_names(&self) -> CatalogResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT course_name FROM curriculum_items ORDER BY course_name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<CurriculumItem> {
    Ok(CurriculumItem {
        id: row.get(0)?,
        course_name: row.get(1)?,
        course_id: row.get(2)?,
        topic: row.get(3)?,
        topic_id: row.get(4)?,
        session_name: row.get(5)?,
        set_type: row.get(6)?,
        unit_id: row.get(7)?,
        duration: row.get(8)?,
        languages: row.get(9)?,
        session_link: row.get(10)?,
        outcomes: row.get(11)?,
        prerequisites: row.get(12)?,
        sequence_number: row.get(13)?,
    })
}

/// Seed file row: id and sequence number are optional here
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    #[serde(default)]
    sequence_number: Option<i64>,
    #[serde(flatten)]
    item: CurriculumItem,
}

// ============================================================
// COURSE LISTING
// ============================================================

/// A catalog item as shown by the course session listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSession {
    #[serde(flatten)]
    pub item: CurriculumItem,
    /// Recorded duration, or the set-type display default
    pub duration_mins: u32,
}

impl CatalogSession {
    pub fn from_item(item: CurriculumItem) -> Self {
        let duration_mins = item.duration_minutes().unwrap_or_else(|| {
            match item.set_type.as_deref() {
                None | Some("") => SetType::LearningSet.display_minutes(),
                Some(_) => item.kind().map(|kind| kind.display_minutes()).unwrap_or(15),
            }
        });
        Self {
            item,
            duration_mins,
        }
    }
}

/// Items of one course with display durations applied
pub fn list_course_sessions<C>(catalog: &C, course_name: &str) -> CatalogResult<Vec<CatalogSession>>
where
    C: CurriculumCatalog + ?Sized,
{
    Ok(catalog
        .fetch_course_items(course_name)?
        .into_iter()
        .map(CatalogSession::from_item)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_items() -> Vec<CurriculumItem> {
        vec![
            CurriculumItem::new("n2", "Node JS", 20).with_topic("Express"),
            CurriculumItem::new("n1", "Node JS", 10).with_topic("Intro to Node"),
            CurriculumItem::new("m1", "MongoDB", 30).with_topic("CRUD"),
        ]
    }

    #[test]
    fn test_fetch_orders_by_sequence() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog.insert_items(&sample_items()).unwrap();

        let items = catalog.fetch_course_items("Node JS").unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2"]);
        assert_eq!(items[0].topic.as_deref(), Some("Intro to Node"));

        assert!(catalog.fetch_course_items("Unknown").unwrap().is_empty());
    }

    #[test]
    fn test_course_names_are_distinct() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog.insert_items(&sample_items()).unwrap();
        assert_eq!(catalog.course_names().unwrap(), vec!["MongoDB", "Node JS"]);
        assert_eq!(catalog.item_count().unwrap(), 3);
    }

    #[test]
    fn test_import_json_assigns_ids_and_sequence() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        catalog.insert_items(&sample_items()).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"courseName": "SQL Basics", "topic": "Tables", "duration": "30"}},
                {{"_id": "q2", "courseName": "SQL Basics", "topic": "Queries", "duration": 20}}
            ]"#
        )
        .unwrap();

        assert_eq!(catalog.import_json(file.path()).unwrap(), 2);
        let items = catalog.fetch_course_items("SQL Basics").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].topic.as_deref(), Some("Tables"));
        assert_eq!(items[0].sequence_number, 31);
        assert!(!items[0].id.is_empty());
        assert_eq!(items[1].id, "q2");
        assert_eq!(items[1].sequence_number, 32);
        assert_eq!(items[1].duration_minutes(), Some(20));
    }

    #[test]
    fn test_import_rejects_malformed_seed() {
        let catalog = SqliteCatalog::in_memory().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            catalog.import_json(file.path()),
            Err(CatalogError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_display_durations() {
        let plain = CatalogSession::from_item(CurriculumItem::new("a", "C", 1));
        assert_eq!(plain.duration_mins, 18);

        let quiz = CatalogSession::from_item(
            CurriculumItem::new("b", "C", 2).with_session("Daily Quiz", "QUIZ"),
        );
        assert_eq!(quiz.duration_mins, 12);

        let project = CatalogSession::from_item(
            CurriculumItem::new("c", "C", 3).with_session("Capstone", "PROJECT"),
        );
        assert_eq!(project.duration_mins, 120);

        let unknown = CatalogSession::from_item(
            CurriculumItem::new("d", "C", 4).with_session("Reading", "ARTICLE"),
        );
        assert_eq!(unknown.duration_mins, 15);

        let recorded = CatalogSession::from_item(
            CurriculumItem::new("e", "C", 5)
                .with_session("Practice", "PRACTICE")
                .with_duration("25"),
        );
        assert_eq!(recorded.duration_mins, 25);
    }
}
