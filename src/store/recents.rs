use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// A recently viewed item, keyed by model kind plus id.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentItem {
    pub model: String,
    pub model_id: u64,
    pub name: String,
    pub viewed_at: i64,
}

/// A pinned item.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkItem {
    pub model: String,
    pub model_id: u64,
    pub name: String,
}

#[derive(Debug)]
pub struct RecentsStore {
    conn: Connection,
}

impl RecentsStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    // === Recents ===

    pub fn record_view(&self, model: &str, model_id: u64, name: &str, viewed_at: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO recents(model, model_id, name, viewed_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(model, model_id) DO UPDATE SET name=excluded.name, viewed_at=excluded.viewed_at",
            params![model, model_id, name, viewed_at],
        )?;
        Ok(())
    }

    pub fn load_recent(&self, limit: usize) -> Result<Vec<RecentItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT model, model_id, name, viewed_at FROM recents
             ORDER BY viewed_at DESC LIMIT ?1",
        )?;
        let mut rows = stmt.query(params![limit as i64])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(RecentItem {
                model: row.get(0)?,
                model_id: row.get::<_, i64>(1)? as u64,
                name: row.get(2)?,
                viewed_at: row.get(3)?,
            });
        }
        Ok(out)
    }

    // === Bookmarks ===

    pub fn load_bookmarks(&self) -> Result<Vec<BookmarkItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT model, model_id, name FROM bookmarks ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(BookmarkItem {
                model: row.get(0)?,
                model_id: row.get::<_, i64>(1)? as u64,
                name: row.get(2)?,
            });
        }
        Ok(out)
    }

    pub fn add_bookmark(&self, model: &str, model_id: u64, name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO bookmarks(model, model_id, name) VALUES (?1, ?2, ?3)",
            params![model, model_id, name],
        )?;
        Ok(())
    }

    pub fn remove_bookmark(&self, model: &str, model_id: u64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM bookmarks WHERE model = ?1 AND model_id = ?2",
            params![model, model_id],
        )?;
        Ok(())
    }

    pub fn is_bookmarked(&self, model: &str, model_id: u64) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM bookmarks WHERE model = ?1 AND model_id = ?2")?;
        Ok(stmt.exists(params![model, model_id])?)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS recents (
                model     TEXT NOT NULL,
                model_id  INTEGER NOT NULL,
                name      TEXT NOT NULL,
                viewed_at INTEGER NOT NULL,
                PRIMARY KEY (model, model_id)
            );
            CREATE TABLE IF NOT EXISTS bookmarks (
                model    TEXT NOT NULL,
                model_id INTEGER NOT NULL,
                name     TEXT NOT NULL,
                PRIMARY KEY (model, model_id)
            );",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("glint_test_{}_{}.db", tag, std::process::id()));
        path
    }

    #[test]
    fn test_record_view_upserts_and_orders_newest_first() {
        let path = temp_db("recents");
        let store = RecentsStore::open(&path).unwrap();

        store
            .record_view("dashboard", 101, "Revenue Overview", 100)
            .unwrap();
        store.record_view("card", 201, "Conversion funnel", 150).unwrap();
        store
            .record_view("dashboard", 101, "Revenue Overview", 200)
            .unwrap();

        let recent = store.load_recent(10).unwrap();
        assert_eq!(recent.len(), 2, "repeat views collapse into one row");
        assert_eq!(recent[0].model_id, 101);
        assert_eq!(recent[0].viewed_at, 200);

        let recent = store.load_recent(1).unwrap();
        assert_eq!(recent.len(), 1);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_bookmark_round_trip() {
        let path = temp_db("bookmarks");
        let store = RecentsStore::open(&path).unwrap();

        assert!(!store.is_bookmarked("dashboard", 101).unwrap());
        store
            .add_bookmark("dashboard", 101, "Revenue Overview")
            .unwrap();
        store
            .add_bookmark("dashboard", 101, "Revenue Overview")
            .unwrap();
        assert!(store.is_bookmarked("dashboard", 101).unwrap());
        assert_eq!(store.load_bookmarks().unwrap().len(), 1);

        store.remove_bookmark("dashboard", 101).unwrap();
        assert!(!store.is_bookmarked("dashboard", 101).unwrap());

        std::fs::remove_file(path).ok();
    }
}
