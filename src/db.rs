//! Storage layer for ado using SQLite.
//!
//! Tables:
//! - folders: id, unique name
//! - todos: action text, owning folder, optional due/remind dates,
//!   optional parent todo ("project"), creation timestamp
//! - listings: positions of the most recent `list` output, so index
//!   commands like `done 3` can address what the user just saw
//! - searches: named saved queries, stored as a JSON token vector and
//!   re-parsed on use (relative date tags stay relative)

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, params_from_iter, Connection};

/// Folders created by `ado setup init`.
pub const DEFAULT_FOLDERS: [&str; 4] = ["inbox", "today", "done", "someday"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single todo item with its folder name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub action: String,
    pub folder: String,
    pub due: Option<NaiveDate>,
    pub remind: Option<NaiveDate>,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Criteria for `list`; every field is optional and they combine with
/// AND. Date bounds are inclusive upper limits ("due on or before").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    pub folder: Option<String>,
    pub keywords: Vec<String>,
    pub due_by: Option<NaiveDate>,
    pub remind_by: Option<NaiveDate>,
    pub parent_id: Option<i64>,
}

/// SQLite database wrapper for todo storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates the database at `path` and initializes the
    /// schema. Safe to call on an existing database.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// An in-memory database for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS folders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                action TEXT NOT NULL,
                folder_id INTEGER NOT NULL REFERENCES folders(id),
                due TEXT,
                remind TEXT,
                parent_id INTEGER REFERENCES todos(id),
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS listings (
                pos INTEGER PRIMARY KEY,
                todo_id INTEGER NOT NULL REFERENCES todos(id)
            );
            CREATE TABLE IF NOT EXISTS searches (
                name TEXT PRIMARY KEY,
                query TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Creates any of the standard folders that are missing; returns
    /// how many were created.
    pub fn ensure_default_folders(&self) -> Result<usize> {
        let mut created = 0;
        for name in DEFAULT_FOLDERS {
            created += self
                .conn
                .execute("INSERT OR IGNORE INTO folders (name) VALUES (?1)", params![name])?;
        }
        Ok(created)
    }

    // --- folders ---

    pub fn folder_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM folders ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn folder_id(&self, name: &str) -> Result<i64> {
        let id = self
            .conn
            .query_row("SELECT id FROM folders WHERE name = ?1", params![name], |row| row.get(0))
            .with_context(|| format!("no folder named '{name}'"))?;
        Ok(id)
    }

    pub fn create_folder(&self, name: &str) -> Result<()> {
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO folders (name) VALUES (?1)", params![name])?;
        if inserted == 0 {
            anyhow::bail!("folder '{name}' already exists");
        }
        Ok(())
    }

    pub fn rename_folder(&self, old: &str, new: &str) -> Result<()> {
        let id = self.folder_id(old)?;
        self.conn
            .execute("UPDATE folders SET name = ?1 WHERE id = ?2", params![new, id])
            .with_context(|| format!("Failed to rename folder '{old}' to '{new}'"))?;
        Ok(())
    }

    /// Deletes a folder, re-homing its todos to `reassign_to`. Returns
    /// how many todos were moved.
    pub fn delete_folder(&self, name: &str, reassign_to: &str) -> Result<usize> {
        let id = self.folder_id(name)?;
        let target = self.folder_id(reassign_to)?;
        let moved = self.conn.execute(
            "UPDATE todos SET folder_id = ?1 WHERE folder_id = ?2",
            params![target, id],
        )?;
        self.conn.execute("DELETE FROM folders WHERE id = ?1", params![id])?;
        Ok(moved)
    }

    // --- todos ---

    pub fn add_todo(
        &self,
        action: &str,
        folder: &str,
        due: Option<NaiveDate>,
        remind: Option<NaiveDate>,
        parent_id: Option<i64>,
    ) -> Result<i64> {
        let folder_id = self.folder_id(folder)?;
        self.conn.execute(
            "INSERT INTO todos (action, folder_id, due, remind, parent_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                action,
                folder_id,
                due.map(|d| d.format(DATE_FORMAT).to_string()),
                remind.map(|d| d.format(DATE_FORMAT).to_string()),
                parent_id,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        let mut stmt = self.conn.prepare(&format!("{TODO_SELECT} WHERE todos.id = ?1"))?;
        let todo = stmt.query_row(params![id], todo_from_row);
        match todo {
            Ok(todo) => Ok(Some(todo)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT} WHERE 1=1");
        let mut args: Vec<rusqlite::types::Value> = Vec::new();

        if let Some(folder) = &filter.folder {
            sql.push_str(&format!(" AND folders.name = ?{}", args.len() + 1));
            args.push(folder.clone().into());
        }
        for keyword in &filter.keywords {
            sql.push_str(&format!(" AND todos.action LIKE ?{}", args.len() + 1));
            args.push(format!("%{keyword}%").into());
        }
        if let Some(due_by) = filter.due_by {
            sql.push_str(&format!(
                " AND todos.due IS NOT NULL AND todos.due <= ?{}",
                args.len() + 1
            ));
            args.push(due_by.format(DATE_FORMAT).to_string().into());
        }
        if let Some(remind_by) = filter.remind_by {
            sql.push_str(&format!(
                " AND todos.remind IS NOT NULL AND todos.remind <= ?{}",
                args.len() + 1
            ));
            args.push(remind_by.format(DATE_FORMAT).to_string().into());
        }
        if let Some(parent_id) = filter.parent_id {
            sql.push_str(&format!(" AND todos.parent_id = ?{}", args.len() + 1));
            args.push(parent_id.into());
        }
        sql.push_str(" ORDER BY todos.id");

        let mut stmt = self.conn.prepare(&sql)?;
        let todos = stmt
            .query_map(params_from_iter(args), todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    pub fn move_todo(&self, id: i64, folder: &str) -> Result<()> {
        let folder_id = self.folder_id(folder)?;
        self.conn
            .execute("UPDATE todos SET folder_id = ?1 WHERE id = ?2", params![folder_id, id])?;
        Ok(())
    }

    pub fn set_parent(&self, id: i64, parent_id: i64) -> Result<()> {
        self.conn
            .execute("UPDATE todos SET parent_id = ?1 WHERE id = ?2", params![parent_id, id])?;
        Ok(())
    }

    // --- listings ---

    /// Remembers the order of the most recent `list` output. Positions
    /// are 1-based, matching what was printed.
    pub fn record_listing(&self, ids: &[i64]) -> Result<()> {
        self.conn.execute("DELETE FROM listings", [])?;
        let mut stmt = self
            .conn
            .prepare("INSERT INTO listings (pos, todo_id) VALUES (?1, ?2)")?;
        for (i, id) in ids.iter().enumerate() {
            stmt.execute(params![i as i64 + 1, id])?;
        }
        Ok(())
    }

    /// The todo printed at 1-based position `pos` of the last listing.
    pub fn listed_todo(&self, pos: usize) -> Result<Option<Todo>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT todo_id FROM listings WHERE pos = ?1",
                params![pos as i64],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        match id {
            Some(id) => self.get_todo(id),
            None => Ok(None),
        }
    }

    // --- saved searches ---

    pub fn save_search(&self, name: &str, tokens: &[String]) -> Result<()> {
        let query = serde_json::to_string(tokens)?;
        self.conn.execute(
            "INSERT INTO searches (name, query) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET query = excluded.query",
            params![name, query],
        )?;
        Ok(())
    }

    pub fn load_search(&self, name: &str) -> Result<Option<Vec<String>>> {
        let query: Option<String> = self
            .conn
            .query_row("SELECT query FROM searches WHERE name = ?1", params![name], |row| row.get(0))
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        match query {
            Some(query) => Ok(Some(serde_json::from_str(&query)?)),
            None => Ok(None),
        }
    }
}

const TODO_SELECT: &str = "SELECT todos.id, todos.action, folders.name, todos.due, todos.remind,
            todos.parent_id, todos.created_at
     FROM todos JOIN folders ON folders.id = todos.folder_id";

fn todo_from_row(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    let due: Option<String> = row.get(3)?;
    let remind: Option<String> = row.get(4)?;
    Ok(Todo {
        id: row.get(0)?,
        action: row.get(1)?,
        folder: row.get(2)?,
        due: due.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
        remind: remind.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
        parent_id: row.get(5)?,
        created_at: DateTime::parse_from_rfc3339(&row.get::<_, String>(6)?)
            .unwrap()
            .with_timezone(&Utc),
    })
}
