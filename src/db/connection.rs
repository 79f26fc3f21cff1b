use rusqlite::{params, Connection};
use std::cell::RefCell;
use std::time::Duration;
use tracing::info;

use crate::errors::ServerError;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, remembered together with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = RefCell::new(None);
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn =
        Connection::open(path).map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| ServerError::DbError(format!("busy_timeout failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("enable foreign keys failed: {e}")))?;
    Ok(conn)
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides this worker thread's connection to the closure, opening it on
    /// first use. Must not be called re-entrantly from inside `f`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.try_borrow_mut().map_err(|_| ServerError::InternalError)?;

                let reusable = matches!(slot.as_ref(), Some((path, _)) if *path == self.path);
                if !reusable {
                    *slot = Some((self.path.clone(), open(&self.path)?));
                }

                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Applies the embedded schema and seeds the default household members when
/// the users table is empty.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;

        let user_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .map_err(|e| ServerError::DbError(format!("count users failed: {e}")))?;

        if user_count == 0 {
            for (name, email) in [("Husband", "husband@example.com"), ("Wife", "wife@example.com")] {
                conn.execute(
                    "INSERT INTO users (name, email) VALUES (?, ?)",
                    params![name, email],
                )
                .map_err(|e| ServerError::DbError(format!("seed users failed: {e}")))?;
            }
            info!("seeded default users");
        }
        Ok(())
    })?;

    info!(path = db.path(), "database initialized");
    Ok(())
}
