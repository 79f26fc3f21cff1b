// src/db/users.rs
use crate::domain::User;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

/// Empty strings are stored as NULL so the UNIQUE index only sees real addresses.
fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
}

fn map_write_err(action: &str, e: rusqlite::Error) -> ServerError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ServerError::BadRequest("email is already in use".into())
        }
        other => ServerError::DbError(format!("{action} failed: {other}")),
    }
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT id, name, email FROM users ORDER BY id")
        .map_err(|e| ServerError::DbError(format!("prepare list users failed: {e}")))?;

    let users = stmt
        .query_map([], row_to_user)
        .map_err(|e| ServerError::DbError(format!("list users failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read user row failed: {e}")))?;

    Ok(users)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, ServerError> {
    conn.query_row(
        "SELECT id, name, email FROM users WHERE id = ?",
        params![id],
        row_to_user,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn create_user(conn: &Connection, name: &str, email: Option<&str>) -> Result<User, ServerError> {
    let email = normalize_email(email);
    conn.execute(
        "INSERT INTO users (name, email) VALUES (?, ?)",
        params![name, email],
    )
    .map_err(|e| map_write_err("insert user", e))?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email,
    })
}

pub fn update_user(
    conn: &Connection,
    id: i64,
    name: &str,
    email: Option<&str>,
) -> Result<User, ServerError> {
    let email = normalize_email(email);
    let changed = conn
        .execute(
            "UPDATE users SET name = ?, email = ? WHERE id = ?",
            params![name, email, id],
        )
        .map_err(|e| map_write_err("update user", e))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }

    Ok(User {
        id,
        name: name.to_string(),
        email,
    })
}

/// Deletes the user together with their completion history.
pub fn delete_user(conn: &mut Connection, id: i64) -> Result<(), ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("DELETE FROM completions WHERE user_id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete user completions failed: {e}")))?;

    let removed = tx
        .execute("DELETE FROM users WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete user failed: {e}")))?;

    if removed == 0 {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))
}
