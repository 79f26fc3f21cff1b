// src/db/chores.rs
use crate::domain::chore::{parse_start_date, parse_timestamp};
use crate::domain::{Chore, ChoreDraft, Frequency};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use serde::Deserialize;

const CHORE_COLUMNS: &str =
    "id, name, duration, frequency, sort_order, start_date, last_completed_at, created_at";

/// Maps a row read with `CHORE_COLUMNS`. Unparseable dates load as absent
/// rather than failing the whole list.
fn row_to_chore(row: &Row<'_>) -> rusqlite::Result<Chore> {
    let frequency: String = row.get(3)?;
    let start_date: Option<String> = row.get(5)?;
    let last_completed_at: Option<String> = row.get(6)?;
    let created_at: Option<String> = row.get(7)?;

    Ok(Chore {
        id: row.get(0)?,
        name: row.get(1)?,
        duration: row.get(2)?,
        frequency: Frequency::from_stored(&frequency),
        sort_order: row.get(4)?,
        start_date: start_date.as_deref().and_then(parse_start_date),
        last_completed_at: last_completed_at.as_deref().and_then(parse_timestamp),
        created_at: created_at.as_deref().and_then(parse_timestamp),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SortOrder {
    pub id: i64,
    pub sort_order: i64,
}

pub fn list_chores(conn: &Connection) -> Result<Vec<Chore>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CHORE_COLUMNS} FROM chores ORDER BY sort_order ASC, id ASC"
        ))
        .map_err(|e| ServerError::DbError(format!("prepare list chores failed: {e}")))?;

    let chores = stmt
        .query_map([], row_to_chore)
        .map_err(|e| ServerError::DbError(format!("list chores failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read chore row failed: {e}")))?;

    Ok(chores)
}

pub fn get_chore(conn: &Connection, id: i64) -> Result<Option<Chore>, ServerError> {
    conn.query_row(
        &format!("SELECT {CHORE_COLUMNS} FROM chores WHERE id = ?"),
        params![id],
        row_to_chore,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select chore failed: {e}")))
}

/// Inserts at the end of the list (`sort_order = max + 1`).
pub fn create_chore(conn: &mut Connection, draft: &ChoreDraft) -> Result<Chore, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let max_order: Option<i64> = tx
        .query_row("SELECT MAX(sort_order) FROM chores", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("select max sort_order failed: {e}")))?;
    let sort_order = max_order.unwrap_or(0) + 1;

    tx.execute(
        "INSERT INTO chores (name, duration, frequency, sort_order, start_date) VALUES (?, ?, ?, ?, ?)",
        params![
            draft.name,
            draft.duration,
            draft.frequency.as_str(),
            sort_order,
            draft.start_date
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert chore failed: {e}")))?;
    let id = tx.last_insert_rowid();

    // Reload so `created_at` carries the column default.
    let chore = get_chore(&tx, id)?.ok_or(ServerError::InternalError)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

    Ok(chore)
}

/// Replaces the editable fields; completion history is untouched.
pub fn update_chore(conn: &Connection, id: i64, draft: &ChoreDraft) -> Result<Chore, ServerError> {
    let changed = conn
        .execute(
            "UPDATE chores SET name = ?, duration = ?, frequency = ?, start_date = ? WHERE id = ?",
            params![
                draft.name,
                draft.duration,
                draft.frequency.as_str(),
                draft.start_date,
                id
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update chore failed: {e}")))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }

    get_chore(conn, id)?.ok_or(ServerError::NotFound)
}

pub fn delete_chore(conn: &mut Connection, id: i64) -> Result<(), ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("DELETE FROM completions WHERE chore_id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete chore completions failed: {e}")))?;

    let removed = tx
        .execute("DELETE FROM chores WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete chore failed: {e}")))?;

    if removed == 0 {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))
}

/// Applies every `(id, sort_order)` pair in one transaction. Unknown ids are ignored.
pub fn reorder_chores(conn: &mut Connection, orders: &[SortOrder]) -> Result<(), ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    {
        let mut stmt = tx
            .prepare("UPDATE chores SET sort_order = ? WHERE id = ?")
            .map_err(|e| ServerError::DbError(format!("prepare reorder failed: {e}")))?;
        for item in orders {
            stmt.execute(params![item.sort_order, item.id])
                .map_err(|e| ServerError::DbError(format!("reorder chore {} failed: {e}", item.id)))?;
        }
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))
}
