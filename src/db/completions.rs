// src/db/completions.rs
use crate::db::users::get_user;
use crate::errors::ServerError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::debug;

/// Records that `user_id` completed `chore_id` at `now`.
///
/// The completion row and the chore's `last_completed_at` are written in one
/// transaction, so readers see both or neither. Two completions racing on the
/// same chore both count; the later commit wins the timestamp. The write lock
/// is taken at `BEGIN IMMEDIATE`; concurrent callers wait on the busy timeout.
pub fn record_completion(
    conn: &mut Connection,
    chore_id: i64,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ServerError> {
    let completed_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    if get_user(&tx, user_id)?.is_none() {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    }

    let updated = tx
        .execute(
            "UPDATE chores SET last_completed_at = ? WHERE id = ?",
            params![completed_at, chore_id],
        )
        .map_err(|e| ServerError::DbError(format!("update last_completed_at failed: {e}")))?;
    if updated == 0 {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    }

    tx.execute(
        "INSERT INTO completions (chore_id, user_id, completed_at) VALUES (?, ?, ?)",
        params![chore_id, user_id, completed_at],
    )
    .map_err(|e| ServerError::DbError(format!("insert completion failed: {e}")))?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

    debug!(chore_id, user_id, %completed_at, "completion recorded");
    Ok(now)
}
