// src/db/stats.rs
use crate::domain::Stat;
use crate::errors::ServerError;
use rusqlite::Connection;

/// Completion counts per user, highest first. Users without completions are
/// included with a count of 0.
pub fn leaderboard(conn: &Connection) -> Result<Vec<Stat>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT u.id, u.name, COUNT(c.id) AS completion_count
            FROM users u
            LEFT JOIN completions c ON u.id = c.user_id
            GROUP BY u.id, u.name
            ORDER BY completion_count DESC, u.name ASC
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare leaderboard failed: {e}")))?;

    let stats = stmt
        .query_map([], |row| {
            Ok(Stat {
                user_id: row.get(0)?,
                name: row.get(1)?,
                completion_count: row.get(2)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("leaderboard query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read leaderboard row failed: {e}")))?;

    Ok(stats)
}
