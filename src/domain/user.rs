// src/domain/user.rs

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// One leaderboard row. Users with no completions appear with a count of 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub user_id: i64,
    pub name: String,
    pub completion_count: i64,
}
