pub mod chores;
pub mod completions;
pub mod connection;
pub mod stats;
pub mod users;

pub use connection::{init_db, Database};
