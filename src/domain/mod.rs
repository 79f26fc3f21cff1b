pub mod chore;
pub mod due;
pub mod frequency;
pub mod user;

pub use chore::{Chore, ChoreDraft};
pub use due::{evaluate, DueReport, DueStatus, Schedule};
pub use frequency::Frequency;
pub use user::{Stat, User};
