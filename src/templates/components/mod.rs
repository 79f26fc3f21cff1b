pub mod badge;
pub mod card;
pub mod progress;

pub use badge::status_badge;
pub use card::card;
pub use progress::progress_bar;
