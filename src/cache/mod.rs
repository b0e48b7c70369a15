//! Local persistence for offline use.
//!
//! - SQLite tables for Pokémon summaries (with the user's favourite flag) and
//!   immutable detail records
//! - Observable queries over those tables
//! - An on-disk artwork cache keyed by Pokémon name

mod images;
mod storage;
mod watch;

pub use images::ImageCache;
pub use storage::SqliteStorage;
pub use watch::TableWatch;
