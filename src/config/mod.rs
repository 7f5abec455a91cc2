pub mod database;
pub mod logging;
pub mod prune;
