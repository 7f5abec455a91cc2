pub mod collection;
pub mod prune;
