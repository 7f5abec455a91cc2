pub mod config;
pub mod modules;
pub mod services;

pub use modules::collection::crud::{CollectionStore, MongoCollectionStore};
pub use modules::prune::model::{DropFailure, PruneReport, SuffixError, SuffixSet};
pub use modules::prune::schema::PruneRequest;
pub use services::pruner::{prune_by_suffixes, CollectionPruner, PruneError};
pub use services::verifier::{ensure_collection, CollectionCheck, EnsureOutcome};
