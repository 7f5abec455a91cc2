//! Run with: cargo run --bin prune
//!
//! Reads MONGODB_URI / MONGODB_DATABASE (or MONGO_USER, MONGO_PASSWORD,
//! MONGO_HOST, MONGO_PORT), PRUNE_SUFFIXES and PRUNE_DRY_RUN from the
//! environment or a `.env` file.

use anyhow::Context;
use prunedb::{config, CollectionPruner, MongoCollectionStore, PruneError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::logging::init();

    let db_config = config::database::DatabaseConfig::from_env()?;
    let request = config::prune::request_from_env()?;

    tracing::info!(database = %db_config.database, "connecting to MongoDB");
    let db = config::database::connect(&db_config)
        .await
        .context("could not open MongoDB client")?;
    let store = MongoCollectionStore::new(&db);

    let pruner = CollectionPruner::from_request(&store, &request)?;

    match pruner.run().await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(PruneError::DropFailed { failures, report }) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            for failure in &failures {
                eprintln!("✗ {}: {}", failure.collection, failure.cause);
            }
            anyhow::bail!("{} collection(s) could not be dropped", failures.len())
        }
        Err(PruneError::Output {
            collection,
            source,
            report,
        }) => {
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
            anyhow::bail!("stopped before dropping {}: {}", collection, source)
        }
        Err(e) => Err(e.into()),
    }
}
