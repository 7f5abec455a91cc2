use std::io::{self, Write};
use thiserror::Error;

use crate::modules::collection::crud::CollectionStore;
use crate::modules::prune::model::{DropFailure, PruneReport, SuffixError, SuffixSet};
use crate::modules::prune::schema::PruneRequest;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("database unavailable: {source}")]
    DatabaseUnavailable {
        #[source]
        source: BoxError,
    },
    #[error("failed to drop {} collection(s)", .failures.len())]
    DropFailed {
        failures: Vec<DropFailure>,
        report: Box<PruneReport>,
    },
    #[error("invalid suffixes: {0}")]
    InvalidSuffixes(#[from] SuffixError),
    #[error("failed to write drop log for {collection}: {source}")]
    Output {
        collection: String,
        #[source]
        source: io::Error,
        report: Box<PruneReport>,
    },
}

/// Drops every collection whose name ends with one of the configured suffixes.
/// A failed drop does not stop the run.
pub struct CollectionPruner<'a, S: CollectionStore> {
    store: &'a S,
    suffixes: SuffixSet,
    dry_run: bool,
}

impl<'a, S: CollectionStore> CollectionPruner<'a, S> {
    pub fn new(store: &'a S, suffixes: SuffixSet) -> Self {
        Self {
            store,
            suffixes,
            dry_run: false,
        }
    }

    pub fn from_request(store: &'a S, request: &PruneRequest) -> Result<Self, PruneError> {
        let suffixes = request.suffix_set()?;
        Ok(Self::new(store, suffixes).dry_run(request.dry_run))
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<PruneReport, PruneError> {
        let mut stdout = io::stdout();
        self.run_with_output(&mut stdout).await
    }

    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<PruneReport, PruneError> {
        let mut report = PruneReport::new(self.store.database_name(), &self.suffixes, self.dry_run);

        let names = self
            .store
            .list_collection_names()
            .await
            .map_err(|e| PruneError::DatabaseUnavailable { source: Box::new(e) })?;
        report.scanned = names.len();

        for name in names.into_iter().filter(|n| self.suffixes.matches(n)) {
            let prefix = if self.dry_run { "Would drop" } else { "Dropping" };

            // the line must be out before the drop is issued
            if let Err(source) = write_line(out, prefix, &name) {
                tracing::error!(collection = %name, error = %source, "failed to write drop log");
                report.finish();
                return Err(PruneError::Output {
                    collection: name,
                    source,
                    report: Box::new(report),
                });
            }

            if self.dry_run {
                report.would_drop.push(name);
                continue;
            }

            tracing::info!(collection = %name, "dropping collection");

            match self.store.drop_collection(&name).await {
                Ok(()) => report.dropped.push(name),
                Err(e) => {
                    tracing::error!(collection = %name, error = %e, "failed to drop collection");
                    report.failed.push(DropFailure {
                        collection: name,
                        cause: e.to_string(),
                    });
                }
            }
        }

        report.finish();

        if self.dry_run {
            tracing::warn!(
                matched = report.would_drop.len(),
                scanned = report.scanned,
                "dry run, nothing dropped"
            );
        } else {
            tracing::info!(
                dropped = report.dropped.len(),
                failed = report.failed.len(),
                scanned = report.scanned,
                "prune finished"
            );
        }

        if report.is_clean() {
            Ok(report)
        } else {
            Err(PruneError::DropFailed {
                failures: report.failed.clone(),
                report: Box::new(report),
            })
        }
    }
}

fn write_line<W: Write>(out: &mut W, prefix: &str, name: &str) -> io::Result<()> {
    writeln!(out, "{}: {}", prefix, name)?;
    out.flush()
}

pub async fn prune_by_suffixes<S, I, T>(store: &S, suffixes: I) -> Result<PruneReport, PruneError>
where
    S: CollectionStore,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let suffixes = SuffixSet::new(suffixes)?;
    CollectionPruner::new(store, suffixes).run().await
}
