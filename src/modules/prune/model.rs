use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuffixError {
    #[error("at least one suffix is required")]
    Empty,
    #[error("suffix must not be empty")]
    EmptySuffix,
}

/// Never empty, and never holds an empty suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: BTreeSet<String>,
}

impl SuffixSet {
    pub fn new<I, S>(suffixes: I) -> Result<Self, SuffixError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for suffix in suffixes {
            let suffix = suffix.into();
            if suffix.is_empty() {
                return Err(SuffixError::EmptySuffix);
            }
            set.insert(suffix);
        }

        if set.is_empty() {
            return Err(SuffixError::Empty);
        }

        Ok(Self { suffixes: set })
    }

    /// Case-sensitive literal tail match against any suffix.
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DropFailure {
    pub collection: String,
    pub cause: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct PruneReport {
    pub database: String,
    pub suffixes: Vec<String>,
    pub dry_run: bool,
    pub scanned: usize,
    pub dropped: Vec<String>,
    pub would_drop: Vec<String>,
    pub failed: Vec<DropFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PruneReport {
    pub fn new(database: impl Into<String>, suffixes: &SuffixSet, dry_run: bool) -> Self {
        Self {
            database: database.into(),
            suffixes: suffixes.iter().map(String::from).collect(),
            dry_run,
            scanned: 0,
            dropped: Vec::new(),
            would_drop: Vec::new(),
            failed: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn matched(&self) -> usize {
        self.dropped.len() + self.would_drop.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
