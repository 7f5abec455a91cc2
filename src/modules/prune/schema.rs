use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::prune::model::{SuffixError, SuffixSet};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PruneRequest {
    #[validate(length(min = 1, message = "At least one suffix is required"))]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl PruneRequest {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn suffix_set(&self) -> Result<SuffixSet, SuffixError> {
        self.validate().map_err(|_| SuffixError::Empty)?;
        SuffixSet::new(self.suffixes.iter().cloned())
    }
}
