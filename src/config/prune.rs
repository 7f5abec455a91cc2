use std::env;

use crate::config::database::ConfigError;
use crate::modules::prune::schema::PruneRequest;

pub const DEFAULT_SUFFIXES: [&str; 4] = ["_mktCap", "_empCt", "_execComp", "_grade"];

/// Builds a [`PruneRequest`] from `PRUNE_SUFFIXES` (comma separated) and `PRUNE_DRY_RUN`.
pub fn request_from_env() -> Result<PruneRequest, ConfigError> {
    let suffixes = match env::var("PRUNE_SUFFIXES") {
        Ok(raw) => parse_suffixes(&raw),
        Err(_) => DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
    };

    let dry_run = match env::var("PRUNE_DRY_RUN") {
        Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidVar {
            key: "PRUNE_DRY_RUN",
            value: raw,
        })?,
        Err(_) => false,
    };

    Ok(PruneRequest { suffixes, dry_run })
}

pub fn parse_suffixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
