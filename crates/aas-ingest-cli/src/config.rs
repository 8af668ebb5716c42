//! CLI configuration.

use crate::format::SourceFormat;
use aas_ingest_reader::ReaderOptions;
use anyhow::{Context, Result};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Options passed to every reader
    pub options: ReaderOptions,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Format used when none is given on the command line
    pub default_format: Option<SourceFormat>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            options: ReaderOptions::default(),
            pretty: true,
            default_format: None,
        }
    }
}

impl IngestConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AAS_INGEST_MAX_DEPTH`: Maximum ancestor chain length
    /// - `AAS_INGEST_PRETTY`: "true" or "false"
    /// - `AAS_INGEST_FORMAT`: Default source format
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// See [`IngestConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(depth) = lookup("AAS_INGEST_MAX_DEPTH") {
            config.options.max_depth = depth
                .trim()
                .parse()
                .context("Invalid AAS_INGEST_MAX_DEPTH")?;
        }

        if let Some(pretty) = lookup("AAS_INGEST_PRETTY") {
            config.pretty = pretty.trim().parse().context("Invalid AAS_INGEST_PRETTY")?;
        }

        if let Some(format) = lookup("AAS_INGEST_FORMAT") {
            config.default_format = Some(format.parse().context("Invalid AAS_INGEST_FORMAT")?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = IngestConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, IngestConfig::default());
        assert_eq!(config.options.max_depth, 64);
        assert!(config.pretty);
    }

    #[test]
    fn reads_variables() {
        let config = IngestConfig::from_lookup(lookup(&[
            ("AAS_INGEST_MAX_DEPTH", "8"),
            ("AAS_INGEST_PRETTY", "false"),
            ("AAS_INGEST_FORMAT", "legacy-json"),
        ]))
        .unwrap();
        assert_eq!(config.options.max_depth, 8);
        assert!(!config.pretty);
        assert_eq!(config.default_format, Some(SourceFormat::LegacyJson));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(IngestConfig::from_lookup(lookup(&[("AAS_INGEST_MAX_DEPTH", "deep")])).is_err());
        assert!(IngestConfig::from_lookup(lookup(&[("AAS_INGEST_FORMAT", "yaml")])).is_err());
    }
}
