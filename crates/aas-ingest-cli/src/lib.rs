//! # AAS Ingest CLI
//!
//! File loading and output rendering behind the `aas-ingest` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod format;

pub use config::IngestConfig;
pub use format::SourceFormat;

use aas_ingest_model::Environment;
use aas_ingest_reader::Fragment;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;

/// Pick the format of `path`: the explicit one, else the configured
/// default, else one guessed from the extension.
///
/// # Errors
///
/// Returns error if no format can be determined.
pub fn resolve_format(
    explicit: Option<SourceFormat>,
    config: &IngestConfig,
    path: &Path,
) -> Result<SourceFormat> {
    explicit
        .or(config.default_format)
        .or_else(|| SourceFormat::from_path(path))
        .ok_or_else(|| anyhow!("Cannot determine the format of {}; pass it explicitly", path.display()))
}

/// Read the file at `path` as an environment.
///
/// # Errors
///
/// Returns error if the file cannot be read or its content is invalid.
pub fn load_environment(path: &Path, format: SourceFormat, config: &IngestConfig) -> Result<Environment> {
    let text = read_file(path)?;
    format
        .read_environment(&text, config.options)
        .with_context(|| format!("Failed to read {format} environment from {}", path.display()))
}

/// Read the file at `path` as a single submodel or element.
///
/// # Errors
///
/// Returns error if the file cannot be read or its content is invalid.
pub fn load_fragment(path: &Path, format: SourceFormat, config: &IngestConfig) -> Result<Fragment> {
    let text = read_file(path)?;
    format
        .read_fragment(&text, config.options)
        .with_context(|| format!("Failed to read {format} fragment from {}", path.display()))
}

/// Canonical JSON of `value`.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("Failed to serialize output")
}

/// Canonical JSON of a fragment.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn render_fragment(fragment: &Fragment, pretty: bool) -> Result<String> {
    match fragment {
        Fragment::Submodel(submodel) => render(submodel, pretty),
        Fragment::Element(element) => render(element, pretty),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
