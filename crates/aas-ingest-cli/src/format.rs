//! Source formats and the reader behind each.

use aas_ingest_json::CurrentJsonReader;
use aas_ingest_legacy_json::LegacyJsonReader;
use aas_ingest_model::Environment;
use aas_ingest_opcua::OpcUaReader;
use aas_ingest_reader::{Fragment, ReadError, ReaderOptions};
use aas_ingest_xml::LegacyXmlReader;
use anyhow::bail;
use std::path::Path;
use std::str::FromStr;

/// A supported source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Current (v3) JSON
    Json,
    /// Legacy (v2) JSON
    LegacyJson,
    /// Legacy (v2) XML
    Xml,
    /// Component graph snapshot in JSON form
    OpcUa,
}

impl SourceFormat {
    /// Every format, in the order shown in help output.
    pub const ALL: &'static [SourceFormat] = &[
        SourceFormat::Json,
        SourceFormat::LegacyJson,
        SourceFormat::Xml,
        SourceFormat::OpcUa,
    ];

    /// Command-line name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::LegacyJson => "legacy-json",
            SourceFormat::Xml => "xml",
            SourceFormat::OpcUa => "opcua",
        }
    }

    /// Guess the format from a file extension. JSON files are assumed to
    /// use the current schema.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(SourceFormat::Json),
            "xml" | "aasenv" => Some(SourceFormat::Xml),
            _ => None,
        }
    }

    /// Read `text` as an environment.
    ///
    /// # Errors
    ///
    /// Returns the reader's error.
    pub fn read_environment(self, text: &str, options: ReaderOptions) -> Result<Environment, ReadError> {
        match self {
            SourceFormat::Json => CurrentJsonReader::new(options).read_environment_str(text),
            SourceFormat::LegacyJson => LegacyJsonReader::new(options).read_environment_str(text),
            SourceFormat::Xml => LegacyXmlReader::new(options).read_environment_str(text),
            SourceFormat::OpcUa => OpcUaReader::new(options).read_environment_json(text),
        }
    }

    /// Read `text` as a single submodel or element.
    ///
    /// # Errors
    ///
    /// Returns the reader's error.
    pub fn read_fragment(self, text: &str, options: ReaderOptions) -> Result<Fragment, ReadError> {
        match self {
            SourceFormat::Json => CurrentJsonReader::new(options).read_str(text),
            SourceFormat::LegacyJson => LegacyJsonReader::new(options).read_str(text),
            SourceFormat::Xml => LegacyXmlReader::new(options).read_str(text),
            SourceFormat::OpcUa => OpcUaReader::new(options).read_json(text),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "v3" => Ok(SourceFormat::Json),
            "legacy-json" | "v2-json" => Ok(SourceFormat::LegacyJson),
            "xml" | "v2-xml" => Ok(SourceFormat::Xml),
            "opcua" | "opc-ua" => Ok(SourceFormat::OpcUa),
            other => bail!("Unknown format: {other} (expected json, legacy-json, xml or opcua)"),
        }
    }
}
