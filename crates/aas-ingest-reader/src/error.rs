//! Errors raised by the readers.

use aas_ingest_model::AncestorChain;

/// Errors that abort a read.
///
/// Every variant names the logical location of the offending node so it can
/// be found in the source without a debugger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// A structurally required field is absent
    #[error("missing required field {owner}.{field} at {path}")]
    MissingRequiredField {
        /// Type owning the field (e.g. `Property`)
        owner: &'static str,
        /// Field name (e.g. `valueType`)
        field: &'static str,
        /// Location of the owning node
        path: String,
    },
    /// A root fragment carries an unknown discriminator
    #[error("unsupported variant '{discriminator}' at {path}")]
    UnsupportedVariant {
        /// The discriminator found in the source
        discriminator: String,
        /// Location of the node
        path: String,
    },
    /// Wrong entry point for the fragment
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// A known gap of the adapter
    #[error("not implemented: {0}")]
    NotImplemented(String),
    /// The source could not be parsed or holds an invalid value
    #[error("malformed source: {0}")]
    MalformedSource(String),
    /// The source nests deeper than the configured limit
    #[error("nesting exceeds {limit} levels at {path}")]
    DepthLimitExceeded {
        /// Configured limit
        limit: usize,
        /// Location where the limit was hit
        path: String,
    },
}

impl ReadError {
    /// A missing field of the node `leaf` below `chain`.
    #[must_use]
    pub fn missing(
        owner: &'static str,
        field: &'static str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Self {
        ReadError::MissingRequiredField {
            owner,
            field,
            path: chain.location(leaf),
        }
    }

    /// An invalid value of `owner.field` at the node `leaf` below `chain`.
    #[must_use]
    pub fn invalid_value(
        owner: &str,
        field: &str,
        value: &str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Self {
        ReadError::MalformedSource(format!(
            "invalid value '{value}' for {owner}.{field} at {}",
            chain.location(leaf)
        ))
    }

    /// A known adapter gap hit at the node `leaf` below `chain`.
    #[must_use]
    pub fn not_implemented(what: &str, chain: &AncestorChain, leaf: Option<&str>) -> Self {
        ReadError::NotImplemented(format!("{what} at {}", chain.location(leaf)))
    }
}
