//! Identifier encoding and synthesis.
//!
//! - Identifiers of Identifiables are base64url-encoded (no padding)
//! - Missing idShorts of Identifiables are derived from their id
//! - Live-binding node ids are derived from the root submodel id and the
//!   idShort path
//!
//! # References
//!
//! - IDTA 01002-3-1: Specification of the Asset Administration Shell Part 2

use aas_ingest_model::AncestorChain;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Category for which node ids are synthesized (besides no category at all).
pub const BINDABLE_CATEGORY: &str = "VARIABLE";

/// Encode an AAS identifier using base64url without padding.
///
/// # Examples
///
/// ```
/// use aas_ingest_reader::encode_id_base64url;
///
/// let encoded = encode_id_base64url("urn:example:aas:asset1");
/// assert!(!encoded.contains('='));  // No padding
/// assert!(!encoded.contains('+'));  // No standard base64 chars
/// assert!(!encoded.contains('/'));
/// ```
#[must_use]
pub fn encode_id_base64url(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decode a base64url-encoded AAS identifier.
///
/// # Errors
///
/// Returns error if the input is not valid base64url.
///
/// # Examples
///
/// ```
/// use aas_ingest_reader::{encode_id_base64url, decode_id_base64url};
///
/// let original = "urn:example:aas:asset1";
/// let encoded = encode_id_base64url(original);
/// let decoded = decode_id_base64url(&encoded).unwrap();
/// assert_eq!(decoded, original);
/// ```
pub fn decode_id_base64url(encoded: &str) -> Result<String, EncodingError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| EncodingError::Base64Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| EncodingError::Utf8Decode(e.to_string()))
}

/// Derive an idShort from a global identifier.
///
/// Takes the last non-empty segment after `/`, `:` or `#`, replaces every
/// character outside `[A-Za-z0-9_]` with `_`, and prefixes `id_` when the
/// result does not start with a letter. Identifiers without a usable
/// segment fall back to their base64url form.
///
/// # Examples
///
/// ```
/// use aas_ingest_reader::create_id_short;
///
/// assert_eq!(create_id_short("urn:example:aas:asset1"), "asset1");
/// assert_eq!(create_id_short("https://example.org/sm/Name-plate"), "Name_plate");
/// assert_eq!(create_id_short("0173-1#02-AAO677#002"), "id_002");
/// ```
#[must_use]
pub fn create_id_short(id: &str) -> String {
    let segment = id
        .rsplit(['/', ':', '#'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default();

    let mut id_short: String = segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if id_short.is_empty() {
        id_short = encode_id_base64url(id).replace('-', "_");
    }
    if !id_short.starts_with(|c: char| c.is_ascii_alphabetic()) {
        id_short.insert_str(0, "id_");
    }
    id_short
}

/// Synthesize the live-binding node id of a property.
///
/// `base64url(root submodel id) + "." + idShort path below the root`,
/// joined with `/`. Only properties without a category or with category
/// `VARIABLE` are bindable, and only below a submodel.
#[must_use]
pub fn synthesize_node_id(
    chain: &AncestorChain,
    id_short: &str,
    category: Option<&str>,
) -> Option<String> {
    if category.is_some_and(|c| c != BINDABLE_CATEGORY) {
        return None;
    }
    let root_id = chain.root_submodel_id()?;
    Some(format!(
        "{}.{}",
        encode_id_base64url(root_id),
        chain.id_short_path(id_short).join("/")
    ))
}

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EncodingError {
    /// Base64 decoding failed
    #[error("base64 decode error: {0}")]
    Base64Decode(String),
    /// UTF-8 decoding failed
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(String),
}
