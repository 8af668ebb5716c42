//! # AAS Ingest Reader
//!
//! The contract every model reader implements, plus the helpers they share.
//!
//! ## Contract
//!
//! - [`ModelReader::read_environment`]: concept descriptions, then shells,
//!   then submodels
//! - [`ModelReader::read`]: one standalone Submodel or SubmodelElement
//!
//! ## Shared helpers
//!
//! - **Identifiers**: [`create_id_short`], [`encode_id_base64url`],
//!   [`synthesize_node_id`]
//! - **Inference**: [`determine_type`], [`extension_to_mime_type`],
//!   [`determine_reference_type`]
//! - **Legacy tables**: [`legacy_value_type`], [`legacy_key_type`]
//! - **Walk**: [`collect_elements`] dispatches a child list and skips
//!   unrecognized discriminators

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod construct;
pub mod contract;
pub mod encoding;
pub mod error;
pub mod inference;
pub mod json;
pub mod legacy;
pub mod walk;

pub use contract::{Fragment, ModelReader, ReaderOptions};
pub use encoding::{
    create_id_short, decode_id_base64url, encode_id_base64url, synthesize_node_id,
};
pub use error::ReadError;
pub use inference::{
    determine_reference_type, determine_type, extension_to_mime_type, mime_type_for_path,
};
pub use legacy::{legacy_key_type, legacy_value_type};
pub use walk::{classify_fragment, collect_elements, Discriminator, FragmentKind};
