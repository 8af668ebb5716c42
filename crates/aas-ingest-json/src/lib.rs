//! # AAS Ingest: Current-Schema JSON
//!
//! Reads AAS v3 JSON environments and fragments into the canonical model.
//!
//! ## Conventions
//!
//! - The discriminator is the `modelType` string
//! - `null`, `""` and a missing key all mean absent
//! - Numbers and booleans are accepted where the schema expects a lexical
//!   value string
//! - `ReferenceElement.value` and `AnnotatedRelationshipElement.annotations`
//!   are optional
//!
//! ```
//! use aas_ingest_json::CurrentJsonReader;
//!
//! let reader = CurrentJsonReader::default();
//! let env = reader
//!     .read_environment_str(r#"{"submodels": [{"id": "urn:example:sm:1"}]}"#)
//!     .unwrap();
//! assert_eq!(env.submodels[0].identifiable.referable.id_short, "id_1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod elements;
mod reader;

pub use reader::CurrentJsonReader;
