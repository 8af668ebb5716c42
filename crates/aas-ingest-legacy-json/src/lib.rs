//! # AAS Ingest: Legacy JSON
//!
//! Reads AAS v2 JSON environments and fragments into the canonical model.
//!
//! ## Schema drift
//!
//! | v2 | Canonical |
//! |----|-----------|
//! | `modelType: {"name": ...}` | `modelType` tag |
//! | `identification.id` | `id` |
//! | `assets[]` + shell `asset` reference | `assetInformation` |
//! | `valueType.dataObjectType.name` | `xs:*` value type |
//! | key `local` flag | reference type |
//! | `mimeType` (or the value's extension) | `contentType` |
//! | `BasicEvent` | `BasicEventElement` (direction `input`, state `off`) |
//! | `inputVariable`, `outputVariable`, `inoutputVariable` | operation variables |
//! | `valueReferencePairTypes`, `levelType` names | IEC 61360 value list, level flags |
//!
//! `SubmodelElementList` does not exist in v2 and is skipped; `Formula`
//! constraints fail with [`aas_ingest_reader::ReadError::NotImplemented`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod elements;
mod reader;

pub use reader::LegacyJsonReader;
