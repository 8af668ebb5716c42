//! # AAS Ingest: Legacy XML
//!
//! Reads AAS v2 XML environments (`aasenv`) and fragments into the
//! canonical model.
//!
//! Element discriminators are local tag names capitalized (`property` is a
//! `Property`, `basicEvent` a `BasicEventElement`). Queries are written
//! against logical prefixes (`aas:`, `IEC:`) which [`NamespaceTable`] binds
//! to the URIs the document actually declares.
//!
//! Range, relationship and event elements, qualifiers, and IEC 61360 value
//! lists are not supported and fail with
//! [`aas_ingest_reader::ReadError::NotImplemented`].
//!
//! ```
//! use aas_ingest_reader::Fragment;
//! use aas_ingest_xml::LegacyXmlReader;
//!
//! let xml = r#"<aas:property xmlns:aas="http://www.admin-shell.io/aas/2/0">
//!     <aas:idShort>Speed</aas:idShort>
//!     <aas:valueType>int</aas:valueType>
//!     <aas:value>42</aas:value>
//! </aas:property>"#;
//! let fragment = LegacyXmlReader::default().read_str(xml).unwrap();
//! assert!(matches!(fragment, Fragment::Element(_)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod elements;
pub mod namespaces;
pub mod query;
mod reader;

pub use namespaces::NamespaceTable;
pub use query::PathQuery;
pub use reader::LegacyXmlReader;
