//! # AAS Ingest: OPC UA
//!
//! Reads AAS component graphs, as exposed by an OPC UA server implementing
//! the AAS companion specification, into the canonical model.
//!
//! The reader never talks to a server. It walks an already-fetched
//! [`ComponentGraph`] snapshot: components are discriminated by their type
//! definition (`AASPropertyType`, `AASSubmodelType`, ...) and attributes are
//! read from children by browse name. Namespace indices (`1:Name`) are
//! ignored, reference lists and folders are looked through, and
//! enumerations may appear in numeric or symbolic form.
//!
//! ```
//! use aas_ingest_opcua::{ComponentGraph, ComponentNode, OpcUaReader};
//! use aas_ingest_reader::{Fragment, ModelReader};
//!
//! let mut graph = ComponentGraph::new();
//! let speed = graph.add_root(ComponentNode::new("1:Speed", "AASPropertyType"));
//! graph.add_property(speed, "ValueType", 6);
//! graph.add_property(speed, "Value", "42");
//!
//! let fragment = OpcUaReader::default().read(&graph).unwrap();
//! assert!(matches!(fragment, Fragment::Element(_)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod elements;
pub mod enums;
pub mod graph;
mod reader;
pub mod types;

pub use attributes::IEC61360_TEMPLATE;
pub use graph::{ComponentGraph, ComponentId, ComponentNode};
pub use reader::OpcUaReader;
