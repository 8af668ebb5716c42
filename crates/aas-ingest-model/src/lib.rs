//! # AAS Ingest Model
//!
//! The canonical Asset Administration Shell object graph that every reader
//! in the workspace produces.
//!
//! This crate provides:
//! - Identifiables (`AssetAdministrationShell`, `Submodel`, `ConceptDescription`)
//!   collected in an [`Environment`]
//! - The closed [`SubmodelElement`] variant set
//! - [`Reference`]/[`Key`] with the non-empty key invariant
//! - [`AncestorChain`], the explicit ancestry threaded through a reader's walk
//!
//! The model serializes to the current (v3) JSON schema shape. Absent
//! optional fields and empty lists are omitted so that output stays
//! diff-stable across source formats.

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

pub mod ancestry;
pub mod element;
pub mod kinds;
pub mod model;
pub mod reference;

pub use ancestry::{Ancestor, AncestorChain};
pub use element::{
    AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, ElementBase, Entity, File,
    MultiLanguageProperty, Operation, OperationVariable, Property, Range, ReferenceElement,
    RelationshipElement, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
pub use kinds::{
    AasSubmodelElements, AssetKind, DataTypeDefXsd, Direction, EntityType, KeyType, ModelType,
    ModellingKind, QualifierKind, ReferenceType, StateOfEvent,
};
pub use model::{
    AdministrativeInformation, AssetAdministrationShell, AssetInformation, ConceptDescription,
    DataSpecificationContent, DataSpecificationIec61360, EmbeddedDataSpecification, Environment,
    Identifiable, LangString, LevelType, Qualifier, Referable, SpecificAssetId, Submodel,
    ValueList, ValueReferencePair,
};
pub use reference::{Key, Reference, ReferenceError};
