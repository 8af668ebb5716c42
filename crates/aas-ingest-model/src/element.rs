//! The closed set of submodel element variants.
//!
//! | Variant | Children |
//! |---------|----------|
//! | SubmodelElementCollection | `value` |
//! | SubmodelElementList | `value` |
//! | Entity | `statements` |
//! | AnnotatedRelationshipElement | `annotations` |
//! | Operation | one element per input/output/inoutput variable |
//! | all others | none |

use crate::kinds::{
    AasSubmodelElements, DataTypeDefXsd, Direction, EntityType, ModelType, StateOfEvent,
};
use crate::model::{LangString, Qualifier, Referable, SpecificAssetId};
use crate::reference::Reference;
use serde::Serialize;

/// Attributes every submodel element carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    /// Referable attributes
    #[serde(flatten)]
    pub referable: Referable,
    /// Semantic definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Qualifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
}

impl ElementBase {
    /// Base with only the model type and idShort set.
    #[must_use]
    pub fn new(model_type: ModelType, id_short: impl Into<String>) -> Self {
        Self {
            referable: Referable::new(model_type, id_short),
            semantic_id: None,
            qualifiers: Vec::new(),
        }
    }
}

/// A single-valued data element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Value type, declared or inferred from `value`
    pub value_type: DataTypeDefXsd,
    /// Lexical value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference to the value's concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
    /// Live-binding address hint for variable properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

/// A property with one value per language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLanguageProperty {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Values per language
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<LangString>,
    /// Reference to the value's concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

/// A closed interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Value type of both bounds
    pub value_type: DataTypeDefXsd,
    /// Lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    /// Upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// A reference to a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Path or URI of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// MIME type, empty when unknown
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
}

/// Inline binary content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Base64-encoded content as found in the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// MIME type, empty when unknown
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
}

/// An element holding a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceElement {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// The reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Reference>,
}

/// A relationship between two referables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipElement {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Subject of the relationship
    pub first: Reference,
    /// Object of the relationship
    pub second: Reference,
}

/// A relationship carrying annotation elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRelationshipElement {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Subject of the relationship
    pub first: Reference,
    /// Object of the relationship
    pub second: Reference,
    /// Annotations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<SubmodelElement>,
}

/// An entity with its own statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Co-managed or self-managed
    pub entity_type: EntityType,
    /// Global asset identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    /// Additional asset identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    /// Statements about the entity
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<SubmodelElement>,
}

/// Wrapper for exactly one operation argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationVariable {
    /// The argument element
    pub value: SubmodelElement,
}

/// An invocable operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Input arguments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_variables: Vec<OperationVariable>,
    /// Output arguments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_variables: Vec<OperationVariable>,
    /// In/out arguments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inoutput_variables: Vec<OperationVariable>,
}

/// An unordered set of elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementCollection {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Child elements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

/// An ordered list of homogeneous elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementList {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Element type of all children
    pub type_value_list_element: AasSubmodelElements,
    /// Value type of all children, for data elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type_list_element: Option<DataTypeDefXsd>,
    /// Whether order is significant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_relevant: Option<bool>,
    /// Semantic definition shared by all children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id_list_element: Option<Reference>,
    /// Child elements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

/// An event source or sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEventElement {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
    /// Observed referable
    pub observed: Reference,
    /// Input or output
    pub direction: Direction,
    /// On or off
    pub state: StateOfEvent,
    /// Topic events are published on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_topic: Option<String>,
    /// Broker the topic lives on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_broker: Option<Reference>,
    /// Timestamp of the last update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Minimum interval between events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_interval: Option<String>,
    /// Maximum interval between events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_interval: Option<String>,
}

/// A capability of the asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capability {
    /// Common attributes
    #[serde(flatten)]
    pub base: ElementBase,
}

/// Any submodel element.
///
/// Each variant serializes with its `modelType` tag taken from the base.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmodelElement {
    /// See [`Property`]
    Property(Property),
    /// See [`MultiLanguageProperty`]
    MultiLanguageProperty(MultiLanguageProperty),
    /// See [`Range`]
    Range(Range),
    /// See [`File`]
    File(File),
    /// See [`Blob`]
    Blob(Blob),
    /// See [`ReferenceElement`]
    ReferenceElement(ReferenceElement),
    /// See [`RelationshipElement`]
    RelationshipElement(RelationshipElement),
    /// See [`AnnotatedRelationshipElement`]
    AnnotatedRelationshipElement(AnnotatedRelationshipElement),
    /// See [`Entity`]
    Entity(Entity),
    /// See [`Operation`]
    Operation(Operation),
    /// See [`SubmodelElementCollection`]
    SubmodelElementCollection(SubmodelElementCollection),
    /// See [`SubmodelElementList`]
    SubmodelElementList(SubmodelElementList),
    /// See [`BasicEventElement`]
    BasicEventElement(BasicEventElement),
    /// See [`Capability`]
    Capability(Capability),
}

impl SubmodelElement {
    /// Common attributes of the element.
    #[must_use]
    pub fn base(&self) -> &ElementBase {
        match self {
            SubmodelElement::Property(e) => &e.base,
            SubmodelElement::MultiLanguageProperty(e) => &e.base,
            SubmodelElement::Range(e) => &e.base,
            SubmodelElement::File(e) => &e.base,
            SubmodelElement::Blob(e) => &e.base,
            SubmodelElement::ReferenceElement(e) => &e.base,
            SubmodelElement::RelationshipElement(e) => &e.base,
            SubmodelElement::AnnotatedRelationshipElement(e) => &e.base,
            SubmodelElement::Entity(e) => &e.base,
            SubmodelElement::Operation(e) => &e.base,
            SubmodelElement::SubmodelElementCollection(e) => &e.base,
            SubmodelElement::SubmodelElementList(e) => &e.base,
            SubmodelElement::BasicEventElement(e) => &e.base,
            SubmodelElement::Capability(e) => &e.base,
        }
    }

    /// Referable attributes of the element.
    #[must_use]
    pub fn referable(&self) -> &Referable {
        &self.base().referable
    }

    /// The element's idShort.
    #[must_use]
    pub fn id_short(&self) -> &str {
        &self.referable().id_short
    }

    /// The element's discriminator.
    #[must_use]
    pub fn model_type(&self) -> ModelType {
        self.referable().model_type
    }

    /// Direct child elements, in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&SubmodelElement> {
        match self {
            SubmodelElement::SubmodelElementCollection(e) => e.value.iter().collect(),
            SubmodelElement::SubmodelElementList(e) => e.value.iter().collect(),
            SubmodelElement::Entity(e) => e.statements.iter().collect(),
            SubmodelElement::AnnotatedRelationshipElement(e) => e.annotations.iter().collect(),
            SubmodelElement::Operation(e) => e
                .input_variables
                .iter()
                .chain(&e.output_variables)
                .chain(&e.inoutput_variables)
                .map(|v| &v.value)
                .collect(),
            SubmodelElement::Property(_)
            | SubmodelElement::MultiLanguageProperty(_)
            | SubmodelElement::Range(_)
            | SubmodelElement::File(_)
            | SubmodelElement::Blob(_)
            | SubmodelElement::ReferenceElement(_)
            | SubmodelElement::RelationshipElement(_)
            | SubmodelElement::BasicEventElement(_)
            | SubmodelElement::Capability(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id_short: &str) -> SubmodelElement {
        SubmodelElement::Property(Property {
            base: ElementBase::new(ModelType::Property, id_short),
            value_type: DataTypeDefXsd::Int,
            value: Some("7".to_string()),
            value_id: None,
            node_id: None,
        })
    }

    #[test]
    fn collection_children_in_order() {
        let collection = SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
            base: ElementBase::new(ModelType::SubmodelElementCollection, "Data"),
            value: vec![property("A"), property("B")],
        });
        let ids: Vec<_> = collection.children().iter().map(|e| e.id_short()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(collection.model_type(), ModelType::SubmodelElementCollection);
    }

    #[test]
    fn operation_children_span_all_variable_lists() {
        let operation = SubmodelElement::Operation(Operation {
            base: ElementBase::new(ModelType::Operation, "Run"),
            input_variables: vec![OperationVariable { value: property("In") }],
            output_variables: vec![OperationVariable { value: property("Out") }],
            inoutput_variables: Vec::new(),
        });
        assert_eq!(operation.children().len(), 2);
    }

    #[test]
    fn untagged_enum_carries_model_type_from_base() {
        let json = serde_json::to_value(property("Speed")).unwrap();
        assert_eq!(json["modelType"], "Property");
        assert_eq!(json["valueType"], "xs:int");
        assert!(json.get("nodeId").is_none());
    }

    #[test]
    fn capability_serializes_only_base() {
        let capability = SubmodelElement::Capability(Capability {
            base: ElementBase::new(ModelType::Capability, "Welding"),
        });
        let json = serde_json::to_value(capability).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"modelType": "Capability", "idShort": "Welding"})
        );
    }
}
