//! Submodel element constructors, one per variant.

use crate::attributes::{
    apply_referable, lang_strings, opt_reference, qualifiers, reference_of, specific_asset_ids,
};
use crate::reader::CurrentJsonReader;
use aas_ingest_model::{
    AasSubmodelElements, AncestorChain, AnnotatedRelationshipElement, BasicEventElement, Blob,
    Capability, DataTypeDefXsd, Direction, ElementBase, Entity, EntityType, File, ModelType,
    MultiLanguageProperty, Operation, OperationVariable, Range, Reference, ReferenceElement,
    RelationshipElement, StateOfEvent, SubmodelElement, SubmodelElementCollection,
    SubmodelElementList,
};
use aas_ingest_reader::construct::{
    element_base, element_chain, element_id_short, file_content_type, parse_tag, property,
    require, require_tag,
};
use aas_ingest_reader::json::{opt_array, opt_bool, opt_object, opt_scalar, opt_str};
use aas_ingest_reader::{collect_elements, Discriminator, ReadError};
use serde_json::Value;

/// Discriminator of a current-schema node.
pub(crate) fn discriminate(node: &Value) -> Discriminator {
    opt_str(node, "modelType").map_or_else(
        || Discriminator::Unknown("<missing modelType>".to_string()),
        Discriminator::from_model_type,
    )
}

impl CurrentJsonReader {
    /// Read the elements of the array at `key` below `chain`.
    pub(crate) fn elements(
        &self,
        node: &Value,
        key: &str,
        chain: &AncestorChain,
        in_list: bool,
    ) -> Result<Vec<SubmodelElement>, ReadError> {
        collect_elements(
            opt_array(node, key),
            chain,
            |child| discriminate(child),
            |child, index, model_type| {
                self.element(child, model_type, in_list.then_some(index), chain)
            },
        )
    }

    /// Build one element of a known variant.
    pub(crate) fn element(
        &self,
        node: &Value,
        model_type: ModelType,
        list_index: Option<usize>,
        chain: &AncestorChain,
    ) -> Result<SubmodelElement, ReadError> {
        let id_short =
            element_id_short(opt_str(node, "idShort"), list_index, model_type, chain)?;
        let mut base = element_base(model_type, id_short, chain);
        apply_element_attributes(node, &mut base, chain)?;
        let id_short = base.referable.id_short.clone();
        let leaf = Some(id_short.as_str());
        let owner = model_type.as_str();

        let element = match model_type {
            ModelType::Property => {
                let value_type = parse_tag(
                    opt_str(node, "valueType"),
                    DataTypeDefXsd::from_tag,
                    owner,
                    "valueType",
                    chain,
                    leaf,
                )?;
                let value_id = opt_reference(node, "valueId", chain, leaf)?;
                SubmodelElement::Property(property(
                    base,
                    value_type,
                    opt_scalar(node, "value"),
                    value_id,
                    chain,
                )?)
            }
            ModelType::MultiLanguageProperty => {
                SubmodelElement::MultiLanguageProperty(MultiLanguageProperty {
                    value: lang_strings(node, "value"),
                    value_id: opt_reference(node, "valueId", chain, leaf)?,
                    base,
                })
            }
            ModelType::Range => SubmodelElement::Range(Range {
                value_type: require_tag(
                    opt_str(node, "valueType"),
                    DataTypeDefXsd::from_tag,
                    owner,
                    "valueType",
                    chain,
                    leaf,
                )?,
                min: opt_scalar(node, "min"),
                max: opt_scalar(node, "max"),
                base,
            }),
            ModelType::File => SubmodelElement::File(File {
                value: opt_str(node, "value").map(str::to_string),
                content_type: file_content_type(opt_str(node, "contentType"), None, false),
                base,
            }),
            ModelType::Blob => SubmodelElement::Blob(Blob {
                value: opt_str(node, "value").map(str::to_string),
                content_type: file_content_type(opt_str(node, "contentType"), None, false),
                base,
            }),
            ModelType::ReferenceElement => SubmodelElement::ReferenceElement(ReferenceElement {
                value: opt_reference(node, "value", chain, leaf)?,
                base,
            }),
            ModelType::RelationshipElement => {
                SubmodelElement::RelationshipElement(RelationshipElement {
                    first: required_reference(node, "first", owner, chain, leaf)?,
                    second: required_reference(node, "second", owner, chain, leaf)?,
                    base,
                })
            }
            ModelType::AnnotatedRelationshipElement => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::AnnotatedRelationshipElement(AnnotatedRelationshipElement {
                    first: required_reference(node, "first", owner, chain, leaf)?,
                    second: required_reference(node, "second", owner, chain, leaf)?,
                    annotations: self.elements(node, "annotations", &children, false)?,
                    base,
                })
            }
            ModelType::Entity => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::Entity(Entity {
                    entity_type: require_tag(
                        opt_str(node, "entityType"),
                        EntityType::from_tag,
                        owner,
                        "entityType",
                        chain,
                        leaf,
                    )?,
                    global_asset_id: opt_str(node, "globalAssetId").map(str::to_string),
                    specific_asset_ids: specific_asset_ids(node, chain, leaf)?,
                    statements: self.elements(node, "statements", &children, false)?,
                    base,
                })
            }
            ModelType::Operation => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::Operation(Operation {
                    input_variables: self.variables(node, "inputVariables", &children)?,
                    output_variables: self.variables(node, "outputVariables", &children)?,
                    inoutput_variables: self.variables(node, "inoutputVariables", &children)?,
                    base,
                })
            }
            ModelType::SubmodelElementCollection => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    value: self.elements(node, "value", &children, false)?,
                    base,
                })
            }
            ModelType::SubmodelElementList => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::SubmodelElementList(SubmodelElementList {
                    type_value_list_element: require_tag(
                        opt_str(node, "typeValueListElement"),
                        AasSubmodelElements::from_tag,
                        owner,
                        "typeValueListElement",
                        chain,
                        leaf,
                    )?,
                    value_type_list_element: parse_tag(
                        opt_str(node, "valueTypeListElement"),
                        DataTypeDefXsd::from_tag,
                        owner,
                        "valueTypeListElement",
                        chain,
                        leaf,
                    )?,
                    order_relevant: opt_bool(node, "orderRelevant"),
                    semantic_id_list_element: opt_reference(
                        node,
                        "semanticIdListElement",
                        chain,
                        leaf,
                    )?,
                    value: self.elements(node, "value", &children, true)?,
                    base,
                })
            }
            ModelType::BasicEventElement => {
                SubmodelElement::BasicEventElement(BasicEventElement {
                    observed: required_reference(node, "observed", owner, chain, leaf)?,
                    direction: require_tag(
                        opt_str(node, "direction"),
                        Direction::from_tag,
                        owner,
                        "direction",
                        chain,
                        leaf,
                    )?,
                    state: require_tag(
                        opt_str(node, "state"),
                        StateOfEvent::from_tag,
                        owner,
                        "state",
                        chain,
                        leaf,
                    )?,
                    message_topic: opt_str(node, "messageTopic").map(str::to_string),
                    message_broker: opt_reference(node, "messageBroker", chain, leaf)?,
                    last_update: opt_str(node, "lastUpdate").map(str::to_string),
                    min_interval: opt_str(node, "minInterval").map(str::to_string),
                    max_interval: opt_str(node, "maxInterval").map(str::to_string),
                    base,
                })
            }
            ModelType::Capability => SubmodelElement::Capability(Capability { base }),
            ModelType::AssetAdministrationShell
            | ModelType::Submodel
            | ModelType::ConceptDescription => {
                return Err(ReadError::UnsupportedVariant {
                    discriminator: model_type.to_string(),
                    path: chain.location(leaf),
                })
            }
        };
        Ok(element)
    }

    fn variables(
        &self,
        node: &Value,
        key: &str,
        chain: &AncestorChain,
    ) -> Result<Vec<OperationVariable>, ReadError> {
        opt_array(node, key)
            .iter()
            .map(|variable| {
                let value = opt_object(variable, "value");
                let model_type = match value.map(discriminate) {
                    Some(Discriminator::Element(model_type)) => Some(model_type),
                    _ => None,
                };
                let (value, model_type) = require(
                    value.zip(model_type),
                    "OperationVariable",
                    "value",
                    chain,
                    None,
                )?;
                Ok(OperationVariable {
                    value: self.element(value, model_type, None, chain)?,
                })
            })
            .collect()
    }
}

fn apply_element_attributes(
    node: &Value,
    base: &mut ElementBase,
    chain: &AncestorChain,
) -> Result<(), ReadError> {
    let leaf = base.referable.id_short.clone();
    apply_referable(node, &mut base.referable);
    base.semantic_id = opt_reference(node, "semanticId", chain, Some(&leaf))?;
    base.qualifiers = qualifiers(node, chain, Some(&leaf))?;
    Ok(())
}

fn required_reference(
    node: &Value,
    key: &'static str,
    owner: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    let value = require(opt_object(node, key), owner, key, chain, leaf)?;
    reference_of(value, chain, leaf)
}
