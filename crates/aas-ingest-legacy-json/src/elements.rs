//! Submodel element constructors for the v2 JSON schema.

use crate::attributes::{
    apply_referable, lang_strings, model_type_name, opt_reference, opt_value_type, qualifiers,
    required_reference,
};
use crate::reader::LegacyJsonReader;
use aas_ingest_model::{
    AncestorChain, AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, Direction,
    ElementBase, Entity, EntityType, File, ModelType, MultiLanguageProperty, Operation,
    OperationVariable, Range, ReferenceElement, RelationshipElement, StateOfEvent,
    SubmodelElement, SubmodelElementCollection,
};
use aas_ingest_reader::construct::{
    element_base, element_chain, element_id_short, file_content_type, property, require,
    require_tag,
};
use aas_ingest_reader::json::{opt_array, opt_object, opt_scalar, opt_str};
use aas_ingest_reader::{collect_elements, Discriminator, ReadError};
use serde_json::Value;

pub(crate) fn discriminate(node: &Value) -> Discriminator {
    model_type_name(node).map_or_else(
        || Discriminator::Unknown("<missing modelType>".to_string()),
        Discriminator::from_legacy_model_type,
    )
}

impl LegacyJsonReader {
    pub(crate) fn elements(
        &self,
        nodes: &[Value],
        chain: &AncestorChain,
    ) -> Result<Vec<SubmodelElement>, ReadError> {
        collect_elements(
            nodes,
            chain,
            |child| discriminate(child),
            |child, _, model_type| self.element(child, model_type, chain),
        )
    }

    pub(crate) fn element(
        &self,
        node: &Value,
        model_type: ModelType,
        chain: &AncestorChain,
    ) -> Result<SubmodelElement, ReadError> {
        let id_short = element_id_short(opt_str(node, "idShort"), None, model_type, chain)?;
        let mut base = element_base(model_type, id_short, chain);
        apply_element_attributes(node, &mut base, chain)?;
        let id_short = base.referable.id_short.clone();
        let leaf = Some(id_short.as_str());
        let owner = model_type.as_str();

        let element = match model_type {
            ModelType::Property => {
                let value_type = opt_value_type(node, "valueType", owner, chain, leaf)?;
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
            ModelType::Range => {
                let value_type = opt_value_type(node, "valueType", owner, chain, leaf)?;
                SubmodelElement::Range(Range {
                    value_type: require(value_type, owner, "valueType", chain, leaf)?,
                    min: opt_scalar(node, "min"),
                    max: opt_scalar(node, "max"),
                    base,
                })
            }
            ModelType::File => {
                let value = opt_str(node, "value");
                SubmodelElement::File(File {
                    content_type: file_content_type(opt_str(node, "mimeType"), value, true),
                    value: value.map(str::to_string),
                    base,
                })
            }
            ModelType::Blob => SubmodelElement::Blob(Blob {
                value: opt_str(node, "value").map(str::to_string),
                content_type: file_content_type(opt_str(node, "mimeType"), None, false),
                base,
            }),
            ModelType::ReferenceElement => SubmodelElement::ReferenceElement(ReferenceElement {
                value: Some(required_reference(node, "value", owner, chain, leaf)?),
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
                let annotations = node
                    .get("annotations")
                    .or_else(|| node.get("annotation"))
                    .and_then(Value::as_array);
                let annotations = require(annotations, owner, "annotations", chain, leaf)?;
                SubmodelElement::AnnotatedRelationshipElement(AnnotatedRelationshipElement {
                    first: required_reference(node, "first", owner, chain, leaf)?,
                    second: required_reference(node, "second", owner, chain, leaf)?,
                    annotations: self.elements(annotations, &children)?,
                    base,
                })
            }
            ModelType::Entity => {
                let children = element_chain(&self.options, chain, &base)?;
                let global_asset_id = opt_reference(node, "asset", chain, leaf)?
                    .map(|asset| asset.first_key().value.clone());
                SubmodelElement::Entity(Entity {
                    entity_type: require_tag(
                        opt_str(node, "entityType"),
                        EntityType::from_tag,
                        owner,
                        "entityType",
                        chain,
                        leaf,
                    )?,
                    global_asset_id,
                    specific_asset_ids: Vec::new(),
                    statements: self.elements(opt_array(node, "statements"), &children)?,
                    base,
                })
            }
            ModelType::Operation => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::Operation(Operation {
                    input_variables: self.variables(node, "inputVariable", &children)?,
                    output_variables: self.variables(node, "outputVariable", &children)?,
                    inoutput_variables: self.variables(node, "inoutputVariable", &children)?,
                    base,
                })
            }
            ModelType::SubmodelElementCollection => {
                let children = element_chain(&self.options, chain, &base)?;
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    value: self.elements(opt_array(node, "value"), &children)?,
                    base,
                })
            }
            ModelType::BasicEventElement => {
                SubmodelElement::BasicEventElement(BasicEventElement {
                    observed: required_reference(node, "observed", owner, chain, leaf)?,
                    direction: Direction::Input,
                    state: StateOfEvent::Off,
                    message_topic: None,
                    message_broker: None,
                    last_update: None,
                    min_interval: None,
                    max_interval: None,
                    base,
                })
            }
            ModelType::Capability => SubmodelElement::Capability(Capability { base }),
            ModelType::SubmodelElementList
            | ModelType::AssetAdministrationShell
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
                    value: self.element(value, model_type, chain)?,
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
