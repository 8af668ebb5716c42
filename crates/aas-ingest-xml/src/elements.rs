//! Submodel element constructors for the v2 XML schema.

use crate::attributes::XmlContext;
use aas_ingest_model::{
    AncestorChain, Blob, Capability, ElementBase, Entity, EntityType, File, ModelType,
    MultiLanguageProperty, Operation, OperationVariable, ReferenceElement, SubmodelElement,
    SubmodelElementCollection,
};
use aas_ingest_reader::construct::{
    element_base, element_chain, element_id_short, file_content_type, parse_tag, property,
    require, require_tag,
};
use aas_ingest_reader::{collect_elements, legacy_value_type, Discriminator, ReadError};
use roxmltree::Node;

/// Discriminator of an element node: its local tag name, capitalized.
pub(crate) fn discriminate(node: &Node<'_, '_>) -> Discriminator {
    let name = node.tag_name().name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            Discriminator::from_legacy_model_type(&format!("{}{}", first.to_uppercase(), chars.as_str()))
        }
        None => Discriminator::Unknown("<unnamed>".to_string()),
    }
}

/// Step through a `submodelElement` wrapper to the element it holds.
pub(crate) fn unwrap_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    if node.tag_name().name() == "submodelElement" {
        node.children().find(Node::is_element)
    } else {
        Some(node)
    }
}

impl XmlContext<'_> {
    /// Elements held at `path` below `node`, each wrapped in a
    /// `submodelElement` node.
    pub(crate) fn elements(
        &self,
        node: Node<'_, '_>,
        path: &str,
        chain: &AncestorChain,
    ) -> Result<Vec<SubmodelElement>, ReadError> {
        collect_elements(
            self.select(node, &format!("{path}/aas:submodelElement/*"))?,
            chain,
            discriminate,
            |child, _, model_type| self.element(child, model_type, chain),
        )
    }

    pub(crate) fn element(
        &self,
        node: Node<'_, '_>,
        model_type: ModelType,
        chain: &AncestorChain,
    ) -> Result<SubmodelElement, ReadError> {
        let id_short = element_id_short(self.text(node, "aas:idShort")?, None, model_type, chain)?;
        let mut base = element_base(model_type, id_short, chain);
        self.apply_element_attributes(node, &mut base, chain)?;
        let id_short = base.referable.id_short.clone();
        let leaf = Some(id_short.as_str());
        let owner = model_type.as_str();

        let element = match model_type {
            ModelType::Property => {
                let value_type = parse_tag(
                    self.text(node, "aas:valueType")?,
                    legacy_value_type,
                    owner,
                    "valueType",
                    chain,
                    leaf,
                )?;
                let value_id = self.opt_reference(node, "aas:valueId", chain, leaf)?;
                let value = self.text(node, "aas:value")?.map(str::to_string);
                SubmodelElement::Property(property(base, value_type, value, value_id, chain)?)
            }
            ModelType::MultiLanguageProperty => {
                SubmodelElement::MultiLanguageProperty(MultiLanguageProperty {
                    value: self.lang_strings(node, "aas:value")?,
                    value_id: self.opt_reference(node, "aas:valueId", chain, leaf)?,
                    base,
                })
            }
            ModelType::File => {
                let value = self.text(node, "aas:value")?;
                SubmodelElement::File(File {
                    content_type: file_content_type(self.text(node, "aas:mimeType")?, value, true),
                    value: value.map(str::to_string),
                    base,
                })
            }
            ModelType::Blob => SubmodelElement::Blob(Blob {
                value: self.text(node, "aas:value")?.map(str::to_string),
                content_type: file_content_type(self.text(node, "aas:mimeType")?, None, false),
                base,
            }),
            ModelType::ReferenceElement => SubmodelElement::ReferenceElement(ReferenceElement {
                value: Some(self.required_reference(node, "aas:value", owner, "value", chain, leaf)?),
                base,
            }),
            ModelType::Entity => {
                let children = element_chain(self.options, chain, &base)?;
                let global_asset_id = self
                    .opt_reference(node, "aas:assetRef", chain, leaf)?
                    .map(|asset| asset.first_key().value.clone());
                SubmodelElement::Entity(Entity {
                    entity_type: require_tag(
                        self.text(node, "aas:entityType")?,
                        EntityType::from_tag,
                        owner,
                        "entityType",
                        chain,
                        leaf,
                    )?,
                    global_asset_id,
                    specific_asset_ids: Vec::new(),
                    statements: self.elements(node, "aas:statements", &children)?,
                    base,
                })
            }
            ModelType::Operation => {
                let children = element_chain(self.options, chain, &base)?;
                SubmodelElement::Operation(Operation {
                    input_variables: self.variables(node, "aas:inputVariable", &children)?,
                    output_variables: self.variables(node, "aas:outputVariable", &children)?,
                    inoutput_variables: self.variables(node, "aas:inoutputVariable", &children)?,
                    base,
                })
            }
            ModelType::SubmodelElementCollection => {
                let children = element_chain(self.options, chain, &base)?;
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    value: self.elements(node, "aas:value", &children)?,
                    base,
                })
            }
            ModelType::Capability => SubmodelElement::Capability(Capability { base }),
            ModelType::Range
            | ModelType::RelationshipElement
            | ModelType::AnnotatedRelationshipElement
            | ModelType::BasicEventElement => {
                return Err(ReadError::not_implemented(owner, chain, leaf));
            }
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

    /// Variables of one direction. Each `path` node either holds
    /// `operationVariable` children or is itself the variable.
    fn variables(
        &self,
        node: Node<'_, '_>,
        path: &str,
        chain: &AncestorChain,
    ) -> Result<Vec<OperationVariable>, ReadError> {
        let mut variables = Vec::new();
        for container in self.select(node, path)? {
            let nested = self.select(container, "aas:operationVariable")?;
            let nodes = if nested.is_empty() { vec![container] } else { nested };
            for variable in nodes {
                let value = self
                    .first(variable, "aas:value/*")?
                    .and_then(unwrap_element)
                    .and_then(|value| match discriminate(&value) {
                        Discriminator::Element(model_type) => Some((value, model_type)),
                        _ => None,
                    });
                let (value, model_type) = require(value, "OperationVariable", "value", chain, None)?;
                variables.push(OperationVariable {
                    value: self.element(value, model_type, chain)?,
                });
            }
        }
        Ok(variables)
    }

    fn apply_element_attributes(
        &self,
        node: Node<'_, '_>,
        base: &mut ElementBase,
        chain: &AncestorChain,
    ) -> Result<(), ReadError> {
        let leaf = base.referable.id_short.clone();
        self.apply_referable(node, &mut base.referable)?;
        base.semantic_id = self.opt_reference(node, "aas:semanticId", chain, Some(&leaf))?;
        self.reject_qualifiers(node, chain, Some(&leaf))?;
        Ok(())
    }
}
