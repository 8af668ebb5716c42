//! Submodel element constructors over the component graph.

use crate::attributes::{lang_strings, GraphContext};
use crate::enums;
use crate::graph::ComponentId;
use crate::types::{discriminate, is_structural};
use aas_ingest_model::{
    AasSubmodelElements, AncestorChain, AnnotatedRelationshipElement, BasicEventElement, Blob,
    Capability, ElementBase, Entity, File, ModelType, MultiLanguageProperty, Operation,
    OperationVariable, Range, ReferenceElement, RelationshipElement, SubmodelElement,
    SubmodelElementCollection, SubmodelElementList,
};
use aas_ingest_reader::construct::{
    element_base, element_chain, element_id_short, file_content_type, parse_tag, property,
    require,
};
use aas_ingest_reader::json::opt_str;
use aas_ingest_reader::{collect_elements, Discriminator, ReadError};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

const INPUT_ARGUMENTS: &str = "InputArguments";
const OUTPUT_ARGUMENTS: &str = "OutputArguments";

impl GraphContext<'_> {
    pub(crate) fn discriminate(&self, id: ComponentId) -> Discriminator {
        self.graph.node(id).map_or_else(
            || Discriminator::Unknown(format!("<missing component {id}>")),
            |node| discriminate(node.type_tag()),
        )
    }

    /// Elements below the container `id`, after flattening. Components
    /// carrying attributes of the container are left out.
    pub(crate) fn elements(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
        in_list: bool,
    ) -> Result<Vec<SubmodelElement>, ReadError> {
        let children: Vec<ComponentId> = self
            .graph
            .flatten(id)?
            .into_iter()
            .filter(|child| match self.graph.node(*child) {
                Some(node) if is_structural(node.type_tag()) => {
                    tracing::trace!(
                        container = %chain,
                        component = %node.browse_name,
                        type_definition = %node.type_definition,
                        "Skipping structural component"
                    );
                    false
                }
                _ => true,
            })
            .collect();

        collect_elements(
            children,
            chain,
            |child| self.discriminate(*child),
            |child, index, model_type| {
                self.element(child, model_type, in_list.then_some(index), chain)
            },
        )
    }

    pub(crate) fn element(
        &self,
        id: ComponentId,
        model_type: ModelType,
        list_index: Option<usize>,
        chain: &AncestorChain,
    ) -> Result<SubmodelElement, ReadError> {
        let node = self.graph.resolve(id)?;
        let name = Some(node.name()).filter(|n| !n.is_empty());
        let id_short = element_id_short(name, list_index, model_type, chain)?;
        let mut base = element_base(model_type, id_short, chain);
        self.apply_element_attributes(id, &mut base, chain)?;
        let id_short = base.referable.id_short.clone();
        let leaf = Some(id_short.as_str());
        let owner = model_type.as_str();

        let element = match model_type {
            ModelType::Property => {
                let value_type =
                    self.enumeration(id, "ValueType", enums::value_type, owner, "valueType", chain, leaf)?;
                let value_id = self.opt_reference(id, "ValueId", chain, leaf)?;
                let value = self.text(id, "Value")?;
                SubmodelElement::Property(property(base, value_type, value, value_id, chain)?)
            }
            ModelType::MultiLanguageProperty => {
                SubmodelElement::MultiLanguageProperty(MultiLanguageProperty {
                    value: self.lang_strings(id, "Value")?,
                    value_id: self.opt_reference(id, "ValueId", chain, leaf)?,
                    base,
                })
            }
            ModelType::Range => {
                let value_type =
                    self.enumeration(id, "ValueType", enums::value_type, owner, "valueType", chain, leaf)?;
                SubmodelElement::Range(Range {
                    value_type: require(value_type, owner, "valueType", chain, leaf)?,
                    min: self.text(id, "Min")?,
                    max: self.text(id, "Max")?,
                    base,
                })
            }
            ModelType::File => SubmodelElement::File(File {
                value: self.text(id, "Value")?,
                content_type: file_content_type(self.text(id, "MimeType")?.as_deref(), None, false),
                base,
            }),
            ModelType::Blob => SubmodelElement::Blob(Blob {
                value: self.text(id, "Value")?,
                content_type: file_content_type(self.text(id, "MimeType")?.as_deref(), None, false),
                base,
            }),
            ModelType::ReferenceElement => SubmodelElement::ReferenceElement(ReferenceElement {
                value: self.opt_reference(id, "Value", chain, leaf)?,
                base,
            }),
            ModelType::RelationshipElement => {
                SubmodelElement::RelationshipElement(RelationshipElement {
                    first: self.required_reference(id, "First", owner, "first", chain, leaf)?,
                    second: self.required_reference(id, "Second", owner, "second", chain, leaf)?,
                    base,
                })
            }
            ModelType::AnnotatedRelationshipElement => {
                let children = element_chain(self.options, chain, &base)?;
                let annotations = match self.graph.child(id, "Annotation")? {
                    Some(annotation) => self.elements(annotation, &children, false)?,
                    None => Vec::new(),
                };
                SubmodelElement::AnnotatedRelationshipElement(AnnotatedRelationshipElement {
                    first: self.required_reference(id, "First", owner, "first", chain, leaf)?,
                    second: self.required_reference(id, "Second", owner, "second", chain, leaf)?,
                    annotations,
                    base,
                })
            }
            ModelType::Entity => {
                let children = element_chain(self.options, chain, &base)?;
                let entity_type =
                    self.enumeration(id, "EntityType", enums::entity_type, owner, "entityType", chain, leaf)?;
                let global_asset_id = match self.text(id, "GlobalAssetId")? {
                    Some(global_asset_id) => Some(global_asset_id),
                    None => self
                        .opt_reference(id, "Asset", chain, leaf)?
                        .map(|asset| asset.first_key().value.clone()),
                };
                let statements = match self.graph.child(id, "Statement")? {
                    Some(statement) => self.elements(statement, &children, false)?,
                    None => Vec::new(),
                };
                SubmodelElement::Entity(Entity {
                    entity_type: require(entity_type, owner, "entityType", chain, leaf)?,
                    global_asset_id,
                    specific_asset_ids: Vec::new(),
                    statements,
                    base,
                })
            }
            ModelType::Operation => {
                let children = element_chain(self.options, chain, &base)?;
                let (input_variables, output_variables, inoutput_variables) =
                    self.operation_variables(id, &children)?;
                SubmodelElement::Operation(Operation {
                    input_variables,
                    output_variables,
                    inoutput_variables,
                    base,
                })
            }
            ModelType::SubmodelElementCollection => {
                let children = element_chain(self.options, chain, &base)?;
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    value: self.elements(id, &children, false)?,
                    base,
                })
            }
            ModelType::SubmodelElementList => {
                let children = element_chain(self.options, chain, &base)?;
                let type_value_list_element = parse_tag(
                    self.text(id, "TypeValueListElement")?.as_deref(),
                    AasSubmodelElements::from_tag,
                    owner,
                    "typeValueListElement",
                    chain,
                    leaf,
                )?;
                SubmodelElement::SubmodelElementList(SubmodelElementList {
                    type_value_list_element: require(
                        type_value_list_element,
                        owner,
                        "typeValueListElement",
                        chain,
                        leaf,
                    )?,
                    value_type_list_element: self.enumeration(
                        id,
                        "ValueTypeListElement",
                        enums::value_type,
                        owner,
                        "valueTypeListElement",
                        chain,
                        leaf,
                    )?,
                    order_relevant: self.flag(id, "OrderRelevant")?,
                    semantic_id_list_element: self.opt_reference(
                        id,
                        "SemanticIdListElement",
                        chain,
                        leaf,
                    )?,
                    value: self.elements(id, &children, true)?,
                    base,
                })
            }
            ModelType::BasicEventElement => {
                let direction =
                    self.enumeration(id, "Direction", enums::direction, owner, "direction", chain, leaf)?;
                let state = self.enumeration(id, "State", enums::state, owner, "state", chain, leaf)?;
                SubmodelElement::BasicEventElement(BasicEventElement {
                    observed: self.required_reference(id, "Observed", owner, "observed", chain, leaf)?,
                    direction: require(direction, owner, "direction", chain, leaf)?,
                    state: require(state, owner, "state", chain, leaf)?,
                    message_topic: self.text(id, "MessageTopic")?,
                    message_broker: self.opt_reference(id, "MessageBroker", chain, leaf)?,
                    last_update: self.text(id, "LastUpdate")?,
                    min_interval: self.text(id, "MinInterval")?,
                    max_interval: self.text(id, "MaxInterval")?,
                    base,
                })
            }
            ModelType::Capability => SubmodelElement::Capability(Capability { base }),
            ModelType::AssetAdministrationShell
            | ModelType::Submodel
            | ModelType::ConceptDescription => {
                return Err(ReadError::UnsupportedVariant {
                    discriminator: node.type_definition.clone(),
                    path: chain.location(leaf),
                })
            }
        };
        Ok(element)
    }

    /// Input, output and in-output variables of the operation `id`.
    ///
    /// Variable components are used when present. Otherwise the arguments
    /// of the method node named `Operation` are used, or failing that those
    /// of the first descendant carrying both argument properties, or of the
    /// first sibling component carrying them.
    #[allow(clippy::type_complexity)]
    fn operation_variables(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
    ) -> Result<
        (
            Vec<OperationVariable>,
            Vec<OperationVariable>,
            Vec<OperationVariable>,
        ),
        ReadError,
    > {
        let input = self.graph.child(id, "InputVariable")?;
        let output = self.graph.child(id, "OutputVariable")?;
        let inoutput = self.graph.child(id, "InoutputVariable")?;

        if input.is_some() || output.is_some() || inoutput.is_some() {
            let variables = |container: Option<ComponentId>| -> Result<Vec<OperationVariable>, ReadError> {
                let Some(container) = container else {
                    return Ok(Vec::new());
                };
                Ok(self
                    .elements(container, chain, false)?
                    .into_iter()
                    .map(|value| OperationVariable { value })
                    .collect())
            };
            return Ok((variables(input)?, variables(output)?, variables(inoutput)?));
        }

        let method = match self.graph.child(id, "Operation")? {
            Some(method) => Some(method),
            None => match self.find_arguments(id)? {
                Some(method) => Some(method),
                None => self.sibling_arguments(id)?,
            },
        };
        match method {
            Some(method) => {
                tracing::debug!(
                    operation = %chain,
                    method = %method,
                    "Reading operation variables from method arguments"
                );
                Ok((
                    self.arguments(method, INPUT_ARGUMENTS, chain)?,
                    self.arguments(method, OUTPUT_ARGUMENTS, chain)?,
                    Vec::new(),
                ))
            }
            None => Ok((Vec::new(), Vec::new(), Vec::new())),
        }
    }

    /// Breadth-first search below `id` for a node with both argument
    /// properties. Each node is visited once.
    fn find_arguments(&self, id: ComponentId) -> Result<Option<ComponentId>, ReadError> {
        let mut visited = HashSet::from([id]);
        let mut queue: VecDeque<ComponentId> =
            self.graph.resolve(id)?.has_component.iter().copied().collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if self.has_arguments(current)? {
                return Ok(Some(current));
            }
            queue.extend(self.graph.resolve(current)?.has_component.iter().copied());
        }
        Ok(None)
    }

    /// The first component sharing a parent with `id` that has both
    /// argument properties.
    fn sibling_arguments(&self, id: ComponentId) -> Result<Option<ComponentId>, ReadError> {
        let Some(parent) = self.graph.parent(id) else {
            return Ok(None);
        };
        for &sibling in &self.graph.resolve(parent)?.has_component {
            if sibling != id && self.has_arguments(sibling)? {
                return Ok(Some(sibling));
            }
        }
        Ok(None)
    }

    fn has_arguments(&self, id: ComponentId) -> Result<bool, ReadError> {
        Ok(self.graph.child(id, INPUT_ARGUMENTS)?.is_some()
            && self.graph.child(id, OUTPUT_ARGUMENTS)?.is_some())
    }

    /// One Property per entry of the `Argument` array at `name`.
    fn arguments(
        &self,
        method: ComponentId,
        name: &str,
        chain: &AncestorChain,
    ) -> Result<Vec<OperationVariable>, ReadError> {
        let Some(Value::Array(arguments)) = self.value(method, name)? else {
            return Ok(Vec::new());
        };
        arguments
            .iter()
            .map(|argument| {
                let arg_name = require(opt_str(argument, "name"), "Argument", "name", chain, None)?;
                let value_type = argument
                    .get("dataType")
                    .map(|data_type| {
                        enums::value_type(data_type).ok_or_else(|| {
                            ReadError::invalid_value(
                                "Argument",
                                "dataType",
                                &data_type.to_string(),
                                chain,
                                Some(arg_name),
                            )
                        })
                    })
                    .transpose()?;
                let mut base = element_base(ModelType::Property, arg_name.to_string(), chain);
                if let Some(description) = argument.get("description") {
                    base.referable.description = lang_strings(description);
                }
                Ok(OperationVariable {
                    value: SubmodelElement::Property(property(base, value_type, None, None, chain)?),
                })
            })
            .collect()
    }

    fn apply_element_attributes(
        &self,
        id: ComponentId,
        base: &mut ElementBase,
        chain: &AncestorChain,
    ) -> Result<(), ReadError> {
        let leaf = base.referable.id_short.clone();
        self.apply_referable(id, &mut base.referable, chain, Some(&leaf))?;
        base.semantic_id = self.opt_reference(id, "SemanticId", chain, Some(&leaf))?;
        base.qualifiers = self.qualifiers(id, chain, Some(&leaf))?;
        Ok(())
    }
}
