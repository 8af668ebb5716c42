//! Attribute decoders over component children.

use crate::enums;
use crate::graph::{ComponentGraph, ComponentId};
use crate::types::{ADMINISTRATION, IDENTIFIER, IEC61360, QUALIFIER};
use aas_ingest_model::{
    AdministrativeInformation, AncestorChain, DataSpecificationContent, DataSpecificationIec61360,
    EmbeddedDataSpecification, Identifiable, Key, KeyType, LangString, LevelType, ModelType,
    Qualifier, QualifierKind, Reference, ReferenceType, Referable, ValueList, ValueReferencePair,
};
use aas_ingest_reader::construct::{identifiable, parse_tag, reference, require};
use aas_ingest_reader::json::{as_scalar, opt_array, opt_bool, opt_scalar, opt_str};
use aas_ingest_reader::{determine_reference_type, legacy_key_type, ReadError, ReaderOptions};
use serde_json::Value;

/// Template IRI of embedded IEC 61360 content.
pub const IEC61360_TEMPLATE: &str =
    "http://admin-shell.io/DataSpecificationTemplates/DataSpecificationIEC61360/3/0";

/// State shared by one walk over a graph.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphContext<'g> {
    pub(crate) graph: &'g ComponentGraph,
    pub(crate) options: &'g ReaderOptions,
}

impl<'g> GraphContext<'g> {
    /// Value of the child `name` of `id`, unless absent or null.
    pub(crate) fn value(&self, id: ComponentId, name: &str) -> Result<Option<&'g Value>, ReadError> {
        match self.graph.child(id, name)? {
            Some(child) => Ok(self.graph.resolve(child)?.present_value()),
            None => Ok(None),
        }
    }

    /// Scalar value of the child `name` in its lexical form.
    pub(crate) fn text(&self, id: ComponentId, name: &str) -> Result<Option<String>, ReadError> {
        Ok(self.value(id, name)?.and_then(as_scalar))
    }

    pub(crate) fn flag(&self, id: ComponentId, name: &str) -> Result<Option<bool>, ReadError> {
        Ok(self.value(id, name)?.and_then(|value| match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    /// Decode the child `name` through an enum table.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn enumeration<T>(
        &self,
        id: ComponentId,
        name: &str,
        decode: impl FnOnce(&Value) -> Option<T>,
        owner: &'static str,
        field: &'static str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Option<T>, ReadError> {
        self.value(id, name)?
            .map(|value| {
                decode(value)
                    .ok_or_else(|| ReadError::invalid_value(owner, field, &value.to_string(), chain, leaf))
            })
            .transpose()
    }

    /// Reference held by the component `id`: its `Keys` property, else its
    /// own value, as an array of `{type, value}` objects.
    pub(crate) fn reference_of(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Reference, ReadError> {
        let keys = match self.value(id, "Keys")? {
            Some(keys) => Some(keys),
            None => self.graph.resolve(id)?.present_value(),
        };
        let explicit = self
            .text(id, "ReferenceType")?
            .and_then(|tag| ReferenceType::from_tag(&tag));
        keys_reference(keys.unwrap_or(&Value::Null), explicit, chain, leaf)
    }

    pub(crate) fn opt_reference(
        &self,
        id: ComponentId,
        name: &str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Option<Reference>, ReadError> {
        self.graph
            .child(id, name)?
            .map(|child| self.reference_of(child, chain, leaf))
            .transpose()
    }

    pub(crate) fn required_reference(
        &self,
        id: ComponentId,
        name: &str,
        owner: &'static str,
        field: &'static str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Reference, ReadError> {
        let child = require(self.graph.child(id, name)?, owner, field, chain, leaf)?;
        self.reference_of(child, chain, leaf)
    }

    pub(crate) fn lang_strings(&self, id: ComponentId, name: &str) -> Result<Vec<LangString>, ReadError> {
        Ok(self.value(id, name)?.map(lang_strings).unwrap_or_default())
    }

    pub(crate) fn apply_referable(
        &self,
        id: ComponentId,
        referable: &mut Referable,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<(), ReadError> {
        referable.category = self
            .enumeration(id, "Category", enums::category, "Referable", "category", chain, leaf)?
            .map(str::to_string);
        referable.description = self.lang_strings(id, "Description")?;
        Ok(())
    }

    /// Global id of `id`: its `Id` property, or the `Id` of an
    /// `Identification` component.
    pub(crate) fn global_id(&self, id: ComponentId) -> Result<Option<String>, ReadError> {
        if let Some(global_id) = self.text(id, "Id")? {
            return Ok(Some(global_id));
        }
        let identification = self.graph.flatten(id)?.into_iter().find(|c| {
            self.graph
                .node(*c)
                .is_some_and(|n| n.type_tag() == IDENTIFIER || n.name() == "Identification")
        });
        match identification {
            Some(identification) => self.text(identification, "Id"),
            None => Ok(None),
        }
    }

    /// Identifiable attributes; the idShort is the browse name.
    pub(crate) fn identifiable(
        &self,
        id: ComponentId,
        model_type: ModelType,
    ) -> Result<Identifiable, ReadError> {
        let root = AncestorChain::root();
        let node = self.graph.resolve(id)?;
        let global_id = self.global_id(id)?;
        let name = Some(node.name()).filter(|n| !n.is_empty());

        let mut identifiable = identifiable(model_type, global_id.as_deref(), name, &root)?;
        let leaf = identifiable.id.clone();
        self.apply_referable(id, &mut identifiable.referable, &root, Some(&leaf))?;
        identifiable.administration = self.administration(id)?;
        Ok(identifiable)
    }

    fn administration(&self, id: ComponentId) -> Result<Option<AdministrativeInformation>, ReadError> {
        let admin = self.graph.flatten(id)?.into_iter().find(|c| {
            self.graph
                .node(*c)
                .is_some_and(|n| n.type_tag() == ADMINISTRATION || n.name() == "Administration")
        });
        admin
            .map(|admin| {
                Ok::<_, ReadError>(AdministrativeInformation {
                    version: self.text(admin, "Version")?,
                    revision: self.text(admin, "Revision")?,
                })
            })
            .transpose()
    }

    /// Components of `id` (after flattening) with type `type_tag`.
    pub(crate) fn typed_children(
        &self,
        id: ComponentId,
        type_tag: &str,
    ) -> Result<Vec<ComponentId>, ReadError> {
        Ok(self
            .graph
            .flatten(id)?
            .into_iter()
            .filter(|c| self.graph.node(*c).is_some_and(|n| n.type_tag() == type_tag))
            .collect())
    }

    pub(crate) fn qualifiers(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Vec<Qualifier>, ReadError> {
        self.typed_children(id, QUALIFIER)?
            .into_iter()
            .map(|q| {
                let value_type =
                    self.enumeration(q, "ValueType", enums::value_type, "Qualifier", "valueType", chain, leaf)?;
                Ok(Qualifier {
                    qualifier_type: require(self.text(q, "Type")?, "Qualifier", "type", chain, leaf)?,
                    value_type: require(value_type, "Qualifier", "valueType", chain, leaf)?,
                    value: self.text(q, "Value")?,
                    value_id: self.opt_reference(q, "ValueId", chain, leaf)?,
                    kind: parse_tag(
                        self.text(q, "Kind")?.as_deref(),
                        QualifierKind::from_tag,
                        "Qualifier",
                        "kind",
                        chain,
                        leaf,
                    )?,
                    semantic_id: self.opt_reference(q, "SemanticId", chain, leaf)?,
                })
            })
            .collect()
    }

    pub(crate) fn embedded_data_specifications(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Vec<EmbeddedDataSpecification>, ReadError> {
        self.typed_children(id, IEC61360)?
            .into_iter()
            .map(|content| {
                let data_specification = match self.opt_reference(content, "DataSpecification", chain, leaf)? {
                    Some(reference) => reference,
                    None => Reference::global(IEC61360_TEMPLATE)
                        .map_err(|_| ReadError::missing("EmbeddedDataSpecification", "dataSpecification", chain, leaf))?,
                };
                Ok(EmbeddedDataSpecification {
                    data_specification,
                    data_specification_content: self.iec61360(content, chain, leaf)?,
                })
            })
            .collect()
    }

    fn iec61360(
        &self,
        id: ComponentId,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<DataSpecificationContent, ReadError> {
        let preferred_name = self.lang_strings(id, "PreferredName")?;
        if preferred_name.is_empty() {
            return Err(ReadError::missing(
                "DataSpecificationIec61360",
                "preferredName",
                chain,
                leaf,
            ));
        }
        let mut content = DataSpecificationIec61360::new(preferred_name);
        content.short_name = self.lang_strings(id, "ShortName")?;
        content.unit = self.text(id, "Unit")?;
        content.unit_id = self.opt_reference(id, "UnitId", chain, leaf)?;
        content.source_of_definition = self.text(id, "SourceOfDefinition")?;
        content.symbol = self.text(id, "Symbol")?;
        content.data_type = self.text(id, "DataType")?;
        content.definition = self.lang_strings(id, "Definition")?;
        content.value_format = self.text(id, "ValueFormat")?;
        content.value = self.text(id, "Value")?;
        content.value_list = self
            .value(id, "ValueList")?
            .map(|list| value_list(list, chain, leaf))
            .transpose()?;
        content.level_type = self.value(id, "LevelType")?.map(level_type);
        Ok(DataSpecificationContent::DataSpecificationIec61360(content))
    }
}

/// Build a reference from an array of `{type, value}` key objects.
fn keys_reference(
    keys: &Value,
    explicit: Option<ReferenceType>,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    let raw = keys.as_array().map_or(&[][..], Vec::as_slice);
    let keys = raw
        .iter()
        .map(|key| {
            let key_type = match key.get("type") {
                Some(tag) => {
                    let tag = as_scalar(tag).unwrap_or_default();
                    legacy_key_type(&tag)
                        .ok_or_else(|| ReadError::invalid_value("Key", "type", &tag, chain, leaf))?
                }
                None => return Err(ReadError::missing("Key", "type", chain, leaf)),
            };
            let value = require(opt_scalar(key, "value"), "Key", "value", chain, leaf)?;
            Ok(Key::new(key_type, value))
        })
        .collect::<Result<Vec<_>, ReadError>>()?;

    let local = raw.first().and_then(|key| opt_bool(key, "local"));
    let reference_type = explicit.unwrap_or_else(|| {
        keys.first().map_or(ReferenceType::ModelReference, |first| {
            determine_reference_type(local, first.key_type)
        })
    });
    reference(reference_type, keys, chain, leaf)
}

/// Localized texts: an array of `{locale|language, text}` objects or a
/// single one. Entries without both parts are dropped.
pub(crate) fn lang_strings(value: &Value) -> Vec<LangString> {
    let entries = match value {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(_) => std::slice::from_ref(value),
        _ => &[],
    };
    entries
        .iter()
        .filter_map(|entry| {
            let language = opt_str(entry, "locale").or_else(|| opt_str(entry, "language"))?;
            let text = opt_str(entry, "text")?;
            Some(LangString::new(language, text))
        })
        .collect()
}

fn value_list(list: &Value, chain: &AncestorChain, leaf: Option<&str>) -> Result<ValueList, ReadError> {
    let value_reference_pairs = opt_array(list, "valueReferencePairs")
        .iter()
        .chain(list.as_array().map_or(&[][..], Vec::as_slice))
        .map(|pair| {
            let value = require(opt_scalar(pair, "value"), "ValueReferencePair", "value", chain, leaf)?;
            let value_id = require(pair.get("valueId"), "ValueReferencePair", "valueId", chain, leaf)?;
            let keys = value_id.get("keys").unwrap_or(value_id);
            Ok(ValueReferencePair {
                value,
                value_id: keys_reference(keys, None, chain, leaf)?,
            })
        })
        .collect::<Result<Vec<_>, ReadError>>()?;
    Ok(ValueList {
        value_reference_pairs,
    })
}

fn level_type(value: &Value) -> LevelType {
    let names: Vec<String> = match value {
        Value::Array(names) => names.iter().filter_map(as_scalar).collect(),
        other => as_scalar(other).into_iter().collect(),
    };
    let has = |level: &str| names.iter().any(|n| n.eq_ignore_ascii_case(level));
    LevelType {
        min: has("Min"),
        nom: has("Nom"),
        typ: has("Typ"),
        max: has("Max"),
    }
}

/// Model reference to a submodel read from the graph.
pub(crate) fn submodel_reference(id: &str, chain: &AncestorChain) -> Result<Reference, ReadError> {
    reference(
        ReferenceType::ModelReference,
        vec![Key::new(KeyType::Submodel, id)],
        chain,
        None,
    )
}
