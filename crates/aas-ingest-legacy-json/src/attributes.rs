//! Attribute decoders for the v2 JSON schema.

use aas_ingest_model::{
    AdministrativeInformation, AncestorChain, DataSpecificationContent, DataSpecificationIec61360,
    DataTypeDefXsd, EmbeddedDataSpecification, Key, LangString, LevelType, Qualifier, Reference,
    ReferenceType, Referable, ValueList, ValueReferencePair,
};
use aas_ingest_reader::construct::{reference, require, require_tag};
use aas_ingest_reader::json::{opt_array, opt_bool, opt_object, opt_scalar, opt_str};
use aas_ingest_reader::{determine_reference_type, legacy_key_type, legacy_value_type, ReadError};
use serde_json::Value;

/// The legacy `modelType`, either `{"name": ...}` or a bare string.
pub(crate) fn model_type_name(node: &Value) -> Option<&str> {
    match node.get("modelType")? {
        Value::String(name) if !name.is_empty() => Some(name.as_str()),
        wrapped @ Value::Object(_) => opt_str(wrapped, "name"),
        _ => None,
    }
}

/// The global id of an identifiable: `identification.id`.
pub(crate) fn identification(node: &Value) -> Option<&str> {
    opt_object(node, "identification").and_then(|ident| opt_str(ident, "id"))
}

/// Raw value type name: `{"dataObjectType": {"name": ...}}` or a bare string.
fn value_type_name<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    match node.get(key)? {
        Value::String(name) if !name.is_empty() => Some(name.as_str()),
        wrapped @ Value::Object(_) => {
            opt_object(wrapped, "dataObjectType").and_then(|t| opt_str(t, "name"))
        }
        _ => None,
    }
}

/// Optional value type at `key`, translated through the legacy table.
pub(crate) fn opt_value_type(
    node: &Value,
    key: &str,
    owner: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Option<DataTypeDefXsd>, ReadError> {
    value_type_name(node, key)
        .map(|name| {
            legacy_value_type(name)
                .ok_or_else(|| ReadError::invalid_value(owner, "valueType", name, chain, leaf))
        })
        .transpose()
}

pub(crate) fn reference_of(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    let raw_keys = opt_array(node, "keys");
    let keys = raw_keys
        .iter()
        .map(|key| {
            let key_type = require_tag(
                opt_str(key, "type"),
                legacy_key_type,
                "Key",
                "type",
                chain,
                leaf,
            )?;
            let value = require(opt_scalar(key, "value"), "Key", "value", chain, leaf)?;
            Ok(Key::new(key_type, value))
        })
        .collect::<Result<Vec<_>, ReadError>>()?;

    let local = raw_keys.first().and_then(|key| opt_bool(key, "local"));
    let reference_type = keys.first().map_or(ReferenceType::ModelReference, |first| {
        determine_reference_type(local, first.key_type)
    });
    reference(reference_type, keys, chain, leaf)
}

pub(crate) fn opt_reference(
    node: &Value,
    key: &str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Option<Reference>, ReadError> {
    opt_object(node, key)
        .map(|r| reference_of(r, chain, leaf))
        .transpose()
}

pub(crate) fn required_reference(
    node: &Value,
    key: &'static str,
    owner: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    let value = require(opt_object(node, key), owner, key, chain, leaf)?;
    reference_of(value, chain, leaf)
}

pub(crate) fn references(
    node: &Value,
    key: &str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<Reference>, ReadError> {
    opt_array(node, key)
        .iter()
        .map(|r| reference_of(r, chain, leaf))
        .collect()
}

/// Language strings at `key`, either a list or `{"langString": [...]}`.
pub(crate) fn lang_strings(node: &Value, key: &str) -> Vec<LangString> {
    let entries = match node.get(key) {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(wrapped @ Value::Object(_)) => opt_array(wrapped, "langString"),
        _ => &[],
    };
    entries
        .iter()
        .filter_map(|entry| {
            Some(LangString::new(
                opt_str(entry, "language")?,
                opt_str(entry, "text")?,
            ))
        })
        .collect()
}

pub(crate) fn apply_referable(node: &Value, referable: &mut Referable) {
    referable.category = opt_str(node, "category").map(str::to_string);
    referable.description = lang_strings(node, "description");
}

pub(crate) fn administration(node: &Value) -> Option<AdministrativeInformation> {
    let admin = opt_object(node, "administration")?;
    Some(AdministrativeInformation {
        version: opt_scalar(admin, "version"),
        revision: opt_scalar(admin, "revision"),
    })
}

/// Constraints of kind `Qualifier`; formulas are not supported.
pub(crate) fn qualifiers(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<Qualifier>, ReadError> {
    opt_array(node, "qualifiers")
        .iter()
        .map(|q| {
            match model_type_name(q) {
                None | Some("Qualifier") => {}
                Some(other) => {
                    return Err(ReadError::not_implemented(
                        &format!("constraint '{other}'"),
                        chain,
                        leaf,
                    ))
                }
            }
            let value_type = opt_value_type(q, "valueType", "Qualifier", chain, leaf)?;
            Ok(Qualifier {
                qualifier_type: require(
                    opt_str(q, "type").map(str::to_string),
                    "Qualifier",
                    "type",
                    chain,
                    leaf,
                )?,
                value_type: require(value_type, "Qualifier", "valueType", chain, leaf)?,
                value: opt_scalar(q, "value"),
                value_id: opt_reference(q, "valueId", chain, leaf)?,
                kind: None,
                semantic_id: opt_reference(q, "semanticId", chain, leaf)?,
            })
        })
        .collect()
}

/// Embedded data specifications; the content is always IEC 61360.
pub(crate) fn embedded_data_specifications(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<EmbeddedDataSpecification>, ReadError> {
    opt_array(node, "embeddedDataSpecifications")
        .iter()
        .map(|eds| {
            let data_specification = required_reference(
                eds,
                "dataSpecification",
                "EmbeddedDataSpecification",
                chain,
                leaf,
            )?;
            let content = require(
                opt_object(eds, "dataSpecificationContent"),
                "EmbeddedDataSpecification",
                "dataSpecificationContent",
                chain,
                leaf,
            )?;
            Ok(EmbeddedDataSpecification {
                data_specification,
                data_specification_content: iec61360(content, chain, leaf)?,
            })
        })
        .collect()
}

fn iec61360(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<DataSpecificationContent, ReadError> {
    let preferred_name = lang_strings(node, "preferredName");
    if preferred_name.is_empty() {
        return Err(ReadError::missing(
            "DataSpecificationIec61360",
            "preferredName",
            chain,
            leaf,
        ));
    }

    let mut content = DataSpecificationIec61360::new(preferred_name);
    content.short_name = lang_strings(node, "shortName");
    content.unit = opt_str(node, "unit").map(str::to_string);
    content.unit_id = opt_reference(node, "unitId", chain, leaf)?;
    content.source_of_definition = opt_str(node, "sourceOfDefinition").map(str::to_string);
    content.symbol = opt_str(node, "symbol").map(str::to_string);
    content.data_type = opt_str(node, "dataType").map(str::to_string);
    content.definition = lang_strings(node, "definition");
    content.value_format = opt_str(node, "valueFormat").map(str::to_string);
    content.value = opt_scalar(node, "value");
    content.value_list = opt_object(node, "valueList")
        .map(|list| value_list(list, chain, leaf))
        .transpose()?;
    content.level_type = level_type(node);
    Ok(DataSpecificationContent::DataSpecificationIec61360(content))
}

fn value_list(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<ValueList, ReadError> {
    let value_reference_pairs = opt_array(node, "valueReferencePairTypes")
        .iter()
        .map(|pair| {
            Ok(ValueReferencePair {
                value: require(
                    opt_scalar(pair, "value"),
                    "ValueReferencePair",
                    "value",
                    chain,
                    leaf,
                )?,
                value_id: required_reference(pair, "valueId", "ValueReferencePair", chain, leaf)?,
            })
        })
        .collect::<Result<_, ReadError>>()?;
    Ok(ValueList {
        value_reference_pairs,
    })
}

/// `levelType` as a list of level names (`Min`, `Nom`, `Typ`, `Max`).
fn level_type(node: &Value) -> Option<LevelType> {
    let names = node.get("levelType")?.as_array()?;
    let has = |level: &str| {
        names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| name.eq_ignore_ascii_case(level))
    };
    Some(LevelType {
        min: has("Min"),
        nom: has("Nom"),
        typ: has("Typ"),
        max: has("Max"),
    })
}
