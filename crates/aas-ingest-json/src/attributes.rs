//! Attribute decoders shared by identifiables and elements.

use aas_ingest_model::{
    AdministrativeInformation, AncestorChain, DataSpecificationContent, DataSpecificationIec61360,
    DataTypeDefXsd, EmbeddedDataSpecification, Key, KeyType, LangString, LevelType, Qualifier,
    QualifierKind, Reference, ReferenceType, Referable, SpecificAssetId, ValueList,
    ValueReferencePair,
};
use aas_ingest_reader::construct::{parse_tag, reference, require, require_tag};
use aas_ingest_reader::json::{opt_array, opt_bool, opt_object, opt_scalar, opt_str};
use aas_ingest_reader::{determine_reference_type, ReadError};
use serde_json::Value;

const IEC61360_CONTENT: &str = "DataSpecificationIec61360";

/// Decode a reference object.
pub(crate) fn reference_of(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    let keys = opt_array(node, "keys")
        .iter()
        .map(|key| {
            let key_type = require_tag(
                opt_str(key, "type"),
                KeyType::from_tag,
                "Key",
                "type",
                chain,
                leaf,
            )?;
            let value = require(opt_scalar(key, "value"), "Key", "value", chain, leaf)?;
            Ok(Key::new(key_type, value))
        })
        .collect::<Result<Vec<_>, ReadError>>()?;

    let explicit = parse_tag(
        opt_str(node, "type"),
        ReferenceType::from_tag,
        "Reference",
        "type",
        chain,
        leaf,
    )?;
    let reference_type = match (explicit, keys.first()) {
        (Some(t), _) => t,
        (None, Some(first)) => determine_reference_type(None, first.key_type),
        (None, None) => ReferenceType::ModelReference,
    };
    reference(reference_type, keys, chain, leaf)
}

/// Optional reference at `key`.
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

/// Every reference of the array at `key`.
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

/// Language strings at `key`; entries lacking a language or text are dropped.
pub(crate) fn lang_strings(node: &Value, key: &str) -> Vec<LangString> {
    opt_array(node, key)
        .iter()
        .filter_map(|entry| {
            Some(LangString::new(
                opt_str(entry, "language")?,
                opt_str(entry, "text")?,
            ))
        })
        .collect()
}

/// Optional `category` and `description`, applied to a freshly built referable.
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

pub(crate) fn qualifiers(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<Qualifier>, ReadError> {
    opt_array(node, "qualifiers")
        .iter()
        .map(|q| {
            Ok(Qualifier {
                qualifier_type: require(
                    opt_str(q, "type").map(str::to_string),
                    "Qualifier",
                    "type",
                    chain,
                    leaf,
                )?,
                value_type: require_tag(
                    opt_str(q, "valueType"),
                    DataTypeDefXsd::from_tag,
                    "Qualifier",
                    "valueType",
                    chain,
                    leaf,
                )?,
                value: opt_scalar(q, "value"),
                value_id: opt_reference(q, "valueId", chain, leaf)?,
                kind: parse_tag(
                    opt_str(q, "kind"),
                    QualifierKind::from_tag,
                    "Qualifier",
                    "kind",
                    chain,
                    leaf,
                )?,
                semantic_id: opt_reference(q, "semanticId", chain, leaf)?,
            })
        })
        .collect()
}

pub(crate) fn specific_asset_ids(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<SpecificAssetId>, ReadError> {
    opt_array(node, "specificAssetIds")
        .iter()
        .map(|s| {
            Ok(SpecificAssetId {
                name: require(
                    opt_str(s, "name").map(str::to_string),
                    "SpecificAssetId",
                    "name",
                    chain,
                    leaf,
                )?,
                value: require(
                    opt_scalar(s, "value"),
                    "SpecificAssetId",
                    "value",
                    chain,
                    leaf,
                )?,
                external_subject_id: opt_reference(s, "externalSubjectId", chain, leaf)?,
                semantic_id: opt_reference(s, "semanticId", chain, leaf)?,
            })
        })
        .collect()
}

/// Embedded data specifications; only IEC 61360 content is supported.
pub(crate) fn embedded_data_specifications(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Vec<EmbeddedDataSpecification>, ReadError> {
    opt_array(node, "embeddedDataSpecifications")
        .iter()
        .map(|eds| {
            let data_specification = require(
                opt_object(eds, "dataSpecification"),
                "EmbeddedDataSpecification",
                "dataSpecification",
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
                data_specification: reference_of(data_specification, chain, leaf)?,
                data_specification_content: data_specification_content(content, chain, leaf)?,
            })
        })
        .collect()
}

fn data_specification_content(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<DataSpecificationContent, ReadError> {
    match opt_str(node, "modelType") {
        None | Some(IEC61360_CONTENT) => {}
        Some(other) => {
            return Err(ReadError::not_implemented(
                &format!("data specification content '{other}'"),
                chain,
                leaf,
            ))
        }
    }

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
    content.level_type = opt_object(node, "levelType").map(|level| LevelType {
        min: opt_bool(level, "min").unwrap_or(false),
        nom: opt_bool(level, "nom").unwrap_or(false),
        typ: opt_bool(level, "typ").unwrap_or(false),
        max: opt_bool(level, "max").unwrap_or(false),
    });
    Ok(DataSpecificationContent::DataSpecificationIec61360(content))
}

fn value_list(
    node: &Value,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<ValueList, ReadError> {
    let value_reference_pairs = opt_array(node, "valueReferencePairs")
        .iter()
        .map(|pair| {
            let value = require(
                opt_scalar(pair, "value"),
                "ValueReferencePair",
                "value",
                chain,
                leaf,
            )?;
            let value_id = require(
                opt_object(pair, "valueId"),
                "ValueReferencePair",
                "valueId",
                chain,
                leaf,
            )?;
            Ok(ValueReferencePair {
                value,
                value_id: reference_of(value_id, chain, leaf)?,
            })
        })
        .collect::<Result<_, ReadError>>()?;
    Ok(ValueList {
        value_reference_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_type_inferred_from_first_key() {
        let node = json!({"keys": [{"type": "GlobalReference", "value": "urn:x"}]});
        let reference = reference_of(&node, &AncestorChain::root(), None).unwrap();
        assert_eq!(reference.reference_type(), ReferenceType::ExternalReference);
    }

    #[test]
    fn reference_without_keys_fails() {
        let node = json!({"type": "ModelReference", "keys": []});
        let err = reference_of(&node, &AncestorChain::root(), Some("R")).unwrap_err();
        assert!(matches!(
            err,
            ReadError::MissingRequiredField { owner: "Reference", field: "keys", .. }
        ));
    }

    #[test]
    fn unknown_key_type_is_malformed() {
        let node = json!({"keys": [{"type": "Gadget", "value": "x"}]});
        let err = reference_of(&node, &AncestorChain::root(), None).unwrap_err();
        assert!(matches!(err, ReadError::MalformedSource(_)));
    }

    #[test]
    fn qualifier_requires_value_type() {
        let node = json!({"qualifiers": [{"type": "Cardinality", "value": "One"}]});
        let err = qualifiers(&node, &AncestorChain::root(), Some("P")).unwrap_err();
        assert!(matches!(
            err,
            ReadError::MissingRequiredField { owner: "Qualifier", field: "valueType", .. }
        ));
    }

    #[test]
    fn malformed_lang_strings_are_dropped() {
        let node = json!({"description": [
            {"language": "en", "text": "Speed"},
            {"language": "de"},
            "bogus"
        ]});
        assert_eq!(lang_strings(&node, "description"), vec![LangString::new("en", "Speed")]);
    }

    #[test]
    fn iec61360_content() {
        let node = json!({"embeddedDataSpecifications": [{
            "dataSpecification": {
                "type": "ExternalReference",
                "keys": [{"type": "GlobalReference", "value": "https://admin-shell.io/DataSpecificationTemplates/DataSpecificationIEC61360/3/0"}]
            },
            "dataSpecificationContent": {
                "modelType": "DataSpecificationIec61360",
                "preferredName": [{"language": "en", "text": "Rotation speed"}],
                "unit": "1/min",
                "levelType": {"min": false, "nom": true, "typ": false, "max": true},
                "valueList": {"valueReferencePairs": [{
                    "value": "fast",
                    "valueId": {"keys": [{"type": "GlobalReference", "value": "urn:fast"}]}
                }]}
            }
        }]});
        let eds = embedded_data_specifications(&node, &AncestorChain::root(), None).unwrap();
        let DataSpecificationContent::DataSpecificationIec61360(content) =
            &eds[0].data_specification_content;
        assert_eq!(content.unit.as_deref(), Some("1/min"));
        assert!(content.level_type.as_ref().unwrap().max);
        assert_eq!(content.value_list.as_ref().unwrap().value_reference_pairs.len(), 1);
    }

    #[test]
    fn other_content_is_not_implemented() {
        let node = json!({"embeddedDataSpecifications": [{
            "dataSpecification": {"keys": [{"type": "GlobalReference", "value": "urn:ds"}]},
            "dataSpecificationContent": {"modelType": "DataSpecificationPhysicalUnit"}
        }]});
        let err = embedded_data_specifications(&node, &AncestorChain::root(), None).unwrap_err();
        assert!(matches!(err, ReadError::NotImplemented(_)));
    }
}
