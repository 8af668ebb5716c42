//! Constructors shared by the readers once a source node has been decoded
//! into plain values.
//!
//! Every function takes the ancestor chain of the node being built so that
//! failures name its location.

use crate::contract::ReaderOptions;
use crate::encoding::{create_id_short, synthesize_node_id};
use crate::error::ReadError;
use crate::inference::{determine_type, mime_type_for_path};
use aas_ingest_model::{
    Ancestor, AncestorChain, DataTypeDefXsd, ElementBase, Identifiable, Key, ModelType, Property,
    Reference, ReferenceError, ReferenceType,
};

/// Unwrap a structurally required value.
///
/// # Errors
///
/// Returns [`ReadError::MissingRequiredField`] naming `owner.field` when
/// `value` is `None`.
pub fn require<T>(
    value: Option<T>,
    owner: &'static str,
    field: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<T, ReadError> {
    value.ok_or_else(|| ReadError::missing(owner, field, chain, leaf))
}

/// Decode an optional tag through `parse`.
///
/// # Errors
///
/// Returns [`ReadError::MalformedSource`] when a tag is present but not
/// recognized.
pub fn parse_tag<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Option<T>,
    owner: &'static str,
    field: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Option<T>, ReadError> {
    raw.map(|tag| parse(tag).ok_or_else(|| ReadError::invalid_value(owner, field, tag, chain, leaf)))
        .transpose()
}

/// Decode a required tag through `parse`.
///
/// # Errors
///
/// Returns [`ReadError::MissingRequiredField`] when absent and
/// [`ReadError::MalformedSource`] when not recognized.
pub fn require_tag<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Option<T>,
    owner: &'static str,
    field: &'static str,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<T, ReadError> {
    let value = parse_tag(raw, parse, owner, field, chain, leaf)?;
    require(value, owner, field, chain, leaf)
}

/// Build a reference, translating key invariant violations.
///
/// # Errors
///
/// Returns `Reference.keys` for an empty key list and `Key.value` for a
/// blank key value.
pub fn reference(
    reference_type: ReferenceType,
    keys: Vec<Key>,
    chain: &AncestorChain,
    leaf: Option<&str>,
) -> Result<Reference, ReadError> {
    Reference::try_new(reference_type, keys).map_err(|e| match e {
        ReferenceError::NoKeys => ReadError::missing("Reference", "keys", chain, leaf),
        ReferenceError::EmptyKeyValue { .. } => ReadError::missing("Key", "value", chain, leaf),
    })
}

/// Resolve the idShort of a submodel element.
///
/// Children of a SubmodelElementList may omit it and are then named by
/// their position.
///
/// # Errors
///
/// Returns `<ModelType>.idShort` when absent outside a list.
pub fn element_id_short(
    explicit: Option<&str>,
    list_index: Option<usize>,
    model_type: ModelType,
    chain: &AncestorChain,
) -> Result<String, ReadError> {
    match (explicit, list_index) {
        (Some(id_short), _) => Ok(id_short.to_string()),
        (None, Some(index)) => Ok(index.to_string()),
        (None, None) => Err(ReadError::missing(model_type.as_str(), "idShort", chain, None)),
    }
}

/// Common element attributes with `parent` derived from `chain`.
#[must_use]
pub fn element_base(model_type: ModelType, id_short: String, chain: &AncestorChain) -> ElementBase {
    let mut base = ElementBase::new(model_type, id_short);
    base.referable.parent = chain.parent_reference();
    base
}

/// Identifiable attributes: `id` is required, `idShort` falls back to one
/// derived from the id.
///
/// # Errors
///
/// Returns `<ModelType>.id` when the id is absent or blank.
pub fn identifiable(
    model_type: ModelType,
    id: Option<&str>,
    id_short: Option<&str>,
    chain: &AncestorChain,
) -> Result<Identifiable, ReadError> {
    let id = id.map(str::trim).filter(|id| !id.is_empty());
    let id = require(id, model_type.as_str(), "id", chain, id_short)?;
    let id_short = id_short.map_or_else(|| create_id_short(id), str::to_string);
    Ok(Identifiable::new(model_type, id, id_short))
}

/// The chain seen by the elements of a top-level submodel.
///
/// # Errors
///
/// Returns [`ReadError::DepthLimitExceeded`] for a zero depth limit.
pub fn submodel_chain(
    options: &ReaderOptions,
    identifiable: &Identifiable,
) -> Result<AncestorChain, ReadError> {
    options.descend(
        &AncestorChain::root(),
        Ancestor::identifiable(
            ModelType::Submodel,
            identifiable.id.clone(),
            identifiable.referable.id_short.clone(),
        ),
    )
}

/// The chain seen by the children of a container element.
///
/// # Errors
///
/// Returns [`ReadError::DepthLimitExceeded`] past the depth limit.
pub fn element_chain(
    options: &ReaderOptions,
    chain: &AncestorChain,
    base: &ElementBase,
) -> Result<AncestorChain, ReadError> {
    options.descend(
        chain,
        Ancestor::referable(base.referable.model_type, base.referable.id_short.clone()),
    )
}

/// Value type of a Property: declared, else inferred from the value.
///
/// # Errors
///
/// Returns `Property.valueType` when both are absent.
pub fn property_value_type(
    explicit: Option<DataTypeDefXsd>,
    value: Option<&str>,
    chain: &AncestorChain,
    id_short: &str,
) -> Result<DataTypeDefXsd, ReadError> {
    let value_type = explicit.or_else(|| value.map(determine_type));
    require(value_type, "Property", "valueType", chain, Some(id_short))
}

/// Assemble a Property, synthesizing its `nodeId`.
///
/// # Errors
///
/// See [`property_value_type`].
pub fn property(
    base: ElementBase,
    value_type: Option<DataTypeDefXsd>,
    value: Option<String>,
    value_id: Option<Reference>,
    chain: &AncestorChain,
) -> Result<Property, ReadError> {
    let id_short = &base.referable.id_short;
    let value_type = property_value_type(value_type, value.as_deref(), chain, id_short)?;
    let node_id = synthesize_node_id(chain, id_short, base.referable.category.as_deref());
    Ok(Property {
        base,
        value_type,
        value,
        value_id,
        node_id,
    })
}

/// Content type of a File: declared, else derived from the value's
/// extension when `from_extension` is set, else empty.
#[must_use]
pub fn file_content_type(
    explicit: Option<&str>,
    value: Option<&str>,
    from_extension: bool,
) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| {
            value
                .filter(|_| from_extension)
                .and_then(mime_type_for_path)
                .map(str::to_string)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aas_ingest_model::KeyType;

    fn chain() -> AncestorChain {
        AncestorChain::root()
            .child(Ancestor::identifiable(ModelType::Submodel, "urn:S1", "S1"))
            .child(Ancestor::referable(ModelType::SubmodelElementCollection, "C"))
    }

    #[test]
    fn property_infers_value_type() {
        let base = element_base(ModelType::Property, "P".to_string(), &chain());
        let property = property(base, None, Some("42".to_string()), None, &chain()).unwrap();
        assert_eq!(property.value_type, DataTypeDefXsd::Integer);
        assert!(property.node_id.is_some());
    }

    #[test]
    fn property_without_type_or_value_fails() {
        let base = element_base(ModelType::Property, "P".to_string(), &chain());
        let err = property(base, None, None, None, &chain()).unwrap_err();
        assert_eq!(
            err,
            ReadError::MissingRequiredField {
                owner: "Property",
                field: "valueType",
                path: "urn:S1/C/P".to_string(),
            }
        );
    }

    #[test]
    fn explicit_value_type_wins() {
        let value_type = property_value_type(
            Some(DataTypeDefXsd::String),
            Some("42"),
            &chain(),
            "P",
        )
        .unwrap();
        assert_eq!(value_type, DataTypeDefXsd::String);
    }

    #[test]
    fn element_base_sets_parent() {
        let base = element_base(ModelType::Property, "P".to_string(), &chain());
        let parent = base.referable.parent.unwrap();
        assert_eq!(
            parent.keys(),
            &[
                Key::new(KeyType::Submodel, "urn:S1"),
                Key::new(KeyType::SubmodelElementCollection, "C"),
            ]
        );
    }

    #[test]
    fn list_children_are_named_by_index() {
        assert_eq!(
            element_id_short(None, Some(3), ModelType::Property, &chain()).unwrap(),
            "3"
        );
        assert!(matches!(
            element_id_short(None, None, ModelType::Property, &chain()),
            Err(ReadError::MissingRequiredField { field: "idShort", .. })
        ));
    }

    #[test]
    fn identifiable_requires_id() {
        let err = identifiable(ModelType::Submodel, Some("  "), Some("S"), &AncestorChain::root())
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::MissingRequiredField { owner: "Submodel", field: "id", .. }
        ));
    }

    #[test]
    fn identifiable_derives_id_short() {
        let identifiable = identifiable(
            ModelType::Submodel,
            Some("https://example.com/ids/sm/Nameplate"),
            None,
            &AncestorChain::root(),
        )
        .unwrap();
        assert_eq!(identifiable.referable.id_short, "Nameplate");
    }

    #[test]
    fn reference_errors_name_the_field() {
        let err = reference(ReferenceType::ModelReference, vec![], &chain(), Some("R"))
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::MissingRequiredField { owner: "Reference", field: "keys", .. }
        ));
    }

    #[test]
    fn unknown_tags_are_malformed() {
        let parsed = parse_tag(
            Some("Template"),
            aas_ingest_model::ModellingKind::from_tag,
            "Submodel",
            "kind",
            &AncestorChain::root(),
            None,
        )
        .unwrap();
        assert_eq!(parsed, Some(aas_ingest_model::ModellingKind::Template));

        let err = require_tag(
            Some("Managed"),
            aas_ingest_model::EntityType::from_tag,
            "Entity",
            "entityType",
            &chain(),
            Some("E"),
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::MalformedSource(_)));

        let err = require_tag(
            None,
            aas_ingest_model::EntityType::from_tag,
            "Entity",
            "entityType",
            &chain(),
            Some("E"),
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::MissingRequiredField { .. }));
    }

    #[test]
    fn file_content_type_fallback() {
        assert_eq!(
            file_content_type(None, Some("/docs/manual.pdf"), true),
            "application/pdf"
        );
        assert_eq!(file_content_type(None, Some("/docs/manual.pdf"), false), "");
        assert_eq!(
            file_content_type(Some("text/plain"), Some("/docs/manual.pdf"), true),
            "text/plain"
        );
    }
}
