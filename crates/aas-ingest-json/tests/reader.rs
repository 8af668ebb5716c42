use aas_ingest_json::CurrentJsonReader;
use aas_ingest_model::{
    DataTypeDefXsd, Direction, Key, KeyType, ModelType, ReferenceType, StateOfEvent,
    SubmodelElement,
};
use aas_ingest_reader::{encode_id_base64url, Fragment, ModelReader, ReadError, ReaderOptions};
use serde_json::{json, Value};

fn environment() -> Value {
    json!({
        "assetAdministrationShells": [{
            "modelType": "AssetAdministrationShell",
            "id": "urn:example:aas:pump",
            "idShort": "Pump",
            "assetInformation": {
                "assetKind": "Instance",
                "globalAssetId": "urn:example:asset:pump",
                "specificAssetIds": [{"name": "serial", "value": "SN-1"}]
            },
            "submodels": [{
                "type": "ModelReference",
                "keys": [{"type": "Submodel", "value": "urn:example:sm:ops"}]
            }]
        }],
        "submodels": [{
            "modelType": "Submodel",
            "id": "urn:example:sm:ops",
            "idShort": "Operational",
            "semanticId": {
                "type": "ExternalReference",
                "keys": [{"type": "GlobalReference", "value": "urn:example:semantics:ops"}]
            },
            "submodelElements": [
                {"modelType": "Property", "idShort": "Speed", "value": "42"},
                {"modelType": "Property", "idShort": "Mode", "category": "CONSTANT",
                 "valueType": "xs:string", "value": "auto"},
                {"modelType": "MultiLanguageProperty", "idShort": "Label",
                 "value": [{"language": "en", "text": "Pump"}, {"language": "de"}]},
                {"modelType": "Range", "idShort": "Limits", "valueType": "xs:double",
                 "min": "0", "max": "100.5"},
                {"modelType": "File", "idShort": "Manual", "value": "/docs/manual.pdf",
                 "contentType": "application/pdf"},
                {"modelType": "Blob", "idShort": "Icon", "value": "AAEC"},
                {"modelType": "ReferenceElement", "idShort": "Unset"},
                {"modelType": "RelationshipElement", "idShort": "Drives",
                 "first": {"keys": [{"type": "Submodel", "value": "urn:example:sm:ops"}]},
                 "second": {"keys": [{"type": "GlobalReference", "value": "urn:example:motor"}]}},
                {"modelType": "AnnotatedRelationshipElement", "idShort": "Feeds",
                 "first": {"keys": [{"type": "Submodel", "value": "urn:example:sm:ops"}]},
                 "second": {"keys": [{"type": "GlobalReference", "value": "urn:example:tank"}]},
                 "annotations": [{"modelType": "Property", "idShort": "Rate", "value": "1.5"}]},
                {"modelType": "Entity", "idShort": "Motor", "entityType": "SelfManagedEntity",
                 "globalAssetId": "urn:example:motor",
                 "statements": [{"modelType": "Property", "idShort": "Power", "value": "7"}]},
                {"modelType": "Operation", "idShort": "Start",
                 "inputVariables": [{"value": {"modelType": "Property", "idShort": "Rpm",
                                               "valueType": "xs:int"}}]},
                {"modelType": "SubmodelElementCollection", "idShort": "Status",
                 "value": [
                     {"modelType": "Property", "idShort": "Temperature", "value": "21.5"},
                     {"modelType": "Widget", "idShort": "Unknown"}
                 ]},
                {"modelType": "SubmodelElementList", "idShort": "Readings",
                 "typeValueListElement": "Property", "valueTypeListElement": "xs:int",
                 "orderRelevant": true,
                 "value": [
                     {"modelType": "Property", "valueType": "xs:int", "value": "1"},
                     {"modelType": "Property", "valueType": "xs:int", "value": "2"}
                 ]},
                {"modelType": "BasicEventElement", "idShort": "Alarm",
                 "observed": {"keys": [{"type": "Submodel", "value": "urn:example:sm:ops"}]},
                 "direction": "output", "state": "on", "messageTopic": "alarms"},
                {"modelType": "Capability", "idShort": "Pumping"}
            ]
        }],
        "conceptDescriptions": [{
            "modelType": "ConceptDescription",
            "id": "urn:example:cd:speed",
            "embeddedDataSpecifications": [{
                "dataSpecification": {"keys": [{"type": "GlobalReference",
                                                "value": "urn:example:iec61360"}]},
                "dataSpecificationContent": {
                    "modelType": "DataSpecificationIec61360",
                    "preferredName": [{"language": "en", "text": "Speed"}],
                    "unit": "1/min"
                }
            }]
        }]
    })
}

fn read() -> aas_ingest_model::Environment {
    CurrentJsonReader::default()
        .read_environment(&environment())
        .unwrap()
}

#[test]
fn reads_every_variant() {
    let env = read();
    let submodel = &env.submodels[0];
    let kinds: Vec<_> = submodel
        .submodel_elements
        .iter()
        .map(SubmodelElement::model_type)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ModelType::Property,
            ModelType::Property,
            ModelType::MultiLanguageProperty,
            ModelType::Range,
            ModelType::File,
            ModelType::Blob,
            ModelType::ReferenceElement,
            ModelType::RelationshipElement,
            ModelType::AnnotatedRelationshipElement,
            ModelType::Entity,
            ModelType::Operation,
            ModelType::SubmodelElementCollection,
            ModelType::SubmodelElementList,
            ModelType::BasicEventElement,
            ModelType::Capability,
        ]
    );
    assert_eq!(env.asset_administration_shells.len(), 1);
    assert_eq!(env.concept_descriptions[0].identifiable.referable.id_short, "speed");
}

#[test]
fn infers_value_type_and_synthesizes_node_id() {
    let env = read();
    let SubmodelElement::Property(speed) = &env.submodels[0].submodel_elements[0] else {
        panic!("expected a property");
    };
    assert_eq!(speed.value_type, DataTypeDefXsd::Integer);
    assert_eq!(
        speed.node_id.as_deref(),
        Some(format!("{}.Speed", encode_id_base64url("urn:example:sm:ops")).as_str())
    );

    let SubmodelElement::Property(mode) = &env.submodels[0].submodel_elements[1] else {
        panic!("expected a property");
    };
    assert!(mode.node_id.is_none());
}

#[test]
fn nested_parent_and_node_id() {
    let env = read();
    let temperature = env.submodels[0].element("Status/Temperature").unwrap();
    let parent = temperature.referable().parent.as_ref().unwrap();
    assert_eq!(parent.reference_type(), ReferenceType::ModelReference);
    assert_eq!(
        parent.keys(),
        &[
            Key::new(KeyType::Submodel, "urn:example:sm:ops"),
            Key::new(KeyType::SubmodelElementCollection, "Status"),
        ]
    );
    let SubmodelElement::Property(temperature) = temperature else {
        panic!("expected a property");
    };
    assert!(temperature.node_id.as_deref().unwrap().ends_with(".Status/Temperature"));
}

#[test]
fn unknown_children_are_skipped() {
    let env = read();
    let status = env.submodels[0].element("Status").unwrap();
    assert_eq!(status.children().len(), 1);
}

#[test]
fn list_children_are_named_by_index() {
    let env = read();
    let readings = env.submodels[0].element("Readings").unwrap();
    let names: Vec<_> = readings.children().iter().map(|e| e.id_short()).collect();
    assert_eq!(names, vec!["0", "1"]);
}

#[test]
fn malformed_lang_strings_dropped() {
    let env = read();
    let SubmodelElement::MultiLanguageProperty(label) = env.submodels[0].element("Label").unwrap()
    else {
        panic!("expected a multi-language property");
    };
    assert_eq!(label.value.len(), 1);
}

#[test]
fn event_and_operation_details() {
    let env = read();
    let SubmodelElement::BasicEventElement(alarm) = env.submodels[0].element("Alarm").unwrap()
    else {
        panic!("expected an event");
    };
    assert_eq!(alarm.direction, Direction::Output);
    assert_eq!(alarm.state, StateOfEvent::On);

    let SubmodelElement::Operation(start) = env.submodels[0].element("Start").unwrap() else {
        panic!("expected an operation");
    };
    assert_eq!(start.input_variables.len(), 1);
    assert!(start.output_variables.is_empty());
    assert_eq!(start.input_variables[0].value.id_short(), "Rpm");
}

#[test]
fn serialized_environment_reads_back_identically() {
    let env = read();
    let serialized = serde_json::to_value(&env).unwrap();
    let reread = CurrentJsonReader::default()
        .read_environment(&serialized)
        .unwrap();
    assert_eq!(env, reread);
}

#[test]
fn property_without_type_or_value_fails() {
    let fragment = json!({"modelType": "Property", "idShort": "P"});
    let err = CurrentJsonReader::default().read(&fragment).unwrap_err();
    assert_eq!(
        err,
        ReadError::MissingRequiredField {
            owner: "Property",
            field: "valueType",
            path: "P".to_string(),
        }
    );
}

#[test]
fn standalone_element_has_no_parent() {
    let fragment = json!({"modelType": "Property", "idShort": "P", "value": "true"});
    let Fragment::Element(SubmodelElement::Property(property)) =
        CurrentJsonReader::default().read(&fragment).unwrap()
    else {
        panic!("expected a property fragment");
    };
    assert_eq!(property.value_type, DataTypeDefXsd::Boolean);
    assert!(property.base.referable.parent.is_none());
    assert!(property.node_id.is_none());
}

#[test]
fn submodel_fragment() {
    let fragment = environment()["submodels"][0].clone();
    let fragment = CurrentJsonReader::default().read(&fragment).unwrap();
    let submodel = fragment.into_submodel().unwrap();
    assert_eq!(submodel.submodel_elements.len(), 15);
}

#[test]
fn shell_fragment_is_invalid_operation() {
    let fragment = environment()["assetAdministrationShells"][0].clone();
    let err = CurrentJsonReader::default().read(&fragment).unwrap_err();
    assert!(matches!(err, ReadError::InvalidOperation(_)));
}

#[test]
fn unknown_root_is_unsupported() {
    let err = CurrentJsonReader::default()
        .read(&json!({"modelType": "Widget", "idShort": "W"}))
        .unwrap_err();
    assert!(matches!(
        err,
        ReadError::UnsupportedVariant { ref discriminator, .. } if discriminator == "Widget"
    ));
}

#[test]
fn depth_limit_is_enforced() {
    let reader = CurrentJsonReader::new(ReaderOptions { max_depth: 1 });
    let err = reader.read_environment(&environment()).unwrap_err();
    assert!(matches!(err, ReadError::DepthLimitExceeded { limit: 1, .. }));
}

#[test]
fn invalid_text_is_malformed() {
    let err = CurrentJsonReader::default()
        .read_environment_str("{not json")
        .unwrap_err();
    assert!(matches!(err, ReadError::MalformedSource(_)));
}

#[test]
fn shell_requires_asset_kind() {
    let source = json!({"assetAdministrationShells": [{
        "id": "urn:example:aas:1",
        "assetInformation": {"globalAssetId": "urn:example:asset:1"}
    }]});
    let err = CurrentJsonReader::default()
        .read_environment(&source)
        .unwrap_err();
    assert!(matches!(
        err,
        ReadError::MissingRequiredField { owner: "AssetInformation", field: "assetKind", .. }
    ));
}
