use aas_ingest_model::{
    AssetKind, DataSpecificationContent, DataTypeDefXsd, Direction, EntityType, KeyType,
    ModellingKind, ReferenceType, StateOfEvent, SubmodelElement,
};
use aas_ingest_opcua::types::{
    ASSET, ASSET_INFORMATION, CONCEPT_DESCRIPTION, ENVIRONMENT, FOLDER, IDENTIFIER, IEC61360,
    REFERENCE, REFERENCE_LIST, SHELL, SUBMODEL,
};
use aas_ingest_opcua::{ComponentGraph, ComponentId, ComponentNode, OpcUaReader, IEC61360_TEMPLATE};
use aas_ingest_reader::{encode_id_base64url, Fragment, ModelReader, ReadError, ReaderOptions};
use serde_json::json;

struct Fixture {
    graph: ComponentGraph,
    shell: ComponentId,
    submodel: ComponentId,
    vendor: ComponentId,
}

/// An environment whose only submodel hangs off the shell's reference list.
fn fixture() -> Fixture {
    let mut graph = ComponentGraph::new();
    let env = graph.add_root(ComponentNode::new("AASEnvironment", ENVIRONMENT));

    let shell = graph.add_component(env, ComponentNode::new("1:Pump", SHELL));
    graph.add_property(shell, "Id", "urn:example:aas:pump");
    let information = graph.add_component(shell, ComponentNode::new("AssetInformation", ASSET_INFORMATION));
    graph.add_property(information, "AssetKind", 1);
    graph.add_property(information, "GlobalAssetId", "urn:example:asset:pump");

    let submodel = graph.add(ComponentNode::new("1:Operational", SUBMODEL));
    let list = graph.add_component(shell, ComponentNode::new("Submodels", REFERENCE_LIST));
    let item = graph.add_component(list, ComponentNode::new("Ref0", REFERENCE));
    graph.link_add_in(item, submodel);

    graph.add_property(submodel, "Id", "urn:example:sm:ops");
    graph.add_property(submodel, "Kind", 1);
    let semantic = graph.add_component(submodel, ComponentNode::new("SemanticId", REFERENCE));
    graph.add_property(
        semantic,
        "Keys",
        json!([{"type": "GlobalReference", "value": "urn:example:semantics:ops"}]),
    );

    let speed = graph.add_component(submodel, ComponentNode::new("1:Speed", "1:AASPropertyType"));
    graph.add_property(speed, "ValueType", 6);
    graph.add_property(speed, "Value", "42");
    graph.add_property(speed, "Category", 2);
    graph.add_property(speed, "Description", json!([{"locale": "en", "text": "Rotational speed"}]));

    let vendor = graph.add_component(submodel, ComponentNode::new("Diagnostics", "VendorDiagnosticsType"));

    let status = graph.add_component(
        submodel,
        ComponentNode::new("Status", "AASSubmodelElementCollectionType"),
    );
    let folder = graph.add_component(status, ComponentNode::new("Readings", FOLDER));
    let temperature = graph.add_component(folder, ComponentNode::new("Temperature", "AASPropertyType"));
    graph.add_property(temperature, "ValueType", "Double");
    graph.add_property(temperature, "Value", 21.5);

    let values = graph.add_component(submodel, ComponentNode::new("Values", "AASSubmodelElementListType"));
    graph.add_property(values, "TypeValueListElement", "Property");
    graph.add_property(values, "ValueTypeListElement", "Int32");
    graph.add_property(values, "OrderRelevant", true);
    for value in ["1", "2"] {
        let entry = graph.add_component(values, ComponentNode::new("", "AASPropertyType"));
        graph.add_property(entry, "ValueType", 6);
        graph.add_property(entry, "Value", value);
    }

    let motor = graph.add_component(submodel, ComponentNode::new("Motor", "AASEntityType"));
    graph.add_property(motor, "EntityType", 1);
    graph.add_property(motor, "GlobalAssetId", "urn:example:motor");
    let statements = graph.add_component(motor, ComponentNode::new("Statement", FOLDER));
    let power = graph.add_component(statements, ComponentNode::new("Power", "AASPropertyType"));
    graph.add_property(power, "Value", "7");

    let alarm = graph.add_component(submodel, ComponentNode::new("Alarm", "AASBasicEventElementType"));
    let observed = graph.add_component(alarm, ComponentNode::new("Observed", REFERENCE));
    graph.add_property(
        observed,
        "Keys",
        json!([{"type": "Submodel", "value": "urn:example:sm:ops"}]),
    );
    graph.add_property(alarm, "Direction", 1);
    graph.add_property(alarm, "State", "on");
    graph.add_property(alarm, "MessageTopic", "alarms");

    let start = graph.add_component(submodel, ComponentNode::new("Start", "AASOperationType"));
    let method = graph.add_component(start, ComponentNode::new("Operation", "MethodType"));
    graph.add_property(
        method,
        "InputArguments",
        json!([{"name": "Rpm", "dataType": 6, "description": {"locale": "en", "text": "Target speed"}}]),
    );
    graph.add_property(method, "OutputArguments", json!([{"name": "Ok", "dataType": "Boolean"}]));

    let concept = graph.add_component(env, ComponentNode::new("SpeedConcept", CONCEPT_DESCRIPTION));
    graph.add_property(concept, "Id", "urn:example:cd:speed");
    let iec = graph.add_component(concept, ComponentNode::new("DataSpecificationIEC61360", IEC61360));
    graph.add_property(iec, "PreferredName", json!([{"locale": "en", "text": "Speed"}]));
    graph.add_property(iec, "Unit", "1/min");
    graph.add_property(iec, "LevelType", json!(["Min", "Max"]));

    Fixture {
        graph,
        shell,
        submodel,
        vendor,
    }
}

fn property(element: &SubmodelElement) -> &aas_ingest_model::Property {
    match element {
        SubmodelElement::Property(property) => property,
        other => panic!("expected a property, got {:?}", other.model_type()),
    }
}

#[test]
fn reads_environment_counts() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    assert_eq!(env.asset_administration_shells.len(), 1);
    assert_eq!(env.submodels.len(), 1);
    assert_eq!(env.concept_descriptions.len(), 1);
}

#[test]
fn shell_attributes() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let shell = &env.asset_administration_shells[0];
    assert_eq!(shell.identifiable.id, "urn:example:aas:pump");
    assert_eq!(shell.identifiable.referable.id_short, "Pump");
    assert_eq!(shell.asset_information.asset_kind, AssetKind::Instance);
    assert_eq!(
        shell.asset_information.global_asset_id.as_deref(),
        Some("urn:example:asset:pump")
    );
    assert_eq!(shell.submodels.len(), 1);
    assert_eq!(shell.submodels[0].reference_type(), ReferenceType::ModelReference);
    assert_eq!(shell.submodels[0].first_key().key_type, KeyType::Submodel);
    assert_eq!(shell.submodels[0].first_key().value, "urn:example:sm:ops");
}

#[test]
fn submodel_attributes() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    assert_eq!(submodel.identifiable.referable.id_short, "Operational");
    assert_eq!(submodel.kind, ModellingKind::Instance);
    let semantic = submodel.semantic_id.as_ref().unwrap();
    assert_eq!(semantic.reference_type(), ReferenceType::ExternalReference);
    assert_eq!(semantic.first_key().value, "urn:example:semantics:ops");
}

#[test]
fn structural_and_unknown_components_are_not_elements() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let names: Vec<&str> = submodel.submodel_elements.iter().map(SubmodelElement::id_short).collect();
    assert_eq!(names, vec!["Speed", "Status", "Values", "Motor", "Alarm", "Start"]);
}

#[test]
fn property_from_numeric_encodings() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let speed = property(submodel.element("Speed").unwrap());
    assert_eq!(speed.value_type, DataTypeDefXsd::Int);
    assert_eq!(speed.value.as_deref(), Some("42"));
    assert_eq!(speed.base.referable.category.as_deref(), Some("VARIABLE"));
    assert_eq!(speed.base.referable.description[0].text, "Rotational speed");
    assert_eq!(
        speed.node_id.as_deref(),
        Some(format!("{}.Speed", encode_id_base64url("urn:example:sm:ops")).as_str())
    );
    let parent = speed.base.referable.parent.as_ref().unwrap();
    assert_eq!(parent.first_key().key_type, KeyType::Submodel);
}

#[test]
fn folders_inside_collections_are_looked_through() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let temperature = property(submodel.element("Status/Temperature").unwrap());
    assert_eq!(temperature.value_type, DataTypeDefXsd::Double);
    assert_eq!(temperature.value.as_deref(), Some("21.5"));
}

#[test]
fn list_items_are_named_by_index() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let SubmodelElement::SubmodelElementList(list) = submodel.element("Values").unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(list.value_type_list_element, Some(DataTypeDefXsd::Int));
    assert_eq!(list.order_relevant, Some(true));
    let names: Vec<&str> = list.value.iter().map(SubmodelElement::id_short).collect();
    assert_eq!(names, vec!["0", "1"]);
}

#[test]
fn entity_statements() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let SubmodelElement::Entity(motor) = submodel.element("Motor").unwrap() else {
        panic!("expected an entity");
    };
    assert_eq!(motor.entity_type, EntityType::SelfManagedEntity);
    assert_eq!(motor.global_asset_id.as_deref(), Some("urn:example:motor"));
    let power = property(submodel.element("Motor/Power").unwrap());
    assert_eq!(power.value_type, DataTypeDefXsd::Integer);
}

#[test]
fn basic_event_element() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let SubmodelElement::BasicEventElement(alarm) = submodel.element("Alarm").unwrap() else {
        panic!("expected an event");
    };
    assert_eq!(alarm.direction, Direction::Output);
    assert_eq!(alarm.state, StateOfEvent::On);
    assert_eq!(alarm.message_topic.as_deref(), Some("alarms"));
    assert_eq!(alarm.observed.reference_type(), ReferenceType::ModelReference);
}

#[test]
fn operation_variables_from_method_arguments() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let SubmodelElement::Operation(start) = submodel.element("Start").unwrap() else {
        panic!("expected an operation");
    };
    assert_eq!(start.input_variables.len(), 1);
    let rpm = property(&start.input_variables[0].value);
    assert_eq!(rpm.base.referable.id_short, "Rpm");
    assert_eq!(rpm.value_type, DataTypeDefXsd::Int);
    assert_eq!(rpm.base.referable.description[0].text, "Target speed");
    let ok = property(&start.output_variables[0].value);
    assert_eq!(ok.value_type, DataTypeDefXsd::Boolean);
    assert!(start.inoutput_variables.is_empty());
}

#[test]
fn operation_variables_from_sibling_method() {
    let mut graph = ComponentGraph::new();
    let submodel = graph.add_root(ComponentNode::new("1:Ops", SUBMODEL));
    graph.add_property(submodel, "Id", "urn:example:sm:ops");
    graph.add_component(submodel, ComponentNode::new("1:Start", "AASOperationType"));
    let method = graph.add_component(submodel, ComponentNode::new("1:StartMethod", "MethodType"));
    graph.add_property(method, "InputArguments", json!([{"name": "Rpm", "dataType": 6}]));
    graph.add_property(method, "OutputArguments", json!([{"name": "Ok", "dataType": "Boolean"}]));

    let submodel = OpcUaReader::default().read(&graph).unwrap().into_submodel().unwrap();
    assert_eq!(submodel.submodel_elements.len(), 1);
    let SubmodelElement::Operation(start) = submodel.element("Start").unwrap() else {
        panic!("expected an operation");
    };
    assert_eq!(start.input_variables.len(), 1);
    let rpm = property(&start.input_variables[0].value);
    assert_eq!(rpm.base.referable.id_short, "Rpm");
    assert_eq!(rpm.value_type, DataTypeDefXsd::Int);
    assert_eq!(start.output_variables.len(), 1);
    let ok = property(&start.output_variables[0].value);
    assert_eq!(ok.base.referable.id_short, "Ok");
    assert_eq!(ok.value_type, DataTypeDefXsd::Boolean);
}

#[test]
fn concept_description_with_iec61360() {
    let env = OpcUaReader::default().read_environment(&fixture().graph).unwrap();
    let concept = &env.concept_descriptions[0];
    assert_eq!(concept.identifiable.id, "urn:example:cd:speed");
    let eds = &concept.embedded_data_specifications[0];
    assert_eq!(eds.data_specification.first_key().value, IEC61360_TEMPLATE);
    let DataSpecificationContent::DataSpecificationIec61360(content) = &eds.data_specification_content;
    assert_eq!(content.preferred_name[0].text, "Speed");
    assert_eq!(content.unit.as_deref(), Some("1/min"));
    let levels = content.level_type.as_ref().unwrap();
    assert!(levels.min && levels.max && !levels.nom && !levels.typ);
}

#[test]
fn legacy_asset_component() {
    let mut graph = ComponentGraph::new();
    let env = graph.add_root(ComponentNode::new("AASEnvironment", ENVIRONMENT));
    let shell = graph.add_component(env, ComponentNode::new("Pump", SHELL));
    graph.add_property(shell, "Id", "urn:example:aas:pump");
    let asset = graph.add_component(shell, ComponentNode::new("PumpAsset", ASSET));
    graph.add_property(asset, "Kind", "Type");
    let identification = graph.add_component(asset, ComponentNode::new("Identification", IDENTIFIER));
    graph.add_property(identification, "Id", "urn:example:asset:pump");

    let env = OpcUaReader::default().read_environment(&graph).unwrap();
    let information = &env.asset_administration_shells[0].asset_information;
    assert_eq!(information.asset_kind, AssetKind::Type);
    assert_eq!(information.global_asset_id.as_deref(), Some("urn:example:asset:pump"));
}

#[test]
fn shell_without_asset_fails() {
    let mut graph = ComponentGraph::new();
    let env = graph.add_root(ComponentNode::new("AASEnvironment", ENVIRONMENT));
    let shell = graph.add_component(env, ComponentNode::new("Pump", SHELL));
    graph.add_property(shell, "Id", "urn:example:aas:pump");

    let err = OpcUaReader::default().read_environment(&graph).unwrap_err();
    assert!(matches!(
        err,
        ReadError::MissingRequiredField {
            owner: "AssetAdministrationShell",
            field: "assetInformation",
            ..
        }
    ));
}

#[test]
fn unknown_numeric_enum_is_malformed() {
    let mut graph = ComponentGraph::new();
    let speed = graph.add_root(ComponentNode::new("Speed", "AASPropertyType"));
    graph.add_property(speed, "ValueType", 14);

    let err = OpcUaReader::default().read(&graph).unwrap_err();
    assert!(matches!(err, ReadError::MalformedSource(_)));
}

#[test]
fn submodel_fragment() {
    let fixture = fixture();
    let fragment = OpcUaReader::default()
        .read_component(&fixture.graph, fixture.submodel)
        .unwrap();
    let submodel = fragment.into_submodel().unwrap();
    assert_eq!(submodel.identifiable.id, "urn:example:sm:ops");
    assert_eq!(submodel.submodel_elements.len(), 6);
}

#[test]
fn element_fragment_has_no_parent() {
    let mut graph = ComponentGraph::new();
    let speed = graph.add_root(ComponentNode::new("1:Speed", "AASPropertyType"));
    graph.add_property(speed, "Value", "true");

    let element = OpcUaReader::default().read(&graph).unwrap().into_element().unwrap();
    let speed = property(&element);
    assert_eq!(speed.value_type, DataTypeDefXsd::Boolean);
    assert!(speed.base.referable.parent.is_none());
    assert!(speed.node_id.is_none());
}

#[test]
fn shell_fragment_is_invalid() {
    let fixture = fixture();
    let err = OpcUaReader::default()
        .read_component(&fixture.graph, fixture.shell)
        .unwrap_err();
    assert!(matches!(err, ReadError::InvalidOperation(_)));
}

#[test]
fn unknown_fragment_is_unsupported() {
    let fixture = fixture();
    let err = OpcUaReader::default()
        .read_component(&fixture.graph, fixture.vendor)
        .unwrap_err();
    assert!(matches!(err, ReadError::UnsupportedVariant { .. }));
}

#[test]
fn cycles_hit_the_depth_limit() {
    let mut graph = ComponentGraph::new();
    let root = graph.add_root(ComponentNode::new("Loop", "AASSubmodelElementCollectionType"));
    graph.link_component(root, root);

    let err = OpcUaReader::new(ReaderOptions { max_depth: 8 })
        .read(&graph)
        .unwrap_err();
    assert!(matches!(err, ReadError::DepthLimitExceeded { limit: 8, .. }));
}

#[test]
fn reads_json_snapshot() {
    let text = r#"{
        "root": 0,
        "nodes": [
            {"browseName": "AASEnvironment", "typeDefinition": "AASEnvironmentType", "hasComponent": [1]},
            {"browseName": "1:Operational", "typeDefinition": "1:AASSubmodelType",
             "hasProperty": [2], "hasComponent": [3]},
            {"browseName": "Id", "typeDefinition": "PropertyType", "value": "urn:example:sm:ops"},
            {"browseName": "1:Speed", "typeDefinition": "1:AASPropertyType", "hasProperty": [4]},
            {"browseName": "Value", "typeDefinition": "PropertyType", "value": 42}
        ]
    }"#;
    let env = OpcUaReader::default().read_environment_json(text).unwrap();
    let submodel = env.submodel("urn:example:sm:ops").unwrap();
    let speed = property(submodel.element("Speed").unwrap());
    assert_eq!(speed.value_type, DataTypeDefXsd::Integer);
    assert_eq!(speed.value.as_deref(), Some("42"));
}

#[test]
fn malformed_json_snapshot() {
    let err = OpcUaReader::default().read_json("{\"nodes\": 3}").unwrap_err();
    assert!(matches!(err, ReadError::MalformedSource(_)));
}
