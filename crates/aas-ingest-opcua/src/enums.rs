//! Enumerations that the address space may expose either by name or by
//! their numeric OPC UA encoding.
//!
//! Each decoder accepts the symbolic tag, the number, or the number as a
//! string, and returns `None` for anything else.

use aas_ingest_model::{AssetKind, DataTypeDefXsd, Direction, EntityType, ModellingKind, StateOfEvent};
use aas_ingest_reader::legacy_value_type;
use serde_json::Value;

const ASSET_KINDS: &[(i64, AssetKind)] = &[
    (0, AssetKind::Type),
    (1, AssetKind::Instance),
    (2, AssetKind::NotApplicable),
];

const MODELLING_KINDS: &[(i64, ModellingKind)] =
    &[(0, ModellingKind::Template), (1, ModellingKind::Instance)];

const CATEGORIES: &[(i64, &str)] = &[(0, "CONSTANT"), (1, "PARAMETER"), (2, "VARIABLE")];

const ENTITY_TYPES: &[(i64, EntityType)] = &[
    (0, EntityType::CoManagedEntity),
    (1, EntityType::SelfManagedEntity),
];

const DIRECTIONS: &[(i64, Direction)] = &[(0, Direction::Input), (1, Direction::Output)];

const STATES: &[(i64, StateOfEvent)] = &[(0, StateOfEvent::On), (1, StateOfEvent::Off)];

/// OPC UA built-in type ids and names.
const BUILT_IN_TYPES: &[(i64, &str, DataTypeDefXsd)] = &[
    (1, "Boolean", DataTypeDefXsd::Boolean),
    (2, "SByte", DataTypeDefXsd::Byte),
    (3, "Byte", DataTypeDefXsd::UnsignedByte),
    (4, "Int16", DataTypeDefXsd::Short),
    (5, "UInt16", DataTypeDefXsd::UnsignedShort),
    (6, "Int32", DataTypeDefXsd::Int),
    (7, "UInt32", DataTypeDefXsd::UnsignedInt),
    (8, "Int64", DataTypeDefXsd::Long),
    (9, "UInt64", DataTypeDefXsd::UnsignedLong),
    (10, "Float", DataTypeDefXsd::Float),
    (11, "Double", DataTypeDefXsd::Double),
    (12, "String", DataTypeDefXsd::String),
    (13, "DateTime", DataTypeDefXsd::DateTime),
    (15, "ByteString", DataTypeDefXsd::Base64Binary),
    (26, "Number", DataTypeDefXsd::Decimal),
    (27, "Integer", DataTypeDefXsd::Integer),
    (28, "UInteger", DataTypeDefXsd::NonNegativeInteger),
];

fn numeric(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn decode<T: Copy>(
    value: &Value,
    table: &[(i64, T)],
    symbolic: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    if let Some(n) = numeric(value) {
        return table.iter().find(|(k, _)| *k == n).map(|(_, t)| *t);
    }
    value.as_str().map(str::trim).and_then(symbolic)
}

/// `AssetKind`: `0` Type, `1` Instance, `2` NotApplicable.
#[must_use]
pub fn asset_kind(value: &Value) -> Option<AssetKind> {
    decode(value, ASSET_KINDS, AssetKind::from_tag)
}

/// `ModellingKind`: `0` Template, `1` Instance.
#[must_use]
pub fn modelling_kind(value: &Value) -> Option<ModellingKind> {
    decode(value, MODELLING_KINDS, ModellingKind::from_tag)
}

/// Category: `0` CONSTANT, `1` PARAMETER, `2` VARIABLE.
#[must_use]
pub fn category(value: &Value) -> Option<&'static str> {
    decode(value, CATEGORIES, |tag| {
        CATEGORIES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(tag))
            .map(|(_, name)| *name)
    })
}

/// `EntityType`: `0` CoManagedEntity, `1` SelfManagedEntity.
#[must_use]
pub fn entity_type(value: &Value) -> Option<EntityType> {
    decode(value, ENTITY_TYPES, EntityType::from_tag)
}

/// `Direction`: `0` input, `1` output.
#[must_use]
pub fn direction(value: &Value) -> Option<Direction> {
    decode(value, DIRECTIONS, |tag| Direction::from_tag(&tag.to_ascii_lowercase()))
}

/// `StateOfEvent`: `0` on, `1` off.
#[must_use]
pub fn state(value: &Value) -> Option<StateOfEvent> {
    decode(value, STATES, |tag| StateOfEvent::from_tag(&tag.to_ascii_lowercase()))
}

/// Value type from an OPC UA built-in type (id or name) or an XML Schema
/// type name with or without the `xs:` prefix.
#[must_use]
pub fn value_type(value: &Value) -> Option<DataTypeDefXsd> {
    if let Some(n) = numeric(value) {
        return BUILT_IN_TYPES
            .iter()
            .find(|(id, _, _)| *id == n)
            .map(|(_, _, t)| *t);
    }
    let tag = value.as_str()?.trim();
    BUILT_IN_TYPES
        .iter()
        .find(|(_, name, _)| *name == tag)
        .map(|(_, _, t)| *t)
        .or_else(|| DataTypeDefXsd::from_tag(tag))
        .or_else(|| legacy_value_type(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_symbolic_forms() {
        assert_eq!(asset_kind(&json!(1)), Some(AssetKind::Instance));
        assert_eq!(asset_kind(&json!("0")), Some(AssetKind::Type));
        assert_eq!(asset_kind(&json!("Instance")), Some(AssetKind::Instance));
        assert_eq!(modelling_kind(&json!(0)), Some(ModellingKind::Template));
        assert_eq!(entity_type(&json!(1)), Some(EntityType::SelfManagedEntity));
        assert_eq!(direction(&json!("Output")), Some(Direction::Output));
        assert_eq!(state(&json!(0)), Some(StateOfEvent::On));
    }

    #[test]
    fn unknown_forms_are_rejected() {
        assert_eq!(asset_kind(&json!(7)), None);
        assert_eq!(asset_kind(&json!("Sometimes")), None);
        assert_eq!(modelling_kind(&json!(true)), None);
        assert_eq!(category(&json!("TRANSIENT")), None);
    }

    #[test]
    fn categories() {
        assert_eq!(category(&json!(2)), Some("VARIABLE"));
        assert_eq!(category(&json!("constant")), Some("CONSTANT"));
    }

    #[test]
    fn value_types() {
        assert_eq!(value_type(&json!(6)), Some(DataTypeDefXsd::Int));
        assert_eq!(value_type(&json!("Byte")), Some(DataTypeDefXsd::UnsignedByte));
        assert_eq!(value_type(&json!("xs:byte")), Some(DataTypeDefXsd::Byte));
        assert_eq!(value_type(&json!("dateTimeStamp")), Some(DataTypeDefXsd::DateTime));
        assert_eq!(value_type(&json!(14)), None);
    }
}
