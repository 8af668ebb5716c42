//! Lexical tables of the legacy (v2) schema, shared by the legacy JSON and
//! XML readers.

use aas_ingest_model::{DataTypeDefXsd, KeyType};

/// Translate a legacy value type name to its canonical `xs:` tag.
///
/// Matching is case-insensitive and tolerates an `xs:` prefix. Types the
/// current schema dropped map to their closest successor
/// (`dateTimeStamp` → `xs:dateTime`, `yearMonthDuration` and
/// `dayTimeDuration` → `xs:duration`, `langString` → `xs:string`).
///
/// # Examples
///
/// ```
/// use aas_ingest_model::DataTypeDefXsd;
/// use aas_ingest_reader::legacy_value_type;
///
/// assert_eq!(legacy_value_type("dateTimeStamp"), Some(DataTypeDefXsd::DateTime));
/// assert_eq!(legacy_value_type("yearMonthDuration"), Some(DataTypeDefXsd::Duration));
/// ```
#[must_use]
pub fn legacy_value_type(name: &str) -> Option<DataTypeDefXsd> {
    let name = name.trim();
    let name = name.strip_prefix("xs:").unwrap_or(name).to_ascii_lowercase();
    let value_type = match name.as_str() {
        "anyuri" => DataTypeDefXsd::AnyUri,
        "base64binary" => DataTypeDefXsd::Base64Binary,
        "boolean" => DataTypeDefXsd::Boolean,
        "byte" => DataTypeDefXsd::Byte,
        "date" => DataTypeDefXsd::Date,
        "datetime" | "datetimestamp" => DataTypeDefXsd::DateTime,
        "decimal" => DataTypeDefXsd::Decimal,
        "double" => DataTypeDefXsd::Double,
        "duration" | "yearmonthduration" | "daytimeduration" => DataTypeDefXsd::Duration,
        "float" => DataTypeDefXsd::Float,
        "gday" => DataTypeDefXsd::GDay,
        "gmonth" => DataTypeDefXsd::GMonth,
        "gmonthday" => DataTypeDefXsd::GMonthDay,
        "gyear" => DataTypeDefXsd::GYear,
        "gyearmonth" => DataTypeDefXsd::GYearMonth,
        "hexbinary" => DataTypeDefXsd::HexBinary,
        "int" => DataTypeDefXsd::Int,
        "integer" => DataTypeDefXsd::Integer,
        "long" => DataTypeDefXsd::Long,
        "negativeinteger" => DataTypeDefXsd::NegativeInteger,
        "nonnegativeinteger" => DataTypeDefXsd::NonNegativeInteger,
        "nonpositiveinteger" => DataTypeDefXsd::NonPositiveInteger,
        "positiveinteger" => DataTypeDefXsd::PositiveInteger,
        "short" => DataTypeDefXsd::Short,
        "string" | "langstring" | "anysimpletype" | "anytype" => DataTypeDefXsd::String,
        "time" => DataTypeDefXsd::Time,
        "unsignedbyte" => DataTypeDefXsd::UnsignedByte,
        "unsignedint" => DataTypeDefXsd::UnsignedInt,
        "unsignedlong" => DataTypeDefXsd::UnsignedLong,
        "unsignedshort" => DataTypeDefXsd::UnsignedShort,
        _ => return None,
    };
    Some(value_type)
}

/// Translate a legacy key type to the current key type set.
///
/// Legacy asset keys become global references; the legacy event names map
/// to their current counterparts.
#[must_use]
pub fn legacy_key_type(name: &str) -> Option<KeyType> {
    match name.trim() {
        "Asset" => Some(KeyType::GlobalReference),
        "BasicEvent" => Some(KeyType::BasicEventElement),
        "Event" => Some(KeyType::EventElement),
        other => KeyType::from_tag(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drifted_value_types() {
        assert_eq!(
            legacy_value_type("dateTimeStamp"),
            Some(DataTypeDefXsd::DateTime)
        );
        assert_eq!(
            legacy_value_type("yearMonthDuration"),
            Some(DataTypeDefXsd::Duration)
        );
        assert_eq!(legacy_value_type("langString"), Some(DataTypeDefXsd::String));
    }

    #[test]
    fn value_types_are_case_insensitive() {
        assert_eq!(legacy_value_type("STRING"), Some(DataTypeDefXsd::String));
        assert_eq!(legacy_value_type("xs:int"), Some(DataTypeDefXsd::Int));
        assert_eq!(legacy_value_type("anyURI"), Some(DataTypeDefXsd::AnyUri));
    }

    #[test]
    fn unknown_value_type() {
        assert_eq!(legacy_value_type("complexThing"), None);
    }

    #[test]
    fn legacy_key_types() {
        assert_eq!(legacy_key_type("Asset"), Some(KeyType::GlobalReference));
        assert_eq!(legacy_key_type("BasicEvent"), Some(KeyType::BasicEventElement));
        assert_eq!(legacy_key_type("Submodel"), Some(KeyType::Submodel));
        assert_eq!(legacy_key_type("ConceptDictionary"), None);
    }
}
