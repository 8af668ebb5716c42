//! Inference of value types, content types, and reference types.

use aas_ingest_model::{DataTypeDefXsd, KeyType, ReferenceType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Infer the value type of an untyped literal.
///
/// | Literal | Type |
/// |---------|------|
/// | `true` / `false` (any case) | `xs:boolean` |
/// | optional sign and digits | `xs:integer` |
/// | decimal or exponent notation | `xs:double` |
/// | RFC 3339 or ISO local date-time | `xs:dateTime` |
/// | `YYYY-MM-DD` | `xs:date` |
/// | `hh:mm:ss[.f]` | `xs:time` |
/// | anything else | `xs:string` |
///
/// # Examples
///
/// ```
/// use aas_ingest_model::DataTypeDefXsd;
/// use aas_ingest_reader::determine_type;
///
/// assert_eq!(determine_type("42"), DataTypeDefXsd::Integer);
/// assert_eq!(determine_type("21.5"), DataTypeDefXsd::Double);
/// assert_eq!(determine_type("Running"), DataTypeDefXsd::String);
/// ```
#[must_use]
pub fn determine_type(literal: &str) -> DataTypeDefXsd {
    let literal = literal.trim();

    if literal.eq_ignore_ascii_case("true") || literal.eq_ignore_ascii_case("false") {
        return DataTypeDefXsd::Boolean;
    }
    if is_integer(literal) {
        return DataTypeDefXsd::Integer;
    }
    if literal.chars().any(|c| c.is_ascii_digit()) && literal.parse::<f64>().is_ok() {
        return DataTypeDefXsd::Double;
    }
    if DateTime::parse_from_rfc3339(literal).is_ok()
        || NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
    {
        return DataTypeDefXsd::DateTime;
    }
    if NaiveDate::parse_from_str(literal, "%Y-%m-%d").is_ok() {
        return DataTypeDefXsd::Date;
    }
    if NaiveTime::parse_from_str(literal, "%H:%M:%S%.f").is_ok() {
        return DataTypeDefXsd::Time;
    }
    DataTypeDefXsd::String
}

fn is_integer(literal: &str) -> bool {
    let digits = literal
        .strip_prefix(['+', '-'])
        .unwrap_or(literal);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Map a file extension (with or without the leading dot) to a MIME type.
///
/// Returns `None` for unknown extensions.
#[must_use]
pub fn extension_to_mime_type(extension: &str) -> Option<&'static str> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    let mime = match extension.as_str() {
        "aasx" => "application/asset-administration-shell-package",
        "bmp" => "image/bmp",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "gif" => "image/gif",
        "gz" => "application/gzip",
        "htm" | "html" => "text/html",
        "iges" | "igs" => "model/iges",
        "jpeg" | "jpg" => "image/jpeg",
        "json" => "application/json",
        "md" => "text/markdown",
        "mp4" => "video/mp4",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "step" | "stp" => "model/step",
        "stl" => "model/stl",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xml" => "application/xml",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Map the extension of a file path or URI to a MIME type.
///
/// Query strings and fragments are ignored.
#[must_use]
pub fn mime_type_for_path(path: &str) -> Option<&'static str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, extension) = file_name.rsplit_once('.')?;
    extension_to_mime_type(extension)
}

/// Determine the type of a reference lacking an explicit discriminator.
///
/// A legacy `local` flag on the first key decides when present (`true` is a
/// model reference). Otherwise references whose first key is a
/// `GlobalReference` or `FragmentReference` are external.
#[must_use]
pub fn determine_reference_type(local: Option<bool>, first_key: KeyType) -> ReferenceType {
    match local {
        Some(true) => ReferenceType::ModelReference,
        Some(false) => ReferenceType::ExternalReference,
        None if first_key.is_external() => ReferenceType::ExternalReference,
        None => ReferenceType::ModelReference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals() {
        assert_eq!(determine_type("42"), DataTypeDefXsd::Integer);
        assert_eq!(determine_type("-7"), DataTypeDefXsd::Integer);
        assert_eq!(
            determine_type("123456789012345678901234567890"),
            DataTypeDefXsd::Integer
        );
    }

    #[test]
    fn boolean_and_double_literals() {
        assert_eq!(determine_type("TRUE"), DataTypeDefXsd::Boolean);
        assert_eq!(determine_type("1.5e3"), DataTypeDefXsd::Double);
        assert_eq!(determine_type("NaN"), DataTypeDefXsd::String);
    }

    #[test]
    fn temporal_literals() {
        assert_eq!(
            determine_type("2024-05-01T12:00:00Z"),
            DataTypeDefXsd::DateTime
        );
        assert_eq!(determine_type("2024-05-01T12:00:00"), DataTypeDefXsd::DateTime);
        assert_eq!(determine_type("2024-05-01"), DataTypeDefXsd::Date);
        assert_eq!(determine_type("12:30:00"), DataTypeDefXsd::Time);
    }

    #[test]
    fn fallback_is_string() {
        assert_eq!(determine_type(""), DataTypeDefXsd::String);
        assert_eq!(determine_type("+"), DataTypeDefXsd::String);
        assert_eq!(determine_type("v1.2.3"), DataTypeDefXsd::String);
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(extension_to_mime_type("PDF"), Some("application/pdf"));
        assert_eq!(extension_to_mime_type(".png"), Some("image/png"));
        assert_eq!(extension_to_mime_type("unknownext"), None);
    }

    #[test]
    fn mime_type_from_path() {
        assert_eq!(
            mime_type_for_path("/aasx/files/manual.PDF"),
            Some("application/pdf")
        );
        assert_eq!(
            mime_type_for_path("https://example.org/img/logo.svg?rev=2"),
            Some("image/svg+xml")
        );
        assert_eq!(mime_type_for_path("/aasx/files/README"), None);
    }

    #[test]
    fn reference_type_from_local_flag() {
        assert_eq!(
            determine_reference_type(Some(true), KeyType::GlobalReference),
            ReferenceType::ModelReference
        );
        assert_eq!(
            determine_reference_type(Some(false), KeyType::Submodel),
            ReferenceType::ExternalReference
        );
    }

    #[test]
    fn reference_type_from_first_key() {
        assert_eq!(
            determine_reference_type(None, KeyType::GlobalReference),
            ReferenceType::ExternalReference
        );
        assert_eq!(
            determine_reference_type(None, KeyType::ConceptDescription),
            ReferenceType::ModelReference
        );
    }
}
