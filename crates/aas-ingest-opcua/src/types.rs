//! Type definition tags of the AAS companion address space.

use aas_ingest_model::ModelType;
use aas_ingest_reader::Discriminator;

/// Root of an exposed environment.
pub const ENVIRONMENT: &str = "AASEnvironmentType";
/// An administration shell.
pub const SHELL: &str = "AASAssetAdministrationShellType";
/// A v2 asset record.
pub const ASSET: &str = "AASAssetType";
/// Asset information of a shell.
pub const ASSET_INFORMATION: &str = "AASAssetInformationType";
/// A submodel.
pub const SUBMODEL: &str = "AASSubmodelType";
/// A concept description.
pub const CONCEPT_DESCRIPTION: &str = "AASConceptDescriptionType";
/// A reference with a `Keys` property.
pub const REFERENCE: &str = "AASReferenceType";
/// A list of references whose items point to their targets via `hasAddIn`.
pub const REFERENCE_LIST: &str = "AASReferenceList";
/// A plain folder.
pub const FOLDER: &str = "FolderType";
/// A qualifier.
pub const QUALIFIER: &str = "AASQualifierType";
/// Embedded IEC 61360 content.
pub const IEC61360: &str = "AASDataSpecificationIEC61360Type";
/// Identification of a v2 identifiable.
pub const IDENTIFIER: &str = "AASIdentifierType";
/// Administrative information.
pub const ADMINISTRATION: &str = "AASAdministrativeInformationType";
/// A plain property.
pub const PROPERTY: &str = "PropertyType";

const ELEMENT_TYPES: &[(&str, ModelType)] = &[
    ("AASPropertyType", ModelType::Property),
    ("AASMultiLanguagePropertyType", ModelType::MultiLanguageProperty),
    ("AASRangeType", ModelType::Range),
    ("AASFileType", ModelType::File),
    ("AASBlobType", ModelType::Blob),
    ("AASReferenceElementType", ModelType::ReferenceElement),
    ("AASRelationshipElementType", ModelType::RelationshipElement),
    (
        "AASAnnotatedRelationshipElementType",
        ModelType::AnnotatedRelationshipElement,
    ),
    ("AASEntityType", ModelType::Entity),
    ("AASOperationType", ModelType::Operation),
    ("AASSubmodelElementCollectionType", ModelType::SubmodelElementCollection),
    (
        "AASOrderedSubmodelElementCollectionType",
        ModelType::SubmodelElementCollection,
    ),
    ("AASSubmodelElementListType", ModelType::SubmodelElementList),
    ("AASBasicEventElementType", ModelType::BasicEventElement),
    ("AASCapabilityType", ModelType::Capability),
];

/// Components that carry attributes of their parent rather than elements.
const STRUCTURAL_TYPES: &[&str] = &[
    REFERENCE,
    QUALIFIER,
    IEC61360,
    IDENTIFIER,
    ADMINISTRATION,
    ASSET_INFORMATION,
    PROPERTY,
    "BaseDataVariableType",
    "MethodType",
];

/// Classify a type definition tag.
#[must_use]
pub fn discriminate(type_tag: &str) -> Discriminator {
    if let Some((_, model_type)) = ELEMENT_TYPES.iter().find(|(tag, _)| *tag == type_tag) {
        return Discriminator::Element(*model_type);
    }
    match type_tag {
        SUBMODEL => Discriminator::Submodel,
        SHELL | ASSET | CONCEPT_DESCRIPTION | ENVIRONMENT => {
            Discriminator::EnvironmentScope(type_tag.to_string())
        }
        _ => Discriminator::Unknown(type_tag.to_string()),
    }
}

/// Whether components of this type hold attributes of their parent.
#[must_use]
pub fn is_structural(type_tag: &str) -> bool {
    STRUCTURAL_TYPES.contains(&type_tag)
}
