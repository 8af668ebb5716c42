//! Identifiables, the environment, and their supporting value types.

use crate::element::SubmodelElement;
use crate::kinds::{AssetKind, DataTypeDefXsd, ModelType, ModellingKind, QualifierKind};
use crate::reference::Reference;
use serde::Serialize;

/// Top-level container of a read.
///
/// Readers preserve source order and do not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Administration shells
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub asset_administration_shells: Vec<AssetAdministrationShell>,
    /// Submodels
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Submodel>,
    /// Concept descriptions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concept_descriptions: Vec<ConceptDescription>,
}

impl Environment {
    /// Whether the environment holds nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asset_administration_shells.is_empty()
            && self.submodels.is_empty()
            && self.concept_descriptions.is_empty()
    }

    /// Find a submodel by its global id.
    #[must_use]
    pub fn submodel(&self, id: &str) -> Option<&Submodel> {
        self.submodels.iter().find(|s| s.identifiable.id == id)
    }
}

/// A string in a given language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangString {
    /// BCP 47 language tag
    pub language: String,
    /// Text in that language
    pub text: String,
}

impl LangString {
    /// Create a new language string.
    #[must_use]
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Attributes shared by every named node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Referable {
    /// Discriminator tag
    pub model_type: ModelType,
    /// Short local name, unique within the parent
    pub id_short: String,
    /// Optional category (e.g. `VARIABLE`, `CONSTANT`, `PARAMETER`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Multi-language description
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<LangString>,
    /// Reference to the ancestor chain, absent for top-level nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
}

impl Referable {
    /// Create a referable with only the mandatory attributes set.
    #[must_use]
    pub fn new(model_type: ModelType, id_short: impl Into<String>) -> Self {
        Self {
            model_type,
            id_short: id_short.into(),
            category: None,
            description: Vec::new(),
            parent: None,
        }
    }
}

/// Version information of an identifiable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AdministrativeInformation {
    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Revision within the version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// A referable with a global identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifiable {
    /// Referable attributes
    #[serde(flatten)]
    pub referable: Referable,
    /// Global identifier, never empty
    pub id: String,
    /// Optional version information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
}

impl Identifiable {
    /// Create an identifiable with only the mandatory attributes set.
    #[must_use]
    pub fn new(model_type: ModelType, id: impl Into<String>, id_short: impl Into<String>) -> Self {
        Self {
            referable: Referable::new(model_type, id_short),
            id: id.into(),
            administration: None,
        }
    }
}

/// A name/value identifier of an asset, scoped by its issuer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssetId {
    /// Key name (e.g. `SerialNumber`)
    pub name: String,
    /// Identifier value
    pub value: String,
    /// Subject the identifier is meaningful to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_subject_id: Option<Reference>,
    /// Semantic definition of the identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
}

/// The asset an administration shell represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    /// Type or instance
    pub asset_kind: AssetKind,
    /// Global asset identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    /// Additional asset identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    /// Identifier of the asset type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
}

impl AssetInformation {
    /// Asset information with only the kind set.
    #[must_use]
    pub fn new(asset_kind: AssetKind) -> Self {
        Self {
            asset_kind,
            global_asset_id: None,
            specific_asset_ids: Vec::new(),
            asset_type: None,
        }
    }
}

/// An asset administration shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    /// Identifiable attributes
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// The represented asset
    pub asset_information: AssetInformation,
    /// Shell this one is derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
    /// References to the shell's submodels
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
    /// Embedded data specifications
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
}

/// A submodel and its element tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    /// Identifiable attributes
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Semantic definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Qualifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
    /// Instance or template
    #[serde(skip_serializing_if = "ModellingKind::is_instance")]
    pub kind: ModellingKind,
    /// Embedded data specifications
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
    /// Ordered element tree
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    /// Look up an element by its `/`-separated idShort path.
    #[must_use]
    pub fn element(&self, path: &str) -> Option<&SubmodelElement> {
        let mut segments = path.split('/');
        let first = segments.next()?;
        let mut current = self
            .submodel_elements
            .iter()
            .find(|e| e.id_short() == first)?;
        for segment in segments {
            current = current
                .children()
                .into_iter()
                .find(|e| e.id_short() == segment)?;
        }
        Some(current)
    }
}

/// A concept description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    /// Identifiable attributes
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Concepts this one is a case of
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub is_case_of: Vec<Reference>,
    /// Embedded data specifications
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
}

/// A typed qualifier attached to a submodel or element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifier {
    /// Qualifier type, never empty
    #[serde(rename = "type")]
    pub qualifier_type: String,
    /// Value type of `value`
    pub value_type: DataTypeDefXsd,
    /// Qualifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference to the value's concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
    /// Qualifier kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<QualifierKind>,
    /// Semantic definition of the qualifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
}

/// A data specification template attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedDataSpecification {
    /// The template
    pub data_specification: Reference,
    /// The template's content
    pub data_specification_content: DataSpecificationContent,
}

/// Content of an embedded data specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modelType")]
pub enum DataSpecificationContent {
    /// IEC 61360 content
    DataSpecificationIec61360(DataSpecificationIec61360),
}

/// IEC 61360 data specification content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSpecificationIec61360 {
    /// Preferred name, required
    pub preferred_name: Vec<LangString>,
    /// Short name
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub short_name: Vec<LangString>,
    /// Unit symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference to the unit's definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<Reference>,
    /// Source of the definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_of_definition: Option<String>,
    /// Symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// IEC 61360 data type (e.g. `REAL_MEASURE`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Definition
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub definition: Vec<LangString>,
    /// Value format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    /// Enumerated admissible values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_list: Option<ValueList>,
    /// Fixed value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Which level values apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_type: Option<LevelType>,
}

impl DataSpecificationIec61360 {
    /// Content with only the preferred name set.
    #[must_use]
    pub fn new(preferred_name: Vec<LangString>) -> Self {
        Self {
            preferred_name,
            short_name: Vec::new(),
            unit: None,
            unit_id: None,
            source_of_definition: None,
            symbol: None,
            data_type: None,
            definition: Vec::new(),
            value_format: None,
            value_list: None,
            value: None,
            level_type: None,
        }
    }
}

/// Ordered value/reference pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueList {
    /// The pairs, in source order
    pub value_reference_pairs: Vec<ValueReferencePair>,
}

/// One admissible value and its concept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReferencePair {
    /// The value
    pub value: String,
    /// The value's concept
    pub value_id: Reference,
}

/// Flags for the min/nominal/typical/max levels of IEC 61360.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelType {
    /// Minimum
    pub min: bool,
    /// Nominal
    pub nom: bool,
    /// Typical
    pub typ: bool,
    /// Maximum
    pub max: bool,
}
