//! Environment-level entry points of the current-schema reader.

use crate::attributes::{
    administration, apply_referable, embedded_data_specifications, opt_reference, qualifiers,
    references, specific_asset_ids,
};
use crate::elements::discriminate;
use aas_ingest_model::{
    AncestorChain, AssetAdministrationShell, AssetInformation, AssetKind, ConceptDescription,
    Environment, Identifiable, ModelType, ModellingKind, Submodel,
};
use aas_ingest_reader::construct::{identifiable, parse_tag, require, require_tag, submodel_chain};
use aas_ingest_reader::json::{opt_array, opt_object, opt_str};
use aas_ingest_reader::{
    classify_fragment, Fragment, FragmentKind, ModelReader, ReadError, ReaderOptions,
};
use serde_json::Value;

/// Reader for AAS v3 JSON documents.
///
/// `parent` and `nodeId` found in the source are ignored and recomputed, so
/// serialized output of any reader can be read back.
#[derive(Debug, Clone, Default)]
pub struct CurrentJsonReader {
    pub(crate) options: ReaderOptions,
}

impl CurrentJsonReader {
    /// Create a reader with the given options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Parse `text` and read it as an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not JSON, otherwise
    /// see [`ModelReader::read_environment`].
    pub fn read_environment_str(&self, text: &str) -> Result<Environment, ReadError> {
        self.read_environment(&parse(text)?)
    }

    /// Parse `text` and read it as a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not JSON, otherwise
    /// see [`ModelReader::read`].
    pub fn read_str(&self, text: &str) -> Result<Fragment, ReadError> {
        self.read(&parse(text)?)
    }

    fn shell(&self, node: &Value) -> Result<AssetAdministrationShell, ReadError> {
        let identifiable = read_identifiable(node, ModelType::AssetAdministrationShell)?;
        let root = AncestorChain::root();
        let leaf = Some(identifiable.id.as_str());

        let info = require(
            opt_object(node, "assetInformation"),
            "AssetAdministrationShell",
            "assetInformation",
            &root,
            leaf,
        )?;
        let mut asset_information = AssetInformation::new(require_tag(
            opt_str(info, "assetKind"),
            AssetKind::from_tag,
            "AssetInformation",
            "assetKind",
            &root,
            leaf,
        )?);
        asset_information.global_asset_id = opt_str(info, "globalAssetId").map(str::to_string);
        asset_information.specific_asset_ids = specific_asset_ids(info, &root, leaf)?;
        asset_information.asset_type = opt_str(info, "assetType").map(str::to_string);

        Ok(AssetAdministrationShell {
            asset_information,
            derived_from: opt_reference(node, "derivedFrom", &root, leaf)?,
            submodels: references(node, "submodels", &root, leaf)?,
            embedded_data_specifications: embedded_data_specifications(node, &root, leaf)?,
            identifiable,
        })
    }

    fn submodel(&self, node: &Value) -> Result<Submodel, ReadError> {
        let identifiable = read_identifiable(node, ModelType::Submodel)?;
        let root = AncestorChain::root();
        let leaf = Some(identifiable.id.as_str());
        let chain = submodel_chain(&self.options, &identifiable)?;

        let submodel = Submodel {
            semantic_id: opt_reference(node, "semanticId", &root, leaf)?,
            qualifiers: qualifiers(node, &root, leaf)?,
            kind: parse_tag(
                opt_str(node, "kind"),
                ModellingKind::from_tag,
                "Submodel",
                "kind",
                &root,
                leaf,
            )?
            .unwrap_or_default(),
            embedded_data_specifications: embedded_data_specifications(node, &root, leaf)?,
            submodel_elements: self.elements(node, "submodelElements", &chain, false)?,
            identifiable,
        };
        tracing::debug!(
            id = %submodel.identifiable.id,
            elements = submodel.submodel_elements.len(),
            "Read submodel"
        );
        Ok(submodel)
    }

    fn concept_description(&self, node: &Value) -> Result<ConceptDescription, ReadError> {
        let identifiable = read_identifiable(node, ModelType::ConceptDescription)?;
        let root = AncestorChain::root();
        let leaf = Some(identifiable.id.as_str());
        Ok(ConceptDescription {
            is_case_of: references(node, "isCaseOf", &root, leaf)?,
            embedded_data_specifications: embedded_data_specifications(node, &root, leaf)?,
            identifiable,
        })
    }
}

impl ModelReader<Value> for CurrentJsonReader {
    fn read_environment(&self, source: &Value) -> Result<Environment, ReadError> {
        let concept_descriptions = opt_array(source, "conceptDescriptions")
            .iter()
            .map(|cd| self.concept_description(cd))
            .collect::<Result<Vec<_>, _>>()?;
        let asset_administration_shells = opt_array(source, "assetAdministrationShells")
            .iter()
            .map(|shell| self.shell(shell))
            .collect::<Result<Vec<_>, _>>()?;
        let submodels = opt_array(source, "submodels")
            .iter()
            .map(|submodel| self.submodel(submodel))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            shells = asset_administration_shells.len(),
            submodels = submodels.len(),
            concept_descriptions = concept_descriptions.len(),
            "Read current-schema JSON environment"
        );
        Ok(Environment {
            asset_administration_shells,
            submodels,
            concept_descriptions,
        })
    }

    fn read(&self, fragment: &Value) -> Result<Fragment, ReadError> {
        match classify_fragment(discriminate(fragment))? {
            FragmentKind::Submodel => self.submodel(fragment).map(Fragment::Submodel),
            FragmentKind::Element(model_type) => self
                .element(fragment, model_type, None, &AncestorChain::root())
                .map(Fragment::Element),
        }
    }
}

fn read_identifiable(node: &Value, model_type: ModelType) -> Result<Identifiable, ReadError> {
    let mut identifiable = identifiable(
        model_type,
        opt_str(node, "id"),
        opt_str(node, "idShort"),
        &AncestorChain::root(),
    )?;
    apply_referable(node, &mut identifiable.referable);
    identifiable.administration = administration(node);
    Ok(identifiable)
}

fn parse(text: &str) -> Result<Value, ReadError> {
    serde_json::from_str(text).map_err(|e| ReadError::MalformedSource(e.to_string()))
}
