//! Environment-level entry points of the v2 JSON reader.

use crate::attributes::{
    administration, apply_referable, embedded_data_specifications, identification, opt_reference,
    qualifiers, references,
};
use crate::elements::discriminate;
use aas_ingest_model::{
    AncestorChain, AssetAdministrationShell, AssetInformation, AssetKind, ConceptDescription,
    Environment, Identifiable, ModelType, ModellingKind, Submodel,
};
use aas_ingest_reader::construct::{identifiable, parse_tag, require, require_tag, submodel_chain};
use aas_ingest_reader::json::{opt_array, opt_str};
use aas_ingest_reader::{
    classify_fragment, Fragment, FragmentKind, ModelReader, ReadError, ReaderOptions,
};
use serde_json::Value;

/// Reader for AAS v2 JSON documents.
///
/// Shells take their asset kind and global asset id from the environment's
/// `assets` array: the asset referenced by the shell when it is found there,
/// else the first asset.
#[derive(Debug, Clone, Default)]
pub struct LegacyJsonReader {
    pub(crate) options: ReaderOptions,
}

impl LegacyJsonReader {
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

    fn shell(&self, node: &Value, assets: &[Value]) -> Result<AssetAdministrationShell, ReadError> {
        let identifiable = read_identifiable(node, ModelType::AssetAdministrationShell)?;
        let root = AncestorChain::root();
        let leaf = Some(identifiable.id.as_str());

        let asset_ref = opt_reference(node, "asset", &root, leaf)?;
        let asset = asset_ref
            .as_ref()
            .and_then(|r| {
                let id = r.first_key().value.as_str();
                assets.iter().find(|a| identification(a) == Some(id))
            })
            .or_else(|| assets.first());
        let asset = require(asset, "AssetAdministrationShell", "asset", &root, leaf)?;

        let mut asset_information = AssetInformation::new(require_tag(
            opt_str(asset, "kind"),
            AssetKind::from_tag,
            "Asset",
            "kind",
            &root,
            leaf,
        )?);
        asset_information.global_asset_id = identification(asset)
            .map(str::to_string)
            .or_else(|| asset_ref.map(|r| r.first_key().value.clone()));

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
            submodel_elements: self.elements(opt_array(node, "submodelElements"), &chain)?,
            identifiable,
        };
        tracing::debug!(
            id = %submodel.identifiable.id,
            elements = submodel.submodel_elements.len(),
            "Read legacy submodel"
        );
        Ok(submodel)
    }
}

impl ModelReader<Value> for LegacyJsonReader {
    fn read_environment(&self, source: &Value) -> Result<Environment, ReadError> {
        let root = AncestorChain::root();
        let concept_descriptions = opt_array(source, "conceptDescriptions")
            .iter()
            .map(|node| {
                let identifiable = read_identifiable(node, ModelType::ConceptDescription)?;
                let leaf = Some(identifiable.id.as_str());
                Ok(ConceptDescription {
                    is_case_of: references(node, "isCaseOf", &root, leaf)?,
                    embedded_data_specifications: embedded_data_specifications(node, &root, leaf)?,
                    identifiable,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;

        let assets = opt_array(source, "assets");
        let asset_administration_shells = opt_array(source, "assetAdministrationShells")
            .iter()
            .map(|shell| self.shell(shell, assets))
            .collect::<Result<Vec<_>, _>>()?;
        let submodels = opt_array(source, "submodels")
            .iter()
            .map(|submodel| self.submodel(submodel))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            shells = asset_administration_shells.len(),
            submodels = submodels.len(),
            concept_descriptions = concept_descriptions.len(),
            "Read legacy JSON environment"
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
                .element(fragment, model_type, &AncestorChain::root())
                .map(Fragment::Element),
        }
    }
}

fn read_identifiable(node: &Value, model_type: ModelType) -> Result<Identifiable, ReadError> {
    let mut identifiable = identifiable(
        model_type,
        identification(node),
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
