//! Environment-level entry points of the component graph reader.

use crate::attributes::{submodel_reference, GraphContext};
use crate::enums;
use crate::graph::{ComponentGraph, ComponentId};
use crate::types::{ASSET, ASSET_INFORMATION, CONCEPT_DESCRIPTION, SHELL, SUBMODEL};
use aas_ingest_model::{
    AncestorChain, AssetAdministrationShell, AssetInformation, ConceptDescription, Environment,
    ModelType, Submodel,
};
use aas_ingest_reader::construct::{require, submodel_chain};
use aas_ingest_reader::{
    classify_fragment, Fragment, FragmentKind, ModelReader, ReadError, ReaderOptions,
};

/// Reader for AAS component graphs.
///
/// Environment reads start at the graph's root and look for shells,
/// submodels and concept descriptions among its components. Submodels
/// reachable only through a shell (for example through its reference list)
/// are read as well; each submodel is read once.
#[derive(Debug, Clone, Default)]
pub struct OpcUaReader {
    options: ReaderOptions,
}

impl OpcUaReader {
    /// Create a reader with the given options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Parse a graph snapshot from JSON and read it as an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not a graph,
    /// otherwise see [`ModelReader::read_environment`].
    pub fn read_environment_json(&self, text: &str) -> Result<Environment, ReadError> {
        self.read_environment(&ComponentGraph::from_json(text)?)
    }

    /// Parse a graph snapshot from JSON and read its root as a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not a graph,
    /// otherwise see [`ModelReader::read`].
    pub fn read_json(&self, text: &str) -> Result<Fragment, ReadError> {
        self.read(&ComponentGraph::from_json(text)?)
    }

    /// Read the component `id` as a fragment.
    ///
    /// # Errors
    ///
    /// See [`ModelReader::read`].
    pub fn read_component(&self, graph: &ComponentGraph, id: ComponentId) -> Result<Fragment, ReadError> {
        let ctx = GraphContext {
            graph,
            options: &self.options,
        };
        match classify_fragment(ctx.discriminate(id))? {
            FragmentKind::Submodel => submodel_of(&ctx, id).map(Fragment::Submodel),
            FragmentKind::Element(model_type) => ctx
                .element(id, model_type, None, &AncestorChain::root())
                .map(Fragment::Element),
        }
    }
}

impl ModelReader<ComponentGraph> for OpcUaReader {
    fn read_environment(&self, source: &ComponentGraph) -> Result<Environment, ReadError> {
        let ctx = GraphContext {
            graph: source,
            options: &self.options,
        };
        let root = AncestorChain::root();

        let concept_descriptions = ctx
            .typed_children(source.root, CONCEPT_DESCRIPTION)?
            .into_iter()
            .map(|id| {
                let identifiable = ctx.identifiable(id, ModelType::ConceptDescription)?;
                let leaf = Some(identifiable.id.as_str());
                let is_case_of = match source.child(id, "IsCaseOf")? {
                    Some(list) => source
                        .flatten(list)?
                        .into_iter()
                        .map(|r| ctx.reference_of(r, &root, leaf))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => Vec::new(),
                };
                Ok(ConceptDescription {
                    is_case_of,
                    embedded_data_specifications: ctx.embedded_data_specifications(id, &root, leaf)?,
                    identifiable,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;

        let shell_ids = ctx.typed_children(source.root, SHELL)?;
        let mut submodel_ids = ctx.typed_children(source.root, SUBMODEL)?;
        for &shell in &shell_ids {
            for submodel in ctx.typed_children(shell, SUBMODEL)? {
                if !submodel_ids.contains(&submodel) {
                    submodel_ids.push(submodel);
                }
            }
        }

        let asset_administration_shells = shell_ids
            .into_iter()
            .map(|id| shell_of(&ctx, id))
            .collect::<Result<Vec<_>, _>>()?;
        let submodels = submodel_ids
            .into_iter()
            .map(|id| submodel_of(&ctx, id))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            shells = asset_administration_shells.len(),
            submodels = submodels.len(),
            concept_descriptions = concept_descriptions.len(),
            "Read component graph environment"
        );
        Ok(Environment {
            asset_administration_shells,
            submodels,
            concept_descriptions,
        })
    }

    fn read(&self, fragment: &ComponentGraph) -> Result<Fragment, ReadError> {
        self.read_component(fragment, fragment.root)
    }
}

fn shell_of(ctx: &GraphContext<'_>, id: ComponentId) -> Result<AssetAdministrationShell, ReadError> {
    let identifiable = ctx.identifiable(id, ModelType::AssetAdministrationShell)?;
    let root = AncestorChain::root();
    let leaf = Some(identifiable.id.as_str());

    let information = match ctx.graph.child(id, "AssetInformation")? {
        Some(information) => Some(information),
        None => ctx.typed_children(id, ASSET_INFORMATION)?.into_iter().next(),
    };
    let asset_information = match information {
        Some(information) => {
            let kind = ctx.enumeration(
                information,
                "AssetKind",
                enums::asset_kind,
                "AssetInformation",
                "assetKind",
                &root,
                leaf,
            )?;
            let mut asset_information =
                AssetInformation::new(require(kind, "AssetInformation", "assetKind", &root, leaf)?);
            asset_information.global_asset_id = match ctx.text(information, "GlobalAssetId")? {
                Some(global_asset_id) => Some(global_asset_id),
                None => ctx
                    .opt_reference(information, "GlobalAssetId", &root, leaf)?
                    .map(|r| r.first_key().value.clone()),
            };
            asset_information.asset_type = ctx.text(information, "AssetType")?;
            asset_information
        }
        None => legacy_asset(ctx, id, &root, leaf)?,
    };

    let submodels = ctx
        .typed_children(id, SUBMODEL)?
        .into_iter()
        .map(|submodel| {
            let submodel_id = require(ctx.global_id(submodel)?, "Submodel", "id", &root, leaf)?;
            submodel_reference(&submodel_id, &root)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssetAdministrationShell {
        asset_information,
        derived_from: ctx.opt_reference(id, "DerivedFrom", &root, leaf)?,
        submodels,
        embedded_data_specifications: ctx.embedded_data_specifications(id, &root, leaf)?,
        identifiable,
    })
}

/// Asset information from a v2 asset component of the shell.
fn legacy_asset(
    ctx: &GraphContext<'_>,
    shell: ComponentId,
    root: &AncestorChain,
    leaf: Option<&str>,
) -> Result<AssetInformation, ReadError> {
    let asset = ctx.typed_children(shell, ASSET)?.into_iter().next();
    let asset = require(asset, "AssetAdministrationShell", "assetInformation", root, leaf)?;
    let kind = match ctx.enumeration(asset, "AssetKind", enums::asset_kind, "Asset", "kind", root, leaf)? {
        Some(kind) => Some(kind),
        None => ctx.enumeration(asset, "Kind", enums::asset_kind, "Asset", "kind", root, leaf)?,
    };
    let mut asset_information = AssetInformation::new(require(kind, "Asset", "kind", root, leaf)?);
    asset_information.global_asset_id = ctx.global_id(asset)?;
    Ok(asset_information)
}

fn submodel_of(ctx: &GraphContext<'_>, id: ComponentId) -> Result<Submodel, ReadError> {
    let identifiable = ctx.identifiable(id, ModelType::Submodel)?;
    let root = AncestorChain::root();
    let leaf = Some(identifiable.id.as_str());
    let chain = submodel_chain(ctx.options, &identifiable)?;

    let submodel = Submodel {
        semantic_id: ctx.opt_reference(id, "SemanticId", &root, leaf)?,
        qualifiers: ctx.qualifiers(id, &root, leaf)?,
        kind: ctx
            .enumeration(id, "Kind", enums::modelling_kind, "Submodel", "kind", &root, leaf)?
            .unwrap_or_default(),
        embedded_data_specifications: ctx.embedded_data_specifications(id, &root, leaf)?,
        submodel_elements: ctx.elements(id, &chain, false)?,
        identifiable,
    };
    tracing::debug!(
        id = %submodel.identifiable.id,
        elements = submodel.submodel_elements.len(),
        "Read component graph submodel"
    );
    Ok(submodel)
}
