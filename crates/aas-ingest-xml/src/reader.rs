//! Environment-level entry points of the v2 XML reader.

use crate::attributes::XmlContext;
use crate::elements::{discriminate, unwrap_element};
use crate::namespaces::{NamespaceTable, AAS};
use aas_ingest_model::{
    AncestorChain, AssetAdministrationShell, AssetInformation, AssetKind, ConceptDescription,
    Environment, ModelType, ModellingKind, Submodel,
};
use aas_ingest_reader::construct::{parse_tag, require, require_tag, submodel_chain};
use aas_ingest_reader::{
    classify_fragment, Fragment, FragmentKind, ModelReader, ReadError, ReaderOptions,
};
use roxmltree::{Document, Node};

/// Reader for AAS v2 XML documents.
///
/// Namespace prefixes are discovered from the declarations on the root
/// element, so documents using any prefix (or a default namespace) for the
/// AAS and IEC 61360 schemas are accepted.
#[derive(Debug, Clone, Default)]
pub struct LegacyXmlReader {
    options: ReaderOptions,
}

impl LegacyXmlReader {
    /// Create a reader with the given options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Parse `text` and read it as an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not well-formed
    /// XML, otherwise see [`ModelReader::read_environment`].
    pub fn read_environment_str(&self, text: &str) -> Result<Environment, ReadError> {
        self.read_environment(&parse(text)?)
    }

    /// Parse `text` and read it as a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if `text` is not well-formed
    /// XML, otherwise see [`ModelReader::read`].
    pub fn read_str(&self, text: &str) -> Result<Fragment, ReadError> {
        self.read(&parse(text)?)
    }
}

impl<'input> ModelReader<Document<'input>> for LegacyXmlReader {
    fn read_environment(&self, source: &Document<'input>) -> Result<Environment, ReadError> {
        let root_node = source.root_element();
        let namespaces = NamespaceTable::discover(root_node)?;
        let ctx = XmlContext {
            namespaces: &namespaces,
            options: &self.options,
        };
        let root = AncestorChain::root();

        let concept_descriptions = ctx
            .select(root_node, "aas:conceptDescriptions/aas:conceptDescription")?
            .into_iter()
            .map(|node| {
                let identifiable = ctx.identifiable(node, ModelType::ConceptDescription)?;
                let leaf = Some(identifiable.id.as_str());
                let is_case_of = ctx
                    .select(node, "aas:isCaseOf")?
                    .into_iter()
                    .map(|r| ctx.reference_of(r, AAS, &root, leaf))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ConceptDescription {
                    is_case_of,
                    embedded_data_specifications: ctx.embedded_data_specifications(node, &root, leaf)?,
                    identifiable,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;

        let assets = ctx.select(root_node, "aas:assets/aas:asset")?;
        let asset_administration_shells = ctx
            .select(root_node, "aas:assetAdministrationShells/aas:assetAdministrationShell")?
            .into_iter()
            .map(|shell| shell_of(&ctx, shell, &assets))
            .collect::<Result<Vec<_>, _>>()?;
        let submodels = ctx
            .select(root_node, "aas:submodels/aas:submodel")?
            .into_iter()
            .map(|submodel| submodel_of(&ctx, submodel))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            shells = asset_administration_shells.len(),
            submodels = submodels.len(),
            concept_descriptions = concept_descriptions.len(),
            "Read legacy XML environment"
        );
        Ok(Environment {
            asset_administration_shells,
            submodels,
            concept_descriptions,
        })
    }

    fn read(&self, fragment: &Document<'input>) -> Result<Fragment, ReadError> {
        let root_node = fragment.root_element();
        let namespaces = NamespaceTable::discover(root_node)?;
        let ctx = XmlContext {
            namespaces: &namespaces,
            options: &self.options,
        };
        let node = unwrap_element(root_node).ok_or_else(|| {
            ReadError::MalformedSource("empty submodelElement wrapper".to_string())
        })?;
        match classify_fragment(discriminate(&node))? {
            FragmentKind::Submodel => submodel_of(&ctx, node).map(Fragment::Submodel),
            FragmentKind::Element(model_type) => ctx
                .element(node, model_type, &AncestorChain::root())
                .map(Fragment::Element),
        }
    }
}

fn shell_of(
    ctx: &XmlContext<'_>,
    node: Node<'_, '_>,
    assets: &[Node<'_, '_>],
) -> Result<AssetAdministrationShell, ReadError> {
    let identifiable = ctx.identifiable(node, ModelType::AssetAdministrationShell)?;
    let root = AncestorChain::root();
    let leaf = Some(identifiable.id.as_str());

    let asset_ref = ctx.opt_reference(node, "aas:assetRef", &root, leaf)?;
    let mut referenced = None;
    if let Some(id) = asset_ref.as_ref().map(|r| r.first_key().value.as_str()) {
        for asset in assets {
            if ctx.text(*asset, "aas:identification")? == Some(id) {
                referenced = Some(*asset);
                break;
            }
        }
    }
    let asset = require(
        referenced.or_else(|| assets.first().copied()),
        "AssetAdministrationShell",
        "asset",
        &root,
        leaf,
    )?;

    let mut asset_information = AssetInformation::new(require_tag(
        ctx.text(asset, "aas:kind")?,
        AssetKind::from_tag,
        "Asset",
        "kind",
        &root,
        leaf,
    )?);
    asset_information.global_asset_id = ctx
        .text(asset, "aas:identification")?
        .map(str::to_string)
        .or_else(|| asset_ref.map(|r| r.first_key().value.clone()));

    let submodels = ctx
        .select(node, "aas:submodelRefs/aas:submodelRef")?
        .into_iter()
        .map(|r| ctx.reference_of(r, AAS, &root, leaf))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssetAdministrationShell {
        asset_information,
        derived_from: ctx.opt_reference(node, "aas:derivedFrom", &root, leaf)?,
        submodels,
        embedded_data_specifications: ctx.embedded_data_specifications(node, &root, leaf)?,
        identifiable,
    })
}

fn submodel_of(ctx: &XmlContext<'_>, node: Node<'_, '_>) -> Result<Submodel, ReadError> {
    let identifiable = ctx.identifiable(node, ModelType::Submodel)?;
    let root = AncestorChain::root();
    let leaf = Some(identifiable.id.as_str());
    let chain = submodel_chain(ctx.options, &identifiable)?;
    ctx.reject_qualifiers(node, &root, leaf)?;

    let submodel = Submodel {
        semantic_id: ctx.opt_reference(node, "aas:semanticId", &root, leaf)?,
        qualifiers: Vec::new(),
        kind: parse_tag(
            ctx.text(node, "aas:kind")?,
            ModellingKind::from_tag,
            "Submodel",
            "kind",
            &root,
            leaf,
        )?
        .unwrap_or_default(),
        embedded_data_specifications: ctx.embedded_data_specifications(node, &root, leaf)?,
        submodel_elements: ctx.elements(node, "aas:submodelElements", &chain)?,
        identifiable,
    };
    tracing::debug!(
        id = %submodel.identifiable.id,
        elements = submodel.submodel_elements.len(),
        "Read legacy XML submodel"
    );
    Ok(submodel)
}

fn parse(text: &str) -> Result<Document<'_>, ReadError> {
    Document::parse(text).map_err(|e| ReadError::MalformedSource(e.to_string()))
}
