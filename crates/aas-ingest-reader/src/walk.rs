//! Discriminator dispatch shared by every reader's tree walk.
//!
//! A reader resolves the ordered source children of a container, maps each
//! to a [`Discriminator`], and hands both to [`collect_elements`]. Element
//! discriminators are dispatched to the reader's constructor; anything else
//! is skipped without error. At fragment scope [`classify_fragment`] turns
//! the same discriminators into errors instead.

use crate::error::ReadError;
use aas_ingest_model::{AncestorChain, ModelType, SubmodelElement};

/// What a source node turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discriminator {
    /// A submodel element variant
    Element(ModelType),
    /// A submodel
    Submodel,
    /// Only valid at environment scope (shells, assets, concept descriptions)
    EnvironmentScope(String),
    /// Not recognized by this reader
    Unknown(String),
}

impl Discriminator {
    /// Classify a current-schema `modelType` tag.
    #[must_use]
    pub fn from_model_type(tag: &str) -> Self {
        match ModelType::from_tag(tag) {
            Some(ModelType::Submodel) => Discriminator::Submodel,
            Some(t) if t.is_identifiable() => Discriminator::EnvironmentScope(tag.to_string()),
            Some(t) => Discriminator::Element(t),
            None => Discriminator::Unknown(tag.to_string()),
        }
    }

    /// Classify a legacy-schema model type name.
    ///
    /// `BasicEvent` is the legacy name of `BasicEventElement`; element types
    /// introduced after the legacy schema are not recognized.
    #[must_use]
    pub fn from_legacy_model_type(tag: &str) -> Self {
        match tag {
            "BasicEvent" => Discriminator::Element(ModelType::BasicEventElement),
            "Asset" | "View" | "ConceptDictionary" => {
                Discriminator::EnvironmentScope(tag.to_string())
            }
            "BasicEventElement" | "SubmodelElementList" => Discriminator::Unknown(tag.to_string()),
            _ => Discriminator::from_model_type(tag),
        }
    }
}

impl std::fmt::Display for Discriminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discriminator::Element(t) => write!(f, "{t}"),
            Discriminator::Submodel => write!(f, "Submodel"),
            Discriminator::EnvironmentScope(tag) | Discriminator::Unknown(tag) => {
                write!(f, "{tag}")
            }
        }
    }
}

/// What a root fragment may be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// A standalone submodel
    Submodel,
    /// A standalone element of the given variant
    Element(ModelType),
}

/// Map a root fragment's discriminator to the entry point that reads it.
///
/// # Errors
///
/// Environment-scope discriminators fail with [`ReadError::InvalidOperation`],
/// unknown ones with [`ReadError::UnsupportedVariant`].
pub fn classify_fragment(discriminator: Discriminator) -> Result<FragmentKind, ReadError> {
    match discriminator {
        Discriminator::Submodel => Ok(FragmentKind::Submodel),
        Discriminator::Element(t) => Ok(FragmentKind::Element(t)),
        Discriminator::EnvironmentScope(tag) => Err(ReadError::InvalidOperation(format!(
            "{tag} can only be read as part of an environment"
        ))),
        Discriminator::Unknown(tag) => Err(ReadError::UnsupportedVariant {
            discriminator: tag,
            path: AncestorChain::root().location(None),
        }),
    }
}

/// Dispatch an ordered child list of the container described by `chain`.
///
/// `build` receives the node, its position in the list, and its variant.
/// Nodes that are not elements are skipped and logged.
///
/// # Errors
///
/// Returns the first error raised by `build`.
pub fn collect_elements<N>(
    nodes: impl IntoIterator<Item = N>,
    chain: &AncestorChain,
    mut discriminate: impl FnMut(&N) -> Discriminator,
    mut build: impl FnMut(N, usize, ModelType) -> Result<SubmodelElement, ReadError>,
) -> Result<Vec<SubmodelElement>, ReadError> {
    let mut elements = Vec::new();
    for (index, node) in nodes.into_iter().enumerate() {
        match discriminate(&node) {
            Discriminator::Element(model_type) => {
                elements.push(build(node, index, model_type)?);
            }
            skipped => {
                tracing::debug!(
                    container = %chain,
                    index,
                    discriminator = %skipped,
                    "Skipping unsupported element"
                );
            }
        }
    }
    Ok(elements)
}
