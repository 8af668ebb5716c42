//! The reader contract shared by all source formats.

use crate::error::ReadError;
use aas_ingest_model::{
    Ancestor, AncestorChain, Environment, Referable, Submodel, SubmodelElement,
};

/// Default bound on the ancestor chain length.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options common to every reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum number of ancestors a node may have
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReaderOptions {
    /// Extend `chain` by `ancestor`, enforcing the depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::DepthLimitExceeded`] if the chain is already at
    /// the limit.
    pub fn descend(
        &self,
        chain: &AncestorChain,
        ancestor: Ancestor,
    ) -> Result<AncestorChain, ReadError> {
        if chain.depth() >= self.max_depth {
            return Err(ReadError::DepthLimitExceeded {
                limit: self.max_depth,
                path: chain.location(Some(&ancestor.id_short)),
            });
        }
        Ok(chain.child(ancestor))
    }
}

/// The result of reading a single fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A standalone submodel
    Submodel(Submodel),
    /// A standalone submodel element
    Element(SubmodelElement),
}

impl Fragment {
    /// Referable attributes of the fragment.
    #[must_use]
    pub fn referable(&self) -> &Referable {
        match self {
            Fragment::Submodel(s) => &s.identifiable.referable,
            Fragment::Element(e) => e.referable(),
        }
    }

    /// The submodel, if the fragment is one.
    #[must_use]
    pub fn into_submodel(self) -> Option<Submodel> {
        match self {
            Fragment::Submodel(s) => Some(s),
            Fragment::Element(_) => None,
        }
    }

    /// The element, if the fragment is one.
    #[must_use]
    pub fn into_element(self) -> Option<SubmodelElement> {
        match self {
            Fragment::Element(e) => Some(e),
            Fragment::Submodel(_) => None,
        }
    }
}

/// A reader translating source documents of type `S` into the canonical model.
///
/// Readers hold no mutable state; each call is an independent depth-first walk.
pub trait ModelReader<S: ?Sized> {
    /// Read a full environment: concept descriptions, then shells, then submodels.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; nothing partial is returned.
    fn read_environment(&self, source: &S) -> Result<Environment, ReadError>;

    /// Read one standalone submodel or submodel element.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::InvalidOperation`] for environment-scope
    /// fragments (shells, assets, concept descriptions) and
    /// [`ReadError::UnsupportedVariant`] for unknown discriminators.
    fn read(&self, fragment: &S) -> Result<Fragment, ReadError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use aas_ingest_model::ModelType;

    #[test]
    fn descend_within_limit() {
        let options = ReaderOptions { max_depth: 2 };
        let chain = options
            .descend(
                &AncestorChain::root(),
                Ancestor::identifiable(ModelType::Submodel, "urn:S1", "S1"),
            )
            .unwrap();
        let chain = options
            .descend(&chain, Ancestor::referable(ModelType::SubmodelElementCollection, "C"))
            .unwrap();
        assert_eq!(chain.depth(), 2);
    }

    #[test]
    fn descend_past_limit_fails() {
        let options = ReaderOptions { max_depth: 1 };
        let chain = AncestorChain::root()
            .child(Ancestor::identifiable(ModelType::Submodel, "urn:S1", "S1"));
        let err = options
            .descend(&chain, Ancestor::referable(ModelType::SubmodelElementCollection, "C"))
            .unwrap_err();
        assert_eq!(
            err,
            ReadError::DepthLimitExceeded {
                limit: 1,
                path: "urn:S1/C".to_string()
            }
        );
    }

    #[test]
    fn default_depth() {
        assert_eq!(ReaderOptions::default().max_depth, DEFAULT_MAX_DEPTH);
    }
}
