//! Ancestor chains threaded through a reader's tree walk.
//!
//! Every reader passes an immutable [`AncestorChain`] down each recursive
//! call; a container appends itself with [`AncestorChain::child`] before
//! dispatching its children. The chain is used to build an element's
//! `parent` reference, to address it inside its root submodel, and to
//! name its location in error messages.

use crate::kinds::{KeyType, ModelType, ReferenceType};
use crate::reference::{Key, Reference};

/// One container on the path from the root to the current node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ancestor {
    /// Discriminator of the container
    pub model_type: ModelType,
    /// Global id, for identifiables only
    pub id: Option<String>,
    /// idShort of the container
    pub id_short: String,
}

impl Ancestor {
    /// An identifiable ancestor (e.g. the root submodel).
    #[must_use]
    pub fn identifiable(
        model_type: ModelType,
        id: impl Into<String>,
        id_short: impl Into<String>,
    ) -> Self {
        Self {
            model_type,
            id: Some(id.into()),
            id_short: id_short.into(),
        }
    }

    /// A referable ancestor (a container element).
    #[must_use]
    pub fn referable(model_type: ModelType, id_short: impl Into<String>) -> Self {
        Self {
            model_type,
            id: None,
            id_short: id_short.into(),
        }
    }

    /// The key addressing this ancestor: its id if identifiable, else its idShort.
    #[must_use]
    pub fn key(&self) -> Key {
        let value = self.id.as_deref().unwrap_or(&self.id_short);
        Key::new(KeyType::from(self.model_type), value)
    }
}

/// Ordered ancestors from the root down to the direct parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AncestorChain {
    ancestors: Vec<Ancestor>,
}

impl AncestorChain {
    /// The empty chain of a top-level node.
    #[must_use]
    pub fn root() -> Self {
        Self {
            ancestors: Vec::new(),
        }
    }

    /// The chain seen by the children of `ancestor`.
    #[must_use]
    pub fn child(&self, ancestor: Ancestor) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(ancestor);
        Self { ancestors }
    }

    /// Number of ancestors.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Iterate from the root down.
    pub fn iter(&self) -> impl Iterator<Item = &Ancestor> {
        self.ancestors.iter()
    }

    /// Model reference with one key per ancestor, `None` for the empty chain.
    #[must_use]
    pub fn parent_reference(&self) -> Option<Reference> {
        let keys = self.ancestors.iter().map(Ancestor::key).collect();
        Reference::try_new(ReferenceType::ModelReference, keys).ok()
    }

    /// Id of the root ancestor if it is a submodel.
    #[must_use]
    pub fn root_submodel_id(&self) -> Option<&str> {
        self.ancestors
            .first()
            .filter(|a| a.model_type == ModelType::Submodel)
            .and_then(|a| a.id.as_deref())
    }

    /// idShorts below the root, followed by `leaf`.
    #[must_use]
    pub fn id_short_path<'a>(&'a self, leaf: &'a str) -> Vec<&'a str> {
        self.ancestors
            .iter()
            .skip(1)
            .map(|a| a.id_short.as_str())
            .chain(std::iter::once(leaf))
            .collect()
    }

    /// Human-readable location of a node below this chain.
    ///
    /// The root is named by its id when it has one.
    #[must_use]
    pub fn location(&self, leaf: Option<&str>) -> String {
        let mut segments: Vec<&str> = self
            .ancestors
            .iter()
            .enumerate()
            .map(|(i, a)| match (&a.id, i) {
                (Some(id), 0) => id.as_str(),
                _ => a.id_short.as_str(),
            })
            .collect();
        if let Some(leaf) = leaf {
            segments.push(leaf);
        }
        if segments.is_empty() {
            "<root>".to_string()
        } else {
            segments.join("/")
        }
    }
}

impl std::fmt::Display for AncestorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submodel_chain() -> AncestorChain {
        AncestorChain::root().child(Ancestor::identifiable(ModelType::Submodel, "S1", "Sm"))
    }

    #[test]
    fn parent_reference_has_one_key_per_ancestor() {
        let chain = submodel_chain().child(Ancestor::referable(
            ModelType::SubmodelElementCollection,
            "C",
        ));
        let parent = chain.parent_reference().unwrap();

        assert_eq!(parent.reference_type(), ReferenceType::ModelReference);
        assert_eq!(
            parent.keys(),
            &[
                Key::new(KeyType::Submodel, "S1"),
                Key::new(KeyType::SubmodelElementCollection, "C"),
            ]
        );
    }

    #[test]
    fn empty_chain_has_no_parent() {
        assert!(AncestorChain::root().parent_reference().is_none());
    }

    #[test]
    fn child_does_not_mutate_original() {
        let chain = submodel_chain();
        let nested = chain.child(Ancestor::referable(ModelType::Entity, "E"));
        assert_eq!(chain.depth(), 1);
        assert_eq!(nested.depth(), 2);
    }

    #[test]
    fn id_short_path_skips_root() {
        let chain = submodel_chain()
            .child(Ancestor::referable(ModelType::SubmodelElementCollection, "C"))
            .child(Ancestor::referable(ModelType::SubmodelElementList, "L"));
        assert_eq!(chain.id_short_path("P"), vec!["C", "L", "P"]);
        assert_eq!(chain.root_submodel_id(), Some("S1"));
    }

    #[test]
    fn root_submodel_id_requires_submodel_root() {
        let chain = AncestorChain::root().child(Ancestor::referable(ModelType::Entity, "E"));
        assert_eq!(chain.root_submodel_id(), None);
    }

    #[test]
    fn location_names_root_by_id() {
        let chain = submodel_chain().child(Ancestor::referable(
            ModelType::SubmodelElementCollection,
            "C",
        ));
        assert_eq!(chain.location(Some("P")), "S1/C/P");
        assert_eq!(AncestorChain::root().location(None), "<root>");
    }
}
