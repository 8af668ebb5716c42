//! A minimal path-query evaluator over element children.
//!
//! Supported syntax is a `/`-separated list of child steps, each either
//! `prefix:name` or `*` (any element child):
//!
//! ```text
//! aas:submodelElements/aas:submodelElement/*
//! ```
//!
//! Prefixes are resolved through a [`NamespaceTable`] before evaluation, so
//! a query is independent of the prefixes the document happens to use.

use crate::namespaces::NamespaceTable;
use aas_ingest_reader::ReadError;
use roxmltree::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'q> {
    Any,
    Named { uri: String, name: &'q str },
}

impl Step<'_> {
    fn matches(&self, node: Node<'_, '_>) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Step::Any => true,
            Step::Named { uri, name } => {
                let tag = node.tag_name();
                tag.name() == *name && tag.namespace() == Some(uri.as_str())
            }
        }
    }
}

/// A compiled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery<'q> {
    steps: Vec<Step<'q>>,
}

impl<'q> PathQuery<'q> {
    /// Compile `path` against `namespaces`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] for an empty step, a step
    /// without prefix, or an unbound prefix.
    pub fn compile(path: &'q str, namespaces: &NamespaceTable) -> Result<Self, ReadError> {
        let steps = path
            .split('/')
            .map(|step| {
                if step == "*" {
                    return Ok(Step::Any);
                }
                let (prefix, name) = step
                    .split_once(':')
                    .filter(|(p, n)| !p.is_empty() && !n.is_empty())
                    .ok_or_else(|| {
                        ReadError::MalformedSource(format!("invalid query step '{step}' in '{path}'"))
                    })?;
                let uri = namespaces.uri(prefix).ok_or_else(|| {
                    ReadError::MalformedSource(format!("unbound prefix '{prefix}' in '{path}'"))
                })?;
                Ok(Step::Named {
                    uri: uri.to_string(),
                    name,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        Ok(Self { steps })
    }

    /// All nodes matched from `context`, in document order.
    #[must_use]
    pub fn select<'a, 'input>(&self, context: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let mut current = vec![context];
        for step in &self.steps {
            current = current
                .into_iter()
                .flat_map(|node| node.children().filter(move |child| step.matches(*child)))
                .collect();
        }
        current
    }

    /// The first node matched from `context`.
    #[must_use]
    pub fn first<'a, 'input>(&self, context: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        self.select(context).into_iter().next()
    }
}

/// Compile and evaluate `path` from `context`.
///
/// # Errors
///
/// See [`PathQuery::compile`].
pub fn select<'a, 'input>(
    context: Node<'a, 'input>,
    path: &str,
    namespaces: &NamespaceTable,
) -> Result<Vec<Node<'a, 'input>>, ReadError> {
    Ok(PathQuery::compile(path, namespaces)?.select(context))
}

/// Compile and evaluate `path` from `context`, keeping the first match.
///
/// # Errors
///
/// See [`PathQuery::compile`].
pub fn first<'a, 'input>(
    context: Node<'a, 'input>,
    path: &str,
    namespaces: &NamespaceTable,
) -> Result<Option<Node<'a, 'input>>, ReadError> {
    Ok(PathQuery::compile(path, namespaces)?.first(context))
}
