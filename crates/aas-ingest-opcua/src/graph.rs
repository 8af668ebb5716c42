//! Component graph snapshot.
//!
//! An immutable, already-fetched view of an AAS address space: an arena of
//! components connected by `hasComponent`, `hasProperty` and `hasAddIn`
//! edges. Graphs are built programmatically with the builder methods or
//! deserialized from JSON:
//!
//! ```json
//! {
//!   "root": 0,
//!   "nodes": [
//!     {"browseName": "AASEnvironment", "typeDefinition": "AASEnvironmentType", "hasComponent": [1]},
//!     {"browseName": "1:Operational", "typeDefinition": "AASSubmodelType", "hasProperty": [2]},
//!     {"browseName": "Id", "typeDefinition": "PropertyType", "value": "urn:example:sm:ops"}
//!   ]
//! }
//! ```

use crate::types::{FOLDER, PROPERTY, REFERENCE_LIST};
use aas_ingest_reader::ReadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index of a component in its graph.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ComponentId(pub usize);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One component of the address space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Browse name, possibly carrying a namespace index (`1:Name`)
    pub browse_name: String,
    /// Type definition tag, e.g. `AASPropertyType`
    pub type_definition: String,
    /// Decoded value of a variable node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Component children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_component: Vec<ComponentId>,
    /// Property children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_property: Vec<ComponentId>,
    /// Add-in targets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_add_in: Vec<ComponentId>,
}

impl ComponentNode {
    /// Create a component without value or edges.
    #[must_use]
    pub fn new(browse_name: impl Into<String>, type_definition: impl Into<String>) -> Self {
        Self {
            browse_name: browse_name.into(),
            type_definition: type_definition.into(),
            value: None,
            has_component: Vec::new(),
            has_property: Vec::new(),
            has_add_in: Vec::new(),
        }
    }

    /// Set the decoded value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Browse name without its namespace index.
    #[must_use]
    pub fn name(&self) -> &str {
        strip_namespace_index(&self.browse_name)
    }

    /// Type definition without its namespace index.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        strip_namespace_index(&self.type_definition)
    }

    /// The value unless it is absent or `null`.
    #[must_use]
    pub fn present_value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }
}

/// Strip a leading `<digits>:` namespace index.
///
/// ```
/// use aas_ingest_opcua::graph::strip_namespace_index;
///
/// assert_eq!(strip_namespace_index("1:Nameplate"), "Nameplate");
/// assert_eq!(strip_namespace_index("urn:x"), "urn:x");
/// ```
#[must_use]
pub fn strip_namespace_index(name: &str) -> &str {
    match name.split_once(':') {
        Some((index, rest)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            rest
        }
        _ => name,
    }
}

/// An arena of components with a designated root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentGraph {
    /// Where reads start
    #[serde(default)]
    pub root: ComponentId,
    /// All components, indexed by [`ComponentId`]
    pub nodes: Vec<ComponentNode>,
}

impl ComponentGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a graph from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] with the parser's message.
    pub fn from_json(text: &str) -> Result<Self, ReadError> {
        serde_json::from_str(text).map_err(|e| ReadError::MalformedSource(e.to_string()))
    }

    /// Add a detached component.
    pub fn add(&mut self, node: ComponentNode) -> ComponentId {
        self.nodes.push(node);
        ComponentId(self.nodes.len() - 1)
    }

    /// Add a component and make it the root.
    pub fn add_root(&mut self, node: ComponentNode) -> ComponentId {
        let id = self.add(node);
        self.root = id;
        id
    }

    /// Add `node` as a `hasComponent` child of `parent`.
    pub fn add_component(&mut self, parent: ComponentId, node: ComponentNode) -> ComponentId {
        let id = self.add(node);
        self.link_component(parent, id);
        id
    }

    /// Add a `PropertyType` child named `name` holding `value`.
    pub fn add_property(
        &mut self,
        parent: ComponentId,
        name: &str,
        value: impl Into<Value>,
    ) -> ComponentId {
        let id = self.add(ComponentNode::new(name, PROPERTY).with_value(value));
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.has_property.push(id);
        }
        id
    }

    /// Add a `hasComponent` edge. Unknown parents are ignored.
    pub fn link_component(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.has_component.push(child);
        }
    }

    /// Add a `hasAddIn` edge. Unknown sources are ignored.
    pub fn link_add_in(&mut self, from: ComponentId, to: ComponentId) {
        if let Some(node) = self.nodes.get_mut(from.0) {
            node.has_add_in.push(to);
        }
    }

    /// The component at `id`, if any.
    #[must_use]
    pub fn node(&self, id: ComponentId) -> Option<&ComponentNode> {
        self.nodes.get(id.0)
    }

    /// The component at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] for a dangling id.
    pub fn resolve(&self, id: ComponentId) -> Result<&ComponentNode, ReadError> {
        self.node(id).ok_or_else(|| {
            ReadError::MalformedSource(format!(
                "component {id} does not exist (graph has {} components)",
                self.nodes.len()
            ))
        })
    }

    /// The first component that lists `id` as a `hasComponent` child.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes
            .iter()
            .position(|node| node.has_component.contains(&id))
            .map(ComponentId)
    }

    /// The property or component of `id` whose browse name is `name`.
    /// Properties are searched first.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] for dangling edges.
    pub fn child(&self, id: ComponentId, name: &str) -> Result<Option<ComponentId>, ReadError> {
        let node = self.resolve(id)?;
        for &child in node.has_property.iter().chain(&node.has_component) {
            if self.resolve(child)?.name() == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// The component children of `id`, looking through reference lists
    /// (each item's add-in targets) and folders (one level).
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] for dangling edges.
    pub fn flatten(&self, id: ComponentId) -> Result<Vec<ComponentId>, ReadError> {
        let mut flat = Vec::new();
        for &child in &self.resolve(id)?.has_component {
            let node = self.resolve(child)?;
            match node.type_tag() {
                REFERENCE_LIST => {
                    for &item in &node.has_component {
                        for &target in &self.resolve(item)?.has_add_in {
                            self.resolve(target)?;
                            flat.push(target);
                        }
                    }
                }
                FOLDER => {
                    for &entry in &node.has_component {
                        self.resolve(entry)?;
                        flat.push(entry);
                    }
                }
                _ => flat.push(child),
            }
        }
        Ok(flat)
    }
}
