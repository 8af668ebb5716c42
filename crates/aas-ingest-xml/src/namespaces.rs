//! Namespace discovery.
//!
//! v2 documents are published under several namespace URIs (`.../aas/2/0`,
//! `.../aas/1/0`, vendor mirrors), each bound to whatever prefix the
//! producer chose. The table binds the logical prefixes used by queries
//! to the URIs actually declared on the document's root element.

use aas_ingest_reader::ReadError;
use roxmltree::Node;

/// Logical prefix of the AAS namespace.
pub const AAS: &str = "aas";
/// Logical prefix of the IEC 61360 namespace.
pub const IEC: &str = "IEC";

/// Logical prefix to namespace URI bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: Vec<(String, String)>,
}

impl NamespaceTable {
    /// Discover the namespaces declared on `root`.
    ///
    /// The AAS namespace is the URI containing `/aas/`; the IEC 61360
    /// namespace is the URI containing `IEC61360`. Every declared prefix is
    /// also bound to its own URI.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::MalformedSource`] if no AAS namespace is declared.
    pub fn discover(root: Node<'_, '_>) -> Result<Self, ReadError> {
        let mut bindings = Vec::new();
        let mut aas = None;
        let mut iec = None;

        for namespace in root.namespaces() {
            let uri = namespace.uri();
            if aas.is_none() && uri.contains("/aas/") {
                aas = Some(uri.to_string());
            }
            if iec.is_none() && uri.contains("IEC61360") {
                iec = Some(uri.to_string());
            }
            if let Some(prefix) = namespace.name() {
                bindings.push((prefix.to_string(), uri.to_string()));
            }
        }

        let aas = aas.ok_or_else(|| {
            ReadError::MalformedSource("no AAS namespace declared on the root element".to_string())
        })?;
        tracing::debug!(aas = %aas, iec = ?iec, "Discovered namespaces");

        // Logical prefixes take precedence over declared ones.
        bindings.insert(0, (AAS.to_string(), aas));
        if let Some(iec) = iec {
            bindings.insert(1, (IEC.to_string(), iec));
        }
        Ok(Self { bindings })
    }

    /// URI bound to `prefix`.
    #[must_use]
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// URI of the AAS namespace.
    #[must_use]
    pub fn aas(&self) -> &str {
        self.uri(AAS).unwrap_or_default()
    }
}
