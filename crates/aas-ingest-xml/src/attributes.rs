//! Attribute decoders for the v2 XML schema.

use crate::namespaces::{NamespaceTable, AAS, IEC};
use crate::query::{first, select};
use aas_ingest_model::{
    AdministrativeInformation, AncestorChain, DataSpecificationContent, DataSpecificationIec61360,
    EmbeddedDataSpecification, Identifiable, Key, LangString, LevelType, ModelType, Reference,
    ReferenceType, Referable,
};
use aas_ingest_reader::construct::{identifiable, reference, require, require_tag};
use aas_ingest_reader::{
    determine_reference_type, legacy_key_type, ReadError, ReaderOptions,
};
use roxmltree::Node;

/// State shared by one walk over a document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct XmlContext<'t> {
    pub(crate) namespaces: &'t NamespaceTable,
    pub(crate) options: &'t ReaderOptions,
}

impl<'t> XmlContext<'t> {
    pub(crate) fn select<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        path: &str,
    ) -> Result<Vec<Node<'a, 'input>>, ReadError> {
        select(node, path, self.namespaces)
    }

    pub(crate) fn first<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        path: &str,
    ) -> Result<Option<Node<'a, 'input>>, ReadError> {
        first(node, path, self.namespaces)
    }

    /// Trimmed, non-empty text of the first node at `path`.
    pub(crate) fn text<'a>(
        &self,
        node: Node<'a, '_>,
        path: &str,
    ) -> Result<Option<&'a str>, ReadError> {
        Ok(self.first(node, path)?.and_then(node_text))
    }

    /// Reference whose keys sit below `node` at `{prefix}:keys/{prefix}:key`.
    pub(crate) fn reference_of(
        &self,
        node: Node<'_, '_>,
        prefix: &str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Reference, ReadError> {
        let raw_keys = self.select(node, &format!("{prefix}:keys/{prefix}:key"))?;
        let keys = raw_keys
            .iter()
            .map(|key| {
                let key_type =
                    require_tag(key.attribute("type"), legacy_key_type, "Key", "type", chain, leaf)?;
                let value = require(node_text(*key), "Key", "value", chain, leaf)?;
                Ok(Key::new(key_type, value))
            })
            .collect::<Result<Vec<_>, ReadError>>()?;

        let local = raw_keys
            .first()
            .and_then(|key| key.attribute("local"))
            .and_then(|local| local.trim().parse::<bool>().ok());
        let reference_type = keys.first().map_or(ReferenceType::ModelReference, |first| {
            determine_reference_type(local, first.key_type)
        });
        reference(reference_type, keys, chain, leaf)
    }

    /// Optional reference at `path` (AAS namespace keys).
    pub(crate) fn opt_reference(
        &self,
        node: Node<'_, '_>,
        path: &str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Option<Reference>, ReadError> {
        self.first(node, path)?
            .map(|r| self.reference_of(r, AAS, chain, leaf))
            .transpose()
    }

    pub(crate) fn required_reference(
        &self,
        node: Node<'_, '_>,
        path: &'static str,
        owner: &'static str,
        field: &'static str,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Reference, ReadError> {
        let value = require(self.first(node, path)?, owner, field, chain, leaf)?;
        self.reference_of(value, AAS, chain, leaf)
    }

    /// `langString` children of the node at `path`; entries without a
    /// `lang` attribute or text are dropped.
    pub(crate) fn lang_strings(
        &self,
        node: Node<'_, '_>,
        path: &str,
    ) -> Result<Vec<LangString>, ReadError> {
        Ok(self
            .select(node, &format!("{path}/*"))?
            .into_iter()
            .filter(|n| n.tag_name().name() == "langString")
            .filter_map(|n| {
                let language = n.attribute("lang").map(str::trim).filter(|l| !l.is_empty())?;
                Some(LangString::new(language, node_text(n)?))
            })
            .collect())
    }

    pub(crate) fn apply_referable(
        &self,
        node: Node<'_, '_>,
        referable: &mut Referable,
    ) -> Result<(), ReadError> {
        referable.category = self.text(node, "aas:category")?.map(str::to_string);
        referable.description = self.lang_strings(node, "aas:description")?;
        Ok(())
    }

    pub(crate) fn identifiable(
        &self,
        node: Node<'_, '_>,
        model_type: ModelType,
    ) -> Result<Identifiable, ReadError> {
        let mut identifiable = identifiable(
            model_type,
            self.text(node, "aas:identification")?,
            self.text(node, "aas:idShort")?,
            &AncestorChain::root(),
        )?;
        self.apply_referable(node, &mut identifiable.referable)?;
        identifiable.administration = self
            .first(node, "aas:administration")?
            .map(|admin| {
                Ok::<_, ReadError>(AdministrativeInformation {
                    version: self.text(admin, "aas:version")?.map(str::to_string),
                    revision: self.text(admin, "aas:revision")?.map(str::to_string),
                })
            })
            .transpose()?;
        Ok(identifiable)
    }

    /// Qualifiers are a known gap of this reader.
    pub(crate) fn reject_qualifiers(
        &self,
        node: Node<'_, '_>,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<(), ReadError> {
        match self.first(node, "aas:qualifier/*")? {
            Some(_) => Err(ReadError::not_implemented("qualifiers", chain, leaf)),
            None => Ok(()),
        }
    }

    pub(crate) fn embedded_data_specifications(
        &self,
        node: Node<'_, '_>,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<Vec<EmbeddedDataSpecification>, ReadError> {
        self.select(node, "aas:embeddedDataSpecification")?
            .into_iter()
            .map(|eds| {
                let data_specification = self.required_reference(
                    eds,
                    "aas:dataSpecification",
                    "EmbeddedDataSpecification",
                    "dataSpecification",
                    chain,
                    leaf,
                )?;
                let content = require(
                    self.first(eds, "aas:dataSpecificationContent/aas:dataSpecificationIEC61360")?,
                    "EmbeddedDataSpecification",
                    "dataSpecificationContent",
                    chain,
                    leaf,
                )?;
                Ok(EmbeddedDataSpecification {
                    data_specification,
                    data_specification_content: self.iec61360(content, chain, leaf)?,
                })
            })
            .collect()
    }

    fn iec61360(
        &self,
        node: Node<'_, '_>,
        chain: &AncestorChain,
        leaf: Option<&str>,
    ) -> Result<DataSpecificationContent, ReadError> {
        if self.namespaces.uri(IEC).is_none() {
            return Err(ReadError::MalformedSource(format!(
                "IEC 61360 content without an IEC 61360 namespace at {}",
                chain.location(leaf)
            )));
        }
        if self.first(node, "IEC:valueList")?.is_some() {
            return Err(ReadError::not_implemented("IEC 61360 value lists", chain, leaf));
        }

        let preferred_name = self.lang_strings(node, "IEC:preferredName")?;
        if preferred_name.is_empty() {
            return Err(ReadError::missing(
                "DataSpecificationIec61360",
                "preferredName",
                chain,
                leaf,
            ));
        }

        let owned = |path: &str| -> Result<Option<String>, ReadError> {
            Ok(self.text(node, path)?.map(str::to_string))
        };
        let mut content = DataSpecificationIec61360::new(preferred_name);
        content.short_name = self.lang_strings(node, "IEC:shortName")?;
        content.unit = owned("IEC:unit")?;
        content.unit_id = self
            .first(node, "IEC:unitId")?
            .map(|unit_id| self.reference_of(unit_id, IEC, chain, leaf))
            .transpose()?;
        content.source_of_definition = owned("IEC:sourceOfDefinition")?;
        content.symbol = owned("IEC:symbol")?;
        content.data_type = owned("IEC:dataType")?;
        content.definition = self.lang_strings(node, "IEC:definition")?;
        content.value_format = owned("IEC:valueFormat")?;
        content.value = owned("IEC:value")?;

        let levels: Vec<_> = self
            .select(node, "IEC:levelType")?
            .into_iter()
            .filter_map(node_text)
            .collect();
        if !levels.is_empty() {
            let has = |level: &str| levels.iter().any(|l| l.eq_ignore_ascii_case(level));
            content.level_type = Some(LevelType {
                min: has("Min"),
                nom: has("Nom"),
                typ: has("Typ"),
                max: has("Max"),
            });
        }
        Ok(DataSpecificationContent::DataSpecificationIec61360(content))
    }
}

/// Trimmed, non-empty text content of `node`.
pub(crate) fn node_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aas_ingest_model::KeyType;
    use roxmltree::Document;

    const NS: &str = r#"xmlns:aas="http://www.admin-shell.io/aas/2/0" xmlns:IEC="http://www.admin-shell.io/IEC61360/2/0""#;

    fn with_doc(body: &str, check: impl FnOnce(XmlContext<'_>, Node<'_, '_>)) {
        let xml = format!("<aas:root {NS}>{body}</aas:root>");
        let doc = Document::parse(&xml).unwrap();
        let namespaces = NamespaceTable::discover(doc.root_element()).unwrap();
        let options = ReaderOptions::default();
        let ctx = XmlContext {
            namespaces: &namespaces,
            options: &options,
        };
        check(ctx, doc.root_element());
    }

    #[test]
    fn reference_from_key_attributes() {
        with_doc(
            r#"<aas:semanticId><aas:keys>
                <aas:key type="Asset" local="false" idType="IRI"> urn:asset </aas:key>
            </aas:keys></aas:semanticId>"#,
            |ctx, root| {
                let reference = ctx
                    .opt_reference(root, "aas:semanticId", &AncestorChain::root(), None)
                    .unwrap()
                    .unwrap();
                assert_eq!(reference.reference_type(), ReferenceType::ExternalReference);
                assert_eq!(reference.first_key().key_type, KeyType::GlobalReference);
                assert_eq!(reference.first_key().value, "urn:asset");
            },
        );
    }

    #[test]
    fn lang_strings_need_lang_and_text() {
        with_doc(
            r#"<aas:description>
                <aas:langString lang="en">Pump</aas:langString>
                <aas:langString>orphan</aas:langString>
                <aas:langString lang="de"></aas:langString>
            </aas:description>"#,
            |ctx, root| {
                let strings = ctx.lang_strings(root, "aas:description").unwrap();
                assert_eq!(strings, vec![LangString::new("en", "Pump")]);
            },
        );
    }

    #[test]
    fn qualifiers_are_not_implemented() {
        with_doc(
            r#"<aas:qualifier><aas:qualifiers><aas:type>x</aas:type></aas:qualifiers></aas:qualifier>"#,
            |ctx, root| {
                assert!(matches!(
                    ctx.reject_qualifiers(root, &AncestorChain::root(), None),
                    Err(ReadError::NotImplemented(_))
                ));
            },
        );
        with_doc("<aas:qualifier/>", |ctx, root| {
            assert!(ctx.reject_qualifiers(root, &AncestorChain::root(), None).is_ok());
        });
    }

    #[test]
    fn iec61360_content() {
        with_doc(
            r#"<aas:embeddedDataSpecification>
                <aas:dataSpecificationContent><aas:dataSpecificationIEC61360>
                    <IEC:preferredName><IEC:langString lang="en">Speed</IEC:langString></IEC:preferredName>
                    <IEC:unit>1/min</IEC:unit>
                    <IEC:levelType>Max</IEC:levelType>
                </aas:dataSpecificationIEC61360></aas:dataSpecificationContent>
                <aas:dataSpecification><aas:keys>
                    <aas:key type="GlobalReference" local="false">urn:iec</aas:key>
                </aas:keys></aas:dataSpecification>
            </aas:embeddedDataSpecification>"#,
            |ctx, root| {
                let eds = ctx
                    .embedded_data_specifications(root, &AncestorChain::root(), None)
                    .unwrap();
                let DataSpecificationContent::DataSpecificationIec61360(content) =
                    &eds[0].data_specification_content;
                assert_eq!(content.unit.as_deref(), Some("1/min"));
                assert!(content.level_type.unwrap().max);
            },
        );
    }

    #[test]
    fn iec61360_value_lists_are_not_implemented() {
        with_doc(
            r#"<aas:embeddedDataSpecification>
                <aas:dataSpecificationContent><aas:dataSpecificationIEC61360>
                    <IEC:preferredName><IEC:langString lang="en">Speed</IEC:langString></IEC:preferredName>
                    <IEC:valueList/>
                </aas:dataSpecificationIEC61360></aas:dataSpecificationContent>
                <aas:dataSpecification><aas:keys>
                    <aas:key type="GlobalReference" local="false">urn:iec</aas:key>
                </aas:keys></aas:dataSpecification>
            </aas:embeddedDataSpecification>"#,
            |ctx, root| {
                assert!(matches!(
                    ctx.embedded_data_specifications(root, &AncestorChain::root(), None),
                    Err(ReadError::NotImplemented(_))
                ));
            },
        );
    }
}
