//! Closed tag sets of the canonical model.
//!
//! # Discriminators
//!
//! | Tag set | Used by |
//! |---------|---------|
//! | [`ModelType`] | `modelType` of every Referable |
//! | [`KeyType`] | `type` of a [`crate::Key`] |
//! | [`DataTypeDefXsd`] | `valueType` of Property, Range, Qualifier |
//! | [`AasSubmodelElements`] | `typeValueListElement` of a SubmodelElementList |

string_enum! {
    /// The `modelType` discriminator of a Referable.
    pub enum ModelType {
        /// An asset administration shell
        AssetAdministrationShell => "AssetAdministrationShell",
        /// A submodel
        Submodel => "Submodel",
        /// A concept description
        ConceptDescription => "ConceptDescription",
        /// A single-valued property
        Property => "Property",
        /// A multi-language property
        MultiLanguageProperty => "MultiLanguageProperty",
        /// A range with min/max values
        Range => "Range",
        /// A file reference
        File => "File",
        /// A blob (binary data)
        Blob => "Blob",
        /// A reference element
        ReferenceElement => "ReferenceElement",
        /// A relationship between two referables
        RelationshipElement => "RelationshipElement",
        /// An annotated relationship
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        /// An entity element
        Entity => "Entity",
        /// An operation element
        Operation => "Operation",
        /// A submodel element collection
        SubmodelElementCollection => "SubmodelElementCollection",
        /// An ordered list of elements
        SubmodelElementList => "SubmodelElementList",
        /// A basic event element
        BasicEventElement => "BasicEventElement",
        /// A capability element
        Capability => "Capability",
    }
}

impl ModelType {
    /// Whether nodes of this type carry a global `id`.
    #[must_use]
    pub fn is_identifiable(self) -> bool {
        matches!(
            self,
            ModelType::AssetAdministrationShell | ModelType::Submodel | ModelType::ConceptDescription
        )
    }

    /// Whether this is one of the submodel element variants.
    #[must_use]
    pub fn is_submodel_element(self) -> bool {
        !self.is_identifiable()
    }
}

string_enum! {
    /// The `type` of a reference key.
    pub enum KeyType {
        /// An annotated relationship element
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        /// An asset administration shell
        AssetAdministrationShell => "AssetAdministrationShell",
        /// A basic event element
        BasicEventElement => "BasicEventElement",
        /// A blob
        Blob => "Blob",
        /// A capability
        Capability => "Capability",
        /// A concept description
        ConceptDescription => "ConceptDescription",
        /// Any data element
        DataElement => "DataElement",
        /// An entity
        Entity => "Entity",
        /// Any event element
        EventElement => "EventElement",
        /// A file
        File => "File",
        /// A fragment inside an external resource
        FragmentReference => "FragmentReference",
        /// A globally identified external resource
        GlobalReference => "GlobalReference",
        /// Any identifiable
        Identifiable => "Identifiable",
        /// A multi-language property
        MultiLanguageProperty => "MultiLanguageProperty",
        /// An operation
        Operation => "Operation",
        /// A property
        Property => "Property",
        /// A range
        Range => "Range",
        /// Any referable
        Referable => "Referable",
        /// A reference element
        ReferenceElement => "ReferenceElement",
        /// A relationship element
        RelationshipElement => "RelationshipElement",
        /// A submodel
        Submodel => "Submodel",
        /// Any submodel element
        SubmodelElement => "SubmodelElement",
        /// A submodel element collection
        SubmodelElementCollection => "SubmodelElementCollection",
        /// A submodel element list
        SubmodelElementList => "SubmodelElementList",
    }
}

impl KeyType {
    /// Whether a key of this type points outside the repository.
    #[must_use]
    pub fn is_external(self) -> bool {
        matches!(self, KeyType::GlobalReference | KeyType::FragmentReference)
    }
}

impl From<ModelType> for KeyType {
    fn from(model_type: ModelType) -> Self {
        match model_type {
            ModelType::AssetAdministrationShell => KeyType::AssetAdministrationShell,
            ModelType::Submodel => KeyType::Submodel,
            ModelType::ConceptDescription => KeyType::ConceptDescription,
            ModelType::Property => KeyType::Property,
            ModelType::MultiLanguageProperty => KeyType::MultiLanguageProperty,
            ModelType::Range => KeyType::Range,
            ModelType::File => KeyType::File,
            ModelType::Blob => KeyType::Blob,
            ModelType::ReferenceElement => KeyType::ReferenceElement,
            ModelType::RelationshipElement => KeyType::RelationshipElement,
            ModelType::AnnotatedRelationshipElement => KeyType::AnnotatedRelationshipElement,
            ModelType::Entity => KeyType::Entity,
            ModelType::Operation => KeyType::Operation,
            ModelType::SubmodelElementCollection => KeyType::SubmodelElementCollection,
            ModelType::SubmodelElementList => KeyType::SubmodelElementList,
            ModelType::BasicEventElement => KeyType::BasicEventElement,
            ModelType::Capability => KeyType::Capability,
        }
    }
}

string_enum! {
    /// Whether a reference points inside or outside the repository.
    pub enum ReferenceType {
        /// Points to a model element of this repository
        ModelReference => "ModelReference",
        /// Points to an external resource
        ExternalReference => "ExternalReference",
    }
}

string_enum! {
    /// XML Schema value types allowed for `valueType`.
    pub enum DataTypeDefXsd {
        /// `xs:anyURI`
        AnyUri => "xs:anyURI",
        /// `xs:base64Binary`
        Base64Binary => "xs:base64Binary",
        /// `xs:boolean`
        Boolean => "xs:boolean",
        /// `xs:byte`
        Byte => "xs:byte",
        /// `xs:date`
        Date => "xs:date",
        /// `xs:dateTime`
        DateTime => "xs:dateTime",
        /// `xs:decimal`
        Decimal => "xs:decimal",
        /// `xs:double`
        Double => "xs:double",
        /// `xs:duration`
        Duration => "xs:duration",
        /// `xs:float`
        Float => "xs:float",
        /// `xs:gDay`
        GDay => "xs:gDay",
        /// `xs:gMonth`
        GMonth => "xs:gMonth",
        /// `xs:gMonthDay`
        GMonthDay => "xs:gMonthDay",
        /// `xs:gYear`
        GYear => "xs:gYear",
        /// `xs:gYearMonth`
        GYearMonth => "xs:gYearMonth",
        /// `xs:hexBinary`
        HexBinary => "xs:hexBinary",
        /// `xs:int`
        Int => "xs:int",
        /// `xs:integer`
        Integer => "xs:integer",
        /// `xs:long`
        Long => "xs:long",
        /// `xs:negativeInteger`
        NegativeInteger => "xs:negativeInteger",
        /// `xs:nonNegativeInteger`
        NonNegativeInteger => "xs:nonNegativeInteger",
        /// `xs:nonPositiveInteger`
        NonPositiveInteger => "xs:nonPositiveInteger",
        /// `xs:positiveInteger`
        PositiveInteger => "xs:positiveInteger",
        /// `xs:short`
        Short => "xs:short",
        /// `xs:string`
        String => "xs:string",
        /// `xs:time`
        Time => "xs:time",
        /// `xs:unsignedByte`
        UnsignedByte => "xs:unsignedByte",
        /// `xs:unsignedInt`
        UnsignedInt => "xs:unsignedInt",
        /// `xs:unsignedLong`
        UnsignedLong => "xs:unsignedLong",
        /// `xs:unsignedShort`
        UnsignedShort => "xs:unsignedShort",
    }
}

string_enum! {
    /// Kind of the asset an administration shell represents.
    pub enum AssetKind {
        /// A concrete asset instance
        Instance => "Instance",
        /// An asset type
        Type => "Type",
        /// Neither type nor instance
        NotApplicable => "NotApplicable",
    }
}

string_enum! {
    /// Whether a submodel is a template or an instance.
    pub enum ModellingKind {
        /// A concrete submodel
        Instance => "Instance",
        /// A submodel template
        Template => "Template",
    }
}

impl Default for ModellingKind {
    fn default() -> Self {
        ModellingKind::Instance
    }
}

impl ModellingKind {
    /// `true` for the default kind, which is omitted on serialization.
    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn is_instance(&self) -> bool {
        *self == ModellingKind::Instance
    }
}

string_enum! {
    /// Management mode of an entity.
    pub enum EntityType {
        /// Entity without its own administration shell
        CoManagedEntity => "CoManagedEntity",
        /// Entity with its own administration shell
        SelfManagedEntity => "SelfManagedEntity",
    }
}

string_enum! {
    /// Direction of a basic event element.
    pub enum Direction {
        /// Events flow into the element
        Input => "input",
        /// Events flow out of the element
        Output => "output",
    }
}

string_enum! {
    /// Whether a basic event element is emitting events.
    pub enum StateOfEvent {
        /// Emitting
        On => "on",
        /// Not emitting
        Off => "off",
    }
}

string_enum! {
    /// Kind of a qualifier.
    pub enum QualifierKind {
        /// Qualifies the value of the element
        ValueQualifier => "ValueQualifier",
        /// Qualifies the semantic definition
        ConceptQualifier => "ConceptQualifier",
        /// Qualifies the template
        TemplateQualifier => "TemplateQualifier",
    }
}

string_enum! {
    /// Admissible `typeValueListElement` values of a SubmodelElementList.
    pub enum AasSubmodelElements {
        /// Annotated relationship elements
        AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
        /// Basic event elements
        BasicEventElement => "BasicEventElement",
        /// Blobs
        Blob => "Blob",
        /// Capabilities
        Capability => "Capability",
        /// Any data element
        DataElement => "DataElement",
        /// Entities
        Entity => "Entity",
        /// Any event element
        EventElement => "EventElement",
        /// Files
        File => "File",
        /// Multi-language properties
        MultiLanguageProperty => "MultiLanguageProperty",
        /// Operations
        Operation => "Operation",
        /// Properties
        Property => "Property",
        /// Ranges
        Range => "Range",
        /// Reference elements
        ReferenceElement => "ReferenceElement",
        /// Relationship elements
        RelationshipElement => "RelationshipElement",
        /// Any submodel element
        SubmodelElement => "SubmodelElement",
        /// Collections
        SubmodelElementCollection => "SubmodelElementCollection",
        /// Lists
        SubmodelElementList => "SubmodelElementList",
    }
}
