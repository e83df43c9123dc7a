use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reference::RefPath;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// A schema node: either a pointer to a shared component or an inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: RefPath,
        /// Keywords next to `$ref`, allowed from 3.1 on. Kept as written.
        #[serde(flatten)]
        extensions: IndexMap<String, serde_json::Value>,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn reference(ref_path: impl Into<RefPath>) -> Self {
        SchemaOrRef::Ref {
            ref_path: ref_path.into(),
            extensions: IndexMap::new(),
        }
    }

    /// The pointer held by a reference node, `None` for inline schemas.
    pub fn ref_path(&self) -> Option<&RefPath> {
        match self {
            SchemaOrRef::Ref { ref_path, .. } => Some(ref_path),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

impl From<Schema> for SchemaOrRef {
    fn from(schema: Schema) -> Self {
        SchemaOrRef::Schema(Box::new(schema))
    }
}

/// Discriminator for polymorphic schemas.
///
/// Mapping values are either pointers or bare schema names; a bare name
/// parses as [`RefPath::Other`] and is left as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discriminator {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, RefPath>,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// An inline JSON Schema object.
///
/// Only the keywords that can hold child schemas are modelled; every other
/// keyword (constraints, enum, examples, `x-*`) is carried in `extensions`
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object-like
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Composed
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(TypeSet::Single(schema_type)),
            ..Self::default()
        }
    }

    /// An array schema whose elements are `items`.
    pub fn array_of(items: SchemaOrRef) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}
