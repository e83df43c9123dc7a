use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reference::RefPath;
use super::schema::SchemaOrRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// An inline parameter. Only `schema` can hold a component pointer; the
/// remaining keys (`style`, `explode`, `example`, ...) pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// A reference or inline parameter.
///
/// The parameter's own pointer (`Ref`) and the pointer of its embedded
/// schema are distinct and tracked independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: RefPath,
        /// `summary`/`description` overrides next to `$ref`.
        #[serde(flatten)]
        extensions: IndexMap<String, serde_json::Value>,
    },
    Parameter(Parameter),
}
