use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reference::RefPath;
use super::schema::SchemaOrRef;

/// A response or encoding header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: RefPath,
        /// `summary`/`description` overrides next to `$ref`.
        #[serde(flatten)]
        extensions: IndexMap<String, serde_json::Value>,
    },
    Header(Header),
}
