use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::header::HeaderOrRef;
use super::media_type::Content;
use super::reference::RefPath;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderOrRef>,

    /// `links` and `x-*` keys.
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: RefPath,
        /// `summary`/`description` overrides next to `$ref`.
        #[serde(flatten)]
        extensions: IndexMap<String, serde_json::Value>,
    },
    Response(Response),
}
