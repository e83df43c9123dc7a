use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::Content;
use super::reference::RefPath;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub content: Content,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: RefPath,
        /// `summary`/`description` overrides next to `$ref`.
        #[serde(flatten)]
        extensions: IndexMap<String, serde_json::Value>,
    },
    RequestBody(RequestBody),
}
