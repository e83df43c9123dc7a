use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::header::HeaderOrRef;
use super::schema::SchemaOrRef;

/// Encoding object for multipart requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderOrRef>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// A media type object inside a `content` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Encoding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, serde_json::Value>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// The `content` map of a request body or response, keyed by media type.
pub type Content = IndexMap<String, MediaType>;
