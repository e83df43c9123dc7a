use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::header::HeaderOrRef;
use super::parameter::ParameterOrRef;
use super::reference::ComponentKind;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;

/// Components object holding reusable definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, serde_json::Value>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderOrRef>,

    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, serde_json::Value>,

    /// `links`, `callbacks`, `pathItems` and `x-*` keys. Merged, never
    /// rewritten or pruned.
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Components {
    /// Whether the map for `kind` holds an entry named `name`.
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        match kind {
            ComponentKind::Schemas => self.schemas.contains_key(name),
            ComponentKind::Parameters => self.parameters.contains_key(name),
            ComponentKind::Headers => self.headers.contains_key(name),
            ComponentKind::Responses => self.responses.contains_key(name),
            ComponentKind::RequestBodies => self.request_bodies.contains_key(name),
        }
    }

    /// Keys of the map for `kind`, in document order.
    pub fn names(&self, kind: ComponentKind) -> Vec<&str> {
        match kind {
            ComponentKind::Schemas => self.schemas.keys().map(String::as_str).collect(),
            ComponentKind::Parameters => self.parameters.keys().map(String::as_str).collect(),
            ComponentKind::Headers => self.headers.keys().map(String::as_str).collect(),
            ComponentKind::Responses => self.responses.keys().map(String::as_str).collect(),
            ComponentKind::RequestBodies => {
                self.request_bodies.keys().map(String::as_str).collect()
            }
        }
    }
}
