use std::fmt;

use serde::{Deserialize, Serialize};

const COMPONENTS_PREFIX: &str = "#/components/";

/// The component maps a local `$ref` can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    Headers,
    Responses,
    RequestBodies,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Schemas,
        ComponentKind::Parameters,
        ComponentKind::Headers,
        ComponentKind::Responses,
        ComponentKind::RequestBodies,
    ];

    /// The section name as it appears in a pointer and in the `components` object.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::Headers => "headers",
            ComponentKind::Responses => "responses",
            ComponentKind::RequestBodies => "requestBodies",
        }
    }

    fn from_section(section: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == section)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pointer to an entry of one of the five component maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    pub kind: ComponentKind,
    pub name: String,
}

impl ComponentRef {
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.name.replace('~', "~0").replace('/', "~1");
        write!(f, "{COMPONENTS_PREFIX}{}/{escaped}", self.kind)
    }
}

/// Decode a JSON pointer segment. `None` when a `~` is not followed by `0`
/// or `1`.
fn unescape_segment(segment: &str) -> Option<String> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        match c {
            '~' => match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            },
            c => out.push(c),
        }
    }
    Some(out)
}

/// A `$ref` value, parsed once when the document is read.
///
/// Pointers of the form `#/components/<kind>/<name>` become
/// [`RefPath::Component`]; anything else (other files, URLs, local pointers
/// outside the component maps) is kept verbatim as [`RefPath::Other`] and is
/// never rewritten or collected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefPath {
    Component(ComponentRef),
    Other(String),
}

impl RefPath {
    pub fn component(kind: ComponentKind, name: impl Into<String>) -> Self {
        RefPath::Component(ComponentRef::new(kind, name))
    }

    pub fn as_component(&self) -> Option<&ComponentRef> {
        match self {
            RefPath::Component(target) => Some(target),
            RefPath::Other(_) => None,
        }
    }

    pub fn as_component_mut(&mut self) -> Option<&mut ComponentRef> {
        match self {
            RefPath::Component(target) => Some(target),
            RefPath::Other(_) => None,
        }
    }

    /// `true` for pointers into the current document (`#...`).
    pub fn is_local(&self) -> bool {
        match self {
            RefPath::Component(_) => true,
            RefPath::Other(raw) => raw.starts_with('#'),
        }
    }
}

impl From<String> for RefPath {
    fn from(raw: String) -> Self {
        let Some(stripped) = raw.strip_prefix(COMPONENTS_PREFIX) else {
            return RefPath::Other(raw);
        };
        // The name is the exact trailing segment; nested pointers stay opaque.
        let target = match stripped.split_once('/') {
            Some((section, name)) if !name.is_empty() && !name.contains('/') => {
                ComponentKind::from_section(section).zip(unescape_segment(name))
            }
            _ => None,
        };
        match target {
            Some((kind, name)) => RefPath::component(kind, name),
            None => RefPath::Other(raw),
        }
    }
}

impl From<&str> for RefPath {
    fn from(raw: &str) -> Self {
        RefPath::from(raw.to_string())
    }
}

impl From<RefPath> for String {
    fn from(path: RefPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for RefPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefPath::Component(target) => target.fmt(f),
            RefPath::Other(raw) => f.write_str(raw),
        }
    }
}
