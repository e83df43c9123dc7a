use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// A reference problem found while resolving a document. These are reported,
/// not raised: non-local targets are outside what the passes handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("non-local reference left unresolved: {0}")]
    ExternalRef(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("document has no components section to prefix")]
    MissingComponents,

    #[error("name prefix must not be empty")]
    EmptyPrefix,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] ParseError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("at least two specifications are required, got {0}")]
    TooFewSpecifications(usize),

    #[error("invalid specification entry '{0}', expected <file>[#<prefix>]")]
    InvalidSpecification(String),

    #[error("no output file configured")]
    MissingOutput,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("{path}: {source}")]
    Transform {
        path: String,
        source: TransformError,
    },

    #[error("failed to stage merged document in {}: {source}", dir.display())]
    Stage {
        dir: PathBuf,
        source: std::io::Error,
    },
}
