use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DocumentError, ParseError};
use crate::parse::{self, ref_check, spec::OpenApiSpec};

/// Textual format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is read and written as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// How [`read_spec`] treats the parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Check every reference after parsing and log the ones that do not
    /// resolve inside the document.
    pub resolve: bool,
}

pub fn parse_str(content: &str, format: Format) -> Result<OpenApiSpec, ParseError> {
    match format {
        Format::Json => parse::from_json(content),
        Format::Yaml => parse::from_yaml(content),
    }
}

/// Read and parse a document from `path`.
pub fn read_spec(path: &Path, options: ReadOptions) -> Result<OpenApiSpec, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = parse_str(&content, Format::from_path(path)).map_err(|source| {
        DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    log::debug!(
        "read {} ({} paths, resolve={})",
        path.display(),
        spec.paths.len(),
        options.resolve
    );

    if options.resolve {
        for problem in ref_check::check_references(&spec) {
            log::warn!("{}: {problem}", path.display());
        }
    }
    Ok(spec)
}

pub fn to_string(spec: &OpenApiSpec, format: Format) -> Result<String, DocumentError> {
    let rendered = match format {
        Format::Json => parse::to_json(spec),
        Format::Yaml => parse::to_yaml(spec),
    };
    rendered.map_err(DocumentError::Serialize)
}

/// Serialize `spec` and write it to `path`, in the format its extension asks
/// for.
///
/// The text goes to a temporary file next to `path` that is renamed over it
/// once complete, so a failure never leaves a partial file behind.
pub fn write_spec(path: &Path, spec: &OpenApiSpec) -> Result<(), DocumentError> {
    let text = to_string(spec, Format::from_path(path))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(text.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
openapi: "3.0.3"
info:
  title: Minimal
  summary: Smallest useful document
  version: "1"
  x-logo:
    url: https://example.com/logo.png
  contact:
    name: API team
    x-slack: "#api"
  license:
    name: Apache 2.0
    identifier: Apache-2.0
x-tagGroups:
  - name: Health
    tags: [ping]
tags:
  - name: ping
    x-displayName: Ping
paths:
  /ping:
    get:
      x-internal-id: 7
      responses:
        "200":
          description: pong
          content:
            application/json:
              schema:
                type: object
                properties:
                  at:
                    type: string
                    format: date-time
                    maxLength: 40
components:
  links:
    Again:
      operationId: ping
  callbacks:
    onPing:
      "{$request.body#/url}":
        post:
          responses:
            "200":
              description: ok
  pathItems:
    Shared:
      get:
        responses:
          "200":
            description: ok
  x-internal: true
"##;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("api.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api")), Format::Yaml);
    }

    #[test]
    fn test_round_trip_keeps_unmodelled_keys() {
        let spec = parse_str(MINIMAL, Format::Yaml).unwrap();
        assert!(spec.info.extensions.contains_key("x-logo"));
        assert!(spec.tags[0].extensions.contains_key("x-displayName"));

        for format in [Format::Yaml, Format::Json] {
            let text = to_string(&spec, format).unwrap();
            for key in [
                "summary",
                "x-logo",
                "x-slack",
                "identifier",
                "x-tagGroups",
                "x-displayName",
                "x-internal-id",
                "maxLength",
                "links",
                "callbacks",
                "pathItems",
                "x-internal",
            ] {
                assert!(text.contains(key), "{format:?} lost {key}");
            }
            assert_eq!(parse_str(&text, format).unwrap(), spec);
        }
    }

    #[test]
    fn test_round_trip_keeps_keys_next_to_refs() {
        let yaml = r##"
openapi: "3.1.0"
info: { title: Siblings, version: "1" }
paths:
  /a/{id}:
    get:
      parameters:
        - $ref: "#/components/parameters/id"
          description: Overridden description
      responses:
        "200":
          $ref: "#/components/responses/Ok"
          summary: Plain success
        "201":
          description: created
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/A"
                description: The A
components:
  schemas:
    A: { type: object }
  parameters:
    id: { name: id, in: path, required: true, schema: { type: string } }
  responses:
    Ok: { description: ok }
"##;
        let spec = parse_str(yaml, Format::Yaml).unwrap();
        for format in [Format::Yaml, Format::Json] {
            let text = to_string(&spec, format).unwrap();
            assert!(text.contains("Overridden description"), "{format:?}");
            assert!(text.contains("Plain success"), "{format:?}");
            assert!(text.contains("The A"), "{format:?}");
            assert_eq!(parse_str(&text, format).unwrap(), spec);
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let spec = parse_str(MINIMAL, Format::Yaml).unwrap();

        write_spec(&path, &spec).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.trim_start().starts_with('{'));
        assert_eq!(read_spec(&path, ReadOptions { resolve: true }).unwrap(), spec);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_spec(&dir.path().join("nope.yaml"), ReadOptions::default()).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "openapi: \"2.0\"\ninfo: { title: t, version: \"1\" }\n").unwrap();
        let err = read_spec(&path, ReadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Parse {
                source: ParseError::UnsupportedVersion(_),
                ..
            }
        ));
    }
}
