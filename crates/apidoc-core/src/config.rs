use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.apidoc.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApidocConfig {
    /// Directory the specification file names are relative to.
    pub dir: PathBuf,
    /// `<file>[#<prefix>]` entries; the first one is the primary document.
    pub specs: Vec<String>,
    pub output: Option<PathBuf>,
    /// Operations carrying any of these tags are dropped from every
    /// non-primary document.
    pub cut_off_tags: Vec<String>,
    /// Remove unreferenced components from the merged result.
    pub prune: bool,
}

impl Default for ApidocConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            specs: Vec::new(),
            output: None,
            cut_off_tags: Vec::new(),
            prune: false,
        }
    }
}

/// One document to merge into the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSource {
    pub path: PathBuf,
    pub prefix: Option<String>,
}

impl SpecSource {
    /// Parse a `<file>[#<prefix>]` entry, resolving the file against `dir`.
    pub fn parse(entry: &str, dir: &Path) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidSpecification(entry.to_string());
        let (file, prefix) = match entry.split_once('#') {
            Some((file, prefix)) => {
                if prefix.is_empty() || prefix.contains('#') {
                    return Err(invalid());
                }
                (file, Some(prefix.to_string()))
            }
            None => (entry, None),
        };
        if file.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            path: dir.join(file),
            prefix,
        })
    }
}

/// A validated merge request: everything the pipeline needs, nothing optional
/// left to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// Where the temporary merged document is staged.
    pub work_dir: PathBuf,
    pub primary: PathBuf,
    pub parts: Vec<SpecSource>,
    pub cut_off_tags: HashSet<String>,
    pub output: PathBuf,
    pub prune: bool,
}

impl ApidocConfig {
    /// Validate the configuration and turn it into a [`MergePlan`].
    ///
    /// Fails before touching any file when fewer than two specifications are
    /// given.
    pub fn into_plan(self) -> Result<MergePlan, ConfigError> {
        if self.specs.len() < 2 {
            return Err(ConfigError::TooFewSpecifications(self.specs.len()));
        }
        let output = self.output.ok_or(ConfigError::MissingOutput)?;

        let mut entries = self.specs.iter();
        let primary = match entries.next() {
            // A prefix on the primary document has no effect.
            Some(entry) => SpecSource::parse(entry, &self.dir)?.path,
            None => return Err(ConfigError::TooFewSpecifications(0)),
        };
        let parts = entries
            .map(|entry| SpecSource::parse(entry, &self.dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MergePlan {
            work_dir: self.dir,
            primary,
            parts,
            cut_off_tags: self.cut_off_tags.into_iter().collect(),
            output,
            prune: self.prune,
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apidoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApidocConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ApidocConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apidoc configuration
dir: .                  # directory the spec file names are relative to
specs:                  # first entry is the primary document
  - openapi.yaml
  # - billing.yaml#Billing   # <file>#<prefix> namespaces the file's components
output: public/openapi.yaml

cut_off_tags: []        # operations tagged with any of these are dropped from merged documents
  # - internal

prune: false            # remove components no path refers to
"#
}
