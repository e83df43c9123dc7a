use std::fs;
use std::path::Path;

use apidoc_core::config::ApidocConfig;
use apidoc_core::error::{ConfigError, DocumentError, PipelineError, TransformError};
use apidoc_core::io::{self, ReadOptions};
use apidoc_core::parse::reference::ComponentKind;
use apidoc_core::pipeline;

const STORE: &str = include_str!("fixtures/store.yaml");
const BILLING: &str = include_str!("fixtures/billing.yaml");
const CRM: &str = include_str!("fixtures/crm.json");

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("store.yaml"), STORE).unwrap();
    fs::write(dir.path().join("billing.yaml"), BILLING).unwrap();
    fs::write(dir.path().join("crm.json"), CRM).unwrap();
    dir
}

fn config(dir: &Path, specs: &[&str], output: &str) -> ApidocConfig {
    ApidocConfig {
        dir: dir.to_path_buf(),
        specs: specs.iter().map(|s| s.to_string()).collect(),
        output: Some(dir.join(output)),
        cut_off_tags: vec!["internal".to_string()],
        prune: false,
    }
}

fn staged_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("merged-spec"))
        .collect()
}

#[test]
fn run_writes_the_merged_document() {
    let dir = workspace();
    let plan = config(
        dir.path(),
        &["store.yaml", "billing.yaml#Billing", "crm.json"],
        "public/openapi.yaml",
    )
    .into_plan()
    .unwrap();
    fs::create_dir_all(dir.path().join("public")).unwrap();

    let merged = pipeline::run(&plan).unwrap();

    let written = io::read_spec(&plan.output, ReadOptions::default()).unwrap();
    assert_eq!(written, merged);
    assert_eq!(written.info.title, "Store API");

    let schemas = written
        .components
        .as_ref()
        .unwrap()
        .names(ComponentKind::Schemas);
    assert!(schemas.contains(&"Error"));
    assert!(schemas.contains(&"BillingError"));
    assert!(!written.paths.contains_key("/invoices/sync"));
    assert!(staged_files(dir.path()).is_empty());
}

#[test]
fn run_with_prune_drops_unreferenced_schemas() {
    let dir = workspace();
    let mut cfg = config(
        dir.path(),
        &["store.yaml", "billing.yaml#Billing", "crm.json"],
        "openapi.json",
    );
    cfg.prune = true;
    let plan = cfg.into_plan().unwrap();

    pipeline::run(&plan).unwrap();

    let text = fs::read_to_string(&plan.output).unwrap();
    assert!(text.trim_start().starts_with('{'));
    let written = io::read_spec(&plan.output, ReadOptions::default()).unwrap();
    let components = written.components.unwrap();
    assert!(!components.schemas.contains_key("Legacy"));
    assert!(!components.schemas.contains_key("BillingSyncRequest"));
    assert!(components.schemas.contains_key("BillingInvoiceLine"));
}

#[test]
fn too_few_specifications_fail_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &["missing.yaml"], "out.yaml");
    assert!(matches!(
        cfg.into_plan(),
        Err(ConfigError::TooFewSpecifications(1))
    ));
}

#[test]
fn missing_part_leaves_no_output() {
    let dir = workspace();
    let plan = config(dir.path(), &["store.yaml", "nope.yaml#Nope"], "out.yaml")
        .into_plan()
        .unwrap();

    let err = pipeline::run(&plan).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Document(DocumentError::Read { .. })
    ));
    assert!(!plan.output.exists());
}

#[test]
fn prefixing_a_part_without_components_fails() {
    let dir = workspace();
    fs::write(
        dir.path().join("bare.yaml"),
        "openapi: \"3.0.3\"\ninfo: { title: Bare, version: \"1\" }\npaths: {}\n",
    )
    .unwrap();
    let plan = config(dir.path(), &["store.yaml", "bare.yaml#Bare"], "out.yaml")
        .into_plan()
        .unwrap();

    let err = pipeline::run(&plan).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Transform {
            source: TransformError::MissingComponents,
            ..
        }
    ));
    assert!(err.to_string().contains("bare.yaml"));
    assert!(!plan.output.exists());
    assert!(staged_files(dir.path()).is_empty());
}

#[test]
fn part_without_prefix_or_components_still_merges() {
    let dir = workspace();
    fs::write(
        dir.path().join("ping.yaml"),
        r#"openapi: "3.0.3"
info: { title: Ping, version: "1" }
paths:
  /ping:
    get:
      responses:
        "204":
          description: pong
"#,
    )
    .unwrap();
    let plan = config(dir.path(), &["store.yaml", "ping.yaml"], "out.yaml")
        .into_plan()
        .unwrap();

    let merged = pipeline::assemble(&plan).unwrap();
    assert!(merged.paths.contains_key("/ping"));
    assert!(merged.paths.contains_key("/orders/{orderId}"));
    assert!(!plan.output.exists());
}
