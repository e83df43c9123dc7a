use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use apidoc_core::config::{self, ApidocConfig, CONFIG_FILE_NAME};
use apidoc_core::io::{self, ReadOptions};
use apidoc_core::pipeline;
use apidoc_core::transform;

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Prepare a single API specification for publication from multiple sources",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge several OpenAPI documents into one
    Merge(MergeArgs),

    /// Remove components that no path refers to from a single document
    Prune {
        /// Document to prune
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the pruned document (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a new apidoc configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct MergeArgs {
    /// Directory containing the specification files
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Specification files as <file>[#prefix]; the first one is the primary
    /// document, the prefix namespaces a file's component names
    #[arg(short = 's', long = "spec", num_args = 1..)]
    specs: Vec<String>,

    /// Output specification file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tags whose operations are removed from the merged-in documents
    #[arg(short = 't', long = "cut-off-tag", num_args = 1..)]
    cut_off_tags: Vec<String>,

    /// Remove components that no path refers to after merging
    #[arg(long)]
    prune: bool,

    /// Config file to read defaults from
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge(args) => cmd_merge(args),

        Commands::Prune { input, output } => cmd_prune(input, output),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apidoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the config file if present and let command-line flags override it.
fn resolve_config(args: MergeArgs) -> Result<ApidocConfig> {
    let mut cfg = config::load_config(&args.config)?.unwrap_or_default();

    if let Some(dir) = args.dir {
        cfg.dir = dir;
    }
    if !args.specs.is_empty() {
        cfg.specs = args.specs;
    }
    if args.output.is_some() {
        cfg.output = args.output;
    }
    if !args.cut_off_tags.is_empty() {
        cfg.cut_off_tags = args.cut_off_tags;
    }
    cfg.prune |= args.prune;
    Ok(cfg)
}

fn cmd_merge(args: MergeArgs) -> Result<()> {
    let plan = resolve_config(args)?.into_plan()?;
    log::debug!("merge plan: {plan:?}");

    let merged = pipeline::run(&plan)
        .with_context(|| format!("failed to produce {}", plan.output.display()))?;

    eprintln!("Wrote {}", plan.output.display());
    eprintln!("  Paths: {}", merged.paths.len());
    if let Some(ref components) = merged.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }
    eprintln!("  Tags: {}", merged.tags.len());
    Ok(())
}

fn cmd_prune(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut spec = io::read_spec(&input, ReadOptions { resolve: true })?;
    let report = transform::remove_unused_components(&mut spec);

    let output = output.unwrap_or(input);
    io::write_spec(&output, &spec)?;

    eprintln!(
        "Removed {} unused components, wrote {}",
        report.removed_count(),
        output.display()
    );
    for (kind, names) in &report.removed {
        eprintln!("  {}: {}", kind, names.join(", "));
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge_args(argv: &[&str]) -> MergeArgs {
        let mut full = vec!["apidoc", "merge"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Merge(args) => args,
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn test_merge_flags() {
        let args = merge_args(&[
            "-d",
            "specs",
            "-s",
            "main.yaml",
            "billing.yaml#Billing",
            "-o",
            "out.yaml",
            "-t",
            "internal",
            "beta",
            "--config",
            "does-not-exist.yaml",
        ]);
        let cfg = resolve_config(args).unwrap();
        assert_eq!(cfg.dir, PathBuf::from("specs"));
        assert_eq!(cfg.specs, vec!["main.yaml", "billing.yaml#Billing"]);
        assert_eq!(cfg.output, Some(PathBuf::from("out.yaml")));
        assert_eq!(cfg.cut_off_tags, vec!["internal", "beta"]);
        assert!(!cfg.prune);
    }

    #[test]
    fn test_single_spec_is_rejected() {
        let args = merge_args(&[
            "-s",
            "main.yaml",
            "-o",
            "out.yaml",
            "--config",
            "does-not-exist.yaml",
        ]);
        let err = resolve_config(args).unwrap().into_plan().unwrap_err();
        assert!(err.to_string().contains("at least two"));
    }
}
