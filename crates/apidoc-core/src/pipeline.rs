use std::io::Write;

use tempfile::Builder;

use crate::config::{MergePlan, SpecSource};
use crate::error::PipelineError;
use crate::io::{self, Format, ReadOptions};
use crate::parse::spec::OpenApiSpec;
use crate::transform;

/// Read one non-primary document and prepare it for merging: namespace its
/// components when a prefix is given, then drop cut-off operations.
pub fn prepare_part(source: &SpecSource, plan: &MergePlan) -> Result<OpenApiSpec, PipelineError> {
    let mut spec = io::read_spec(&source.path, ReadOptions::default())?;

    if let Some(prefix) = &source.prefix {
        transform::add_prefix(&mut spec, prefix).map_err(|source_err| {
            PipelineError::Transform {
                path: source.path.display().to_string(),
                source: source_err,
            }
        })?;
    }

    if !plan.cut_off_tags.is_empty() {
        let report = transform::remove_tagged_operations(&mut spec, &plan.cut_off_tags);
        log::info!(
            "{}: removed {} operations, {} paths, {} tags",
            source.path.display(),
            report.removed_operations.len(),
            report.removed_paths.len(),
            report.removed_tags.len()
        );
    }

    Ok(spec)
}

/// Build the merged document described by `plan` without writing the output.
///
/// The merged document is staged as YAML in a temporary file inside
/// `plan.work_dir` and read back with reference checking enabled; the file is
/// removed when this returns. Pruning, when requested, runs on the re-read
/// document.
pub fn assemble(plan: &MergePlan) -> Result<OpenApiSpec, PipelineError> {
    let mut primary = io::read_spec(&plan.primary, ReadOptions::default())?;
    log::info!("primary document {}", plan.primary.display());

    let parts = plan
        .parts
        .iter()
        .map(|source| prepare_part(source, plan))
        .collect::<Result<Vec<_>, _>>()?;

    let report = transform::merge_specs(&mut primary, parts);
    log::info!(
        "merged {} documents ({} replaced entries)",
        plan.parts.len() + 1,
        report.collisions.len()
    );

    let mut merged = restage(&primary, plan)?;

    if plan.prune {
        transform::remove_unused_components(&mut merged);
    }
    Ok(merged)
}

/// Write `spec` to a temporary file and read it back resolved.
fn restage(spec: &OpenApiSpec, plan: &MergePlan) -> Result<OpenApiSpec, PipelineError> {
    let stage_error = |source| PipelineError::Stage {
        dir: plan.work_dir.clone(),
        source,
    };
    let text = io::to_string(spec, Format::Yaml)?;

    let mut staged = Builder::new()
        .prefix("merged-spec")
        .suffix(".yaml")
        .tempfile_in(&plan.work_dir)
        .map_err(stage_error)?;
    staged.write_all(text.as_bytes()).map_err(stage_error)?;
    staged.flush().map_err(stage_error)?;

    let resolved = io::read_spec(staged.path(), ReadOptions { resolve: true })?;
    staged.close().map_err(stage_error)?;
    Ok(resolved)
}

/// Assemble the merged document and write it to `plan.output`.
///
/// Nothing is written unless every step succeeds.
pub fn run(plan: &MergePlan) -> Result<OpenApiSpec, PipelineError> {
    let merged = assemble(plan)?;
    io::write_spec(&plan.output, &merged)?;
    log::info!("wrote {}", plan.output.display());
    Ok(merged)
}
