use std::collections::HashSet;

use super::reference::RefPath;
use super::spec::OpenApiSpec;
use crate::error::ResolveError;
use crate::transform::walk;

/// Check every `$ref` in `spec` against its components.
///
/// Returns one entry per distinct problem, in the order first met: component
/// pointers whose target key is missing, and pointers that leave the document.
/// Local pointers outside the component maps are not checked.
pub fn check_references(spec: &OpenApiSpec) -> Vec<ResolveError> {
    let components = spec.components.as_ref();
    let mut seen: HashSet<RefPath> = HashSet::new();
    let mut problems = Vec::new();

    walk::spec_refs(spec, &mut |ref_path: &RefPath| {
        if !seen.insert(ref_path.clone()) {
            return;
        }
        match ref_path {
            RefPath::Component(target) => {
                let found = components.is_some_and(|c| c.contains(target.kind, &target.name));
                if !found {
                    problems.push(ResolveError::RefTargetNotFound(target.to_string()));
                }
            }
            RefPath::Other(raw) if !ref_path.is_local() => {
                problems.push(ResolveError::ExternalRef(raw.clone()));
            }
            RefPath::Other(_) => {}
        }
    });

    problems
}
