use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;

use crate::parse::media_type::Content;
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterOrRef;
use crate::parse::reference::{ComponentKind, ComponentRef, RefPath};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;

use super::walk;

type UsedRefs = HashSet<ComponentRef>;

/// Names removed from each component map by [`remove_unused_components`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: BTreeMap<ComponentKind, Vec<String>>,
}

impl PruneReport {
    pub fn removed_count(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }

    pub fn removed_of(&self, kind: ComponentKind) -> &[String] {
        self.removed.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Delete every component entry that is not reachable from the paths.
///
/// Reachability is seeded from the paths section with the direct pointer of
/// inline parameter schemas, request-body content schemas and response
/// content schemas, then extended with every pointer nested anywhere in the
/// schemas of `components.schemas`.
///
/// Parameters, headers, responses and request bodies referenced only through
/// their own `$ref` are not seeded, so they are removed as well.
pub fn remove_unused_components(spec: &mut OpenApiSpec) -> PruneReport {
    let used = collect_used_refs(spec);
    let mut report = PruneReport::default();

    let Some(components) = spec.components.as_mut() else {
        return report;
    };

    sweep(
        &mut components.schemas,
        ComponentKind::Schemas,
        &used,
        &mut report,
    );
    sweep(
        &mut components.parameters,
        ComponentKind::Parameters,
        &used,
        &mut report,
    );
    sweep(
        &mut components.headers,
        ComponentKind::Headers,
        &used,
        &mut report,
    );
    sweep(
        &mut components.responses,
        ComponentKind::Responses,
        &used,
        &mut report,
    );
    sweep(
        &mut components.request_bodies,
        ComponentKind::RequestBodies,
        &used,
        &mut report,
    );

    log::info!("pruned {} unused components", report.removed_count());
    report
}

fn sweep<V>(
    map: &mut IndexMap<String, V>,
    kind: ComponentKind,
    used: &UsedRefs,
    report: &mut PruneReport,
) {
    let mut removed = Vec::new();
    map.retain(|name, _| {
        let keep = used.contains(&ComponentRef::new(kind, name.as_str()));
        if !keep {
            removed.push(name.clone());
        }
        keep
    });
    if !removed.is_empty() {
        log::debug!("removing unused {kind}: {}", removed.join(", "));
        report.removed.insert(kind, removed);
    }
}

fn collect_used_refs(spec: &OpenApiSpec) -> UsedRefs {
    let mut used = UsedRefs::new();

    for item in spec.paths.values() {
        collect_from_parameters(&item.parameters, &mut used);
        for (_, operation) in item.operations() {
            collect_from_operation(operation, &mut used);
        }
    }

    if let Some(components) = &spec.components {
        for schema in components.schemas.values() {
            walk::schema_refs(schema, &mut |ref_path: &RefPath| mark(ref_path, &mut used));
        }
    }

    used
}

fn collect_from_operation(operation: &Operation, used: &mut UsedRefs) {
    collect_from_parameters(&operation.parameters, used);
    if let Some(RequestBodyOrRef::RequestBody(body)) = &operation.request_body {
        collect_from_content(&body.content, used);
    }
    for response in operation.responses.values() {
        if let ResponseOrRef::Response(response) = response {
            collect_from_content(&response.content, used);
        }
    }
}

fn collect_from_parameters(parameters: &[ParameterOrRef], used: &mut UsedRefs) {
    for parameter in parameters {
        if let ParameterOrRef::Parameter(p) = parameter {
            mark_direct(p.schema.as_ref(), used);
        }
    }
}

fn collect_from_content(content: &Content, used: &mut UsedRefs) {
    for media_type in content.values() {
        mark_direct(media_type.schema.as_ref(), used);
    }
}

/// Only a schema that is itself a reference node counts; inline schemas are
/// not descended into here.
fn mark_direct(schema: Option<&SchemaOrRef>, used: &mut UsedRefs) {
    if let Some(ref_path) = schema.and_then(SchemaOrRef::ref_path) {
        mark(ref_path, used);
    }
}

fn mark(ref_path: &RefPath, used: &mut UsedRefs) {
    if let Some(target) = ref_path.as_component() {
        used.insert(target.clone());
    }
}
