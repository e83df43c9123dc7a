use indexmap::IndexMap;

use crate::error::TransformError;
use crate::parse::components::Components;
use crate::parse::reference::RefPath;
use crate::parse::spec::OpenApiSpec;

use super::walk;

/// Namespace every component of `spec` with `prefix`.
///
/// Each key `k` of the schemas, parameters, headers, request bodies and
/// responses maps becomes `prefix + capitalize_first(k)`, and every component
/// pointer anywhere in the document is rewritten to the new key. Non-component
/// pointers are left alone. Map order is preserved.
pub fn add_prefix(spec: &mut OpenApiSpec, prefix: &str) -> Result<(), TransformError> {
    if prefix.is_empty() {
        return Err(TransformError::EmptyPrefix);
    }
    let components = spec
        .components
        .as_mut()
        .ok_or(TransformError::MissingComponents)?;

    let mut rewrite = |ref_path: &mut RefPath| {
        if let Some(target) = ref_path.as_component_mut() {
            target.name = prefixed_name(prefix, &target.name);
        }
    };

    rename_components(components, prefix, &mut rewrite);

    for item in spec.paths.values_mut() {
        walk::path_item_refs_mut(item, &mut rewrite);
    }

    Ok(())
}

fn rename_components<F: FnMut(&mut RefPath)>(components: &mut Components, prefix: &str, f: &mut F) {
    for schema in components.schemas.values_mut() {
        walk::schema_refs_mut(schema, f);
    }
    components.schemas = rename_keys(std::mem::take(&mut components.schemas), prefix);

    for parameter in components.parameters.values_mut() {
        walk::parameter_refs_mut(parameter, f);
    }
    components.parameters = rename_keys(std::mem::take(&mut components.parameters), prefix);

    for header in components.headers.values_mut() {
        walk::header_refs_mut(header, f);
    }
    components.headers = rename_keys(std::mem::take(&mut components.headers), prefix);

    for body in components.request_bodies.values_mut() {
        walk::request_body_refs_mut(body, f);
    }
    components.request_bodies =
        rename_keys(std::mem::take(&mut components.request_bodies), prefix);

    for response in components.responses.values_mut() {
        walk::response_refs_mut(response, f);
    }
    components.responses = rename_keys(std::mem::take(&mut components.responses), prefix);

    log::debug!(
        "prefixed {} schemas, {} parameters, {} headers, {} request bodies, {} responses with '{}'",
        components.schemas.len(),
        components.parameters.len(),
        components.headers.len(),
        components.request_bodies.len(),
        components.responses.len(),
        prefix
    );
}

fn rename_keys<V>(map: IndexMap<String, V>, prefix: &str) -> IndexMap<String, V> {
    map.into_iter()
        .map(|(name, value)| (prefixed_name(prefix, &name), value))
        .collect()
}

/// `prefix` followed by `name` with its first character upper-cased.
pub fn prefixed_name(prefix: &str, name: &str) -> String {
    format!("{prefix}{}", capitalize_first(name))
}

/// Title-case the first character only; the rest is kept as is.
///
/// A character whose upper case is more than one character (`ß`) is left
/// unchanged, and the Latin digraphs take their title-case form (`ǆ` becomes
/// `ǅ`, not `Ǆ`).
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => std::iter::once(title_case(first)).chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(c: char) -> char {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => 'ǅ',
        'Ǉ' | 'ǈ' | 'ǉ' => 'ǈ',
        'Ǌ' | 'ǋ' | 'ǌ' => 'ǋ',
        'Ǳ' | 'ǲ' | 'ǳ' => 'ǲ',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        }
    }
}
