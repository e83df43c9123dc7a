use std::collections::HashSet;

use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::spec::OpenApiSpec;

/// What [`remove_tagged_operations`] took out of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilterReport {
    /// `METHOD path` for every removed operation.
    pub removed_operations: Vec<String>,
    pub removed_paths: Vec<String>,
    pub removed_tags: Vec<String>,
}

/// Remove every operation carrying at least one tag from `cut_off`, then
/// every path left without operations, then every top-level tag that no
/// surviving operation uses.
///
/// The last step also drops tags that were never cut off themselves but lost
/// all their operations, or never had any.
pub fn remove_tagged_operations(
    spec: &mut OpenApiSpec,
    cut_off: &HashSet<String>,
) -> TagFilterReport {
    let mut report = TagFilterReport::default();
    let mut empty_paths = Vec::new();

    for (path, item) in spec.paths.iter_mut() {
        for method in HttpMethod::ALL {
            let slot = item.slot_mut(method);
            if slot.as_ref().is_some_and(|op| is_cut_off(op, cut_off)) {
                *slot = None;
                log::debug!("removed {method} {path}");
                report.removed_operations.push(format!("{method} {path}"));
            }
        }
        if !item.has_operations() {
            empty_paths.push(path.clone());
        }
    }

    for path in &empty_paths {
        spec.paths.shift_remove(path);
    }
    report.removed_paths = empty_paths;

    let mut used_tags: HashSet<&str> = HashSet::new();
    for item in spec.paths.values() {
        for (_, operation) in item.operations() {
            used_tags.extend(operation.tags.iter().map(String::as_str));
        }
    }

    let mut removed_tags = Vec::new();
    spec.tags.retain(|tag| {
        let keep = used_tags.contains(tag.name.as_str());
        if !keep {
            removed_tags.push(tag.name.clone());
        }
        keep
    });
    report.removed_tags = removed_tags;

    report
}

fn is_cut_off(operation: &Operation, cut_off: &HashSet<String>) -> bool {
    operation.tags.iter().any(|tag| cut_off.contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SHOP: &str = r#"
openapi: "3.0.3"
info:
  title: Shop
  version: "1"
tags:
  - name: orders
  - name: internal
  - name: admin
  - name: legacy
paths:
  /orders:
    get:
      tags: [orders]
      responses:
        "200": { description: ok }
    post:
      tags: [orders, internal]
      responses:
        "201": { description: created }
  /orders/reindex:
    post:
      tags: [internal]
      responses:
        "202": { description: accepted }
  /health:
    get:
      responses:
        "200": { description: ok }
  /admin/users:
    delete:
      tags: [admin]
      responses:
        "204": { description: gone }
"#;

    fn cut(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_removes_operations_with_any_cut_tag() {
        let mut spec = parse::from_yaml(SHOP).unwrap();
        let report = remove_tagged_operations(&mut spec, &cut(&["internal"]));

        let orders = &spec.paths["/orders"];
        assert!(orders.get.is_some());
        assert!(orders.post.is_none(), "mixed-tag operation must be removed");
        assert_eq!(
            report.removed_operations,
            vec!["POST /orders", "POST /orders/reindex"]
        );
    }

    #[test]
    fn test_removes_paths_left_empty() {
        let mut spec = parse::from_yaml(SHOP).unwrap();
        let report = remove_tagged_operations(&mut spec, &cut(&["internal"]));

        assert!(!spec.paths.contains_key("/orders/reindex"));
        assert!(spec.paths.contains_key("/health"));
        assert_eq!(report.removed_paths, vec!["/orders/reindex"]);
        assert_eq!(
            spec.paths.keys().collect::<Vec<_>>(),
            vec!["/orders", "/health", "/admin/users"]
        );
    }

    #[test]
    fn test_removes_unreferenced_tags_even_if_not_cut() {
        let mut spec = parse::from_yaml(SHOP).unwrap();
        let report = remove_tagged_operations(&mut spec, &cut(&["internal"]));

        let names: Vec<&str> = spec.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "admin"]);
        assert_eq!(report.removed_tags, vec!["internal", "legacy"]);
    }

    #[test]
    fn test_untagged_operations_survive() {
        let mut spec = parse::from_yaml(SHOP).unwrap();
        remove_tagged_operations(&mut spec, &cut(&["orders", "internal", "admin"]));

        assert_eq!(spec.paths.keys().collect::<Vec<_>>(), vec!["/health"]);
        assert!(spec.tags.is_empty());
    }

    #[test]
    fn test_unknown_cut_tag_only_drops_unused_tags() {
        let mut spec = parse::from_yaml(SHOP).unwrap();
        let report = remove_tagged_operations(&mut spec, &cut(&["nope"]));

        assert!(report.removed_operations.is_empty());
        assert!(report.removed_paths.is_empty());
        assert_eq!(report.removed_tags, vec!["legacy"]);
        assert_eq!(spec.paths.len(), 4);
    }
}
