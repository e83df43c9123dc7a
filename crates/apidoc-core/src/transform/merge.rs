use std::fmt;

use indexmap::IndexMap;

use crate::parse::components::Components;
use crate::parse::spec::OpenApiSpec;

/// The section of a document a merge collision happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeSection {
    Schemas,
    Parameters,
    Headers,
    RequestBodies,
    Responses,
    Examples,
    SecuritySchemes,
    /// Keys of `components` other than the seven maps above.
    ComponentExtensions,
    Extensions,
    Paths,
}

impl fmt::Display for MergeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeSection::Schemas => "schemas",
            MergeSection::Parameters => "parameters",
            MergeSection::Headers => "headers",
            MergeSection::RequestBodies => "requestBodies",
            MergeSection::Responses => "responses",
            MergeSection::Examples => "examples",
            MergeSection::SecuritySchemes => "securitySchemes",
            MergeSection::ComponentExtensions => "components",
            MergeSection::Extensions => "extensions",
            MergeSection::Paths => "paths",
        };
        f.write_str(name)
    }
}

/// A key defined by a later part that replaced an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub section: MergeSection,
    pub key: String,
}

/// Outcome of [`merge_specs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub collisions: Vec<Collision>,
}

impl MergeReport {
    pub fn collisions_in(&self, section: MergeSection) -> impl Iterator<Item = &str> {
        self.collisions
            .iter()
            .filter(move |c| c.section == section)
            .map(|c| c.key.as_str())
    }
}

/// Union `parts`, in order, into `target`.
///
/// Tags are appended without de-duplication. Component maps, examples,
/// security schemes, extensions and paths are unioned key by key: a later
/// definition silently replaces an earlier one. Every replacement is recorded
/// in the returned report but never fails the merge.
pub fn merge_specs(target: &mut OpenApiSpec, parts: Vec<OpenApiSpec>) -> MergeReport {
    let mut report = MergeReport::default();
    let target_components = target.components.get_or_insert_with(Components::default);

    for part in parts {
        target.tags.extend(part.tags);

        if let Some(components) = part.components {
            merge_components(target_components, components, &mut report);
        }

        union_into(
            &mut target.extensions,
            part.extensions,
            MergeSection::Extensions,
            &mut report,
        );
        union_into(
            &mut target.paths,
            part.paths,
            MergeSection::Paths,
            &mut report,
        );
    }

    if !report.collisions.is_empty() {
        log::debug!(
            "merge replaced {} existing entries",
            report.collisions.len()
        );
    }
    report
}

fn merge_components(target: &mut Components, part: Components, report: &mut MergeReport) {
    union_into(
        &mut target.schemas,
        part.schemas,
        MergeSection::Schemas,
        report,
    );
    union_into(
        &mut target.parameters,
        part.parameters,
        MergeSection::Parameters,
        report,
    );
    union_into(
        &mut target.headers,
        part.headers,
        MergeSection::Headers,
        report,
    );
    union_into(
        &mut target.request_bodies,
        part.request_bodies,
        MergeSection::RequestBodies,
        report,
    );
    union_into(
        &mut target.responses,
        part.responses,
        MergeSection::Responses,
        report,
    );
    union_into(
        &mut target.examples,
        part.examples,
        MergeSection::Examples,
        report,
    );
    union_into(
        &mut target.security_schemes,
        part.security_schemes,
        MergeSection::SecuritySchemes,
        report,
    );
    union_into(
        &mut target.extensions,
        part.extensions,
        MergeSection::ComponentExtensions,
        report,
    );
}

fn union_into<V>(
    target: &mut IndexMap<String, V>,
    source: IndexMap<String, V>,
    section: MergeSection,
    report: &mut MergeReport,
) {
    for (key, value) in source {
        if target.contains_key(&key) {
            log::debug!("{section}: '{key}' replaced by a later document");
            report.collisions.push(Collision {
                section,
                key: key.clone(),
            });
        }
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

    fn doc(yaml: &str) -> OpenApiSpec {
        parse::from_yaml(yaml).unwrap()
    }

    const PRIMARY: &str = r#"
openapi: "3.0.3"
info: { title: Primary, version: "1" }
x-owner: platform
tags:
  - name: users
paths:
  /users:
    get:
      tags: [users]
      responses:
        "200": { description: ok }
"#;

    const ORDERS: &str = r#"
openapi: "3.0.3"
info: { title: Orders, version: "1" }
x-owner: orders-team
x-audience: public
tags:
  - name: orders
  - name: users
paths:
  /orders:
    get:
      tags: [orders]
      responses:
        "200": { description: ok }
components:
  schemas:
    Order:
      type: object
  examples:
    OrderExample:
      value: { id: 1 }
  securitySchemes:
    bearer:
      type: http
      scheme: bearer
"#;

    #[test]
    fn test_creates_missing_target_containers() {
        let mut target = doc(PRIMARY);
        assert!(target.components.is_none());
        let report = merge_specs(&mut target, vec![]);
        assert_eq!(target.components, Some(Components::default()));
        assert!(report.collisions.is_empty());
    }

    #[test]
    fn test_appends_tags_without_dedup() {
        let mut target = doc(PRIMARY);
        merge_specs(&mut target, vec![doc(ORDERS)]);
        let names: Vec<&str> = target.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders", "users"]);
    }

    #[test]
    fn test_unions_components_paths_and_extensions() {
        let mut target = doc(PRIMARY);
        let report = merge_specs(&mut target, vec![doc(ORDERS)]);
        let components = target.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("Order"));
        assert!(components.examples.contains_key("OrderExample"));
        assert!(components.security_schemes.contains_key("bearer"));
        assert_eq!(
            target.paths.keys().collect::<Vec<_>>(),
            vec!["/users", "/orders"]
        );
        assert_eq!(target.extensions["x-owner"], "orders-team");
        assert_eq!(target.extensions["x-audience"], "public");
        assert_eq!(
            report.collisions,
            vec![Collision {
                section: MergeSection::Extensions,
                key: "x-owner".to_string(),
            }]
        );
    }

    #[test]
    fn test_last_part_wins_on_collision() {
        let mut target = doc(PRIMARY);
        let mut first = doc(ORDERS);
        let mut second = doc(ORDERS);
        let components = first.components.as_mut().unwrap();
        components
            .schemas
            .insert("Address".into(), Schema::of_type(SchemaType::String).into());
        second
            .components
            .as_mut()
            .unwrap()
            .schemas
            .insert("Address".into(), Schema::of_type(SchemaType::Object).into());

        let report = merge_specs(&mut target, vec![first, second]);

        let schemas = &target.components.as_ref().unwrap().schemas;
        assert_eq!(
            schemas["Address"],
            SchemaOrRef::from(Schema::of_type(SchemaType::Object))
        );
        assert_eq!(
            report
                .collisions_in(MergeSection::Schemas)
                .collect::<Vec<_>>(),
            vec!["Order", "Address"]
        );
        assert_eq!(
            report.collisions_in(MergeSection::Paths).collect::<Vec<_>>(),
            vec!["/orders"]
        );
    }

    #[test]
    fn test_component_level_keys_are_unioned() {
        let mut target = doc(ORDERS);
        let part = doc(
            r#"
openapi: "3.0.3"
info: { title: Links, version: "1" }
components:
  links:
    GetUser:
      operationId: getUser
  x-internal: true
"#,
        );
        let mut later = part.clone();
        later
            .components
            .as_mut()
            .unwrap()
            .extensions
            .insert("x-internal".into(), serde_json::json!(false));

        let report = merge_specs(&mut target, vec![part, later]);

        let components = target.components.as_ref().unwrap();
        assert!(components.schemas.contains_key("Order"));
        assert_eq!(components.extensions["links"]["GetUser"]["operationId"], "getUser");
        assert_eq!(components.extensions["x-internal"], false);
        assert_eq!(
            report
                .collisions_in(MergeSection::ComponentExtensions)
                .collect::<Vec<_>>(),
            vec!["links", "x-internal"]
        );
    }

    #[test]
    fn test_part_without_components_contributes_paths_only() {
        let mut target = doc(ORDERS);
        let before = target.components.clone();
        merge_specs(&mut target, vec![doc(PRIMARY)]);
        assert_eq!(target.components, before);
        assert!(target.paths.contains_key("/users"));
    }
}
