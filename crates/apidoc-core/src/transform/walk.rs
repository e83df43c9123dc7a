//! Recursive traversal over every `$ref` a document can hold.
//!
//! Each walker visits pointers in a fixed order and never follows them, so
//! cyclic schema graphs terminate. The `_mut` variants let a pass rewrite
//! pointers in place; the shared variants let a pass collect them.

use crate::parse::components::Components;
use crate::parse::header::HeaderOrRef;
use crate::parse::media_type::Content;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::reference::RefPath;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef};
use crate::parse::spec::OpenApiSpec;

/// Visit the pointers held by a schema tree.
///
/// A reference node yields its pointer and stops; inline nodes recurse into
/// properties, a schema-valued `additionalProperties`, the three composition
/// lists, `not`, and array items, then yield the local pointers of a
/// discriminator mapping.
pub fn schema_refs<F: FnMut(&RefPath)>(schema: &SchemaOrRef, f: &mut F) {
    match schema {
        SchemaOrRef::Ref { ref_path, .. } => f(ref_path),
        SchemaOrRef::Schema(inline) => inline_schema_refs(inline, f),
    }
}

fn inline_schema_refs<F: FnMut(&RefPath)>(schema: &Schema, f: &mut F) {
    for child in schema.properties.values() {
        schema_refs(child, f);
    }
    if let Some(AdditionalProperties::Schema(child)) = &schema.additional_properties {
        schema_refs(child, f);
    }
    for child in schema
        .all_of
        .iter()
        .chain(&schema.one_of)
        .chain(&schema.any_of)
    {
        schema_refs(child, f);
    }
    if let Some(child) = &schema.not {
        schema_refs(child, f);
    }
    if let Some(child) = &schema.items {
        schema_refs(child, f);
    }
    if let Some(discriminator) = &schema.discriminator {
        for target in discriminator.mapping.values().filter(|t| t.is_local()) {
            f(target);
        }
    }
}

pub fn schema_refs_mut<F: FnMut(&mut RefPath)>(schema: &mut SchemaOrRef, f: &mut F) {
    match schema {
        SchemaOrRef::Ref { ref_path, .. } => f(ref_path),
        SchemaOrRef::Schema(inline) => inline_schema_refs_mut(inline, f),
    }
}

fn inline_schema_refs_mut<F: FnMut(&mut RefPath)>(schema: &mut Schema, f: &mut F) {
    for child in schema.properties.values_mut() {
        schema_refs_mut(child, f);
    }
    if let Some(AdditionalProperties::Schema(child)) = &mut schema.additional_properties {
        schema_refs_mut(child, f);
    }
    for child in schema
        .all_of
        .iter_mut()
        .chain(&mut schema.one_of)
        .chain(&mut schema.any_of)
    {
        schema_refs_mut(child, f);
    }
    if let Some(child) = &mut schema.not {
        schema_refs_mut(child, f);
    }
    if let Some(child) = &mut schema.items {
        schema_refs_mut(child, f);
    }
    if let Some(discriminator) = &mut schema.discriminator {
        for target in discriminator.mapping.values_mut().filter(|t| t.is_local()) {
            f(target);
        }
    }
}

// Shared walkers

pub fn parameter_refs<F: FnMut(&RefPath)>(parameter: &ParameterOrRef, f: &mut F) {
    match parameter {
        ParameterOrRef::Ref { ref_path, .. } => f(ref_path),
        ParameterOrRef::Parameter(p) => {
            if let Some(schema) = &p.schema {
                schema_refs(schema, f);
            }
        }
    }
}

pub fn header_refs<F: FnMut(&RefPath)>(header: &HeaderOrRef, f: &mut F) {
    match header {
        HeaderOrRef::Ref { ref_path, .. } => f(ref_path),
        HeaderOrRef::Header(h) => {
            if let Some(schema) = &h.schema {
                schema_refs(schema, f);
            }
        }
    }
}

pub fn content_refs<F: FnMut(&RefPath)>(content: &Content, f: &mut F) {
    for media_type in content.values() {
        if let Some(schema) = &media_type.schema {
            schema_refs(schema, f);
        }
        for encoding in media_type.encoding.values() {
            for header in encoding.headers.values() {
                header_refs(header, f);
            }
        }
    }
}

pub fn request_body_refs<F: FnMut(&RefPath)>(body: &RequestBodyOrRef, f: &mut F) {
    match body {
        RequestBodyOrRef::Ref { ref_path, .. } => f(ref_path),
        RequestBodyOrRef::RequestBody(b) => content_refs(&b.content, f),
    }
}

pub fn response_refs<F: FnMut(&RefPath)>(response: &ResponseOrRef, f: &mut F) {
    match response {
        ResponseOrRef::Ref { ref_path, .. } => f(ref_path),
        ResponseOrRef::Response(r) => {
            content_refs(&r.content, f);
            for header in r.headers.values() {
                header_refs(header, f);
            }
        }
    }
}

pub fn operation_refs<F: FnMut(&RefPath)>(operation: &Operation, f: &mut F) {
    for parameter in &operation.parameters {
        parameter_refs(parameter, f);
    }
    if let Some(body) = &operation.request_body {
        request_body_refs(body, f);
    }
    for response in operation.responses.values() {
        response_refs(response, f);
    }
}

pub fn path_item_refs<F: FnMut(&RefPath)>(item: &PathItem, f: &mut F) {
    for parameter in &item.parameters {
        parameter_refs(parameter, f);
    }
    for (_, operation) in item.operations() {
        operation_refs(operation, f);
    }
}

/// Visit pointers inside component entries: schemas, parameters, headers,
/// request bodies, then responses.
pub fn components_refs<F: FnMut(&RefPath)>(components: &Components, f: &mut F) {
    for schema in components.schemas.values() {
        schema_refs(schema, f);
    }
    for parameter in components.parameters.values() {
        parameter_refs(parameter, f);
    }
    for header in components.headers.values() {
        header_refs(header, f);
    }
    for body in components.request_bodies.values() {
        request_body_refs(body, f);
    }
    for response in components.responses.values() {
        response_refs(response, f);
    }
}

/// Visit every pointer in the document: components first, then paths.
pub fn spec_refs<F: FnMut(&RefPath)>(spec: &OpenApiSpec, f: &mut F) {
    if let Some(components) = &spec.components {
        components_refs(components, f);
    }
    for item in spec.paths.values() {
        path_item_refs(item, f);
    }
}

// Mutable walkers

pub fn parameter_refs_mut<F: FnMut(&mut RefPath)>(parameter: &mut ParameterOrRef, f: &mut F) {
    match parameter {
        ParameterOrRef::Ref { ref_path, .. } => f(ref_path),
        ParameterOrRef::Parameter(p) => {
            if let Some(schema) = &mut p.schema {
                schema_refs_mut(schema, f);
            }
        }
    }
}

pub fn header_refs_mut<F: FnMut(&mut RefPath)>(header: &mut HeaderOrRef, f: &mut F) {
    match header {
        HeaderOrRef::Ref { ref_path, .. } => f(ref_path),
        HeaderOrRef::Header(h) => {
            if let Some(schema) = &mut h.schema {
                schema_refs_mut(schema, f);
            }
        }
    }
}

pub fn content_refs_mut<F: FnMut(&mut RefPath)>(content: &mut Content, f: &mut F) {
    for media_type in content.values_mut() {
        if let Some(schema) = &mut media_type.schema {
            schema_refs_mut(schema, f);
        }
        for encoding in media_type.encoding.values_mut() {
            for header in encoding.headers.values_mut() {
                header_refs_mut(header, f);
            }
        }
    }
}

pub fn request_body_refs_mut<F: FnMut(&mut RefPath)>(body: &mut RequestBodyOrRef, f: &mut F) {
    match body {
        RequestBodyOrRef::Ref { ref_path, .. } => f(ref_path),
        RequestBodyOrRef::RequestBody(b) => content_refs_mut(&mut b.content, f),
    }
}

pub fn response_refs_mut<F: FnMut(&mut RefPath)>(response: &mut ResponseOrRef, f: &mut F) {
    match response {
        ResponseOrRef::Ref { ref_path, .. } => f(ref_path),
        ResponseOrRef::Response(r) => {
            content_refs_mut(&mut r.content, f);
            for header in r.headers.values_mut() {
                header_refs_mut(header, f);
            }
        }
    }
}

pub fn operation_refs_mut<F: FnMut(&mut RefPath)>(operation: &mut Operation, f: &mut F) {
    for parameter in &mut operation.parameters {
        parameter_refs_mut(parameter, f);
    }
    if let Some(body) = &mut operation.request_body {
        request_body_refs_mut(body, f);
    }
    for response in operation.responses.values_mut() {
        response_refs_mut(response, f);
    }
}

pub fn path_item_refs_mut<F: FnMut(&mut RefPath)>(item: &mut PathItem, f: &mut F) {
    for parameter in &mut item.parameters {
        parameter_refs_mut(parameter, f);
    }
    for operation in item.operations_mut() {
        operation_refs_mut(operation, f);
    }
}
