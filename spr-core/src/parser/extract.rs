use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::parser::refs::resolve_ref;
use crate::types::{ApiDescription, Operation, Parameter, ParameterLocation, ParameterType, PathItem};

const METHOD_KEYS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

pub(crate) fn description_from_value(doc: &Value) -> Result<ApiDescription, ParseError> {
    let root = doc
        .as_object()
        .ok_or_else(|| ParseError::Shape("document root must be a mapping".to_string()))?;

    let paths = match root.get("paths") {
        None | Some(Value::Null) => {
            warn!("description declares no paths");
            return Ok(ApiDescription::default());
        }
        Some(Value::Object(paths)) => paths,
        Some(_) => return Err(ParseError::Shape("`paths` must be a mapping".to_string())),
    };

    let mut out = Vec::with_capacity(paths.len());
    for (template, item) in paths {
        let Some(item_obj) = item.as_object() else {
            debug!(path = %template, "skipping path item that is not a mapping");
            continue;
        };

        let shared = item_obj
            .get("parameters")
            .map(|p| extract_params(doc, template, p))
            .unwrap_or_default();

        let mut operations = Vec::new();
        for (key, op) in item_obj {
            if !is_method_key(key) {
                continue;
            }
            let own = op
                .get("parameters")
                .map(|p| extract_params(doc, template, p))
                .unwrap_or_default();
            operations.push(Operation {
                method: key.clone(),
                parameters: merge_params(&shared, own),
            });
        }

        out.push(PathItem {
            template: template.clone(),
            operations,
        });
    }

    Ok(ApiDescription { paths: out })
}

fn is_method_key(key: &str) -> bool {
    METHOD_KEYS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// Operation-level parameters override path-level ones with the same name and location.
fn merge_params(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter(|s| !own.iter().any(|o| o.name == s.name && o.location == s.location))
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

fn extract_params(doc: &Value, path: &str, parameters: &Value) -> Vec<Parameter> {
    let Some(arr) = parameters.as_array() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(arr.len());
    for p in arr {
        let resolved = match p.get("$ref").and_then(|v| v.as_str()) {
            Some(r) => match resolve_ref(doc, r) {
                Ok(v) => v,
                Err(e) => {
                    warn!(path = %path, error = %e, "skipping parameter");
                    continue;
                }
            },
            None => p,
        };
        match parameter_from_value(doc, resolved) {
            Some(param) => out.push(param),
            None => debug!(path = %path, "skipping parameter without usable name/location"),
        }
    }
    out
}

fn parameter_from_value(doc: &Value, p: &Value) -> Option<Parameter> {
    let name = p.get("name").and_then(|v| v.as_str())?;
    let location = p
        .get("in")
        .and_then(|v| v.as_str())
        .and_then(ParameterLocation::from_str_opt)?;

    // OpenAPI 3 declares type and format under `schema`; Swagger 2 puts them on the parameter.
    let schema = p.get("schema").map(|schema| match schema.get("$ref").and_then(|v| v.as_str()) {
        Some(r) => resolve_ref(doc, r).unwrap_or(schema),
        None => schema,
    });

    let ty = ParameterType::from_type_name(declared(schema, p, "type").and_then(|v| v.as_str()));
    let mut param = Parameter::new(name, location, ty);
    param.format = declared(schema, p, "format")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    param.example = p
        .get("example")
        .or_else(|| schema.and_then(|s| s.get("example")))
        .and_then(scalar_text);
    Some(param)
}

fn declared<'v>(schema: Option<&'v Value>, p: &'v Value, key: &str) -> Option<&'v Value> {
    match schema {
        Some(schema) => schema.get(key),
        None => p.get(key),
    }
}

/// Text form of a scalar example. Arrays, objects and null have none.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
