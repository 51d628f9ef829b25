use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::synth::param::{declared_value, synthesize_param_with};
use crate::synth::ParamOverrides;
use crate::types::{Parameter, ParameterLocation, ParameterType};

/// Literal every remaining `{...}` path placeholder is replaced with.
pub const PATH_PLACEHOLDER: &str = "123";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("valid regex"));

/// Produces the concrete request URL for one GET operation.
///
/// The whole candidate URL is percent-decoded *before* placeholders are substituted, so
/// a template such as `/files/%7Bid%7D` becomes `/files/123`. The result never contains
/// `{` or `}`: after the single substitution pass any stray brace (empty `{}`,
/// unbalanced or nested braces) is dropped. Path parameters with an override, example
/// or `format: uuid` are filled with that value; every other placeholder gets `123`.
pub fn synthesize_url(
    base_host: &str,
    path_template: &str,
    parameters: &[Parameter],
    overrides: &ParamOverrides,
) -> String {
    synthesize_url_with(base_host, path_template, parameters, overrides, None)
}

/// [`synthesize_url`] with `int_value` standing in for every integer parameter that has
/// no override, example or uuid format.
pub fn synthesize_url_with(
    base_host: &str,
    path_template: &str,
    parameters: &[Parameter],
    overrides: &ParamOverrides,
    int_value: Option<&str>,
) -> String {
    let mut path = path_template.to_string();
    for p in parameters.iter().filter(|p| p.location == ParameterLocation::Path) {
        let value = declared_value(p, overrides).or(match p.ty {
            ParameterType::Integer => int_value,
            _ => None,
        });
        if let Some(v) = value {
            path = path.replace(&format!("{{{}}}", p.name), v);
        }
    }

    let candidate = format!(
        "{}{}{}",
        base_host.trim_end_matches('/'),
        path,
        build_query(path_template, parameters, overrides, int_value)
    );

    let decoded = urlencoding::decode_binary(candidate.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    let substituted = PLACEHOLDER_RE.replace_all(&decoded, PATH_PLACEHOLDER);
    substituted.chars().filter(|c| *c != '{' && *c != '}').collect()
}

fn build_query(
    path_template: &str,
    parameters: &[Parameter],
    overrides: &ParamOverrides,
    int_value: Option<&str>,
) -> String {
    let fragments: Vec<String> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
        .filter_map(|p| {
            let fragment = synthesize_param_with(p, overrides, int_value);
            if fragment.is_none() {
                debug!(path = %path_template, param = %p.name, "omitting query parameter of unsupported type");
            }
            fragment
        })
        .collect();

    if fragments.is_empty() {
        String::new()
    } else {
        format!("?{}", fragments.join("&"))
    }
}
