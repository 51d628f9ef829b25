use crate::synth::ParamOverrides;
use crate::types::{Parameter, ParameterLocation, ParameterType};

pub const STRING_PLACEHOLDER: &str = "arthur";
pub const INTEGER_PLACEHOLDER: &str = "123";
pub const BOOLEAN_PLACEHOLDER: &str = "False";
/// Used for every parameter declared with `format: uuid`.
pub const UUID_PLACEHOLDER: &str = "11111111-1111-1111-1111-111111111111";

/// Values substituted into integer parameters when integer fuzzing is on.
pub const INT_FUZZ_VALUES: [u64; 32] = [
    1, 10, 100, 1000, 10000, 100000, 1000000, 10000000, //
    2, 20, 200, 2000, 20000, 200000, 2000000, 20000000, //
    5, 50, 500, 5000, 50000, 500000, 5000000, 50000000, //
    9, 90, 900, 9000, 90000, 900000, 9000000, 90000000,
];

/// Canned value for a declared type, or `None` when the type is not one we know how to
/// fill in.
pub fn placeholder_value(ty: ParameterType) -> Option<&'static str> {
    match ty {
        ParameterType::String => Some(STRING_PLACEHOLDER),
        ParameterType::Integer => Some(INTEGER_PLACEHOLDER),
        ParameterType::Boolean => Some(BOOLEAN_PLACEHOLDER),
        ParameterType::Other => None,
    }
}

/// Value the description or the caller pins for a parameter, ahead of any canned value:
/// an override for its name, then its declared example, then the fixed UUID for
/// `format: uuid`.
pub fn declared_value<'a>(param: &'a Parameter, overrides: &'a ParamOverrides) -> Option<&'a str> {
    overrides
        .get(&param.name)
        .or(param.example.as_deref())
        .or_else(|| {
            param
                .format
                .as_deref()
                .filter(|f| f.eq_ignore_ascii_case("uuid"))
                .map(|_| UUID_PLACEHOLDER)
        })
}

/// Final value for a parameter. `int_value` replaces the canned integer when integer
/// fuzzing is on.
pub fn param_value<'a>(
    param: &'a Parameter,
    overrides: &'a ParamOverrides,
    int_value: Option<&'a str>,
) -> Option<&'a str> {
    declared_value(param, overrides).or_else(|| match (param.ty, int_value) {
        (ParameterType::Integer, Some(v)) => Some(v),
        (ty, _) => placeholder_value(ty),
    })
}

/// True when an integer fuzz value would actually land in the URL for this parameter.
pub fn is_fuzzable(param: &Parameter, overrides: &ParamOverrides) -> bool {
    matches!(param.location, ParameterLocation::Path | ParameterLocation::Query)
        && param.ty == ParameterType::Integer
        && declared_value(param, overrides).is_none()
}

/// Builds the `name=value` query fragment for one parameter.
///
/// Returns `None` for an unknown or missing type with nothing declared. Callers drop such
/// parameters from the query string instead of emitting anything for them. An override
/// for the parameter name always wins, whatever the declared type.
pub fn synthesize_param(param: &Parameter, overrides: &ParamOverrides) -> Option<String> {
    synthesize_param_with(param, overrides, None)
}

pub fn synthesize_param_with(
    param: &Parameter,
    overrides: &ParamOverrides,
    int_value: Option<&str>,
) -> Option<String> {
    let value = param_value(param, overrides, int_value)?;
    Some(format!("{}={}", param.name, value))
}
