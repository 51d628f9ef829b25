//! Request synthesis: canned parameter values and concrete URLs.

mod overrides;
mod param;
mod url;

pub use overrides::ParamOverrides;
pub use param::{
    declared_value, is_fuzzable, param_value, placeholder_value, synthesize_param,
    synthesize_param_with, BOOLEAN_PLACEHOLDER, INTEGER_PLACEHOLDER, INT_FUZZ_VALUES,
    STRING_PLACEHOLDER, UUID_PLACEHOLDER,
};
pub use url::{synthesize_url, synthesize_url_with, PATH_PLACEHOLDER};
