#![forbid(unsafe_code)]

pub mod enumerate;
pub mod error;
pub mod parser;
pub mod synth;
pub mod types;

pub use crate::enumerate::{enumerate, enumerate_with, EnumerateOptions};
pub use crate::error::ParseError;
pub use crate::parser::{parse_description_str, DocumentFormat, ParsedDescription};
pub use crate::synth::{synthesize_param, synthesize_url, ParamOverrides};
pub use crate::types::{ApiDescription, Operation, Parameter, ParameterLocation, ParameterType, PathItem, Task};
