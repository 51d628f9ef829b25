mod extract;
mod refs;

use crate::error::ParseError;
use crate::types::ApiDescription;

pub use refs::RefError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedDescription {
    pub description: ApiDescription,
    pub format: DocumentFormat,
}

/// Parses an OpenAPI / Swagger document and extracts its `paths` section.
///
/// With [`DocumentFormat::Auto`] the reported format is the one that actually parsed.
pub fn parse_description_str(input: &str, format: DocumentFormat) -> Result<ParsedDescription, ParseError> {
    let (raw, format) = match format {
        DocumentFormat::Json => (serde_json::from_str::<serde_json::Value>(input)?, format),
        DocumentFormat::Yaml => (parse_yaml(input)?, format),
        DocumentFormat::Auto => parse_auto(input)?,
    };
    let description = extract::description_from_value(&raw)?;
    Ok(ParsedDescription { description, format })
}

fn parse_yaml(input: &str) -> Result<serde_json::Value, ParseError> {
    let y = serde_yaml::from_str::<serde_yaml::Value>(input)?;
    serde_json::to_value(y).map_err(|e| ParseError::Shape(format!("YAML is not representable as JSON: {e}")))
}

fn parse_auto(input: &str) -> Result<(serde_json::Value, DocumentFormat), ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<serde_json::Value>(input) {
            Ok(v) => Ok((v, DocumentFormat::Json)),
            // flow-style YAML can look like JSON
            Err(e) => match parse_yaml(input) {
                Ok(v) => Ok((v, DocumentFormat::Yaml)),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match parse_yaml(input) {
        Ok(v) => Ok((v, DocumentFormat::Yaml)),
        Err(e) => match serde_json::from_str::<serde_json::Value>(input) {
            Ok(v) => Ok((v, DocumentFormat::Json)),
            Err(_) => Err(e),
        },
    }
}
