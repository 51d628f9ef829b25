use std::collections::HashSet;

/// Follows a local `$ref` (and any `$ref` it lands on) to its final target.
pub(crate) fn resolve_ref<'a>(
    doc: &'a serde_json::Value,
    ref_str: &str,
) -> Result<&'a serde_json::Value, RefError> {
    let mut visited = HashSet::new();
    let mut current = ref_str.to_string();
    loop {
        // Only local refs: "#/..."
        if !current.starts_with('#') {
            return Err(RefError::ExternalRef(current));
        }
        if !visited.insert(current.clone()) {
            return Err(RefError::Cycle(current));
        }

        let target = doc
            .pointer(current.trim_start_matches('#'))
            .ok_or_else(|| RefError::NotFound(current.clone()))?;
        match target.get("$ref").and_then(|v| v.as_str()) {
            Some(next) => current = next.to_string(),
            None => return Ok(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    #[error("unsupported external $ref: {0}")]
    ExternalRef(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
}
