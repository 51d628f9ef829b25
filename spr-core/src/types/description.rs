use crate::types::Parameter;

/// In-memory view of the `paths` section of an API description.
///
/// Paths and the operations under each path keep the order in which they appear in the
/// source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiDescription {
    pub paths: Vec<PathItem>,
}

impl ApiDescription {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn operation_count(&self) -> usize {
        self.paths.iter().map(|p| p.operations.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathItem {
    /// Path template as declared, e.g. `/users/{id}`.
    pub template: String,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Operation {
    /// Method key as it appears in the document (usually lowercase).
    pub method: String,
    /// Effective parameters: path-item level first, then operation level.
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("get")
    }
}
