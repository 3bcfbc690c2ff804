//! The refactoring plan handed over by the schema-splitting phase.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefactoringPlan {
    #[serde(default)]
    pub definitions: Vec<PlannedDefinition>,
}

/// A schema definition and the package its type is generated into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDefinition {
    /// Key of the definition in the API description, e.g. `io.k8s.api.core.v1.Pod`.
    pub id: String,
    /// `/`-separated package path below the project root, e.g. `api/core/v1`.
    pub package: String,
    pub type_name: String,
    #[serde(default)]
    pub extensions: Map<String, Value>,
}

impl RefactoringPlan {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
