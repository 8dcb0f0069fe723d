//! Engine and loader settings.

use serde::{Deserialize, Serialize};

/// What a numeric comparison does when a cell is not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeMismatchPolicy {
    /// The row fails the predicate (`!=` counts it as unequal) and the query goes on
    #[default]
    Permissive,
    /// The query fails with `ExecutionError::TypeMismatch`
    Strict,
}

/// Settings applied by the executor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub type_mismatch: TypeMismatchPolicy,
}

impl EngineSettings {
    pub fn strict() -> Self {
        Self {
            type_mismatch: TypeMismatchPolicy::Strict,
        }
    }
}

/// Settings applied when reading delimited text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}
