//! Response format selection.

use serde::{Deserialize, Serialize};

/// Response formats the API can be asked for. The path extension selects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
}

impl Format {
    /// Path extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
