use serde::{Deserialize, Serialize};

/// Configuration for the request gate pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Require the acting identity to own the record on edit as well as on
    /// delete. Off by default: edits are not ownership-checked.
    pub enforce_ownership_on_edit: bool,
}
