use serde::{Deserialize, Serialize};

/// Descriptive metadata returned alongside a dataset's table.
///
/// Downstream consumers use it to find the timestamp column and the target
/// series without inspecting the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub name: String,
    pub description: String,
    /// Name of the column holding the period identifier.
    pub timestamp: String,
    /// Target column names, in order.
    pub targets: Vec<String>,
    /// Calendar frequency code, e.g. `"M"` for monthly.
    pub frequency: String,
    #[serde(default)]
    pub external_regressors: Vec<String>,
}
