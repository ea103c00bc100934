use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory holding the datasets shipped with this crate.
pub const BUNDLED_DATA_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// Where dataset folders live on disk.
///
/// Loaders receive this explicitly instead of guessing their location from
/// the installed binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub data_root: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(BUNDLED_DATA_ROOT),
        }
    }
}

impl DatasetConfig {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_bundled_data() {
        let cfg = DatasetConfig::default();
        assert!(cfg.data_root().ends_with("data"));
        assert!(cfg.data_root().is_absolute());
    }

    #[test]
    fn missing_fields_fall_back_to_default() {
        let cfg: DatasetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DatasetConfig::default());

        let cfg: DatasetConfig = serde_json::from_str(r#"{"data_root": "/srv/datasets"}"#).unwrap();
        assert_eq!(cfg.data_root(), Path::new("/srv/datasets"));
    }
}
