use std::path::Path;

use super::catalog::DatasetDefinition;
use super::loader::DatasetLoader;
use super::model::Table;
use super::schema::DatasetSchema;
use crate::config::DatasetConfig;
use crate::error::Result;

/// Monthly count of observed sunspots, 1749-1983.
///
/// Source: Andrews & Herzberg (1985), *Data: A Collection of Problems from
/// Many Fields for the Student and Research Worker*.
#[derive(Debug, Clone)]
pub struct SunspotDataset {
    loader: DatasetLoader,
}

impl Default for SunspotDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl SunspotDataset {
    /// Dataset backed by the crate's bundled data directory.
    pub fn new() -> Self {
        Self::with_config(&DatasetConfig::default())
    }

    pub fn with_config(config: &DatasetConfig) -> Self {
        Self {
            loader: DatasetLoader::new(DatasetDefinition::sunspots(), config),
        }
    }

    pub fn data_folder(&self) -> &Path {
        self.loader.data_folder()
    }

    pub fn data_file(&self) -> &Path {
        self.loader.data_file()
    }

    /// Returns the `month` / `sunspots` table and its metadata.
    pub fn load_data(&self) -> Result<(Table, DatasetSchema)> {
        self.loader.load_data()
    }
}
