use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::loader::DatasetLoader;
use super::schema::DatasetSchema;
use crate::config::DatasetConfig;
use crate::error::{LoadError, Result};

pub const SUNSPOTS: &str = "sunspots";

// ---------------------------------------------------------------------------
// DatasetDefinition
// ---------------------------------------------------------------------------

/// Everything needed to locate and label one bundled dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Folder under the data root.
    pub folder: PathBuf,
    /// CSV file inside `folder`.
    pub file: PathBuf,
    /// Labels assigned positionally to the CSV columns.
    pub columns: Vec<String>,
    pub schema: DatasetSchema,
}

impl DatasetDefinition {
    /// Monthly sunspot counts, 1749-1983.
    pub fn sunspots() -> Self {
        Self {
            folder: PathBuf::from("sunspots_data"),
            file: PathBuf::from("sunspots.csv"),
            columns: vec!["month".into(), "sunspots".into()],
            schema: DatasetSchema {
                name: SUNSPOTS.into(),
                description: "monthly count of the number of observed sunspots for just over 230 years (1749-1983)".into(),
                timestamp: "month".into(),
                targets: vec!["sunspots".into()],
                frequency: "M".into(),
                external_regressors: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    fn validate(&self) -> Result<()> {
        let name = self.name();
        if name.is_empty() {
            return Err(LoadError::InvalidCatalog("dataset with empty name".into()));
        }
        if self.columns.is_empty() {
            return Err(LoadError::InvalidCatalog(format!(
                "dataset '{name}' has no column labels"
            )));
        }
        for (i, label) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(label) {
                return Err(LoadError::InvalidCatalog(format!(
                    "dataset '{name}' repeats column label '{label}'"
                )));
            }
        }
        let referenced = std::iter::once(&self.schema.timestamp).chain(&self.schema.targets);
        for column in referenced {
            if !self.columns.contains(column) {
                return Err(LoadError::InvalidCatalog(format!(
                    "dataset '{name}' refers to unknown column '{column}'"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogFile {
    datasets: Vec<DatasetDefinition>,
}

/// Dataset definitions keyed by dataset name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    datasets: BTreeMap<String, DatasetDefinition>,
}

impl Catalog {
    /// Datasets shipped with the crate.
    pub fn builtin() -> Self {
        let sunspots = DatasetDefinition::sunspots();
        Self {
            datasets: BTreeMap::from([(sunspots.name().to_string(), sunspots)]),
        }
    }

    /// Build a catalog, rejecting invalid or duplicate definitions.
    pub fn from_definitions(definitions: Vec<DatasetDefinition>) -> Result<Self> {
        let mut catalog = Self::default();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Parse `{"datasets": [ ... ]}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::from_definitions(file.datasets)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        debug!(
            "read {} dataset definitions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Add one definition; names must be unique.
    pub fn insert(&mut self, definition: DatasetDefinition) -> Result<()> {
        definition.validate()?;
        let name = definition.name().to_string();
        if self.datasets.contains_key(&name) {
            return Err(LoadError::InvalidCatalog(format!(
                "dataset '{name}' defined more than once"
            )));
        }
        self.datasets.insert(name, definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DatasetDefinition> {
        self.datasets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Loader for `name` rooted at `config`, if the catalog knows it.
    pub fn loader(&self, name: &str, config: &DatasetConfig) -> Option<DatasetLoader> {
        self.get(name)
            .map(|definition| DatasetLoader::new(definition.clone(), config))
    }
}
