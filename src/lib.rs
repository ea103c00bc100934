//! Bundled time-series datasets exposed as typed tables.
//!
//! ```no_run
//! use rusty_sunspots::SunspotDataset;
//!
//! let (table, schema) = SunspotDataset::new().load_data()?;
//! assert_eq!(table.column_names(), vec!["month", "sunspots"]);
//! assert_eq!(schema.frequency, "M");
//! # Ok::<(), rusty_sunspots::LoadError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;

pub use config::DatasetConfig;
pub use data::catalog::{Catalog, DatasetDefinition};
pub use data::loader::DatasetLoader;
pub use data::model::{Column, DType, Table, Value};
pub use data::schema::DatasetSchema;
pub use data::sunspots::SunspotDataset;
pub use error::{LoadError, Result};
