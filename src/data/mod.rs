/// Data layer: table model, dataset definitions, loading and Arrow export.
///
/// Architecture:
/// ```text
///   DatasetConfig (data root)  +  DatasetDefinition (catalog)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  resolve paths, read CSV, relabel columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ (Table, DatasetSchema)│  columns + fixed metadata
///   └──────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ arrow_io  │  RecordBatch / Parquet
///   └──────────┘
/// ```

pub mod arrow_io;
pub mod catalog;
pub mod loader;
pub mod model;
pub mod schema;
pub mod sunspots;
