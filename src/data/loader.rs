use std::ffi::OsString;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

use log::debug;

use super::catalog::DatasetDefinition;
use super::model::{Column, Table};
use super::schema::DatasetSchema;
use crate::config::DatasetConfig;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Drop `.` components and fold `..` into their parent without touching disk.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Absolute, symlink-free form of `path`.
///
/// Existing paths are canonicalized. For a path that does not exist yet the
/// deepest existing ancestor is canonicalized and the remaining components
/// are appended, so resolution itself never fails.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let absolute = normalize_lexically(
        &std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    );

    let mut existing = absolute.as_path();
    let mut tail: Vec<OsString> = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return tail.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_owned());
                existing = parent;
            }
            _ => break,
        }
    }
    absolute
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

/// Read a headed CSV file and relabel its columns positionally.
///
/// The header row is consumed but its content is ignored. A header whose
/// width differs from `labels` is a shape mismatch; ragged data rows are
/// reported by the CSV reader.
pub fn read_labeled_csv<S: AsRef<str>>(path: &Path, labels: &[S]) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let width = reader.headers()?.len();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];

    for result in reader.records() {
        let record = result?;
        for (col, value) in cells.iter_mut().zip(record.iter()) {
            col.push(value.to_string());
        }
    }

    let columns = cells
        .iter()
        .enumerate()
        .map(|(i, raw)| Column::from_raw(i.to_string(), raw))
        .collect();
    let mut table = Table::new(columns)?;
    table.rename_columns(labels)?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// DatasetLoader
// ---------------------------------------------------------------------------

/// Loads one dataset described by a [`DatasetDefinition`].
///
/// Paths are resolved once, at construction; nothing is read until
/// [`DatasetLoader::load_data`] is called.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    definition: DatasetDefinition,
    data_folder: PathBuf,
    data_file: PathBuf,
}

impl DatasetLoader {
    pub fn new(definition: DatasetDefinition, config: &DatasetConfig) -> Self {
        let data_folder = resolve_path(&config.data_root().join(&definition.folder));
        let data_file = resolve_path(&data_folder.join(&definition.file));
        debug!(
            "dataset '{}' resolved to {}",
            definition.schema.name,
            data_file.display()
        );
        Self {
            definition,
            data_folder,
            data_file,
        }
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn definition(&self) -> &DatasetDefinition {
        &self.definition
    }

    /// Read the data file and pair it with the dataset's metadata.
    ///
    /// The metadata comes from the definition, never from the file.
    pub fn load_data(&self) -> Result<(Table, DatasetSchema)> {
        let table = read_labeled_csv(&self.data_file, &self.definition.columns)?;
        debug!(
            "loaded '{}': {} rows x {} columns",
            self.definition.schema.name,
            table.num_rows(),
            table.num_columns()
        );
        Ok((table, self.definition.schema.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::{DType, Value};
    use crate::error::LoadError;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn header_is_replaced_by_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "Year,Count\n1749,58\n1750,62.6\n1751,70\n");

        let table = read_labeled_csv(&path, &["month", "sunspots"]).unwrap();
        assert_eq!(table.column_names(), vec!["month", "sunspots"]);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column("month").unwrap().dtype, DType::Integer);
        assert_eq!(table.column("sunspots").unwrap().dtype, DType::Float);

        let rows: Vec<(Value, Value)> = table
            .rows()
            .map(|r| (r[0].clone(), r[1].clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Value::Integer(1749), Value::Float(58.0)),
                (Value::Integer(1750), Value::Float(62.6)),
                (Value::Integer(1751), Value::Float(70.0)),
            ]
        );
    }

    #[test]
    fn space_after_comma_still_reads_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "Year, Count\n1749, 58\n1750, 62.6\n");

        let table = read_labeled_csv(&path, &["month", "sunspots"]).unwrap();
        assert_eq!(table.column("sunspots").unwrap().dtype, DType::Float);
        assert_eq!(
            table.row(0),
            Some(vec![&Value::Integer(1749), &Value::Float(58.0)])
        );
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "a,b\n");
        let table = read_labeled_csv(&path, &["month", "sunspots"]).unwrap();
        assert_eq!(table.column_names(), vec!["month", "sunspots"]);
        assert!(table.is_empty());
    }

    #[test]
    fn three_columns_is_a_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "a,b,c\n1,2,3\n");
        let err = read_labeled_csv(&path, &["month", "sunspots"]).unwrap_err();
        assert!(matches!(err, LoadError::ShapeMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn empty_file_is_a_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "");
        let err = read_labeled_csv(&path, &["month", "sunspots"]).unwrap_err();
        assert!(matches!(err, LoadError::ShapeMismatch { expected: 2, found: 0 }));
    }

    #[test]
    fn ragged_row_surfaces_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "s.csv", "a,b\n1,2\n3,4,5\n");
        let err = read_labeled_csv(&path, &["month", "sunspots"]).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_surfaces_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_labeled_csv(&dir.path().join("absent.csv"), &["a", "b"]).unwrap_err();
        match err {
            LoadError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolve_missing_path_is_absolute_and_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let root = resolve_path(dir.path());
        let resolved = resolve_path(&dir.path().join("x").join("..").join("y").join("f.csv"));
        assert!(resolved.is_absolute());
        assert_eq!(resolved, root.join("y").join("f.csv"));
    }

    #[test]
    fn resolve_existing_path_canonicalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "f.csv", "a\n");
        let dotted = dir.path().join(".").join("f.csv");
        assert_eq!(resolve_path(&dotted), std::fs::canonicalize(path).unwrap());
    }
}
