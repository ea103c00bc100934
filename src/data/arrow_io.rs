use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use super::model::{Column, DType, Table, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Table → Arrow
// ---------------------------------------------------------------------------

fn arrow_type(dtype: DType) -> DataType {
    match dtype {
        DType::Integer => DataType::Int64,
        DType::Float => DataType::Float64,
        DType::Bool => DataType::Boolean,
        DType::Text => DataType::Utf8,
    }
}

fn column_to_array(column: &Column) -> ArrayRef {
    let values = &column.values;
    match column.dtype {
        DType::Integer => Arc::new(Int64Array::from_iter(values.iter().map(|v| match v {
            Value::Integer(i) => Some(*i),
            _ => None,
        }))),
        DType::Float => Arc::new(Float64Array::from_iter(values.iter().map(Value::as_f64))),
        DType::Bool => Arc::new(BooleanArray::from_iter(values.iter().map(|v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        }))),
        DType::Text => Arc::new(StringArray::from_iter(values.iter().map(Value::as_str))),
    }
}

/// Convert a table into a single Arrow record batch with nullable fields.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.name.as_str(), arrow_type(c.dtype), true))
        .collect();
    let arrays: Vec<ArrayRef> = table.columns().iter().map(column_to_array).collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Render the first `n` rows as an ASCII grid.
pub fn pretty_head(table: &Table, n: usize) -> Result<String> {
    let batch = to_record_batch(table)?;
    let head = batch.slice(0, n.min(batch.num_rows()));
    Ok(pretty_format_batches(&[head])?.to_string())
}

/// Write a table to a Parquet file.
pub fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let batch = to_record_batch(table)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    debug!("wrote {} rows to {}", table.num_rows(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Arrow → Table
// ---------------------------------------------------------------------------

fn dtype_of(data_type: &DataType) -> DType {
    match data_type {
        DataType::Int32 | DataType::Int64 => DType::Integer,
        DataType::Float32 | DataType::Float64 => DType::Float,
        DataType::Boolean => DType::Bool,
        _ => DType::Text,
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &ArrayRef, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(Value::Null, |a| Value::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(Value::Null, |a| Value::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(Value::Null, |a| Value::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(Value::Null, |a| Value::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(Value::Null, |a| Value::Bool(a.value(row))),
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        other => Value::String(format!("{other:?}")),
    }
}

/// Read a Parquet file back into a table, concatenating all record batches.
pub fn read_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut columns: Vec<Column> = schema
        .fields()
        .iter()
        .map(|f| Column::new(f.name().as_str(), dtype_of(f.data_type()), Vec::new()))
        .collect();

    for batch_result in reader {
        let batch = batch_result?;
        for (column, array) in columns.iter_mut().zip(batch.columns()) {
            column
                .values
                .extend((0..batch.num_rows()).map(|row| extract_value(array, row)));
        }
    }

    Table::new(columns)
}
