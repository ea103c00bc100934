use std::cmp::Ordering;
use std::fmt;

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common data-frame dtypes.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
}

// -- Manual Eq/Ord: floats compare by `total_cmp` so tables are comparable --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Column dtype inference
// ---------------------------------------------------------------------------

/// Storage type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Integer,
    Float,
    Bool,
    Text,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Integer => "int64",
            DType::Float => "float64",
            DType::Bool => "bool",
            DType::Text => "text",
        };
        f.write_str(name)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Tokens read as missing values, matching the usual data-frame defaults.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(trimmed: &str) -> bool {
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

/// Pick the narrowest dtype that every non-missing cell fits.
///
/// Cells are trimmed before the checks. Blank cells and the tokens in
/// `MISSING_TOKENS` are missing values; an integer column with missing values
/// is widened to float.
fn infer_dtype<S: AsRef<str>>(raw: &[S]) -> DType {
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    let mut seen_value = false;
    let mut seen_missing = false;

    for cell in raw {
        let s = cell.as_ref().trim();
        if is_missing(s) {
            seen_missing = true;
            continue;
        }
        seen_value = true;
        all_int &= s.parse::<i64>().is_ok();
        all_float &= s.parse::<f64>().is_ok();
        all_bool &= parse_bool(s).is_some();
    }

    if !seen_value {
        return DType::Text;
    }
    match (all_int, all_float, all_bool) {
        (true, _, _) if seen_missing => DType::Float,
        (true, _, _) => DType::Integer,
        (_, true, _) => DType::Float,
        (_, _, true) => DType::Bool,
        _ => DType::Text,
    }
}

fn parse_cell(raw: &str, dtype: DType) -> Value {
    let s = raw.trim();
    if is_missing(s) {
        return Value::Null;
    }
    // `infer_dtype` guarantees every non-missing cell parses as `dtype`.
    match dtype {
        DType::Integer => s.parse().map(Value::Integer).unwrap_or(Value::Null),
        DType::Float => s.parse().map(Value::Float).unwrap_or(Value::Null),
        DType::Bool => parse_bool(s).map(Value::Bool).unwrap_or(Value::Null),
        DType::Text => Value::String(raw.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// One named, homogeneously typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Build a column from raw text cells, inferring its dtype.
    pub fn from_raw<S: AsRef<str>>(name: impl Into<String>, raw: &[S]) -> Self {
        let dtype = infer_dtype(raw);
        let values = raw.iter().map(|s| parse_cell(s.as_ref(), dtype)).collect();
        Self::new(name, dtype, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded data
// ---------------------------------------------------------------------------

/// Column-oriented table with named columns and rows kept in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table; every column must have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(LoadError::ColumnLength {
                    column: bad.name.clone(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Cells of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.num_rows()).filter_map(move |i| self.row(i))
    }

    /// Replace every column name, position by position.
    ///
    /// The label count has to match the column count exactly; nothing is
    /// truncated or padded.
    pub fn rename_columns<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.len() != self.columns.len() {
            return Err(LoadError::ShapeMismatch {
                expected: labels.len(),
                found: self.columns.len(),
            });
        }
        for (column, label) in self.columns.iter_mut().zip(labels) {
            column.name = label.as_ref().to_string();
        }
        Ok(())
    }
}
