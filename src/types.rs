//! Core data model types.
//!
//! Uploaded files are ingested into an in-memory [`TicketTable`]: an ordered
//! [`Schema`] of named, typed [`Field`]s plus row-major [`Value`] storage.
//! Column order follows the file; the rename and enrichment passes in
//! [`crate::ingestion`] adjust the schema in place and append derived columns.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Logical data type for a schema field.
///
/// Columns come out of the file as [`DataType::Utf8`]; enrichment retypes the
/// timestamp and revision columns and appends typed derived columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// UTF-8 string.
    Utf8,
    /// 64-bit signed integer.
    Int64,
    /// Naive local timestamp.
    DateTime,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`TicketTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`TicketTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Missing/empty/unparsable value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// UTF-8 string.
    Utf8(String),
    /// Naive local timestamp.
    DateTime(NaiveDateTime),
}

impl Value {
    /// The string content, if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The timestamp, if this is a [`Value::DateTime`].
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

/// In-memory tabular ticket dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields; row order is the file row order. Not every canonical column is
/// guaranteed to be present — consumers look columns up by name and handle
/// absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketTable {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl TicketTable {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a single cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.schema.index_of(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Iterate the values of a named column, if present.
    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = &Value>> {
        let col = self.schema.index_of(column)?;
        Some(self.rows.iter().map(move |row| &row[col]))
    }

    /// Append a new column with one value per existing row.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` does not match the current row count.
    pub fn push_column(&mut self, field: Field, values: Vec<Value>) {
        assert!(
            values.len() == self.row_count(),
            "column '{}' has {} values for {} rows",
            field.name,
            values.len(),
            self.row_count()
        );
        self.schema.fields.push(field);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Replace an existing column's values (and its declared type) in place.
    ///
    /// Returns `false` without modifying anything if the column is absent.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` does not match the current row count.
    pub fn replace_column(&mut self, column: &str, data_type: DataType, values: Vec<Value>) -> bool {
        let Some(col) = self.schema.index_of(column) else {
            return false;
        };
        assert!(
            values.len() == self.row_count(),
            "column '{column}' has {} values for {} rows",
            values.len(),
            self.row_count()
        );
        self.schema.fields[col].data_type = data_type;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
        true
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original schema. The presentation
    /// layer uses this to derive the filtered view of the current dataset.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }
}
