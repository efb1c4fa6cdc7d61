//! In-memory survey table
//!
//! The loader that reads files lives outside this crate; it hands over
//! already-parsed cells. Numeric coercion happens here, per cell, and a
//! cell that cannot be read as a number simply becomes missing.

use crate::{StatsError, StatsResult};
use std::collections::HashSet;

/// A raw table cell as produced by the loader
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric value of the cell, `None` when it is missing or unreadable
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Missing => return None,
        };
        if value.is_finite() {
            Some(value)
        } else {
            None
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::from(s.as_str())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// A named column of raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// Ordered table of equally long named columns; read-only once built
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from named columns
    pub fn from_columns(columns: Vec<(String, Vec<CellValue>)>) -> StatsResult<Self> {
        let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut seen = HashSet::new();

        for (name, values) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(StatsError::InvalidInput(format!(
                    "Duplicate column name: {}",
                    name
                )));
            }
            if values.len() != n_rows {
                return Err(StatsError::DimensionMismatchMsg(format!(
                    "Column {} has {} rows, expected {}",
                    name,
                    values.len(),
                    n_rows
                )));
            }
        }

        Ok(Self {
            columns: columns
                .into_iter()
                .map(|(name, values)| Column { name, values })
                .collect(),
            n_rows,
        })
    }

    /// Build a dataset from a header and row-major cells
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> StatsResult<Self> {
        let mut columns: Vec<(String, Vec<CellValue>)> = header
            .into_iter()
            .map(|name| (name, Vec::with_capacity(rows.len())))
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(StatsError::DimensionMismatchMsg(format!(
                    "Row {} has {} cells, header has {} columns",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.1.push(cell);
            }
        }

        Self::from_columns(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Coerce a column to numbers, NaN marking missing cells
    pub fn coerce_column(&self, name: &str) -> StatsResult<Vec<f64>> {
        let column = self
            .column(name)
            .ok_or_else(|| StatsError::ColumnNotFound(name.to_string()))?;

        Ok(column
            .values
            .iter()
            .map(|cell| cell.to_f64().unwrap_or(f64::NAN))
            .collect())
    }
}
