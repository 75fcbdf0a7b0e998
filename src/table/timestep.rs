//! Column-oriented table holding one timestep.

use indexmap::IndexMap;
use thiserror::Error;

use crate::types::{Accessor, CellIndex};

/// Error type for column operations on a [`TimestepTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A required column is not in the table
    #[error("Column {0} is missing")]
    MissingColumn(Accessor),

    /// A column's length disagrees with the table's row count
    #[error("Column {accessor} has {found} rows, table has {expected}")]
    LengthMismatch {
        accessor: Accessor,
        expected: usize,
        found: usize,
    },
}

/// Numeric table of one timestep: one row per grid cell, one column per
/// field accessor.
///
/// Columns keep their insertion order. The row count is stored separately
/// so a table stripped of every column still knows how many cells it covers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimestepTable {
    n_rows: usize,
    columns: IndexMap<Accessor, Vec<f64>>,
}

impl TimestepTable {
    /// Create a table with `n_rows` rows and no columns.
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            columns: IndexMap::new(),
        }
    }

    /// Build a table from `(accessor, values)` pairs.
    ///
    /// # Errors
    /// `LengthMismatch` if the columns differ in length.
    pub fn from_columns<I>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Accessor, Vec<f64>)>,
    {
        let mut iter = columns.into_iter().peekable();
        let n_rows = iter.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut table = Self::new(n_rows);
        for (accessor, values) in iter {
            table.insert_column(accessor, values)?;
        }
        Ok(table)
    }

    /// Number of rows (grid cells).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column keys in insertion order.
    pub fn accessors(&self) -> impl Iterator<Item = Accessor> + '_ {
        self.columns.keys().copied()
    }

    /// Whether the table has a column for `accessor`.
    pub fn contains(&self, accessor: Accessor) -> bool {
        self.columns.contains_key(&accessor)
    }

    /// Values of a column.
    pub fn column(&self, accessor: Accessor) -> Option<&[f64]> {
        self.columns.get(&accessor).map(Vec::as_slice)
    }

    /// Values of a column that must be present.
    pub fn require(&self, accessor: Accessor) -> Result<&[f64], TableError> {
        self.column(accessor)
            .ok_or(TableError::MissingColumn(accessor))
    }

    /// Value at one cell.
    pub fn value(&self, accessor: Accessor, cell: CellIndex) -> Option<f64> {
        self.column(accessor)?.get(cell.get()).copied()
    }

    /// Insert a column, replacing any existing one with the same key.
    ///
    /// A replaced column keeps its position; a new one is appended.
    pub fn insert_column(&mut self, accessor: Accessor, values: Vec<f64>) -> Result<(), TableError> {
        if values.len() != self.n_rows {
            return Err(TableError::LengthMismatch {
                accessor,
                expected: self.n_rows,
                found: values.len(),
            });
        }
        self.columns.insert(accessor, values);
        Ok(())
    }

    /// Remove a column, returning its values.
    pub fn remove_column(&mut self, accessor: Accessor) -> Option<Vec<f64>> {
        self.columns.shift_remove(&accessor)
    }

    /// Remove every listed column that is present.
    pub fn drop_columns(&mut self, accessors: &[Accessor]) {
        for accessor in accessors {
            self.columns.shift_remove(accessor);
        }
    }

    /// Keep only the columns whose key satisfies `keep`.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(Accessor) -> bool) {
        self.columns.retain(|accessor, _| keep(*accessor));
    }

    /// Drop every row at or past `n_rows`. Does nothing if the table is
    /// already shorter.
    pub fn truncate_rows(&mut self, n_rows: usize) {
        if n_rows >= self.n_rows {
            return;
        }
        for values in self.columns.values_mut() {
            values.truncate(n_rows);
        }
        self.n_rows = n_rows;
    }

    /// One row across all columns, in column order.
    pub fn row(&self, cell: CellIndex) -> Option<Vec<f64>> {
        if cell.get() >= self.n_rows {
            return None;
        }
        Some(self.columns.values().map(|v| v[cell.get()]).collect())
    }

    /// A column reshaped into `(y, x)` order: each item is one grid row of
    /// `width` values. Trailing cells that do not fill a whole row are
    /// skipped.
    pub fn grid_rows(&self, accessor: Accessor, width: usize) -> Option<std::slice::ChunksExact<'_, f64>> {
        if width == 0 {
            return None;
        }
        self.column(accessor).map(|v| v.chunks_exact(width))
    }

    /// Whether this table has the same row count and column keys as
    /// `other` (column order ignored).
    pub fn same_layout(&self, other: &TimestepTable) -> bool {
        self.n_rows == other.n_rows
            && self.columns.len() == other.columns.len()
            && self.columns.keys().all(|k| other.columns.contains_key(k))
    }
}
