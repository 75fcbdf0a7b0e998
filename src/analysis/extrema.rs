//! Minimum and maximum of a field over tables and datasets.

use tracing::warn;

use crate::table::{Dataset, TimestepTable};
use crate::types::Accessor;

/// Largest and smallest value of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrema {
    pub max: f64,
    pub min: f64,
}

impl Extrema {
    /// Extrema of a single value.
    pub fn point(value: f64) -> Self {
        Self { max: value, min: value }
    }

    /// Widen to include `value`.
    #[inline]
    pub fn include(self, value: f64) -> Self {
        Self {
            max: self.max.max(value),
            min: self.min.min(value),
        }
    }

    /// Combine two ranges.
    #[inline]
    pub fn merge(self, other: Extrema) -> Self {
        Self {
            max: self.max.max(other.max),
            min: self.min.min(other.min),
        }
    }

    /// `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_finite(&self) -> bool {
        self.max.is_finite() && self.min.is_finite()
    }
}

/// Extrema of a slice, skipping NaN. `None` if no comparable value exists.
pub fn extrema_of(values: &[f64]) -> Option<Extrema> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<Extrema>, v| {
            Some(acc.map_or_else(|| Extrema::point(v), |e| e.include(v)))
        })
}

/// Extrema of one column of a table.
///
/// `None` if the column is absent or holds no comparable value.
pub fn local_extrema(table: &TimestepTable, accessor: Accessor) -> Option<Extrema> {
    table.column(accessor).and_then(extrema_of)
}

/// Extrema of a field across every row of every table in `dataset`.
///
/// Returns `None` when the dataset is empty, `field` is `None`, or no table
/// holds a comparable value for the field. Callers normalizing color scales
/// must handle the `None` case.
///
/// # Example
///
/// ```
/// use nebula_fields::analysis::global_extrema;
/// use nebula_fields::table::{Dataset, TimestepTable};
/// use nebula_fields::types::Accessor;
///
/// let a = TimestepTable::from_columns([(Accessor::new(0), vec![1.0, 5.0])]).unwrap();
/// let b = TimestepTable::from_columns([(Accessor::new(0), vec![-2.0, 3.0])]).unwrap();
/// let dataset = Dataset::new(vec![1, 2], vec![a, b]).unwrap();
///
/// let e = global_extrema(&dataset, Some(Accessor::new(0))).unwrap();
/// assert_eq!((e.max, e.min), (5.0, -2.0));
/// assert!(global_extrema(&dataset, None).is_none());
/// ```
pub fn global_extrema(dataset: &Dataset, field: Option<Accessor>) -> Option<Extrema> {
    let accessor = field?;
    let extrema = dataset
        .tables()
        .filter_map(|table| local_extrema(table, accessor))
        .reduce(Extrema::merge)?;

    if !extrema.is_finite() {
        warn!(field = %accessor, max = extrema.max, min = extrema.min, "non-finite extrema");
    }
    Some(extrema)
}
