//! Curl engine for velocity slices.
//!
//! Forward-difference curl of `(Vx, Vy, Vz)` on a single z-slice:
//!
//! ```text
//! curl_x = (Vz(x, y+1) - Vz - Vy(z+1) + Vy) / h
//! curl_y = (Vx(z+1)  - Vx - Vz(x+1) + Vz) / h
//! curl_z = (Vy(x+1)  - Vy - Vx(y+1) + Vx) / h
//! ```
//!
//! Neighbors past the last column or row of the slice are the zero vector,
//! which makes the outermost column and row of the output carry the
//! boundary jump. The depth neighbor is zero unless
//! [`DepthNeighbor::NextLayer`] is selected.
//!
//! After [`compute_curl`] each table holds exactly `W * H` rows and the
//! columns `curl_x` (3), `curl_y` (4), `curl_magnitude` (6). `curl_z` enters
//! the magnitude but is not stored.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::fields::vector;
use crate::table::{Dataset, TableError, TimestepTable};
use crate::types::{Accessor, GridShape};

/// Grid spacing of the dataset.
pub const DEFAULT_SPACING: f64 = 0.001;

/// Error type for curl computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurlError {
    /// A velocity component column is absent
    #[error("Velocity column {accessor} is missing")]
    MissingColumn { accessor: Accessor },

    /// Table holds less than one full slice
    #[error("Table has {rows} rows, a {shape} slice needs {required}")]
    TooFewRows {
        rows: usize,
        required: usize,
        shape: GridShape,
    },

    /// Error raised while processing a specific timestep
    #[error("Timestep {timestep}: {source}")]
    Timestep {
        timestep: u32,
        #[source]
        source: Box<CurlError>,
    },

    /// Table bookkeeping failed
    #[error(transparent)]
    Table(#[from] TableError),
}

impl CurlError {
    fn at(self, timestep: u32) -> Self {
        CurlError::Timestep {
            timestep,
            source: Box::new(self),
        }
    }
}

/// Source of the `z + 1` neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthNeighbor {
    /// Always the zero vector.
    #[default]
    Zero,
    /// Row `x + y*W + W*H` when the table holds a second layer, else zero.
    NextLayer,
}

/// Configuration for the curl engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurlConfig {
    /// Slice dimensions
    pub shape: GridShape,
    /// Finite difference spacing `h`
    pub spacing: f64,
    /// Depth neighbor policy
    pub depth_neighbor: DepthNeighbor,
}

impl CurlConfig {
    /// Configuration for a slice of the given shape with default spacing.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            spacing: DEFAULT_SPACING,
            depth_neighbor: DepthNeighbor::Zero,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_depth_neighbor(mut self, depth_neighbor: DepthNeighbor) -> Self {
        self.depth_neighbor = depth_neighbor;
        self
    }
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self::new(GridShape::DATASET)
    }
}

/// Per-cell curl of one slice, in row order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurlComponents {
    pub curl_x: Vec<f64>,
    pub curl_y: Vec<f64>,
    pub curl_z: Vec<f64>,
    pub magnitude: Vec<f64>,
}

impl CurlComponents {
    fn with_capacity(n: usize) -> Self {
        Self {
            curl_x: Vec::with_capacity(n),
            curl_y: Vec::with_capacity(n),
            curl_z: Vec::with_capacity(n),
            magnitude: Vec::with_capacity(n),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }
}

/// Forward-difference curl at one cell.
///
/// `row` is the cell's velocity, `row_x`, `row_y`, `row_z` those of its
/// `+x`, `+y` and `+z` neighbors. Returns `[curl_x, curl_y, curl_z]`.
#[inline]
pub fn curl_at(row: [f64; 3], row_x: [f64; 3], row_y: [f64; 3], row_z: [f64; 3], spacing: f64) -> [f64; 3] {
    let [vx, vy, vz] = row;
    [
        (row_y[2] - vz - row_z[1] + vy) / spacing,
        (row_z[0] - vx - row_x[2] + vz) / spacing,
        (row_x[1] - vy - row_y[0] + vx) / spacing,
    ]
}

/// Compute the curl of a single velocity table without modifying it.
///
/// # Errors
/// - `MissingColumn` if a velocity component is absent
/// - `TooFewRows` if the table holds less than `W * H` rows
pub fn curl_of_table(table: &TimestepTable, config: &CurlConfig) -> Result<CurlComponents, CurlError> {
    check_table(table, config)?;

    let vx = table.require(vector::VELOCITY_I.accessor)?;
    let vy = table.require(vector::VELOCITY_J.accessor)?;
    let vz = table.require(vector::VELOCITY_K.accessor)?;
    let velocity = |i: usize| [vx[i], vy[i], vz[i]];
    const ZERO: [f64; 3] = [0.0; 3];

    let shape = config.shape;
    let (width, height) = (shape.width(), shape.height());
    let layer = shape.cells_per_layer();
    let mut out = CurlComponents::with_capacity(layer);

    for y in 0..height {
        for x in 0..width {
            let i = shape.index(x, y, 0).get();
            let row = velocity(i);
            let row_x = if shape.contains(x + 1, y) { velocity(i + 1) } else { ZERO };
            let row_y = if shape.contains(x, y + 1) { velocity(i + width) } else { ZERO };
            let row_z = match config.depth_neighbor {
                DepthNeighbor::NextLayer if i + layer < table.n_rows() => velocity(i + layer),
                _ => ZERO,
            };

            let [cx, cy, cz] = curl_at(row, row_x, row_y, row_z, config.spacing);
            out.curl_x.push(cx);
            out.curl_y.push(cy);
            out.curl_z.push(cz);
            out.magnitude.push((cx * cx + cy * cy + cz * cz).sqrt());
        }
    }
    Ok(out)
}

/// Replace the velocity columns of every table with its curl.
///
/// Tables are truncated to one slice (`W * H` rows). Every table is checked
/// before any is modified.
///
/// # Example
///
/// ```ignore
/// use nebula_fields::engine::{compute_curl, CurlConfig};
/// use nebula_fields::fields::vector;
///
/// compute_curl(&mut velocity, &CurlConfig::default())?;
/// let magnitude = velocity.table(0).unwrap().column(vector::CURL_MAGNITUDE.accessor);
/// ```
pub fn compute_curl(dataset: &mut Dataset, config: &CurlConfig) -> Result<(), CurlError> {
    check_dataset(dataset, config)?;
    info!(timesteps = dataset.len(), shape = %config.shape, spacing = config.spacing, "computing curl");

    for frame in dataset.frames_mut() {
        let curl = curl_of_table(&frame.table, config).map_err(|e| e.at(frame.timestep))?;
        store_curl(&mut frame.table, curl, config)?;
        debug!(timestep = frame.timestep, "curl stored");
    }
    Ok(())
}

/// Parallel version of [`compute_curl`]; one table per rayon task.
#[cfg(feature = "parallel")]
pub fn compute_curl_parallel(dataset: &mut Dataset, config: &CurlConfig) -> Result<(), CurlError> {
    use rayon::prelude::*;

    check_dataset(dataset, config)?;
    info!(timesteps = dataset.len(), shape = %config.shape, "computing curl in parallel");

    dataset.frames_mut().par_iter_mut().try_for_each(|frame| {
        let curl = curl_of_table(&frame.table, config).map_err(|e| e.at(frame.timestep))?;
        store_curl(&mut frame.table, curl, config)
    })
}

fn check_table(table: &TimestepTable, config: &CurlConfig) -> Result<(), CurlError> {
    for field in &vector::VELOCITY {
        if !table.contains(field.accessor) {
            return Err(CurlError::MissingColumn {
                accessor: field.accessor,
            });
        }
    }
    let required = config.shape.cells_per_layer();
    if table.n_rows() < required {
        return Err(CurlError::TooFewRows {
            rows: table.n_rows(),
            required,
            shape: config.shape,
        });
    }
    Ok(())
}

fn check_dataset(dataset: &Dataset, config: &CurlConfig) -> Result<(), CurlError> {
    for frame in dataset.frames() {
        check_table(&frame.table, config).map_err(|e| e.at(frame.timestep))?;
    }
    Ok(())
}

fn store_curl(table: &mut TimestepTable, curl: CurlComponents, config: &CurlConfig) -> Result<(), CurlError> {
    table.truncate_rows(config.shape.cells_per_layer());
    table.drop_columns(&vector::VELOCITY.map(|f| f.accessor));
    table.insert_column(vector::CURL_X.accessor, curl.curl_x)?;
    table.insert_column(vector::CURL_Y.accessor, curl.curl_y)?;
    table.insert_column(vector::CURL_MAGNITUDE.accessor, curl.magnitude)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn velocity_table(rows: &[[f64; 3]]) -> TimestepTable {
        TimestepTable::from_columns((0..3).map(|c| {
            (Accessor::new(c), rows.iter().map(|r| r[c]).collect::<Vec<_>>())
        }))
        .unwrap()
    }

    fn config_2x2() -> CurlConfig {
        CurlConfig::new(GridShape::new(2, 2)).with_spacing(1.0)
    }

    #[test]
    fn test_curl_at() {
        let c = curl_at([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0], [0.0; 3], 0.5);
        assert_eq!(c, [16.0, -8.0, -6.0]);
    }

    #[test]
    fn test_hand_computed_2x2() {
        let table = velocity_table(&[
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
            [10.0, 11.0, 12.0],
        ]);
        let curl = curl_of_table(&table, &config_2x2()).unwrap();

        assert_eq!(curl.curl_x, vec![8.0, 11.0, -1.0, -1.0]);
        assert_eq!(curl.curl_y, vec![-4.0, 2.0, -10.0, 2.0]);
        assert_eq!(curl.curl_z, vec![-3.0, -11.0, 10.0, -1.0]);
        assert_relative_eq!(curl.magnitude[0], 89.0_f64.sqrt());
        assert_relative_eq!(curl.magnitude[2], 201.0_f64.sqrt());
    }

    #[test]
    fn test_constant_vertical_field_is_interior_free() {
        let shape = GridShape::new(5, 4);
        let c = 2.5;
        let table = velocity_table(&vec![[0.0, 0.0, c]; shape.cells_per_layer()]);
        let config = CurlConfig::new(shape);
        let curl = curl_of_table(&table, &config).unwrap();

        for y in 0..4 {
            for x in 0..5 {
                let i = shape.index(x, y, 0).get();
                assert_eq!(curl.curl_z[i], 0.0);
                if x < 4 && y < 3 {
                    assert_eq!(curl.magnitude[i], 0.0, "interior cell ({}, {})", x, y);
                } else {
                    assert!(curl.magnitude[i] > 0.0, "boundary cell ({}, {})", x, y);
                }
            }
        }
        // top row: curl_x = -c / h
        assert_relative_eq!(curl.curl_x[shape.index(0, 3, 0).get()], -c / DEFAULT_SPACING);
        // last column: curl_y = c / h
        assert_relative_eq!(curl.curl_y[shape.index(4, 0, 0).get()], c / DEFAULT_SPACING);
    }

    #[test]
    fn test_next_layer_neighbor() {
        let mut rows = vec![[0.0; 3]; 4];
        rows.extend(vec![[2.0, 3.0, 0.0]; 4]);
        let table = velocity_table(&rows);

        let zero = curl_of_table(&table, &config_2x2()).unwrap();
        assert!(zero.magnitude.iter().all(|&m| m == 0.0));

        let config = config_2x2().with_depth_neighbor(DepthNeighbor::NextLayer);
        let curl = curl_of_table(&table, &config).unwrap();
        assert_eq!(curl.len(), 4);
        assert!(curl.curl_x.iter().all(|&v| v == -3.0));
        assert!(curl.curl_y.iter().all(|&v| v == 2.0));
        assert_relative_eq!(curl.magnitude[3], 13.0_f64.sqrt());
    }

    #[test]
    fn test_compute_curl_replaces_columns() {
        let mut rows = vec![[1.0, 0.0, 0.0]; 4];
        rows.push([9.0, 9.0, 9.0]);
        let mut ds = Dataset::new(vec![7], vec![velocity_table(&rows)]).unwrap();

        compute_curl(&mut ds, &config_2x2()).unwrap();
        let table = ds.table(0).unwrap();
        assert_eq!(table.n_rows(), 4);
        assert_eq!(
            table.accessors().collect::<Vec<_>>(),
            vec![
                vector::CURL_X.accessor,
                vector::CURL_Y.accessor,
                vector::CURL_MAGNITUDE.accessor
            ]
        );
        assert!(!table.contains(vector::CURL_Z.accessor));
    }

    #[test]
    fn test_errors_leave_dataset_untouched() {
        let good = velocity_table(&[[1.0, 2.0, 3.0]; 4]);
        let short = velocity_table(&[[1.0, 2.0, 3.0]; 3]);
        let mut ds = Dataset::new(vec![1, 2], vec![good.clone(), good.clone()]).unwrap();
        ds.frames_mut()[1].table = short;

        let err = compute_curl(&mut ds, &config_2x2()).unwrap_err();
        match err {
            CurlError::Timestep { timestep, source } => {
                assert_eq!(timestep, 2);
                assert!(matches!(*source, CurlError::TooFewRows { rows: 3, required: 4, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ds.table(0), Some(&good));

        let mut missing = good.clone();
        missing.remove_column(vector::VELOCITY_K.accessor);
        ds.frames_mut()[1].table = missing.clone();
        let err = compute_curl(&mut ds, &config_2x2()).unwrap_err();
        assert!(matches!(err, CurlError::Timestep { timestep: 2, .. }));
        assert_eq!(ds.table(0), Some(&good));

        let err = curl_of_table(&missing, &config_2x2()).unwrap_err();
        assert_eq!(
            err,
            CurlError::MissingColumn {
                accessor: vector::VELOCITY_K.accessor
            }
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let rows: Vec<[f64; 3]> = (0..12).map(|i| [i as f64, (i * i) as f64, 1.0 / (i + 1) as f64]).collect();
        let config = CurlConfig::new(GridShape::new(4, 3));
        let mut serial = Dataset::new(vec![1, 2], vec![velocity_table(&rows), velocity_table(&rows)]).unwrap();
        let mut parallel = serial.clone();
        compute_curl(&mut serial, &config).unwrap();
        compute_curl_parallel(&mut parallel, &config).unwrap();
        assert_eq!(serial, parallel);
    }
}
