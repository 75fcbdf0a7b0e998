//! Strongly-typed domain types for safer APIs.
//!
//! Column keys, row indices and grid dimensions are all `usize` underneath;
//! the newtypes here keep them from being swapped by accident.
//!
//! # Example
//!
//! ```
//! use nebula_fields::types::{Accessor, GridShape};
//!
//! let shape = GridShape::DATASET;
//! let row = shape.index(10, 2, 0);
//! assert_eq!(row.get(), 1210);
//!
//! let temperature = Accessor::new(1);
//! assert_eq!(temperature.get(), 1);
//! ```

mod grid;
mod indices;

pub use grid::GridShape;
pub use indices::{Accessor, CellIndex};
