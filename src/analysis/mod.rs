//! Reductions over enriched datasets.
//!
//! - [`global_extrema`]: max/min of a field over all timesteps, used to share
//!   one color scale across a time series
//! - [`contour_levels`], [`quiver_scale`]: plot parameters derived from
//!   those extrema
//!
//! # Example
//!
//! ```ignore
//! use nebula_fields::analysis::{contour_levels, global_extrema};
//! use nebula_fields::fields::scalar;
//!
//! if let Some(range) = global_extrema(&dataset, Some(scalar::TOTAL_DENSITY.accessor)) {
//!     let levels = contour_levels(range, 100);
//! }
//! ```

mod extrema;
mod render;

pub use extrema::{Extrema, extrema_of, global_extrema, local_extrema};
pub use render::{KM_TO_PARSEC, contour_levels, quiver_scale};
