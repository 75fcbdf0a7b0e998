//! Timestep tables and datasets.
//!
//! - [`TimestepTable`]: columns keyed by [`Accessor`](crate::types::Accessor),
//!   one row per grid cell
//! - [`Dataset`]: ordered timesteps sharing one layout

mod dataset;
mod timestep;

pub use dataset::{Dataset, DatasetError, Frame};
pub use timestep::{TableError, TimestepTable};
