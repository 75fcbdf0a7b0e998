//! # nebula-fields
//!
//! Derived-field pipeline for z-slice dumps of a primordial chemistry
//! simulation.
//!
//! This crate provides:
//! - A field registry describing given and derived quantities
//! - Density formulas for the eight tracked species
//! - Loading and writing of per-timestep slice tables
//! - Derived scalar field and curl engines
//! - Global extrema and plot parameters for an external renderer
//!
//! # Example
//!
//! ```ignore
//! use nebula_fields::{
//!     DerivationOptions, TimestepFiles, compute_derived_fields, global_extrema, read_dataset,
//!     required_inputs, scalar,
//! };
//!
//! let requested = [scalar::H_PLUS_NUMBER_DENSITY];
//! let files = TimestepFiles::scalar("data/extracted/scalar").files_for(&[1, 49, 189]);
//! let mut dataset = read_dataset(&files, Some(&required_inputs(&requested)))?;
//! compute_derived_fields(&mut dataset, &requested, &DerivationOptions::default())?;
//! let range = global_extrema(&dataset, Some(requested[0].accessor));
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod fields;
pub mod formulae;
pub mod io;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use analysis::{Extrema, contour_levels, global_extrema, local_extrema, quiver_scale};
pub use config::{ConfigError, PipelineConfig};
pub use engine::{
    CurlComponents, CurlConfig, CurlError, DepthNeighbor, DerivationError, DerivationOptions,
    compute_curl, compute_derived_fields, curl_of_table,
};
pub use fields::{FieldDescriptor, FieldKind, FieldRegistry, required_inputs, scalar, vector};
pub use formulae::{MASS_OF_HYDROGEN, SpeciesAbundances, SpeciesClass};
pub use io::{
    TableFileError, TimestepFile, TimestepFiles, read_dataset, read_table_file, write_dataset,
    write_table_file,
};
pub use table::{Dataset, TimestepTable};
pub use types::{Accessor, CellIndex, GridShape};

#[cfg(feature = "parallel")]
pub use engine::{compute_curl_parallel, compute_derived_fields_parallel};
