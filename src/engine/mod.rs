//! Transforms applied to loaded datasets.
//!
//! - [`derived`]: scalar density fields from chemistry abundances
//! - [`curl`]: curl of the velocity field
//!
//! Both engines mutate the dataset in place and validate every table before
//! touching any of them.

pub mod curl;
pub mod derived;

pub use curl::{
    CurlComponents, CurlConfig, CurlError, DEFAULT_SPACING, DepthNeighbor, compute_curl, curl_at,
    curl_of_table,
};
pub use derived::{DerivationError, DerivationOptions, compute_derived_fields, total_density_column};

#[cfg(feature = "parallel")]
pub use curl::compute_curl_parallel;
#[cfg(feature = "parallel")]
pub use derived::compute_derived_fields_parallel;
