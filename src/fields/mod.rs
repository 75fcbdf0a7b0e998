//! Field registry: static metadata for every physical quantity.
//!
//! Two families of input files exist and each has its own registry:
//!
//! - **Scalar** (`multifield.NNNN.zslice.txt`): particle density, gas
//!   temperature and eight species mass abundances, plus the derived total
//!   density and per-species number / mass densities.
//! - **Vector** (`velocity.NNNN.zslice.txt`): the three velocity components
//!   and the derived curl components.
//!
//! Accessors are unique within a registry so one table can hold given and
//! derived columns side by side.
//!
//! # Example
//!
//! ```
//! use nebula_fields::fields::{FieldRegistry, scalar};
//!
//! let registry = FieldRegistry::scalar();
//! let field = registry.find("h_plus_number_density").unwrap();
//! assert_eq!(field.dependent(), Some(scalar::H_PLUS_MASS_ABUNDANCE.accessor));
//! ```

mod descriptor;
mod registry;
pub mod scalar;
pub mod vector;

pub use descriptor::{Derivation, DerivationType, FieldDescriptor, FieldKind};
pub use registry::{FieldRegistry, RegistryError, required_inputs};
