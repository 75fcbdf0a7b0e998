//! Lookup and validation over a set of field descriptors.
//!
//! # Labels and units
//!
//! Labels and units are returned exactly as the descriptor tables define
//! them, with two deliberate departures from the labels of the legacy
//! plotting scripts:
//!
//! - mass abundances read "Mass Abundance" where the scripts wrote
//!   "Mass Adundance", and the H2+ abundance is labelled "H2+" rather than
//!   "H2"
//! - the curl fields carry the unit `1/s`, where the scripts left it empty
//!
//! Plots keyed on the legacy label strings need those spellings mapped.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::descriptor::FieldDescriptor;
use super::{scalar, vector};
use crate::types::Accessor;

/// Error type for registry validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two descriptors share a column key
    #[error("Accessor {accessor} used by both `{first}` and `{second}`")]
    DuplicateAccessor {
        accessor: Accessor,
        first: &'static str,
        second: &'static str,
    },

    /// Two descriptors share a machine name
    #[error("Duplicate field key `{0}`")]
    DuplicateKey(&'static str),

    /// A derivation refers to a column the registry does not hold
    #[error("Field `{field}` depends on unregistered accessor {dependent}")]
    DanglingDependent {
        field: &'static str,
        dependent: Accessor,
    },

    /// A derivation refers to another derived column
    #[error("Field `{field}` depends on `{dependent}`, which is not a given field")]
    DependentNotGiven {
        field: &'static str,
        dependent: &'static str,
    },
}

/// An ordered set of field descriptors for one family of input files.
#[derive(Clone, Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    /// Build a registry and check its invariants.
    ///
    /// # Errors
    /// See [`FieldRegistry::validate`].
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, RegistryError> {
        let registry = Self { fields };
        registry.validate()?;
        Ok(registry)
    }

    /// Registry of the scalar `multifield` files.
    pub fn scalar() -> Self {
        Self {
            fields: scalar::ALL.to_vec(),
        }
    }

    /// Registry of the `velocity` files.
    pub fn vector() -> Self {
        Self {
            fields: vector::ALL.to_vec(),
        }
    }

    /// Check accessor and key uniqueness and that every dependent column
    /// resolves to a registered given field.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut by_accessor: HashMap<Accessor, &FieldDescriptor> = HashMap::new();
        let mut keys = HashSet::new();

        for field in &self.fields {
            if let Some(prev) = by_accessor.insert(field.accessor, field) {
                return Err(RegistryError::DuplicateAccessor {
                    accessor: field.accessor,
                    first: prev.key,
                    second: field.key,
                });
            }
            if !keys.insert(field.key) {
                return Err(RegistryError::DuplicateKey(field.key));
            }
        }

        for field in &self.fields {
            let Some(dependent) = field.dependent() else {
                continue;
            };
            match by_accessor.get(&dependent) {
                None => {
                    return Err(RegistryError::DanglingDependent {
                        field: field.key,
                        dependent,
                    });
                }
                Some(dep) if !dep.is_given() => {
                    return Err(RegistryError::DependentNotGiven {
                        field: field.key,
                        dependent: dep.key,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Descriptor by column key.
    pub fn get(&self, accessor: Accessor) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.accessor == accessor)
    }

    /// Descriptor by machine name.
    pub fn find(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// All descriptors in registration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Descriptors present in the input files.
    pub fn given(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_given())
    }

    /// Computed descriptors.
    pub fn derived(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_given())
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Input columns a loader must read so that `requested` can be produced.
///
/// A given field needs only its own column. Any derived scalar field needs
/// the nine total density inputs (its dependent abundance is among them).
/// The result is sorted and free of duplicates.
pub fn required_inputs(requested: &[FieldDescriptor]) -> Vec<Accessor> {
    let mut columns: Vec<Accessor> = Vec::new();
    for field in requested {
        if field.is_given() {
            columns.push(field.accessor);
        } else {
            columns.extend_from_slice(&scalar::TOTAL_DENSITY_INPUTS);
        }
    }
    columns.sort();
    columns.dedup();
    columns
}
