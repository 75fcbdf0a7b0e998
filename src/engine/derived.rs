//! Derived scalar field engine.
//!
//! Enriches every table of a scalar dataset in place:
//!
//! 1. total density (accessor 10) from the nine given inputs
//! 2. each requested number or mass density, read from its dependent
//!    abundance column and the total density column
//! 3. every column outside the requested set is dropped
//!
//! All tables are checked before the first one is touched, so an error
//! leaves the dataset as it was.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fields::scalar;
use crate::fields::{Derivation, FieldDescriptor};
use crate::formulae::{SpeciesAbundances, total_density};
use crate::table::{Dataset, DatasetError, TableError, TimestepTable};
use crate::types::Accessor;

/// Error type for scalar derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// An input column needed by a requested field is absent
    #[error("Timestep {timestep} lacks column {accessor} required for derivation")]
    MissingColumn { timestep: u32, accessor: Accessor },

    /// A requested field can be neither read nor computed (strict mode only)
    #[error("Requested field {key} ({accessor}) can neither be read nor derived")]
    Unsatisfiable { key: &'static str, accessor: Accessor },

    /// Tables differ in layout
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Table bookkeeping failed
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Options for [`compute_derived_fields`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DerivationOptions {
    /// Fail on requested fields that cannot be produced instead of omitting them.
    pub strict: bool,
}

impl DerivationOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// What to do for one dataset, resolved once from the request.
#[derive(Debug)]
struct Plan {
    derivations: Vec<(Accessor, Derivation)>,
    keep: Vec<Accessor>,
    needs_total_density: bool,
    has_total_density_inputs: bool,
}

/// Compute the requested derived fields for every table of `dataset`.
///
/// On return each table holds exactly the requested columns that could be
/// produced. An empty request leaves every table with zero columns and its
/// row count intact.
///
/// # Errors
/// - `Dataset` if the tables do not share one layout
/// - `MissingColumn` if a table lacks an input of a requested derived field
/// - `Unsatisfiable` in strict mode, for a field that is neither given in
///   the data nor derivable
///
/// # Example
///
/// ```ignore
/// use nebula_fields::engine::{compute_derived_fields, DerivationOptions};
/// use nebula_fields::fields::scalar;
///
/// compute_derived_fields(
///     &mut dataset,
///     &[scalar::H_PLUS_NUMBER_DENSITY],
///     &DerivationOptions::default(),
/// )?;
/// ```
pub fn compute_derived_fields(
    dataset: &mut Dataset,
    requested: &[FieldDescriptor],
    options: &DerivationOptions,
) -> Result<(), DerivationError> {
    let Some(plan) = prepare(dataset, requested, options)? else {
        return Ok(());
    };

    for frame in dataset.frames_mut() {
        derive_table(&mut frame.table, &plan)?;
        debug!(timestep = frame.timestep, columns = frame.table.n_columns(), "derived fields");
    }
    Ok(())
}

/// Parallel version of [`compute_derived_fields`]; one table per rayon task.
#[cfg(feature = "parallel")]
pub fn compute_derived_fields_parallel(
    dataset: &mut Dataset,
    requested: &[FieldDescriptor],
    options: &DerivationOptions,
) -> Result<(), DerivationError> {
    use rayon::prelude::*;

    let Some(plan) = prepare(dataset, requested, options)? else {
        return Ok(());
    };

    dataset
        .frames_mut()
        .par_iter_mut()
        .try_for_each(|frame| derive_table(&mut frame.table, &plan).map_err(DerivationError::from))
}

/// Total density column of one table.
///
/// # Errors
/// `TableError::MissingColumn` for the first absent input.
pub fn total_density_column(table: &TimestepTable) -> Result<Vec<f64>, TableError> {
    let tpd = table.require(scalar::TOTAL_PARTICLE_DENSITY.accessor)?;
    let h = table.require(scalar::H_MASS_ABUNDANCE.accessor)?;
    let h_plus = table.require(scalar::H_PLUS_MASS_ABUNDANCE.accessor)?;
    let he = table.require(scalar::HE_MASS_ABUNDANCE.accessor)?;
    let he_plus = table.require(scalar::HE_PLUS_MASS_ABUNDANCE.accessor)?;
    let he_plus_plus = table.require(scalar::HE_PLUS_PLUS_MASS_ABUNDANCE.accessor)?;
    let h_minus = table.require(scalar::H_MINUS_MASS_ABUNDANCE.accessor)?;
    let h2 = table.require(scalar::H2_MASS_ABUNDANCE.accessor)?;
    let h2_plus = table.require(scalar::H2_PLUS_MASS_ABUNDANCE.accessor)?;

    let column = (0..table.n_rows())
        .map(|i| {
            let abundances = SpeciesAbundances {
                h: h[i],
                h_plus: h_plus[i],
                h_minus: h_minus[i],
                he: he[i],
                he_plus: he_plus[i],
                he_plus_plus: he_plus_plus[i],
                h2: h2[i],
                h2_plus: h2_plus[i],
            };
            total_density(tpd[i], &abundances)
        })
        .collect();
    Ok(column)
}

// =============================================================================
// Planning
// =============================================================================

/// Resolve the request and validate every table. `None` for an empty dataset.
fn prepare(
    dataset: &Dataset,
    requested: &[FieldDescriptor],
    options: &DerivationOptions,
) -> Result<Option<Plan>, DerivationError> {
    let Some(first) = dataset.table(0) else {
        debug!("empty dataset, nothing to derive");
        return Ok(None);
    };
    // the plan is resolved against the first table
    dataset.check_consistency()?;

    let plan = plan_for(first, requested, options)?;
    info!(
        timesteps = dataset.len(),
        requested = requested.len(),
        derived = plan.derivations.len(),
        "deriving scalar fields"
    );

    if plan.needs_total_density || plan.has_total_density_inputs {
        let inputs: Vec<Accessor> = scalar::TOTAL_DENSITY_INPUTS
            .iter()
            .copied()
            .chain(plan.derivations.iter().map(|(_, d)| d.dependent()))
            .collect();
        for frame in dataset.frames() {
            for &accessor in &inputs {
                if !frame.table.contains(accessor) {
                    return Err(DerivationError::MissingColumn {
                        timestep: frame.timestep,
                        accessor,
                    });
                }
            }
        }
    }
    Ok(Some(plan))
}

fn plan_for(
    reference: &TimestepTable,
    requested: &[FieldDescriptor],
    options: &DerivationOptions,
) -> Result<Plan, DerivationError> {
    let mut derivations = Vec::new();
    let mut keep = Vec::with_capacity(requested.len());

    for field in requested {
        if keep.contains(&field.accessor) {
            continue;
        }
        let satisfiable = if let Some(derivation) = field.derivation {
            derivations.push((field.accessor, derivation));
            true
        } else {
            field.accessor == scalar::TOTAL_DENSITY.accessor || reference.contains(field.accessor)
        };

        if satisfiable {
            keep.push(field.accessor);
        } else if options.strict {
            return Err(DerivationError::Unsatisfiable {
                key: field.key,
                accessor: field.accessor,
            });
        } else {
            warn!(field = field.key, accessor = %field.accessor, "requested field is not available, omitting");
        }
    }

    let has_total_density_inputs = scalar::TOTAL_DENSITY_INPUTS
        .iter()
        .all(|&a| reference.contains(a));
    let needs_total_density =
        !derivations.is_empty() || keep.contains(&scalar::TOTAL_DENSITY.accessor);

    Ok(Plan {
        derivations,
        keep,
        needs_total_density,
        has_total_density_inputs,
    })
}

// =============================================================================
// Per-table kernel
// =============================================================================

fn derive_table(table: &mut TimestepTable, plan: &Plan) -> Result<(), TableError> {
    if plan.needs_total_density || plan.has_total_density_inputs {
        let rho = total_density_column(table)?;
        table.insert_column(scalar::TOTAL_DENSITY.accessor, rho)?;
    }

    for &(accessor, derivation) in &plan.derivations {
        let values: Vec<f64> = {
            let abundance = table.require(derivation.dependent())?;
            let rho = table.require(scalar::TOTAL_DENSITY.accessor)?;
            abundance
                .iter()
                .zip(rho)
                .map(|(&x, &td)| derivation.evaluate(x, td))
                .collect()
        };
        table.insert_column(accessor, values)?;
    }

    table.retain_columns(|a| plan.keep.contains(&a));
    Ok(())
}
