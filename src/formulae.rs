//! Density conversions for the chemistry network.
//!
//! Converts the mass abundances written by the simulation into physical
//! densities. Every function is pure; a zero denominator is not trapped and
//! yields IEEE-754 infinity or NaN exactly as the arithmetic dictates.
//!
//! # Units
//!
//! - Total particle density: particles / cm³
//! - Mass abundances: dimensionless
//! - Total density, mass density: g / cm³
//! - Number density: particles / cm³
//!
//! # Example
//!
//! ```
//! use nebula_fields::formulae::{SpeciesAbundances, total_density, hydrogen_number_density};
//!
//! let abundances = SpeciesAbundances {
//!     h: 1.0,
//!     ..SpeciesAbundances::default()
//! };
//! let rho = total_density(1.0, &abundances);
//! let n_h = hydrogen_number_density(abundances.h, rho);
//! assert!((n_h - 1.0).abs() < 1e-12);
//! ```

/// Mass of a hydrogen atom (g) as used by the simulation's post-processing.
pub const MASS_OF_HYDROGEN: f64 = 1.38066e-24;

/// Mass abundances of the eight tracked species in one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeciesAbundances {
    /// H
    pub h: f64,
    /// H+
    pub h_plus: f64,
    /// H-
    pub h_minus: f64,
    /// He
    pub he: f64,
    /// He+
    pub he_plus: f64,
    /// He++
    pub he_plus_plus: f64,
    /// H2
    pub h2: f64,
    /// H2+
    pub h2_plus: f64,
}

impl SpeciesAbundances {
    /// Abundances weighted by inverse atomic mass, the denominator of
    /// [`total_density`].
    #[inline]
    pub fn mass_weighted_sum(&self) -> f64 {
        self.h
            + self.h_plus
            + self.h_minus
            + 0.25 * (self.he + self.he_plus + self.he_plus_plus)
            + 0.5 * (self.h2 + self.h2_plus)
    }

    /// Multiply every abundance by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            h: self.h * factor,
            h_plus: self.h_plus * factor,
            h_minus: self.h_minus * factor,
            he: self.he * factor,
            he_plus: self.he_plus * factor,
            he_plus_plus: self.he_plus_plus * factor,
            h2: self.h2 * factor,
            h2_plus: self.h2_plus * factor,
        }
    }
}

/// Total mass density from the total particle density and all abundances.
///
/// `ρ = n · m_H / (X_H + X_H+ + X_H- + ¼(X_He + X_He+ + X_He++) + ½(X_H2 + X_H2+))`
#[inline]
pub fn total_density(total_particle_density: f64, abundances: &SpeciesAbundances) -> f64 {
    (total_particle_density * MASS_OF_HYDROGEN) / abundances.mass_weighted_sum()
}

/// Number density of H, H+ or H-.
#[inline]
pub fn hydrogen_number_density(abundance: f64, total_density: f64) -> f64 {
    abundance * total_density / MASS_OF_HYDROGEN
}

/// Number density of He, He+ or He++.
#[inline]
pub fn helium_number_density(abundance: f64, total_density: f64) -> f64 {
    abundance * total_density / (4.0 * MASS_OF_HYDROGEN)
}

/// Number density of H2 or H2+.
#[inline]
pub fn h2_number_density(abundance: f64, total_density: f64) -> f64 {
    abundance * total_density / (2.0 * MASS_OF_HYDROGEN)
}

/// Mass density of a single species.
#[inline]
pub fn mass_density(total_density: f64, abundance: f64) -> f64 {
    total_density * abundance
}

/// Which number-density law a species follows.
///
/// The class is fixed per field when the registry is built, so the engine
/// dispatches on data rather than on which descriptor it is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeciesClass {
    /// H, H+, H-
    Hydrogen,
    /// He, He+, He++
    Helium,
    /// H2, H2+
    MolecularHydrogen,
}

impl SpeciesClass {
    /// Number density of a species of this class.
    #[inline]
    pub fn number_density(self, abundance: f64, total_density: f64) -> f64 {
        match self {
            SpeciesClass::Hydrogen => hydrogen_number_density(abundance, total_density),
            SpeciesClass::Helium => helium_number_density(abundance, total_density),
            SpeciesClass::MolecularHydrogen => h2_number_density(abundance, total_density),
        }
    }
}
