//! Fields of the `multifield` scalar files.
//!
//! Accessors 0-9 are the ten input columns in file order; 10-26 are the
//! derived densities.

use super::descriptor::{Derivation, FieldDescriptor};
use crate::formulae::SpeciesClass;
use crate::types::Accessor;

const PER_CM3: &str = "# particles / cm^3";
const G_PER_CM3: &str = "g / cm^3";

// =============================================================================
// Given columns
// =============================================================================

pub const TOTAL_PARTICLE_DENSITY: FieldDescriptor =
    FieldDescriptor::given(0, "total_particle_density", "Total Particle Density", PER_CM3)
        .with_color_map("BuPu_r");
pub const GAS_TEMPERATURE: FieldDescriptor =
    FieldDescriptor::given(1, "gas_temperature", "Gas Temperature", "Kelvin")
        .with_color_map("hot_r");
pub const H_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(2, "h_mass_abundance", "H Mass Abundance", "");
pub const H_PLUS_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(3, "h_plus_mass_abundance", "H+ Mass Abundance", "");
pub const HE_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(4, "he_mass_abundance", "He Mass Abundance", "");
pub const HE_PLUS_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(5, "he_plus_mass_abundance", "He+ Mass Abundance", "");
pub const HE_PLUS_PLUS_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(6, "he_plus_plus_mass_abundance", "He++ Mass Abundance", "");
pub const H_MINUS_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(7, "h_minus_mass_abundance", "H- Mass Abundance", "");
pub const H2_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(8, "h2_mass_abundance", "H2 Mass Abundance", "");
pub const H2_PLUS_MASS_ABUNDANCE: FieldDescriptor =
    FieldDescriptor::given(9, "h2_plus_mass_abundance", "H2+ Mass Abundance", "");

// =============================================================================
// Derived columns
// =============================================================================

/// Always computed first; every density below reads it.
pub const TOTAL_DENSITY: FieldDescriptor =
    FieldDescriptor::derived(10, "total_density", "Total Density", G_PER_CM3, None)
        .with_color_map("BuPu_r");

const fn number_density(species: SpeciesClass, abundance: FieldDescriptor) -> Option<Derivation> {
    Some(Derivation::NumberDensity {
        species,
        dependent: abundance.accessor,
    })
}

const fn mass_density(abundance: FieldDescriptor) -> Option<Derivation> {
    Some(Derivation::MassDensity {
        dependent: abundance.accessor,
    })
}

pub const H_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    11,
    "h_number_density",
    "H Number Density",
    PER_CM3,
    number_density(SpeciesClass::Hydrogen, H_MASS_ABUNDANCE),
);
pub const H_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    12,
    "h_mass_density",
    "H Mass Density",
    G_PER_CM3,
    mass_density(H_MASS_ABUNDANCE),
);
pub const H_PLUS_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    13,
    "h_plus_number_density",
    "H+ Number Density",
    PER_CM3,
    number_density(SpeciesClass::Hydrogen, H_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Reds");
pub const H_PLUS_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    14,
    "h_plus_mass_density",
    "H+ Mass Density",
    G_PER_CM3,
    mass_density(H_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Oranges");
pub const HE_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    15,
    "he_number_density",
    "He Number Density",
    PER_CM3,
    number_density(SpeciesClass::Helium, HE_MASS_ABUNDANCE),
);
pub const HE_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    16,
    "he_mass_density",
    "He Mass Density",
    G_PER_CM3,
    mass_density(HE_MASS_ABUNDANCE),
);
pub const HE_PLUS_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    17,
    "he_plus_number_density",
    "He+ Number Density",
    PER_CM3,
    number_density(SpeciesClass::Helium, HE_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Oranges");
pub const HE_PLUS_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    18,
    "he_plus_mass_density",
    "He+ Mass Density",
    G_PER_CM3,
    mass_density(HE_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Oranges");
pub const HE_PLUS_PLUS_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    19,
    "he_plus_plus_number_density",
    "He++ Number Density",
    PER_CM3,
    number_density(SpeciesClass::Helium, HE_PLUS_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Reds");
pub const HE_PLUS_PLUS_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    20,
    "he_plus_plus_mass_density",
    "He++ Mass Density",
    G_PER_CM3,
    mass_density(HE_PLUS_PLUS_MASS_ABUNDANCE),
)
.with_color_map("Reds");
pub const H_MINUS_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    21,
    "h_minus_number_density",
    "H- Number Density",
    PER_CM3,
    number_density(SpeciesClass::Hydrogen, H_MINUS_MASS_ABUNDANCE),
)
.with_color_map("Greens_r");
pub const H_MINUS_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    22,
    "h_minus_mass_density",
    "H- Mass Density",
    G_PER_CM3,
    mass_density(H_MINUS_MASS_ABUNDANCE),
);
pub const H2_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    23,
    "h2_number_density",
    "H2 Number Density",
    PER_CM3,
    number_density(SpeciesClass::MolecularHydrogen, H2_MASS_ABUNDANCE),
);
pub const H2_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    24,
    "h2_mass_density",
    "H2 Mass Density",
    G_PER_CM3,
    mass_density(H2_MASS_ABUNDANCE),
);
pub const H2_PLUS_NUMBER_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    25,
    "h2_plus_number_density",
    "H2+ Number Density",
    PER_CM3,
    number_density(SpeciesClass::MolecularHydrogen, H2_PLUS_MASS_ABUNDANCE),
);
pub const H2_PLUS_MASS_DENSITY: FieldDescriptor = FieldDescriptor::derived(
    26,
    "h2_plus_mass_density",
    "H2+ Mass Density",
    G_PER_CM3,
    mass_density(H2_PLUS_MASS_ABUNDANCE),
);

/// Number of columns in a raw scalar file.
pub const INPUT_COLUMNS: usize = 10;

/// Every scalar field, given columns first.
pub const ALL: [FieldDescriptor; 27] = [
    TOTAL_PARTICLE_DENSITY,
    GAS_TEMPERATURE,
    H_MASS_ABUNDANCE,
    H_PLUS_MASS_ABUNDANCE,
    HE_MASS_ABUNDANCE,
    HE_PLUS_MASS_ABUNDANCE,
    HE_PLUS_PLUS_MASS_ABUNDANCE,
    H_MINUS_MASS_ABUNDANCE,
    H2_MASS_ABUNDANCE,
    H2_PLUS_MASS_ABUNDANCE,
    TOTAL_DENSITY,
    H_NUMBER_DENSITY,
    H_MASS_DENSITY,
    H_PLUS_NUMBER_DENSITY,
    H_PLUS_MASS_DENSITY,
    HE_NUMBER_DENSITY,
    HE_MASS_DENSITY,
    HE_PLUS_NUMBER_DENSITY,
    HE_PLUS_MASS_DENSITY,
    HE_PLUS_PLUS_NUMBER_DENSITY,
    HE_PLUS_PLUS_MASS_DENSITY,
    H_MINUS_NUMBER_DENSITY,
    H_MINUS_MASS_DENSITY,
    H2_NUMBER_DENSITY,
    H2_MASS_DENSITY,
    H2_PLUS_NUMBER_DENSITY,
    H2_PLUS_MASS_DENSITY,
];

/// The nine given columns read by the total density formula.
pub const TOTAL_DENSITY_INPUTS: [Accessor; 9] = [
    TOTAL_PARTICLE_DENSITY.accessor,
    H_MASS_ABUNDANCE.accessor,
    H_PLUS_MASS_ABUNDANCE.accessor,
    H_MINUS_MASS_ABUNDANCE.accessor,
    HE_MASS_ABUNDANCE.accessor,
    HE_PLUS_MASS_ABUNDANCE.accessor,
    HE_PLUS_PLUS_MASS_ABUNDANCE.accessor,
    H2_MASS_ABUNDANCE.accessor,
    H2_PLUS_MASS_ABUNDANCE.accessor,
];
