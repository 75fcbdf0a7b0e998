//! Field descriptor record.

use std::fmt;

use crate::formulae::SpeciesClass;
use crate::types::Accessor;

/// Whether a field is read from disk or computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Present as a column of the raw input files.
    Given,
    /// Computed from given fields.
    Derived,
}

/// Formula family selected by a derived field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DerivationType {
    /// Particles per unit volume of one species.
    NumberDensity,
    /// Mass per unit volume of one species.
    MassDensity,
}

/// How a derived field is computed from its dependent abundance column.
///
/// Both variants carry the dependent column, so a derivation without an
/// input cannot be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Derivation {
    /// Number density; `species` picks the mass divisor.
    NumberDensity {
        species: SpeciesClass,
        dependent: Accessor,
    },
    /// Mass density of the species whose abundance is `dependent`.
    MassDensity { dependent: Accessor },
}

impl Derivation {
    /// Formula family of this derivation.
    pub fn derivation_type(&self) -> DerivationType {
        match self {
            Derivation::NumberDensity { .. } => DerivationType::NumberDensity,
            Derivation::MassDensity { .. } => DerivationType::MassDensity,
        }
    }

    /// Column holding the input abundance.
    pub fn dependent(&self) -> Accessor {
        match *self {
            Derivation::NumberDensity { dependent, .. } => dependent,
            Derivation::MassDensity { dependent } => dependent,
        }
    }

    /// Evaluate the derivation for one cell.
    #[inline]
    pub fn evaluate(&self, abundance: f64, total_density: f64) -> f64 {
        match self {
            Derivation::NumberDensity { species, .. } => {
                species.number_density(abundance, total_density)
            }
            Derivation::MassDensity { .. } => {
                crate::formulae::mass_density(total_density, abundance)
            }
        }
    }
}

/// Immutable metadata describing one physical quantity.
///
/// `label`, `unit` and `color_map` are display strings for the rendering
/// layer and play no part in any computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Column key (input position for given fields).
    pub accessor: Accessor,
    /// Stable machine name, e.g. `h_plus_number_density`.
    pub key: &'static str,
    /// Given or derived.
    pub kind: FieldKind,
    /// Human readable label.
    pub label: &'static str,
    /// Unit string, may be empty for dimensionless quantities.
    pub unit: &'static str,
    /// Preferred color map name.
    pub color_map: Option<&'static str>,
    /// Formula applied to produce this field, if any.
    pub derivation: Option<Derivation>,
}

impl FieldDescriptor {
    /// Descriptor for a column present in the input files.
    pub const fn given(
        accessor: usize,
        key: &'static str,
        label: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            accessor: Accessor::new(accessor),
            key,
            kind: FieldKind::Given,
            label,
            unit,
            color_map: None,
            derivation: None,
        }
    }

    /// Descriptor for a computed column.
    pub const fn derived(
        accessor: usize,
        key: &'static str,
        label: &'static str,
        unit: &'static str,
        derivation: Option<Derivation>,
    ) -> Self {
        Self {
            accessor: Accessor::new(accessor),
            key,
            kind: FieldKind::Derived,
            label,
            unit,
            color_map: None,
            derivation,
        }
    }

    /// Attach a preferred color map.
    pub const fn with_color_map(mut self, color_map: &'static str) -> Self {
        self.color_map = Some(color_map);
        self
    }

    /// Whether the field is read from input.
    #[inline]
    pub fn is_given(&self) -> bool {
        self.kind == FieldKind::Given
    }

    /// Formula family, if the field has a derivation.
    pub fn derivation_type(&self) -> Option<DerivationType> {
        self.derivation.map(|d| d.derivation_type())
    }

    /// Dependent abundance column, if the field has a derivation.
    pub fn dependent(&self) -> Option<Accessor> {
        self.derivation.map(|d| d.dependent())
    }

    /// `label | unit`, or just the label for dimensionless fields.
    pub fn title(&self) -> String {
        if self.unit.is_empty() {
            self.label.to_string()
        } else {
            format!("{} | {}", self.label, self.unit)
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.accessor)
    }
}
