//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up a column key with a row (cell) index,
//! both of which are plain `usize` values underneath.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }
    };
}

define_index!(
    /// Column key of a field inside a timestep table.
    ///
    /// For given fields this is the position of the column in the raw
    /// input file; derived fields use accessors past the last input column
    /// so both kinds can live in one table.
    ///
    /// # Example
    ///
    /// ```
    /// use nebula_fields::types::Accessor;
    ///
    /// let acc = Accessor::new(10);
    /// assert_eq!(acc.get(), 10);
    /// assert_eq!(acc.to_string(), "#10");
    /// ```
    Accessor,
    "#"
);

define_index!(
    /// Row index of a grid cell inside a timestep table.
    ///
    /// Rows are laid out as `x + y * width + z * width * height`.
    CellIndex,
    "C"
);
