//! Grid shape of a z-slice.

use std::fmt;

use super::CellIndex;

/// Width and height of a single z-slice of the simulation grid.
///
/// Provides the row layout shared by every timestep table:
/// `row = x + y * width + z * width * height`.
///
/// # Example
///
/// ```
/// use nebula_fields::types::GridShape;
///
/// let shape = GridShape::new(600, 248);
/// assert_eq!(shape.cells_per_layer(), 148_800);
/// assert_eq!(shape.index(1, 1, 0).get(), 601);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of cells in x-direction
    width: usize,
    /// Number of cells in y-direction
    height: usize,
}

impl GridShape {
    /// The 600 × 248 slice every dataset file is sampled on.
    pub const DATASET: Self = Self {
        width: 600,
        height: 248,
    };

    /// Create a new grid shape.
    ///
    /// # Panics
    ///
    /// Panics if either `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "width must be positive, got {}", width);
        assert!(height > 0, "height must be positive, got {}", height);
        Self { width, height }
    }

    /// Number of cells in x-direction.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells in y-direction.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of rows one z-layer occupies in a table.
    #[inline]
    pub fn cells_per_layer(&self) -> usize {
        self.width * self.height
    }

    /// Row index of cell (x, y, z).
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> CellIndex {
        CellIndex::new(x + y * self.width + z * self.width * self.height)
    }

    /// Whether (x, y) lies inside the slice.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Recover (x, y, z) from a row index.
    pub fn coords(&self, cell: CellIndex) -> (usize, usize, usize) {
        let layer = self.cells_per_layer();
        let i = cell.get();
        let z = i / layer;
        let rem = i % layer;
        (rem % self.width, rem / self.width, z)
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::DATASET
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((width, height): (usize, usize)) -> Self {
        Self::new(width, height)
    }
}
