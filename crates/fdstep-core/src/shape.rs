//! Flattened grid geometry.

use smallvec::SmallVec;

use crate::error::ConfigError;

/// Per-axis point counts. Inline for the 1-D and 2-D grids used in practice.
pub type Extents = SmallVec<[usize; 4]>;

/// Shape of a flattened, row-major grid.
///
/// Axis 0 is the slowest-varying index and the last axis the fastest, so
/// a 2-D grid with extents `[ny, nx]` stores cell `(ix, iy)` at
/// `iy * nx + ix`. The total length is fixed for the lifetime of the shape.
///
/// ```
/// use fdstep_core::GridShape;
///
/// let shape = GridShape::new(&[4, 6]).unwrap();
/// assert_eq!(shape.len(), 24);
/// assert_eq!(shape.ndim(), 2);
/// assert_eq!(shape.index2(5, 1), 11);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    extents: Extents,
    len: usize,
}

impl GridShape {
    /// Maximum supported dimensionality.
    pub const MAX_DIM: usize = 64;

    /// Build a shape from per-axis extents.
    ///
    /// Fails on zero dimensions, more than [`MAX_DIM`](Self::MAX_DIM)
    /// dimensions, any zero extent, or a total length that overflows `usize`.
    pub fn new(extents: &[usize]) -> Result<Self, ConfigError> {
        if extents.is_empty() {
            return Err(ConfigError::NoDimensions);
        }
        if extents.len() > Self::MAX_DIM {
            return Err(ConfigError::TooManyDimensions {
                dim: extents.len(),
                max: Self::MAX_DIM,
            });
        }
        let mut len = 1usize;
        for (axis, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(ConfigError::EmptyExtent { axis });
            }
            len = len
                .checked_mul(extent)
                .ok_or(ConfigError::CellCountOverflow { axis })?;
        }
        Ok(Self {
            extents: extents.iter().copied().collect(),
            len,
        })
    }

    /// Build a 1-D shape.
    pub fn line(n: usize) -> Result<Self, ConfigError> {
        Self::new(&[n])
    }

    /// Build a 2-D shape with `ny` rows of `nx` points.
    pub fn plane(ny: usize, nx: usize) -> Result<Self, ConfigError> {
        Self::new(&[ny, nx])
    }

    /// Check that this shape has `ndim` axes, each at least `min` points.
    pub fn require(&self, ndim: usize, min: usize) -> Result<(), ConfigError> {
        if self.ndim() != ndim {
            return Err(ConfigError::RankMismatch {
                expected: ndim,
                got: self.ndim(),
            });
        }
        for (axis, &extent) in self.extents.iter().enumerate() {
            if extent < min {
                return Err(ConfigError::ExtentTooSmall { axis, extent, min });
            }
        }
        Ok(())
    }

    /// Per-axis extents, slowest axis first.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: construction rejects zero extents.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat index of `(ix, iy)` in a 2-D shape (`ix` is the fast index).
    pub fn index2(&self, ix: usize, iy: usize) -> usize {
        iy * self.extents[self.ndim() - 1] + ix
    }
}
