//! History arena configuration.

use fdstep_core::{ConfigError, GridShape};

/// Configuration for a [`HistoryRing`](crate::HistoryRing).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    depth: usize,
    shape: GridShape,
}

impl HistoryConfig {
    /// Depth of two-level schemes (current slice plus the next).
    pub const TWO_LEVEL: usize = 2;

    /// Depth of three-level schemes (two previous slices plus the next).
    pub const THREE_LEVEL: usize = 3;

    /// Validate a history depth against an already-validated grid shape.
    pub fn new(depth: usize, shape: GridShape) -> Result<Self, ConfigError> {
        if depth < Self::TWO_LEVEL {
            return Err(ConfigError::HistoryDepthTooSmall { depth });
        }
        Ok(Self { depth, shape })
    }

    /// Validate depth and raw extents together.
    pub fn from_extents(depth: usize, extents: &[usize]) -> Result<Self, ConfigError> {
        if depth < Self::TWO_LEVEL {
            return Err(ConfigError::HistoryDepthTooSmall { depth });
        }
        Self::new(depth, GridShape::new(extents)?)
    }

    /// Number of time slices held.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Grid shape of every slice.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Number of `f64` values per slice.
    pub fn slice_len(&self) -> usize {
        self.shape.len()
    }

    /// Total arena size in bytes, or `None` if it overflows.
    pub fn total_bytes(&self) -> Option<usize> {
        self.depth
            .checked_mul(self.slice_len())?
            .checked_mul(std::mem::size_of::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_below_two_rejected() {
        for depth in [0, 1] {
            assert_eq!(
                HistoryConfig::from_extents(depth, &[10]),
                Err(ConfigError::HistoryDepthTooSmall { depth })
            );
        }
    }

    #[test]
    fn depth_checked_before_extents() {
        assert_eq!(
            HistoryConfig::from_extents(1, &[]),
            Err(ConfigError::HistoryDepthTooSmall { depth: 1 })
        );
    }

    #[test]
    fn zero_extent_rejected() {
        assert_eq!(
            HistoryConfig::from_extents(3, &[4, 0]),
            Err(ConfigError::EmptyExtent { axis: 1 })
        );
    }

    #[test]
    fn sizes() {
        let config = HistoryConfig::from_extents(3, &[5, 7]).unwrap();
        assert_eq!(config.slice_len(), 35);
        assert_eq!(config.total_bytes(), Some(3 * 35 * 8));
    }
}
