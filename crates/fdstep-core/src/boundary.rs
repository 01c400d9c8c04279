//! Boundary policies for the edge cells of a 1-D grid.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a scheme computes the values at the two ends of the grid.
///
/// The set is closed; every scheme dispatches over it with an exhaustive
/// `match`, so a new policy cannot be added without the compiler pointing
/// at each place that must handle it.
///
/// The numeric selectors used by array-marshalling callers are
/// `0 = Fixed`, `1 = Periodic`, `2 = FreeEnds`:
///
/// ```
/// use fdstep_core::Boundary;
///
/// assert_eq!(Boundary::try_from(1).unwrap(), Boundary::Periodic);
/// assert_eq!("free".parse::<Boundary>().unwrap(), Boundary::FreeEnds);
/// assert!(Boundary::try_from(3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Edge cells hold the newest previous value.
    #[default]
    Fixed,
    /// Neighbour indices wrap around; the interior formula covers every cell.
    Periodic,
    /// Edge cells copy their just-updated interior neighbour.
    FreeEnds,
}

impl Boundary {
    /// Numeric selector for this policy.
    pub fn code(self) -> i32 {
        match self {
            Self::Fixed => 0,
            Self::Periodic => 1,
            Self::FreeEnds => 2,
        }
    }
}

impl TryFrom<i32> for Boundary {
    type Error = ConfigError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Fixed),
            1 => Ok(Self::Periodic),
            2 => Ok(Self::FreeEnds),
            other => Err(ConfigError::UnknownBoundary {
                selector: other.to_string(),
            }),
        }
    }
}

impl FromStr for Boundary {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "periodic" => Ok(Self::Periodic),
            "free" | "free_ends" | "free-ends" => Ok(Self::FreeEnds),
            _ => Err(ConfigError::UnknownBoundary {
                selector: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Periodic => write!(f, "periodic"),
            Self::FreeEnds => write!(f, "free_ends"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_fixed() {
        assert_eq!(Boundary::default(), Boundary::Fixed);
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(
            Boundary::try_from(-1),
            Err(ConfigError::UnknownBoundary {
                selector: "-1".into()
            })
        );
    }

    #[test]
    fn parse_accepts_display_form() {
        for b in [Boundary::Fixed, Boundary::Periodic, Boundary::FreeEnds] {
            assert_eq!(b.to_string().parse::<Boundary>().unwrap(), b);
        }
        assert!("reflecting".parse::<Boundary>().is_err());
    }

    proptest! {
        #[test]
        fn code_round_trips(code in -10i32..10) {
            match Boundary::try_from(code) {
                Ok(b) => prop_assert_eq!(b.code(), code),
                Err(_) => prop_assert!(!(0..=2).contains(&code)),
            }
        }
    }
}
