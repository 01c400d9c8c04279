//! Declarative scheme configuration.
//!
//! [`SchemeSpec`] mirrors the flat configuration surface an outer layer
//! hands over: a scheme name, grid extents, physical parameters, a numeric
//! boundary selector and an optional thread count. [`build()`](SchemeSpec::build)
//! turns it into the closed [`Scheme`] set.

use std::fmt;
use std::str::FromStr;

use fdstep_core::{Boundary, ConfigError, GridShape};
use fdstep_schemes::{LaxAdvection1D, Leapfrog1D, Scheme, ThreadedLeapfrog, Wave2D};

// ── SchemeKind ────────────────────────────────────────────────────

/// Which built-in scheme a [`SchemeSpec`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    /// Two-level 1-D advection.
    Advection,
    /// Three-level 1-D leapfrog.
    Leapfrog,
    /// Three-level 2-D leapfrog.
    Wave2D,
    /// Fork-join 1-D leapfrog.
    ThreadedLeapfrog,
}

impl SchemeKind {
    /// Grid dimensionality the scheme works in.
    pub fn ndim(self) -> usize {
        match self {
            Self::Wave2D => 2,
            Self::Advection | Self::Leapfrog | Self::ThreadedLeapfrog => 1,
        }
    }

    /// Canonical lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Advection => "advection",
            Self::Leapfrog => "leapfrog",
            Self::Wave2D => "wave2d",
            Self::ThreadedLeapfrog => "threaded_leapfrog",
        }
    }
}

impl FromStr for SchemeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advection" | "lax" => Ok(Self::Advection),
            "leapfrog" => Ok(Self::Leapfrog),
            "wave2d" | "wave_2d" => Ok(Self::Wave2D),
            "threaded_leapfrog" | "multileap" => Ok(Self::ThreadedLeapfrog),
            _ => Err(ConfigError::UnknownScheme { name: s.to_string() }),
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SchemeSpec ────────────────────────────────────────────────────

/// Flat description of one scheme instance.
///
/// Extents are slowest axis first: `[n]` for the line schemes,
/// `[rows, cols]` for [`SchemeKind::Wave2D`].
///
/// # Example
///
/// ```
/// use fdstep_engine::{SchemeKind, SchemeSpec};
///
/// let mut spec = SchemeSpec::new(SchemeKind::Leapfrog, vec![64], 0.01, 0.02);
/// spec.boundary_code = 1;
/// let scheme = spec.build().unwrap();
/// assert_eq!(fdstep_scheme::Propagate::history_depth(&scheme), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeSpec {
    /// Scheme to build.
    pub kind: SchemeKind,
    /// Points per axis, slowest first.
    pub extents: Vec<usize>,
    /// Propagation speed. Default: 1.0.
    pub speed: f64,
    /// Time step.
    pub dt: f64,
    /// Grid spacing along x.
    pub dx: f64,
    /// Grid spacing along y. `None` = `dx`. Only read by `Wave2D`.
    pub dy: Option<f64>,
    /// Boundary selector: 0 fixed, 1 periodic, 2 free ends. Default: 0.
    pub boundary_code: i32,
    /// Worker threads for the threaded scheme. `None` = auto-detect.
    pub threads: Option<usize>,
}

impl SchemeSpec {
    /// A spec with unit speed, fixed boundary and automatic thread count.
    pub fn new(kind: SchemeKind, extents: Vec<usize>, dt: f64, dx: f64) -> Self {
        Self {
            kind,
            extents,
            speed: 1.0,
            dt,
            dx,
            dy: None,
            boundary_code: 0,
            threads: None,
        }
    }

    /// Check the spec without keeping the scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    /// Build the scheme this spec describes.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown boundary code, extents of the wrong
    /// rank, and anything the scheme's own builder rejects.
    pub fn build(&self) -> Result<Scheme, ConfigError> {
        let boundary = Boundary::try_from(self.boundary_code)?;
        let shape = GridShape::new(&self.extents)?;
        let expected = self.kind.ndim();
        if shape.ndim() != expected {
            return Err(ConfigError::RankMismatch {
                expected,
                got: shape.ndim(),
            });
        }
        let extents = shape.extents();

        let scheme = match self.kind {
            SchemeKind::Advection => LaxAdvection1D::builder()
                .points(extents[0])
                .speed(self.speed)
                .dt(self.dt)
                .dx(self.dx)
                .boundary(boundary)
                .build()?
                .into(),
            SchemeKind::Leapfrog => Leapfrog1D::builder()
                .points(extents[0])
                .speed(self.speed)
                .dt(self.dt)
                .dx(self.dx)
                .boundary(boundary)
                .build()?
                .into(),
            SchemeKind::Wave2D => Wave2D::builder()
                .rows(extents[0])
                .cols(extents[1])
                .speed(self.speed)
                .dt(self.dt)
                .dx(self.dx)
                .dy(self.dy.unwrap_or(self.dx))
                .boundary(boundary)
                .build()?
                .into(),
            SchemeKind::ThreadedLeapfrog => {
                if boundary != Boundary::Fixed {
                    log::warn!(
                        "ThreadedLeapfrog: boundary '{boundary}' is not supported, edges stay fixed"
                    );
                }
                let mut builder = ThreadedLeapfrog::builder()
                    .points(extents[0])
                    .speed(self.speed)
                    .dt(self.dt)
                    .dx(self.dx);
                if let Some(threads) = self.threads {
                    builder = builder.threads(threads);
                }
                builder.build()?.into()
            }
        };
        Ok(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdstep_scheme::Propagate;

    #[test]
    fn kind_parses_names_and_aliases() {
        assert_eq!("advection".parse::<SchemeKind>(), Ok(SchemeKind::Advection));
        assert_eq!("Lax".parse::<SchemeKind>(), Ok(SchemeKind::Advection));
        assert_eq!("leapfrog".parse::<SchemeKind>(), Ok(SchemeKind::Leapfrog));
        assert_eq!("wave2d".parse::<SchemeKind>(), Ok(SchemeKind::Wave2D));
        assert_eq!(
            "multileap".parse::<SchemeKind>(),
            Ok(SchemeKind::ThreadedLeapfrog)
        );
        assert_eq!(
            "spectral".parse::<SchemeKind>(),
            Err(ConfigError::UnknownScheme {
                name: "spectral".into()
            })
        );
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in [
            SchemeKind::Advection,
            SchemeKind::Leapfrog,
            SchemeKind::Wave2D,
            SchemeKind::ThreadedLeapfrog,
        ] {
            assert_eq!(kind.to_string().parse::<SchemeKind>(), Ok(kind));
        }
    }

    #[test]
    fn builds_each_kind() {
        let advection = SchemeSpec::new(SchemeKind::Advection, vec![8], 0.1, 1.0);
        assert!(matches!(advection.build(), Ok(Scheme::Advection(_))));

        let leapfrog = SchemeSpec::new(SchemeKind::Leapfrog, vec![8], 0.1, 1.0);
        assert!(matches!(leapfrog.build(), Ok(Scheme::Leapfrog(_))));

        let wave = SchemeSpec::new(SchemeKind::Wave2D, vec![6, 7], 0.1, 1.0);
        let built = wave.build().unwrap();
        assert_eq!(built.shape().extents(), &[6, 7]);

        let mut threaded = SchemeSpec::new(SchemeKind::ThreadedLeapfrog, vec![40], 0.1, 1.0);
        threaded.threads = Some(4);
        let built = threaded.build().unwrap();
        assert_eq!(built.workers(), 4);
    }

    #[test]
    fn boundary_code_selects_policy() {
        let mut spec = SchemeSpec::new(SchemeKind::Advection, vec![8], 0.1, 1.0);
        spec.boundary_code = 2;
        match spec.build().unwrap() {
            Scheme::Advection(s) => assert_eq!(s.boundary(), Boundary::FreeEnds),
            other => panic!("unexpected scheme {other:?}"),
        }
    }

    #[test]
    fn unknown_boundary_code_is_rejected() {
        let mut spec = SchemeSpec::new(SchemeKind::Leapfrog, vec![8], 0.1, 1.0);
        spec.boundary_code = 7;
        assert_eq!(
            spec.validate(),
            Err(ConfigError::UnknownBoundary {
                selector: "7".into()
            })
        );
    }

    #[test]
    fn wrong_rank_is_rejected() {
        let line = SchemeSpec::new(SchemeKind::Wave2D, vec![10], 0.1, 1.0);
        assert_eq!(
            line.validate(),
            Err(ConfigError::RankMismatch {
                expected: 2,
                got: 1
            })
        );
        let plane = SchemeSpec::new(SchemeKind::Leapfrog, vec![5, 5], 0.1, 1.0);
        assert_eq!(
            plane.validate(),
            Err(ConfigError::RankMismatch {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn builder_errors_pass_through() {
        let short = SchemeSpec::new(SchemeKind::Advection, vec![2], 0.1, 1.0);
        assert!(matches!(
            short.validate(),
            Err(ConfigError::ExtentTooSmall { min: 3, .. })
        ));

        let mut zero = SchemeSpec::new(SchemeKind::ThreadedLeapfrog, vec![10], 0.1, 1.0);
        zero.threads = Some(0);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroThreads));

        let bad_dt = SchemeSpec::new(SchemeKind::Leapfrog, vec![10], 0.0, 1.0);
        assert!(matches!(
            bad_dt.validate(),
            Err(ConfigError::NonPositiveStep { name: "dt", .. })
        ));
    }

    #[test]
    fn dy_defaults_to_dx() {
        let spec = SchemeSpec::new(SchemeKind::Wave2D, vec![5, 5], 0.1, 0.5);
        match spec.build().unwrap() {
            Scheme::Wave2D(w) => assert_eq!(w.dy(), 0.5),
            other => panic!("unexpected scheme {other:?}"),
        }
    }

    #[test]
    fn threaded_ignores_non_fixed_boundary() {
        let mut spec = SchemeSpec::new(SchemeKind::ThreadedLeapfrog, vec![10], 0.1, 1.0);
        spec.boundary_code = 1;
        spec.threads = Some(2);
        assert!(spec.validate().is_ok());
    }
}
