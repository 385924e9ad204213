//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(na: usize, nb: usize) -> Result<(), Self> {
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a grid or wave packet is specified with invalid parameters.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than two spatial points are requested.
    #[error("invalid grid spec: Nx must be at least 2; got {0}")]
    BadNx(usize),

    /// Returned when fewer than two time points are requested.
    #[error("invalid grid spec: Nt must be at least 2; got {0}")]
    BadNt(usize),

    /// Returned when the domain length is non-positive or non-finite.
    #[error("invalid grid spec: L must be finite and greater than 0; got {0}")]
    BadLength(f64),

    /// Returned when the time horizon is non-positive or non-finite.
    #[error("invalid grid spec: tmax must be finite and greater than 0; got {0}")]
    BadTmax(f64),

    /// Returned when a wave packet width is non-positive or non-finite.
    #[error("invalid grid spec: packet width must be finite and greater than 0; got {0}")]
    BadWidth(f64),

    /// Returned when a wave packet to be normalized has zero or non-finite
    /// norm over the grid, e.g. when centered far outside the domain.
    #[error("invalid grid spec: packet centered at {0} has no normalizable weight on the grid")]
    ZeroNorm(f64),

    /// Returned when a potential parameter is non-finite or out of range.
    #[error("invalid grid spec: potential parameter {name} must be {expected}; got {value}")]
    BadPotential { name: &'static str, expected: &'static str, value: f64 },
}

impl GridError {
    pub(crate) fn check_nx(nx: usize) -> Result<(), Self> {
        (nx >= 2).then_some(()).ok_or(Self::BadNx(nx))
    }

    pub(crate) fn check_nt(nt: usize) -> Result<(), Self> {
        (nt >= 2).then_some(()).ok_or(Self::BadNt(nt))
    }

    pub(crate) fn check_length(L: f64) -> Result<(), Self> {
        (L.is_finite() && L > 0.0).then_some(()).ok_or(Self::BadLength(L))
    }

    pub(crate) fn check_tmax(tmax: f64) -> Result<(), Self> {
        (tmax.is_finite() && tmax > 0.0).then_some(()).ok_or(Self::BadTmax(tmax))
    }

    pub(crate) fn check_width(width: f64) -> Result<(), Self> {
        (width.is_finite() && width > 0.0)
            .then_some(()).ok_or(Self::BadWidth(width))
    }

    pub(crate) fn check_norm(center: f64, norm: f64) -> Result<(), Self> {
        (norm.is_finite() && norm > 0.0)
            .then_some(()).ok_or(Self::ZeroNorm(center))
    }

    pub(crate) fn check_finite(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        value.is_finite()
            .then_some(())
            .ok_or(Self::BadPotential { name, expected: "finite", value })
    }

    pub(crate) fn check_positive(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value.is_finite() && value > 0.0)
            .then_some(())
            .ok_or(Self::BadPotential {
                name,
                expected: "finite and greater than 0",
                value,
            })
    }
}

/// Returned when a potential is requested by an identifier that does not name
/// any of the built-in variants.
#[derive(Debug, Error)]
#[error("unsupported potential kind {0:?}; expected one of: isw, tunneling")]
pub struct UnsupportedPotentialKind(pub String);

/// Returned from the tridiagonal solver and the propagator.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Returned when elimination encounters a zero or non-finite pivot.
    #[error("implicit operator is numerically singular at row {row}")]
    SingularOperator { row: usize },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned when a parameter file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// [`std::io::Error`]
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_yaml::Error`]
    #[error("could not parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Returned from [`Simulation`][crate::sim::Simulation].
#[derive(Debug, Error)]
pub enum SimError {
    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`UnsupportedPotentialKind`]
    #[error("potential error: {0}")]
    Potential(#[from] UnsupportedPotentialKind),

    /// [`SolveError`]
    #[error("solve error: {0}")]
    Solve(#[from] SolveError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`ConfigError`]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
