//! Built-in static potentials sampled over a spatial grid.

use std::{ fmt, str::FromStr };
use ndarray as nd;
use crate::{
    Arr1,
    error::{ GridError, SimError, UnsupportedPotentialKind },
    grid::GridResult,
    DEF_WALL,
};

/// Identifier for one of the built-in potential variants, parsed from a string.
///
/// Accepted identifiers (case-insensitive): `isw` or `infinite_square_well`,
/// `tunneling` or `tunneling_barrier`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PotentialKind {
    InfiniteSquareWell,
    TunnelingBarrier,
}

impl FromStr for PotentialKind {
    type Err = UnsupportedPotentialKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isw" | "infinite_square_well" => Ok(Self::InfiniteSquareWell),
            "tunneling" | "tunneling_barrier" => Ok(Self::TunnelingBarrier),
            _ => Err(UnsupportedPotentialKind(s.to_string())),
        }
    }
}

impl fmt::Display for PotentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfiniteSquareWell => write!(f, "infinite_square_well"),
            Self::TunnelingBarrier => write!(f, "tunneling_barrier"),
        }
    }
}

/// A fully parameterized static potential.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Potential {
    /// Zero everywhere except the first and last grid points, which are held
    /// at `wall`.
    ///
    /// `wall` only needs to be large compared to the kinetic energy scale of
    /// the problem; see [`DEF_WALL`].
    InfiniteSquareWell { wall: f64 },

    /// Zero everywhere except on `[x1, x1 + width]` (both ends inclusive),
    /// where it is equal to `amplitude`.
    TunnelingBarrier { x1: f64, width: f64, amplitude: f64 },
}

impl Default for Potential {
    fn default() -> Self { Self::InfiniteSquareWell { wall: DEF_WALL } }
}

impl Potential {
    /// Infinite square well with the default wall height.
    pub fn infinite_square_well() -> Self { Self::default() }

    /// Rectangular barrier.
    pub fn tunneling_barrier(x1: f64, width: f64, amplitude: f64) -> Self {
        Self::TunnelingBarrier { x1, width, amplitude }
    }

    /// The kind of this potential.
    pub fn kind(&self) -> PotentialKind {
        match self {
            Self::InfiniteSquareWell { .. } => PotentialKind::InfiniteSquareWell,
            Self::TunnelingBarrier { .. } => PotentialKind::TunnelingBarrier,
        }
    }

    /// Check that every parameter is in range: `wall`, `width`, and
    /// `amplitude` must be finite and positive, and `x1` must be finite.
    pub fn check(&self) -> GridResult<()> {
        match *self {
            Self::InfiniteSquareWell { wall } => {
                GridError::check_positive("wall", wall)?;
            },
            Self::TunnelingBarrier { x1, width, amplitude } => {
                GridError::check_finite("x1", x1)?;
                GridError::check_positive("width", width)?;
                GridError::check_positive("amplitude", amplitude)?;
            },
        }
        Ok(())
    }

    /// Sample the potential over spatial coordinates `x`.
    ///
    /// Parameters are not checked here; see [`Self::check`].
    ///
    /// ```
    /// use ndarray as nd;
    /// use cnspace::potential::Potential;
    ///
    /// let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 4.0, 5);
    /// let v = Potential::tunneling_barrier(1.0, 2.0, 10.0).build(&x);
    /// assert_eq!(v.to_vec(), vec![0.0, 10.0, 10.0, 10.0, 0.0]);
    /// ```
    pub fn build<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = x.len();
        let mut V: nd::Array1<f64> = nd::Array1::zeros(n);
        match *self {
            Self::InfiniteSquareWell { wall } => {
                if n > 0 {
                    V[0] = wall;
                    V[n - 1] = wall;
                }
            },
            Self::TunnelingBarrier { x1, width, amplitude } => {
                let x2 = x1 + width;
                V.iter_mut().zip(x)
                    .filter(|(_, xk)| **xk >= x1 && **xk <= x2)
                    .for_each(|(Vk, _)| { *Vk = amplitude; });
            },
        }
        tracing::debug!(kind = %self.kind(), n, "built potential");
        V
    }
}

/// Sample a potential named by `kind`, with variant parameters taken from
/// `params`.
///
/// Fails with [`UnsupportedPotentialKind`] for any unrecognized identifier
/// (there is no default fallback) and with [`GridError::BadPotential`] for
/// out-of-range parameters.
pub fn build<S>(kind: &str, x: &Arr1<S>, params: PotentialParams)
    -> Result<nd::Array1<f64>, SimError>
where S: nd::Data<Elem = f64>
{
    let potential = params.resolve(kind.parse()?);
    potential.check()?;
    Ok(potential.build(x))
}

/// Variant parameters used to resolve a [`PotentialKind`] into a
/// [`Potential`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PotentialParams {
    pub wall: f64,
    pub x1: f64,
    pub width: f64,
    pub amplitude: f64,
}

impl PotentialParams {
    /// Barrier defaults for a domain of length `L`: a barrier of height 10 and
    /// width `L/100` starting at `L/4`.
    pub fn for_length(L: f64) -> Self {
        Self { wall: DEF_WALL, x1: L / 4.0, width: L / 100.0, amplitude: 10.0 }
    }

    /// Pair these parameters with a kind.
    pub fn resolve(&self, kind: PotentialKind) -> Potential {
        match kind {
            PotentialKind::InfiniteSquareWell
                => Potential::InfiniteSquareWell { wall: self.wall },
            PotentialKind::TunnelingBarrier
                => Potential::TunnelingBarrier {
                    x1: self.x1,
                    width: self.width,
                    amplitude: self.amplitude,
                },
        }
    }
}
