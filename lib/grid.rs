//! Uniform sampling of space and time.

use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// Spatial and temporal sample points for a single run.
///
/// Space covers `[-L/2, L/2]` with `Nx` points and time covers `[0, tmax]` with
/// `Nt` points, both endpoints included. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    L: f64,
    tmax: f64,
    x: nd::Array1<f64>,
    dx: f64,
    t: nd::Array1<f64>,
    dt: f64,
}

impl Grid {
    /// Create a new grid.
    ///
    /// Fails if `Nx < 2`, `Nt < 2`, or either of `L` and `tmax` is not finite
    /// and positive.
    ///
    /// ```
    /// use cnspace::grid::Grid;
    ///
    /// let grid = Grid::new(100.0, 401, 40.0, 101).unwrap();
    /// assert_eq!(grid.x()[0], -50.0);
    /// assert_eq!(grid.x()[400], 50.0);
    /// assert!((grid.dx() - 0.25).abs() < 1e-12);
    /// assert!((grid.dt() - 0.4).abs() < 1e-12);
    /// ```
    pub fn new(L: f64, Nx: usize, tmax: f64, Nt: usize) -> GridResult<Self> {
        GridError::check_length(L)?;
        GridError::check_nx(Nx)?;
        GridError::check_tmax(tmax)?;
        GridError::check_nt(Nt)?;
        let x: nd::Array1<f64> = nd::Array1::linspace(-L / 2.0, L / 2.0, Nx);
        let dx = L / (Nx - 1) as f64;
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, tmax, Nt);
        let dt = tmax / (Nt - 1) as f64;
        Ok(Self { L, tmax, x, dx, t, dt })
    }

    /// Spatial coordinates.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Spatial step size.
    pub fn dx(&self) -> f64 { self.dx }

    /// Number of spatial points.
    pub fn nx(&self) -> usize { self.x.len() }

    /// Time coordinates.
    pub fn t(&self) -> &nd::Array1<f64> { &self.t }

    /// Time step size.
    pub fn dt(&self) -> f64 { self.dt }

    /// Number of time points.
    pub fn nt(&self) -> usize { self.t.len() }

    /// Domain length.
    pub fn length(&self) -> f64 { self.L }

    /// Simulation horizon.
    pub fn tmax(&self) -> f64 { self.tmax }
}
