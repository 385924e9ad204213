//! A single configured run, bundling grid, potential, initial state, and
//! evolution operators.

use std::ops::ControlFlow;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    config::Params,
    error::{ LengthError, SimError },
    grid::Grid,
    operator::{ assemble, Tridiagonal },
    packet::gaussian_packet,
    potential::Potential,
    propagate::{ solve_with, Trajectory },
};

pub type SimResult<T> = Result<T, SimError>;

/// A configured run of the Crank-Nicolson solver.
///
/// Everything except the initial state is fixed at construction. The initial
/// state may be replaced or augmented (e.g. with extra packets to form a
/// superposition) up until [`Self::solve`] is called.
///
/// ```
/// use cnspace::{ config::Params, observables, sim::Simulation };
///
/// let params = Params::new(2.0, 2.0, 40.0, -5.0, 2.0, 161, 101);
/// let mut sim = Simulation::new(params).unwrap();
/// sim.add_packet(5.0, -2.0, 1.5).unwrap();
/// sim.solve().unwrap();
/// let traj = sim.trajectory().unwrap();
/// let norm = observables::norm(sim.grid().x(), traj.psi()).unwrap();
/// assert!(norm.iter().all(|n| (n - norm[0]).abs() < 1e-8));
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    params: Params,
    grid: Grid,
    potential: Potential,
    V: nd::Array1<f64>,
    q0: nd::Array1<C64>,
    A: Tridiagonal,
    B: Tridiagonal,
    trajectory: Option<Trajectory>,
}

impl Simulation {
    /// Build a run from `params`.
    ///
    /// The initial state is the normalized packet at `x0` with wavenumber
    /// `kappa` and width `sigma`, plus any `extra_packets` (each normalized
    /// individually). Fails on an invalid grid or packet specification, an
    /// unrecognized potential kind, or out-of-range potential parameters.
    pub fn new(params: Params) -> SimResult<Self> {
        let grid = Grid::new(params.L, params.Nx, params.tmax, params.Nt)?;
        let potential = params.potential.resolve(params.L)?;
        potential.check()?;
        let V = potential.build(grid.x());
        let mut q0
            = gaussian_packet(grid.x(), params.x0, params.kappa, params.sigma, true)?;
        for packet in params.extra_packets.iter() {
            q0 += &gaussian_packet(
                grid.x(), packet.center, packet.wavenumber, packet.width, true)?;
        }
        let (A, B) = assemble(grid.dx(), &V, grid.dt());
        tracing::debug!(
            nx = grid.nx(),
            nt = grid.nt(),
            potential = %potential.kind(),
            "built simulation"
        );
        Ok(Self { params, grid, potential, V, q0, A, B, trajectory: None })
    }

    /// Run parameters.
    pub fn params(&self) -> &Params { &self.params }

    /// Spatial and temporal grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// The potential in use.
    pub fn potential(&self) -> &Potential { &self.potential }

    /// Potential sampled over the spatial grid.
    pub fn V(&self) -> &nd::Array1<f64> { &self.V }

    /// Implicit and explicit evolution operators.
    pub fn operators(&self) -> (&Tridiagonal, &Tridiagonal) { (&self.A, &self.B) }

    /// Initial state.
    pub fn initial(&self) -> &nd::Array1<C64> { &self.q0 }

    /// Mutable access to the initial state.
    pub fn initial_mut(&mut self) -> &mut nd::Array1<C64> { &mut self.q0 }

    /// Replace the initial state.
    ///
    /// Fails if `q0` does not have one element per spatial grid point.
    pub fn set_initial<S>(&mut self, q0: &Arr1<S>) -> SimResult<()>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(q0, &self.q0)?;
        self.q0.assign(q0);
        Ok(())
    }

    /// Add a normalized Gaussian packet to the initial state.
    pub fn add_packet(&mut self, center: f64, wavenumber: f64, width: f64)
        -> SimResult<()>
    {
        self.q0 += &gaussian_packet(self.grid.x(), center, wavenumber, width, true)?;
        Ok(())
    }

    /// Propagate the initial state over every time point.
    pub fn solve(&mut self) -> SimResult<&Trajectory> {
        self.solve_with(|_, _| ControlFlow::Continue(()))
    }

    /// Like [`Self::solve`], but call `observer` after every completed step;
    /// see [`solve_with`][crate::propagate::solve_with].
    pub fn solve_with<F>(&mut self, observer: F) -> SimResult<&Trajectory>
    where F: FnMut(usize, nd::ArrayView1<C64>) -> ControlFlow<()>
    {
        let traj = solve_with(&self.q0, &self.A, &self.B, self.grid.nt(), observer)?;
        Ok(self.trajectory.insert(traj))
    }

    /// The most recently computed trajectory, if any.
    pub fn trajectory(&self) -> Option<&Trajectory> { self.trajectory.as_ref() }
}
