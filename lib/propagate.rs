//! Time-stepping of a state under the Crank-Nicolson operators.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes space and the second
//! indexes time, so that column `t` holds the state at time index `t`.
//!
//! Steps are strictly sequential: column `t + 1` is computed only once column
//! `t` is complete.

use std::ops::ControlFlow;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::LengthError,
    operator::{ SolveResult, Tridiagonal },
    DEF_TRACE_STRIDE,
};

/// The state of the system sampled at every time point of a run.
///
/// Holds a `(Nx, Nt)` array of amplitudes along with the number of columns
/// that were actually computed. A run stopped early by its observer leaves
/// trailing columns zeroed; [`Self::completed`] and [`Self::psi_completed`]
/// report the valid portion.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    psi: nd::Array2<C64>,
    completed: usize,
}

impl Trajectory {
    /// Full `(Nx, Nt)` amplitude array.
    pub fn psi(&self) -> &nd::Array2<C64> { &self.psi }

    /// Only the columns that were computed.
    pub fn psi_completed(&self) -> nd::ArrayView2<'_, C64> {
        self.psi.slice(nd::s![.., ..self.completed])
    }

    /// Consume `self`, returning the full amplitude array.
    pub fn into_psi(self) -> nd::Array2<C64> { self.psi }

    /// State at time index `t`.
    ///
    /// *Panics if `t` is out of bounds*.
    pub fn column(&self, t: usize) -> nd::ArrayView1<'_, C64> {
        self.psi.column(t)
    }

    /// Amplitude at spatial index `x` and time index `t`.
    pub fn get(&self, x: usize, t: usize) -> Option<C64> {
        self.psi.get((x, t)).copied()
    }

    /// Number of spatial points.
    pub fn nx(&self) -> usize { self.psi.nrows() }

    /// Number of time points the trajectory was allocated for.
    pub fn nt(&self) -> usize { self.psi.ncols() }

    /// Number of valid columns, including the initial state.
    pub fn completed(&self) -> usize { self.completed }

    /// `true` if every column was computed.
    pub fn is_complete(&self) -> bool { self.completed == self.nt() }
}

/// Propagate `q0` through `Nt - 1` steps of `A · ψ(t + 1) = B · ψ(t)`.
///
/// Column 0 of the result is `q0` itself. Neither operator nor the initial
/// state is modified. Fails if the operators and `q0` disagree in size or if
/// `A` is singular.
///
/// ```
/// use ndarray as nd;
/// use cnspace::{
///     grid::Grid,
///     operator::assemble,
///     packet::gaussian_packet,
///     potential::Potential,
///     propagate::solve,
///     utils::wf_norm,
/// };
///
/// let grid = Grid::new(40.0, 201, 2.0, 101).unwrap();
/// let V = Potential::infinite_square_well().build(grid.x());
/// let (A, B) = assemble(grid.dx(), &V, grid.dt());
/// let q0 = gaussian_packet(grid.x(), 0.0, 2.0, 2.0, true).unwrap();
/// let traj = solve(&q0, &A, &B, grid.nt()).unwrap();
/// assert!(traj.is_complete());
/// assert!((wf_norm(&traj.column(100), grid.dx()) - 1.0).abs() < 1e-6);
/// ```
pub fn solve<S>(q0: &Arr1<S>, A: &Tridiagonal, B: &Tridiagonal, Nt: usize)
    -> SolveResult<Trajectory>
where S: nd::Data<Elem = C64>
{
    solve_with(q0, A, B, Nt, |_, _| ControlFlow::Continue(()))
}

/// Like [`solve`], but call `observer` after every completed step.
///
/// `observer` receives the time index `t ≥ 1` and the state of column `t` once
/// that column is fully written. Returning [`ControlFlow::Break`] stops the run
/// before column `t + 1` is started, in which case the returned trajectory
/// holds only the columns computed so far (see [`Trajectory::completed`]).
pub fn solve_with<S, F>(
    q0: &Arr1<S>,
    A: &Tridiagonal,
    B: &Tridiagonal,
    Nt: usize,
    mut observer: F,
) -> SolveResult<Trajectory>
where
    S: nd::Data<Elem = C64>,
    F: FnMut(usize, nd::ArrayView1<C64>) -> ControlFlow<()>,
{
    let nx = q0.len();
    LengthError::check_len(A.n(), nx)?;
    LengthError::check_len(B.n(), nx)?;
    tracing::debug!(nx, nt = Nt, "starting propagation");

    let mut psi: nd::Array2<C64> = nd::Array2::zeros((nx, Nt));
    if Nt == 0 {
        return Ok(Trajectory { psi, completed: 0 });
    }
    psi.column_mut(0).assign(q0);

    let mut y: nd::Array1<C64> = nd::Array1::zeros(nx);
    let mut q_temp: nd::Array1<C64> = q0.to_owned();
    let mut scratch: nd::Array1<C64> = nd::Array1::zeros(nx);
    let mut completed: usize = 1;
    for (t, mut qt) in psi.axis_iter_mut(nd::Axis(1)).enumerate().skip(1) {
        B.dot_into(&q_temp, &mut y)?;
        A.solve_into(&y, &mut q_temp, &mut scratch)
            .map_err(|err| {
                tracing::debug!(t, %err, "propagation failed");
                err
            })?;
        qt.assign(&q_temp);
        completed = t + 1;
        if t % DEF_TRACE_STRIDE == 0 {
            tracing::trace!(t, nt = Nt, "propagation progress");
        }
        if observer(t, qt.view()).is_break() {
            tracing::debug!(t, "propagation stopped by observer");
            break;
        }
    }
    tracing::debug!(completed, nt = Nt, "finished propagation");
    Ok(Trajectory { psi, completed })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use crate::{
        error::SolveError,
        grid::Grid,
        operator::assemble,
        packet::gaussian_packet,
        potential::Potential,
        utils::wf_norm,
    };
    use super::*;

    fn setup(nt: usize) -> (Grid, nd::Array1<C64>, Tridiagonal, Tridiagonal) {
        let grid = Grid::new(40.0, 161, 4.0, nt).unwrap();
        let V = Potential::infinite_square_well().build(grid.x());
        let (A, B) = assemble(grid.dx(), &V, grid.dt());
        let q0 = gaussian_packet(grid.x(), -5.0, 3.0, 2.0, true).unwrap();
        (grid, q0, A, B)
    }

    #[test]
    fn first_column_is_initial_state() {
        let (_, q0, A, B) = setup(50);
        let A0 = A.clone();
        let B0 = B.clone();
        let q0_copy = q0.clone();
        let traj = solve(&q0, &A, &B, 50).unwrap();
        assert_eq!(traj.column(0), q0.view());
        assert_eq!(traj.nx(), 161);
        assert_eq!(traj.nt(), 50);
        assert!(traj.is_complete());
        assert_eq!(A, A0);
        assert_eq!(B, B0);
        assert_eq!(q0, q0_copy);
    }

    #[test]
    fn norm_is_conserved() {
        let (grid, q0, A, B) = setup(400);
        let traj = solve(&q0, &A, &B, 400).unwrap();
        traj.psi().axis_iter(nd::Axis(1))
            .for_each(|qt| {
                assert_abs_diff_eq!(wf_norm(&qt, grid.dx()), 1.0, epsilon = 1e-8);
            });
    }

    #[test]
    fn columns_satisfy_step_equation() {
        let (_, q0, A, B) = setup(20);
        let traj = solve(&q0, &A, &B, 20).unwrap();
        for t in 1..20 {
            let lhs = A.dot(&traj.column(t)).unwrap();
            let rhs = B.dot(&traj.column(t - 1)).unwrap();
            lhs.iter().zip(&rhs)
                .for_each(|(l, r)| assert_abs_diff_eq!((l - r).norm(), 0.0, epsilon = 1e-10));
        }
    }

    #[test]
    fn replay_is_bit_identical() {
        let (_, q0, A, B) = setup(200);
        let a = solve(&q0, &A, &B, 200).unwrap();
        let b = solve(&q0, &A, &B, 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn observer_sees_every_step_and_can_abort() {
        let (_, q0, A, B) = setup(100);
        let mut seen: Vec<usize> = Vec::new();
        let traj = solve_with(&q0, &A, &B, 100, |t, _| {
            seen.push(t);
            if t == 30 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        }).unwrap();
        assert_eq!(seen, (1..=30).collect::<Vec<usize>>());
        assert_eq!(traj.completed(), 31);
        assert!(!traj.is_complete());
        assert_eq!(traj.psi_completed().ncols(), 31);
        assert!(traj.column(31).iter().all(|qk| *qk == C64::new(0.0, 0.0)));

        // the valid prefix agrees with an uninterrupted run
        let full = solve(&q0, &A, &B, 100).unwrap();
        assert_eq!(traj.psi_completed(), full.psi().slice(nd::s![.., ..31]));
    }

    #[test]
    fn singular_operator_is_an_error() {
        let (_, q0, _, B) = setup(10);
        let zero = C64::new(0.0, 0.0);
        let A = Tridiagonal::from_bands(q0.len(), zero, zero, zero);
        assert!(matches!(
            solve(&q0, &A, &B, 10),
            Err(SolveError::SingularOperator { row: 0 }),
        ));
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let (_, q0, A, B) = setup(10);
        let short = q0.slice(nd::s![..100]).to_owned();
        assert!(matches!(solve(&short, &A, &B, 10), Err(SolveError::Length(_))));
    }
}
