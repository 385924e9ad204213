//! Theoretical background.
//!
//! # Contents
//! - [Units](#units)
//! - [Discretization](#discretization)
//! - [Crank-Nicolson](#crank-nicolson)
//! - [Boundaries](#boundaries)
//! - [Solving the implicit step](#solving-the-implicit-step)
//! - [Wave packets and observables](#wave-packets-and-observables)
//!
//! # Units
//! All functions in this crate work with the time-dependent Schrödinger
//! equation (TDSE) in natural units, *ħ* = *m* = 1:
//! ```text
//!   ∂ψ       1 ∂²ψ
//! i -- = - - --- + V(x) ψ = H ψ
//!   ∂t       2 ∂x²
//! ```
//! Lengths, times, wavenumbers, and energies are all dimensionless. A packet
//! with central wavenumber *κ* then has kinetic energy *κ*²/2 and moves with
//! group velocity *κ*.
//!
//! # Discretization
//! Space is sampled on a uniform grid of *N*<sub>*x*</sub> points covering
//! \[-*L*/2, *L*/2\] and time on a uniform grid of *N*<sub>*t*</sub> points
//! covering \[0, *t*<sub>max</sub>\]:
//! ```text
//! x[k] = -L/2 + k δx,  k ∊ {0, ..., Nx - 1}
//! t[n] = n δt,         n ∊ {0, ..., Nt - 1}
//! ψ[k, n] = ψ(x[k], t[n])
//! ```
//! The second derivative is replaced by the usual three-point difference,
//! which turns the Hamiltonian into a real, symmetric, tridiagonal matrix:
//! ```text
//! (H ψ)[k] = - (ψ[k + 1] - 2 ψ[k] + ψ[k - 1]) / (2 δx²) + V[k] ψ[k]
//! ```
//!
//! # Crank-Nicolson
//! Formally, a single step in time is *ψ*(*t* + *δt*) =
//! exp(-*i* *H* *δt*) *ψ*(*t*). The explicit (forward Euler) approximation
//! exp(-*i* *H* *δt*) ≈ 1 - *i* *H* *δt* is not unitary and is unstable for
//! every choice of *δt* when applied to the TDSE. Instead, the Crank-Nicolson
//! scheme uses the Cayley form
//! ```text
//!                  1 - i H δt/2
//! exp(-i H δt) ≈ --------------
//!                  1 + i H δt/2
//! ```
//! which is second-order accurate in *δt*, unconditionally stable, and exactly
//! unitary whenever *H* is Hermitian. Writing the step as a linear system,
//! ```text
//! A ψ[·, n + 1] = B ψ[·, n]
//!
//! A = 1 + i H δt/2
//! B = 1 - i H δt/2
//! ```
//! and defining *α* = *i* *δt* / (2 *δx*²) and *β* = *i* *δt* / 2, the
//! non-zero entries are
//! ```text
//! A[k, k] = 1 + α + β V[k]        A[k, k ± 1] = -α/2
//! B[k, k] = 1 - α - β V[k]        B[k, k ± 1] = +α/2
//! ```
//! Both matrices are tridiagonal and fixed for the whole run, since the
//! potential is static. For a real potential, *B* is the element-wise complex
//! conjugate of *A*.
//!
//! # Boundaries
//! The first and last rows of *A* and *B* simply drop the neighbor that would
//! lie outside the grid. There is no periodic wrap-around and no ghost point;
//! this is equivalent to holding *ψ* = 0 just outside the domain. An infinite
//! square well is represented on top of this by a very large but finite
//! potential on the two boundary points themselves (see
//! [`DEF_WALL`][crate::DEF_WALL]), which decouples them from the interior.
//!
//! # Solving the implicit step
//! Each step requires the solution of a tridiagonal system. This is done with
//! the Thomas algorithm (Gaussian elimination without pivoting specialized to
//! three bands), which costs *O*(*N*<sub>*x*</sub>) per step. Elimination is
//! stable here because *A* is diagonally dominant: |1 + *α* + *β* *V*\[*k*\]|
//! ≥ |*α*| with equality only in degenerate cases. A zero or non-finite pivot
//! is reported as an error rather than propagated.
//!
//! Steps are inherently sequential: *ψ*\[·, *n* + 1\] depends on the complete
//! state *ψ*\[·, *n*\].
//!
//! # Wave packets and observables
//! Initial states are built from Gaussian packets
//! ```text
//!              1               (x - x₀)²
//! ψ(x) = ----------- exp(- ----------- ) exp(i κ (x - x₀))
//!         σ √(2π)               2 σ²
//! ```
//! which are then rescaled so that the trapezoidal estimate of ∫|*ψ*|² d*x*
//! over the grid is exactly 1. The same trapezoidal rule is used for every
//! other integral in [`observables`][crate::observables], so that norms
//! computed after normalization agree to floating-point precision.
