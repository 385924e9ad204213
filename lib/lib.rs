#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for the numerical solution of
//! the one-dimensional time-dependent Schrödinger equation (TDSE) for a single
//! particle in a static potential via the Crank-Nicolson scheme.
//!
//! The crate is organized leaf-first:
//! - [`grid`]: uniform spatial and temporal sampling
//! - [`potential`]: the built-in potential variants
//! - [`packet`]: complex Gaussian wave packets
//! - [`operator`]: packed tridiagonal matrices and assembly of the two
//!   Crank-Nicolson evolution operators
//! - [`propagate`]: the time-stepping loop
//!
//! on top of which sit [`observables`] for post-processing of a trajectory,
//! [`config`] for loading run parameters, and [`sim`], which bundles all of the
//! above into a single object.
//!
//! All quantities are in natural units (*ħ* = *m* = 1). See [`docs`] for
//! theoretical background.

pub mod error;
pub mod grid;
pub mod potential;
pub mod packet;
pub mod operator;
pub mod propagate;
pub mod observables;
pub mod config;
pub mod sim;
pub mod utils;

pub mod docs;

/// Default barrier height used to approximate the walls of an infinite square
/// well.
pub const DEF_WALL: f64 = 1e10;

/// Default number of time steps between progress events emitted by the
/// propagator.
pub(crate) const DEF_TRACE_STRIDE: usize = 500;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
