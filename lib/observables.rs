//! Expectation values and densities computed from a trajectory.
//!
//! Functions taking a 2D amplitude array treat each column as the state at one
//! time point and return one value per column. All integrals use the same
//! trapezoidal rule as [`wf_norm`], and all of them require `x` to be uniformly
//! spaced with the same length as each column.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    Arr2,
    error::LengthError,
    utils::{ fft, fft_freq, fft_shift, trapz, wf_norm },
};

pub type ObsResult<T> = Result<T, LengthError>;

fn spacing<S>(x: &Arr1<S>) -> f64
where S: nd::Data<Elem = f64>
{
    if x.len() > 1 { x[1] - x[0] } else { 0.0 }
}

// apply `f` to every column, paired with the spatial coordinates
fn per_column<S, T, F>(x: &Arr1<S>, psi: &Arr2<T>, mut f: F)
    -> ObsResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
    F: FnMut(f64, nd::ArrayView1<C64>) -> f64,
{
    LengthError::check_len(x.len(), psi.nrows())?;
    let dx = spacing(x);
    Ok(psi.axis_iter(nd::Axis(1)).map(|q| f(dx, q)).collect())
}

/// Squared modulus |ψ|² of every amplitude.
pub fn probability_density<S, D>(psi: &nd::ArrayBase<S, D>) -> nd::Array<f64, D>
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
{
    psi.mapv(|qk| qk.norm_sqr())
}

/// Total probability ∫|ψ|² dx at every time.
pub fn norm<S, T>(x: &Arr1<S>, psi: &Arr2<T>) -> ObsResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    per_column(x, psi, |dx, q| wf_norm(&q, dx))
}

/// Position expectation value ⟨x⟩ at every time.
pub fn expected_position<S, T>(x: &Arr1<S>, psi: &Arr2<T>)
    -> ObsResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    per_column(x, psi, |dx, q| moment(x, &q, dx, 1))
}

/// Position variance ⟨x²⟩ - ⟨x⟩² at every time.
pub fn position_variance<S, T>(x: &Arr1<S>, psi: &Arr2<T>)
    -> ObsResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    per_column(x, psi, |dx, q| {
        let m1 = moment(x, &q, dx, 1);
        let m2 = moment(x, &q, dx, 2);
        m2 - m1.powi(2)
    })
}

/// Probability contained between `a` and `b` (grid points on either end
/// included) at every time.
///
/// The integral runs over the selected grid points only, so a region covering
/// the whole grid reproduces [`norm`].
pub fn probability_in<S, T>(x: &Arr1<S>, psi: &Arr2<T>, a: f64, b: f64)
    -> ObsResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let inside: Vec<usize>
        = x.iter().enumerate()
        .filter(|(_, xk)| **xk >= lo && **xk <= hi)
        .map(|(k, _)| k)
        .collect();
    per_column(x, psi, |dx, q| {
        let density: nd::Array1<f64>
            = inside.iter().map(|&k| q[k].norm_sqr()).collect();
        trapz(&density, dx)
    })
}

// k-th moment of |q|² over x
fn moment<S, T>(x: &Arr1<S>, q: &Arr1<T>, dx: f64, k: i32) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    let integrand: nd::Array1<f64>
        = x.iter().zip(q)
        .map(|(xj, qj)| xj.powi(k) * qj.norm_sqr())
        .collect();
    trapz(&integrand, dx)
}

/// Momentum-space probability density of a single state.
///
/// Returns wavenumber coordinates in increasing order alongside the density
/// |φ(k)|², normalized so that its trapezoidal integral over `k` is 1.
pub fn momentum_density<S>(q: &Arr1<S>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = C64>
{
    let n = q.len();
    let k: nd::Array1<f64> = fft_shift(&fft_freq(n, dx)).mapv(|f| TAU * f);
    let mut p: nd::Array1<f64> = fft_shift(&fft(q)).mapv(|phi| phi.norm_sqr());
    let dk = if n > 1 { k[1] - k[0] } else { 0.0 };
    let total: f64 = trapz(&p, dk);
    if total > 0.0 {
        p.map_inplace(|pk| { *pk /= total; });
    }
    (k, p)
}

/// Momentum expectation value ⟨k⟩ of a single state, computed from
/// [`momentum_density`].
pub fn expected_momentum<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    let (k, p) = momentum_density(q, dx);
    let dk = if k.len() > 1 { k[1] - k[0] } else { 0.0 };
    trapz(&(&k * &p), dk)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use crate::packet::gaussian_packet;
    use super::*;

    fn two_columns() -> (nd::Array1<f64>, nd::Array2<C64>) {
        let x: nd::Array1<f64> = nd::Array1::linspace(-50.0, 50.0, 801);
        let q1 = gaussian_packet(&x, -10.0, 2.0, 3.0, true).unwrap();
        let q2 = gaussian_packet(&x, 20.0, -1.0, 2.0, true).unwrap();
        let psi = nd::stack(nd::Axis(1), &[q1.view(), q2.view()]).unwrap();
        (x, psi)
    }

    #[test]
    fn gaussian_moments() {
        let (x, psi) = two_columns();
        let n = norm(&x, &psi).unwrap();
        let ex = expected_position(&x, &psi).unwrap();
        let var = position_variance(&x, &psi).unwrap();
        assert_abs_diff_eq!(n[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(n[1], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(ex[0], -10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ex[1], 20.0, epsilon = 1e-6);
        // |ψ|² is a Gaussian of standard deviation width/√2
        assert_abs_diff_eq!(var[0], 4.5, epsilon = 1e-4);
        assert_abs_diff_eq!(var[1], 2.0, epsilon = 1e-4);
    }

    #[test]
    fn regional_probability() {
        let (x, psi) = two_columns();
        let left = probability_in(&x, &psi, -50.0, 0.0).unwrap();
        let right = probability_in(&x, &psi, 0.0, 50.0).unwrap();
        assert_abs_diff_eq!(left[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(right[0], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(left[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right[1], 1.0, epsilon = 1e-6);
        let all = probability_in(&x, &psi, 50.0, -50.0).unwrap();
        let n = norm(&x, &psi).unwrap();
        assert_eq!(all, n);
    }

    #[test]
    fn density_shape() {
        let (_, psi) = two_columns();
        let rho = probability_density(&psi);
        assert_eq!(rho.dim(), psi.dim());
        assert!(rho.iter().all(|&r| r >= 0.0));
    }

    #[test]
    fn momentum_of_moving_packet() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-50.0, 50.0, 1024);
        let dx = x[1] - x[0];
        let q = gaussian_packet(&x, 0.0, 3.0, 4.0, true).unwrap();
        let (k, p) = momentum_density(&q, dx);
        assert_eq!(k.len(), 1024);
        assert!(k.iter().zip(k.iter().skip(1)).all(|(a, b)| a < b));
        let dk = k[1] - k[0];
        assert_abs_diff_eq!(trapz(&p, dk), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(expected_momentum(&q, dx), 3.0, epsilon = 1e-3);
    }

    #[test]
    fn mismatched_grid() {
        let (_, psi) = two_columns();
        let x: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, 10);
        assert!(norm(&x, &psi).is_err());
        assert!(expected_position(&x, &psi).is_err());
    }
}
