//! Quadrature and transform tools shared by normalization and observables.
//!
//! Every integral in this crate goes through [`trapz`], so that a state
//! normalized against [`wf_norm`] has a norm of exactly 1 up to floating-point
//! error.

use std::ops::{ Add, Mul };
use ndarray::{ self as nd, concatenate, Ix1 };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use rustfft as fft;

/// Integrate using the trapezoidal rule over uniformly spaced samples.
///
/// Returns zero for fewer than two samples.
///
/// ```
/// use ndarray as nd;
/// use cnspace::utils::trapz;
///
/// let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 11);
/// let y = x.mapv(|xk| 2.0 * xk);
/// assert!((trapz(&y, 0.1) - 1.0).abs() < 1e-12);
/// ```
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> A
where
    S: nd::Data<Elem = A>,
    A: Copy + Zero + Add<A, Output = A> + Mul<f64, Output = A>,
{
    let n: usize = y.len();
    if n < 2 { return A::zero(); }
    let inner: A
        = y.iter().skip(1).take(n - 2).copied()
        .fold(A::zero(), A::add);
    (y[0] + inner * 2.0 + y[n - 1]) * (dx / 2.0)
}

/// Calculate the norm (total probability) of a wavefunction.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    trapz(&q.mapv(|qk| qk.norm_sqr()), dx)
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `dx`.
pub fn fft_freq(n: usize, dx: f64) -> nd::Array1<f64> {
    let np = (n + 1) / 2;
    let fp: nd::Array1<f64>
        = (0..np)
        .map(|k| k as f64 / (n as f64 * dx))
        .collect();
    let fm: nd::Array1<f64>
        = (1..n - np + 1).rev()
        .map(|k| -(k as f64) / (n as f64 * dx))
        .collect();
    concatenate!(nd::Axis(0), fp, fm)
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut buf: Vec<C64> = x.iter().copied().collect();
    let mut plan = fft::FftPlanner::new();
    let fft_plan = plan.plan_fft_forward(buf.len());
    fft_plan.process(&mut buf);
    nd::Array1::from_vec(buf)
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m) = x.view().split_at(nd::Axis(0), (n + 1) / 2);
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn trapz_linear_exact() {
        let y: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0, 3.0];
        assert_abs_diff_eq!(trapz(&y, 0.5), 2.25);
        let y: nd::Array1<C64> = y.mapv(|yk| C64::new(yk, -yk));
        let z: C64 = trapz(&y, 0.5);
        assert_abs_diff_eq!(z.re, 2.25);
        assert_abs_diff_eq!(z.im, -2.25);
        let short: nd::Array1<f64> = nd::array![4.0];
        assert_eq!(trapz(&short, 1.0), 0.0);
    }

    #[test]
    fn norm_of_step() {
        let q: nd::Array1<C64> = nd::Array1::from_elem(11, C64::new(0.0, 2.0));
        assert_abs_diff_eq!(wf_norm(&q, 0.1), 4.0, epsilon = 1e-12);
        let zero: nd::Array1<C64> = nd::Array1::zeros(5);
        assert_eq!(wf_norm(&zero, 1.0), 0.0);
    }

    #[test]
    fn freq_layout() {
        let f = fft_freq(4, 0.25);
        assert_eq!(f.to_vec(), vec![0.0, 1.0, -2.0, -1.0]);
        let f = fft_freq(5, 0.2);
        assert_eq!(f.to_vec(), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
        assert_eq!(fft_shift(&f).to_vec(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        let g = fft_freq(4, 0.25);
        assert_eq!(fft_shift(&g).to_vec(), vec![-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn fft_of_constant() {
        let x: nd::Array1<C64> = nd::Array1::from_elem(8, C64::new(1.0, 0.0));
        let f = fft(&x);
        assert_abs_diff_eq!(f[0].re, 8.0, epsilon = 1e-12);
        assert!(f.iter().skip(1).all(|fk| fk.norm() < 1e-12));
    }
}
