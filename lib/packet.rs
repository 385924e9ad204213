//! Complex Gaussian wave packets.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::GridError,
    grid::GridResult,
    utils::wf_norm,
};

/// Sample a Gaussian wave packet over spatial coordinates `x`.
///
/// The amplitude at each point is
/// ```text
///   exp(-(x - center)² / (2 width²))
///   -------------------------------- exp(i wavenumber (x - center))
///           width √(2π)
/// ```
/// which is then rescaled so that its trapezoidal norm over `x` is exactly 1
/// if `normalize` is set. `x` is assumed to be uniformly spaced.
///
/// Superpositions are formed by summing the outputs of multiple calls.
///
/// Fails if `width` is not finite and positive, or if `normalize` is set and
/// the packet has no weight on the grid to normalize (e.g. its center lies far
/// outside the domain).
///
/// ```
/// use ndarray as nd;
/// use cnspace::{ packet::gaussian_packet, utils::wf_norm };
///
/// let x: nd::Array1<f64> = nd::Array1::linspace(-50.0, 50.0, 401);
/// let q = gaussian_packet(&x, -10.0, 5.0, 5.0, true).unwrap();
/// assert!((wf_norm(&q, 0.25) - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_packet<S>(
    x: &Arr1<S>,
    center: f64,
    wavenumber: f64,
    width: f64,
    normalize: bool,
) -> GridResult<nd::Array1<C64>>
where S: nd::Data<Elem = f64>
{
    GridError::check_width(width)?;
    let a = (width * TAU.sqrt()).recip();
    let mut q: nd::Array1<C64>
        = x.mapv(|xk| {
            let u = xk - center;
            a * (-u.powi(2) / (2.0 * width.powi(2))).exp()
                * C64::cis(wavenumber * u)
        });
    if normalize && x.len() > 1 {
        let dx = x[1] - x[0];
        let N = wf_norm(&q, dx);
        GridError::check_norm(center, N)?;
        let N = N.sqrt();
        q.map_inplace(|qk| { *qk /= N; });
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    fn grid() -> (nd::Array1<f64>, f64) {
        let x: nd::Array1<f64> = nd::Array1::linspace(-50.0, 50.0, 400);
        let dx = x[1] - x[0];
        (x, dx)
    }

    #[test]
    fn normalized_packets_have_unit_norm() {
        let (x, dx) = grid();
        for &(center, k, width) in [
            (-33.3, 5.0, 5.0),
            (0.0, -2.0, 1.0),
            (45.0, 0.0, 10.0),
            (33.3, -5.0, 4.0),
        ].iter() {
            let q = gaussian_packet(&x, center, k, width, true).unwrap();
            assert_abs_diff_eq!(wf_norm(&q, dx), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn unnormalized_amplitude() {
        let (x, _) = grid();
        let width = 5.0;
        let q = gaussian_packet(&x, 0.0, 3.0, width, false).unwrap();
        let a = 1.0 / (width * TAU.sqrt());
        // peak modulus sits at the grid point nearest the center
        let peak = q.iter().map(|qk| qk.norm()).fold(0.0, f64::max);
        assert!(peak <= a + 1e-15);
        assert!(peak > 0.99 * a);
        // modulus is independent of the wavenumber
        let q0 = gaussian_packet(&x, 0.0, 0.0, width, false).unwrap();
        q.iter().zip(&q0)
            .for_each(|(qk, q0k)| {
                assert_abs_diff_eq!(qk.norm(), q0k.norm(), epsilon = 1e-15);
            });
    }

    #[test]
    fn phase_winds_with_wavenumber() {
        let x: nd::Array1<f64> = nd::array![-1.0, 0.0, 1.0];
        let q = gaussian_packet(&x, 0.0, 2.0, 1.0, false).unwrap();
        assert_abs_diff_eq!(q[1].im, 0.0);
        assert_abs_diff_eq!(q[2].arg(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q[0].arg(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn superposition_renormalizes() {
        let (x, dx) = grid();
        let mut q = gaussian_packet(&x, -33.3, 5.0, 5.0, true).unwrap();
        q += &gaussian_packet(&x, 33.3, -5.0, 4.0, true).unwrap();
        // the two packets barely overlap, so the norms add
        assert_abs_diff_eq!(wf_norm(&q, dx), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_bad_width() {
        let (x, _) = grid();
        assert!(gaussian_packet(&x, 0.0, 1.0, 0.0, true).is_err());
        assert!(gaussian_packet(&x, 0.0, 1.0, -1.0, true).is_err());
        assert!(gaussian_packet(&x, 0.0, 1.0, f64::INFINITY, true).is_err());
    }

    #[test]
    fn unnormalizable_packet_is_an_error() {
        let (x, _) = grid();
        assert!(matches!(
            gaussian_packet(&x, 1000.0, 5.0, 5.0, true),
            Err(GridError::ZeroNorm(c)) if c == 1000.0,
        ));
        // without normalization the underflowed packet is returned as-is
        let q = gaussian_packet(&x, 1000.0, 5.0, 5.0, false).unwrap();
        assert!(q.iter().all(|qk| qk.norm() == 0.0));
        assert!(matches!(
            gaussian_packet(&x, f64::NAN, 5.0, 5.0, true),
            Err(GridError::ZeroNorm(_)),
        ));
    }
}
