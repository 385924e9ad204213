//! Packed tridiagonal matrices and assembly of the Crank-Nicolson evolution
//! operators.
//!
//! See [`docs`][crate::docs#crank-nicolson] for the derivation.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    Arr1,
    error::{ LengthError, SolveError },
};

pub type SolveResult<T> = Result<T, SolveError>;

/// A square complex matrix with non-zero entries only on the main diagonal and
/// the two diagonals adjacent to it.
///
/// Stored as three arrays of length `n`, indexed by row: `sub[i]` is the entry
/// at `(i, i - 1)`, `diag[i]` at `(i, i)`, and `sup[i]` at `(i, i + 1)`. The
/// out-of-range entries `sub[0]` and `sup[n - 1]` are always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    sub: nd::Array1<C64>,
    diag: nd::Array1<C64>,
    sup: nd::Array1<C64>,
}

impl Tridiagonal {
    /// Create a new matrix from its three bands, each given as a full row-index
    /// array of length `n`.
    ///
    /// `sub[0]` and `sup[n - 1]` are ignored and set to zero. Fails if the
    /// bands differ in length.
    pub fn new(
        mut sub: nd::Array1<C64>,
        diag: nd::Array1<C64>,
        mut sup: nd::Array1<C64>,
    ) -> Result<Self, LengthError>
    {
        LengthError::check(&sub, &diag)?;
        LengthError::check(&sup, &diag)?;
        let n = diag.len();
        if n > 0 {
            sub[0] = C64::zero();
            sup[n - 1] = C64::zero();
        }
        Ok(Self { sub, diag, sup })
    }

    /// Create a matrix with constant values along each band.
    pub fn from_bands(n: usize, sub: C64, diag: C64, sup: C64) -> Self {
        let mut sub = nd::Array1::from_elem(n, sub);
        let mut sup = nd::Array1::from_elem(n, sup);
        if n > 0 {
            sub[0] = C64::zero();
            sup[n - 1] = C64::zero();
        }
        Self { sub, diag: nd::Array1::from_elem(n, diag), sup }
    }

    /// Number of rows (and columns).
    pub fn n(&self) -> usize { self.diag.len() }

    /// Sub-diagonal, indexed by row.
    pub fn sub(&self) -> &nd::Array1<C64> { &self.sub }

    /// Main diagonal.
    pub fn diag(&self) -> &nd::Array1<C64> { &self.diag }

    /// Super-diagonal, indexed by row.
    pub fn sup(&self) -> &nd::Array1<C64> { &self.sup }

    /// Return the `(i, j)`-th entry, which is zero outside the three bands.
    ///
    /// *Panics if either index is out of bounds*.
    pub fn get(&self, i: usize, j: usize) -> C64 {
        let n = self.n();
        assert!(i < n && j < n, "index ({i}, {j}) out of bounds for {n}×{n}");
        if i == j {
            self.diag[i]
        } else if j + 1 == i {
            self.sub[i]
        } else if i + 1 == j {
            self.sup[i]
        } else {
            C64::zero()
        }
    }

    /// Expand into a dense `n`×`n` array.
    pub fn to_dense(&self) -> nd::Array2<C64> {
        let n = self.n();
        let mut A: nd::Array2<C64> = nd::Array2::zeros((n, n));
        for i in 0..n {
            A[[i, i]] = self.diag[i];
            if i > 0 { A[[i, i - 1]] = self.sub[i]; }
            if i + 1 < n { A[[i, i + 1]] = self.sup[i]; }
        }
        A
    }

    /// Compute the matrix-vector product `self · q` into `out`.
    pub fn dot_into<S, T>(&self, q: &Arr1<S>, out: &mut Arr1<T>)
        -> Result<(), LengthError>
    where
        S: nd::Data<Elem = C64>,
        T: nd::DataMut<Elem = C64>,
    {
        let n = self.n();
        LengthError::check_len(q.len(), n)?;
        LengthError::check_len(out.len(), n)?;
        for i in 0..n {
            let mut acc = self.diag[i] * q[i];
            if i > 0 { acc += self.sub[i] * q[i - 1]; }
            if i + 1 < n { acc += self.sup[i] * q[i + 1]; }
            out[i] = acc;
        }
        Ok(())
    }

    /// Compute the matrix-vector product `self · q`.
    pub fn dot<S>(&self, q: &Arr1<S>) -> Result<nd::Array1<C64>, LengthError>
    where S: nd::Data<Elem = C64>
    {
        let mut out: nd::Array1<C64> = nd::Array1::zeros(self.n());
        self.dot_into(q, &mut out)?;
        Ok(out)
    }

    /// Solve `self · q = y` for `q` via the Thomas algorithm, writing the
    /// solution into `q`.
    ///
    /// `scratch` holds the modified super-diagonal and must also have length
    /// `n`. No pivoting is performed; this is stable for the diagonally
    /// dominant matrices produced by [`assemble`], and fails with
    /// [`SolveError::SingularOperator`] on any zero or non-finite pivot.
    pub fn solve_into<S, T, U>(
        &self,
        y: &Arr1<S>,
        q: &mut Arr1<T>,
        scratch: &mut Arr1<U>,
    ) -> SolveResult<()>
    where
        S: nd::Data<Elem = C64>,
        T: nd::DataMut<Elem = C64>,
        U: nd::DataMut<Elem = C64>,
    {
        let n = self.n();
        LengthError::check_len(y.len(), n)?;
        LengthError::check_len(q.len(), n)?;
        LengthError::check_len(scratch.len(), n)?;
        if n == 0 { return Ok(()); }

        // forward sweep
        let mut pivot = self.diag[0];
        check_pivot(pivot, 0)?;
        scratch[0] = self.sup[0] / pivot;
        q[0] = y[0] / pivot;
        for i in 1..n {
            pivot = self.diag[i] - self.sub[i] * scratch[i - 1];
            check_pivot(pivot, i)?;
            scratch[i] = self.sup[i] / pivot;
            q[i] = (y[i] - self.sub[i] * q[i - 1]) / pivot;
        }

        // back substitution
        for i in (0..n - 1).rev() {
            let qip1 = q[i + 1];
            q[i] -= scratch[i] * qip1;
        }
        Ok(())
    }

    /// Solve `self · q = y` for `q`.
    ///
    /// ```
    /// use ndarray as nd;
    /// use num_complex::Complex64 as C64;
    /// use cnspace::operator::Tridiagonal;
    ///
    /// let one = C64::new(1.0, 0.0);
    /// let A = Tridiagonal::from_bands(3, -one, 2.0 * one, -one);
    /// let q: nd::Array1<C64> = nd::array![one, 2.0 * one, 3.0 * one];
    /// let y = A.dot(&q).unwrap();
    /// let sol = A.solve(&y).unwrap();
    /// assert!(sol.iter().zip(&q).all(|(a, b)| (a - b).norm() < 1e-12));
    /// ```
    pub fn solve<S>(&self, y: &Arr1<S>) -> SolveResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        let mut q: nd::Array1<C64> = nd::Array1::zeros(self.n());
        let mut scratch: nd::Array1<C64> = nd::Array1::zeros(self.n());
        self.solve_into(y, &mut q, &mut scratch)?;
        Ok(q)
    }
}

fn check_pivot(pivot: C64, row: usize) -> SolveResult<()> {
    (pivot.is_finite() && !pivot.is_zero())
        .then_some(())
        .ok_or(SolveError::SingularOperator { row })
}

/// Assemble the implicit (`A`) and explicit (`B`) Crank-Nicolson operators for
/// spatial step `dx`, potential `V`, and time step `dt`, in natural units.
///
/// With `α = i dt / (2 dx²)` and `β = i dt / 2`:
/// ```text
/// A[k, k] = 1 + α + β V[k]      A[k, k ± 1] = -α / 2
/// B[k, k] = 1 - α - β V[k]      B[k, k ± 1] = +α / 2
/// ```
/// The first and last rows have no out-of-range neighbor, which pins the
/// wavefunction to the grid. A single step is then `A · ψ(t + dt) = B · ψ(t)`.
pub fn assemble<S>(dx: f64, V: &Arr1<S>, dt: f64) -> (Tridiagonal, Tridiagonal)
where S: nd::Data<Elem = f64>
{
    let n = V.len();
    let alpha = C64::i() * dt / (2.0 * dx.powi(2));
    let beta = C64::i() * dt / 2.0;
    let mut A = Tridiagonal::from_bands(n, -alpha / 2.0, C64::zero(), -alpha / 2.0);
    let mut B = Tridiagonal::from_bands(n, alpha / 2.0, C64::zero(), alpha / 2.0);
    nd::Zip::from(&mut A.diag).and(&mut B.diag).and(V)
        .for_each(|Ak, Bk, &Vk| {
            *Ak = 1.0 + alpha + beta * Vk;
            *Bk = 1.0 - alpha - beta * Vk;
        });
    tracing::debug!(n, dx, dt, "assembled crank-nicolson operators");
    (A, B)
}
