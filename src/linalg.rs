//! Small dense linear-algebra kernel for the affine-projection hot loop.
//!
//! The Gram system is M×M with M in the single digits, so the factorization
//! is a plain index-loop Cholesky rather than a BLAS call.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, ArrayView1};

/// Solves `a · z = b` for symmetric positive-definite `a` via Cholesky
/// factorization (`a = L·Lᵀ`, then two triangular substitutions).
///
/// Only the lower triangle of `a` is read. If `a` has drifted away from
/// positive definiteness, the factorization takes the square root of a
/// negative pivot and the returned vector carries NaN; the caller sees the
/// degradation rather than a masked result.
pub(crate) fn cholesky_solve(a: &Array2<f64>, b: ArrayView1<'_, f64>) -> Array1<f64> {
    let m = b.len();
    let mut l = Array2::<f64>::zeros((m, m));

    for j in 0..m {
        let mut s = a[[j, j]];
        for k in 0..j {
            s -= l[[j, k]] * l[[j, k]];
        }
        l[[j, j]] = s.sqrt();
        for i in (j + 1)..m {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = s / l[[j, j]];
        }
    }

    // forward substitution: L·y = b
    let mut y = Array1::<f64>::zeros(m);
    for i in 0..m {
        let mut s = b[i];
        for k in 0..i {
            s -= l[[i, k]] * y[k];
        }
        y[i] = s / l[[i, i]];
    }

    // back substitution: Lᵀ·z = y
    let mut z = Array1::<f64>::zeros(m);
    for i in (0..m).rev() {
        let mut s = y[i];
        for k in (i + 1)..m {
            s -= l[[k, i]] * z[k];
        }
        z[i] = s / l[[i, i]];
    }

    z
}
