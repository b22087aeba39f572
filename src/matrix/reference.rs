//! Reference implementation of dense matrix multiplication
//!
//! This provides a baseline for correctness testing of the dispatched
//! products. It is a plain triple loop with no blocking or vectorisation.

use ndarray::{Array2, ArrayView2};
use num_traits::Float;

/// Multiplies two dense matrices with a naive triple loop
///
/// # Panics
///
/// Panics if the inner dimensions differ.
pub fn reference_matmul(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    reference_matmul_view(a.view(), b.view())
}

/// [`reference_matmul`] over borrowed views
pub fn reference_matmul_view(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Array2<f64> {
    let (n_rows, inner) = a.dim();
    let (b_rows, n_cols) = b.dim();
    assert_eq!(
        inner, b_rows,
        "Matrix dimensions must be compatible for multiplication"
    );

    let mut c = Array2::zeros((n_rows, n_cols));
    for i in 0..n_rows {
        for k in 0..inner {
            let a_ik = a[[i, k]];
            if a_ik == 0.0 {
                continue;
            }
            for j in 0..n_cols {
                c[[i, j]] += a_ik * b[[k, j]];
            }
        }
    }
    c
}

/// Whether two matrices have the same shape and agree entrywise
///
/// Entries are compared with a tolerance relative to their magnitude,
/// falling back to an absolute `tol` near zero.
pub fn approx_eq<T: Float>(a: &Array2<T>, b: &Array2<T>, tol: T) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(&x, &y)| {
        let scale = T::one().max(x.abs()).max(y.abs());
        (x - y).abs() <= tol * scale
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_reference_multiplication() {
        // A = [1 2; 0 3]
        // B = [4 5; 6 7]
        // Expected result: C = A*B = [16 19; 18 21]
        let a = array![[1.0, 2.0], [0.0, 3.0]];
        let b = array![[4.0, 5.0], [6.0, 7.0]];

        let c = reference_matmul(&a, &b);
        assert_eq!(c, array![[16.0, 19.0], [18.0, 21.0]]);
    }

    #[test]
    fn test_identity_multiplication() {
        let diagonal = array![[5.0, 0.0, 0.0], [0.0, 6.0, 0.0], [0.0, 0.0, 7.0]];
        let result = reference_matmul(&Array2::eye(3), &diagonal);
        assert_eq!(result, diagonal);
    }

    #[test]
    fn test_rectangular() {
        let a = array![[1.0, 2.0, 3.0]];
        let b = array![[1.0], [1.0], [1.0]];
        assert_eq!(reference_matmul(&a, &b), array![[6.0]]);
    }

    #[test]
    #[should_panic(expected = "Matrix dimensions must be compatible")]
    fn test_incompatible() {
        reference_matmul(&Array2::zeros((2, 3)), &Array2::zeros((2, 3)));
    }

    #[test]
    fn test_approx_eq() {
        let a = array![[1.0, 2.0]];
        assert!(approx_eq(&a, &array![[1.0 + 1e-12, 2.0]], 1e-9));
        assert!(!approx_eq(&a, &array![[1.1, 2.0]], 1e-9));
        assert!(!approx_eq(&a, &array![[1.0], [2.0]], 1e-9));
    }
}
