//! Products of a tagged left operand with a dense right operand

use log::debug;
use ndarray::{Array2, Axis};

use super::Operand;
use crate::error::{Error, Result};

/// Computes `left * right` as a dense matrix.
///
/// The strategy follows the storage of `left`:
///
/// - dense: an ordinary `ndarray` product
/// - compressed sparse: a `sprs` sparse × dense product that never touches
///   the implicit zeros of `left`
/// - permutation: no arithmetic at all; row `i` of the result is row
///   `perm[i] - 1` of `right`
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] when the column count of `left`
/// differs from the row count of `right`.
///
/// # Examples
///
/// ```
/// use gridwork::{multiply, Operand, Permutation};
/// use ndarray::array;
///
/// let p = Operand::from(Permutation::from_one_based(vec![2, 1]).unwrap());
/// let b = array![[1.0, 2.0], [3.0, 4.0]];
///
/// assert_eq!(multiply(&p, &b).unwrap(), array![[3.0, 4.0], [1.0, 2.0]]);
/// ```
pub fn multiply(left: &Operand, right: &Array2<f64>) -> Result<Array2<f64>> {
    let left_shape = left.shape();
    let right_shape = right.dim();
    if left_shape.1 != right_shape.0 {
        return Err(Error::DimensionMismatch {
            left: left_shape,
            right: right_shape,
        });
    }

    debug!(
        "multiplying {:?} by dense {}x{}",
        left, right_shape.0, right_shape.1
    );

    let product = match left {
        Operand::Dense(a) => a.dot(right),
        Operand::CompressedSparse(a) => a * right,
        Operand::Permutation(p) if p.is_empty() => Array2::zeros((0, right_shape.1)),
        Operand::Permutation(p) => {
            let rows: Vec<usize> = p.zero_based().collect();
            right.select(Axis(0), &rows)
        }
    };
    Ok(product)
}

/// Multiplies a dense `left`, reinterpreted through a runtime class tag, by `right`.
///
/// `tag` picks the representation `left` is converted to before the product
/// (see [`Operand::from_dense_tagged`]). An unknown tag is reported as
/// [`Error::UnrecognizedRepresentation`] instead of falling back to a dense
/// product.
pub fn multiply_tagged(tag: &str, left: &Array2<f64>, right: &Array2<f64>) -> Result<Array2<f64>> {
    let operand = Operand::from_dense_tagged(tag, left)?;
    multiply(&operand, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{reference_matmul, Permutation};
    use ndarray::array;

    #[test]
    fn test_dense_product() {
        // A = [1 2; 0 3], B = [4 5; 6 7] => [16 19; 18 21]
        let a = Operand::Dense(array![[1.0, 2.0], [0.0, 3.0]]);
        let b = array![[4.0, 5.0], [6.0, 7.0]];
        assert_eq!(multiply(&a, &b).unwrap(), array![[16.0, 19.0], [18.0, 21.0]]);
    }

    #[test]
    fn test_sparse_product_matches_reference() {
        let dense_a = array![[1.0, 0.0, 0.0], [0.0, 0.0, 2.0], [3.0, 0.0, 4.0]];
        let b = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let a = Operand::sparse_from_dense(&dense_a);

        assert_eq!(multiply(&a, &b).unwrap(), reference_matmul(&dense_a, &b));
    }

    #[test]
    fn test_permutation_selects_rows() {
        let p = Permutation::from_one_based(vec![3, 1, 2]).unwrap();
        let b = array![[1.0, 1.5], [2.0, 2.5], [3.0, 3.5]];
        let product = multiply(&Operand::Permutation(p), &b).unwrap();

        assert_eq!(product, array![[3.0, 3.5], [1.0, 1.5], [2.0, 2.5]]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Operand::Dense(Array2::zeros((2, 3)));
        let b = Array2::zeros((2, 2));
        let err = multiply(&a, &b).unwrap_err();

        assert!(matches!(
            err,
            Error::DimensionMismatch { left: (2, 3), right: (2, 2) }
        ));
    }

    #[test]
    fn test_tagged_unknown_is_error() {
        let a = Array2::eye(2);
        let b = Array2::ones((2, 2));
        assert!(matches!(
            multiply_tagged("dgTMatrix", &a, &b),
            Err(Error::UnrecognizedRepresentation(tag)) if tag == "dgTMatrix"
        ));
    }

    #[test]
    fn test_tagged_paths_agree() {
        let a = array![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let b = array![[1.0, -1.0], [2.0, -2.0], [3.0, -3.0]];
        let expected = reference_matmul(&a, &b);

        for tag in ["matrix", "dgCMatrix", "pMatrix"] {
            assert_eq!(multiply_tagged(tag, &a, &b).unwrap(), expected, "{}", tag);
        }
    }
}
