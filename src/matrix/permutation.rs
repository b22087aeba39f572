//! Permutation matrices stored as index vectors

use std::fmt;

use ndarray::Array2;

use crate::error::{Error, Result};

/// A permutation matrix `P` of size `n x n`
///
/// Stored the way the host stores it: `perm[i]` is the *one-based* column
/// holding the single 1 in row `i`. Multiplying `P * B` therefore picks row
/// `perm[i] - 1` of `B` as row `i` of the result.
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Creates a permutation from one-based indices
    ///
    /// Fails unless every value in `1..=n` appears exactly once.
    pub fn from_one_based(perm: Vec<usize>) -> Result<Self> {
        let n = perm.len();
        let mut seen = vec![false; n];
        for (pos, &p) in perm.iter().enumerate() {
            if p == 0 || p > n {
                return Err(Error::InvalidPermutation(format!(
                    "index {} at position {} is outside 1..={}",
                    p, pos, n
                )));
            }
            if std::mem::replace(&mut seen[p - 1], true) {
                return Err(Error::InvalidPermutation(format!(
                    "index {} appears more than once",
                    p
                )));
            }
        }
        Ok(Self { perm })
    }

    /// Creates a permutation from zero-based indices
    pub fn from_zero_based(perm: &[usize]) -> Result<Self> {
        let one_based = perm
            .iter()
            .enumerate()
            .map(|(pos, &p)| {
                p.checked_add(1).ok_or_else(|| {
                    Error::InvalidPermutation(format!(
                        "index {} at position {} is outside 0..{}",
                        p,
                        pos,
                        perm.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_one_based(one_based)
    }

    /// The identity permutation of size `n`
    pub fn identity(n: usize) -> Self {
        Self { perm: (1..=n).collect() }
    }

    /// Recovers a permutation from a dense 0/1 matrix
    ///
    /// The matrix must be square with exactly one 1 in every row and
    /// column and zeros elsewhere.
    pub fn from_dense(m: &Array2<f64>) -> Result<Self> {
        let (n_rows, n_cols) = m.dim();
        if n_rows != n_cols {
            return Err(Error::InvalidPermutation(format!(
                "matrix is {}x{}, not square",
                n_rows, n_cols
            )));
        }

        let mut perm = Vec::with_capacity(n_rows);
        for (i, row) in m.outer_iter().enumerate() {
            let mut hit = None;
            for (j, &v) in row.iter().enumerate() {
                if v == 0.0 {
                    continue;
                }
                if v != 1.0 || hit.is_some() {
                    return Err(Error::InvalidPermutation(format!(
                        "row {} is not a unit row",
                        i
                    )));
                }
                hit = Some(j);
            }
            match hit {
                Some(j) => perm.push(j + 1),
                None => {
                    return Err(Error::InvalidPermutation(format!("row {} is empty", i)));
                }
            }
        }

        // Column uniqueness is checked here
        Self::from_one_based(perm)
    }

    pub fn len(&self) -> usize {
        self.perm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// The stored one-based indices
    pub fn one_based(&self) -> &[usize] {
        &self.perm
    }

    /// Row indices to select from the right operand, zero-based
    pub fn zero_based(&self) -> impl Iterator<Item = usize> + '_ {
        self.perm.iter().map(|&p| p - 1)
    }

    /// The permutation `Q` with `Q * P == I`
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.perm.len()];
        for (i, j) in self.zero_based().enumerate() {
            inv[j] = i + 1;
        }
        Self { perm: inv }
    }

    /// Materialises the permutation as a dense 0/1 matrix
    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.perm.len();
        let mut m = Array2::zeros((n, n));
        for (i, j) in self.zero_based().enumerate() {
            m[[i, j]] = 1.0;
        }
        m
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation({:?})", self.perm)
    }
}
