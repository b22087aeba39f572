//! Left-hand operands tagged with their storage representation

use std::fmt;
use std::str::FromStr;

use log::warn;
use ndarray::Array2;
use sprs::{CsMat, TriMat};

use super::Permutation;
use crate::error::{Error, Result};

/// The storage kinds a left operand can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Row-major dense array
    Dense,
    /// Compressed sparse column storage
    CompressedSparse,
    /// Permutation stored as an index vector
    Permutation,
}

impl Representation {
    /// Parses a host class tag
    ///
    /// Accepts the host's class names (`matrix`, `dgCMatrix`, `pMatrix`) as
    /// well as the short names `dense`, `csc` and `permutation`. Any other
    /// tag, including other sparse classes such as `dgTMatrix`, is rejected.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        match tag {
            "matrix" => return Ok(Representation::Dense),
            "dgCMatrix" => return Ok(Representation::CompressedSparse),
            "pMatrix" => return Ok(Representation::Permutation),
            _ => {}
        }
        match tag.to_ascii_lowercase().as_str() {
            "dense" => Ok(Representation::Dense),
            "csc" | "sparse" => Ok(Representation::CompressedSparse),
            "permutation" => Ok(Representation::Permutation),
            _ => {
                warn!("rejecting matrix representation tag '{}'", tag);
                Err(Error::UnrecognizedRepresentation(tag.to_string()))
            }
        }
    }

    /// The host class tag for this representation
    pub fn tag(&self) -> &'static str {
        match self {
            Representation::Dense => "matrix",
            Representation::CompressedSparse => "dgCMatrix",
            Representation::Permutation => "pMatrix",
        }
    }
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Representation::from_tag(s)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A left operand of a product, carrying its own storage
#[derive(Clone)]
pub enum Operand {
    Dense(Array2<f64>),
    CompressedSparse(CsMat<f64>),
    Permutation(Permutation),
}

impl Operand {
    pub fn representation(&self) -> Representation {
        match self {
            Operand::Dense(_) => Representation::Dense,
            Operand::CompressedSparse(_) => Representation::CompressedSparse,
            Operand::Permutation(_) => Representation::Permutation,
        }
    }

    /// (rows, cols) of the logical matrix
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Operand::Dense(m) => m.dim(),
            Operand::CompressedSparse(m) => m.shape(),
            Operand::Permutation(p) => (p.len(), p.len()),
        }
    }

    /// Wraps a sparse matrix, converting it to column storage if needed
    pub fn sparse(m: CsMat<f64>) -> Self {
        if m.is_csc() {
            Operand::CompressedSparse(m)
        } else {
            Operand::CompressedSparse(m.to_csc())
        }
    }

    /// Builds a column-compressed operand from a dense array, dropping exact zeros
    pub fn sparse_from_dense(m: &Array2<f64>) -> Self {
        let mut triplets = TriMat::new(m.dim());
        for ((i, j), &v) in m.indexed_iter() {
            if v != 0.0 {
                triplets.add_triplet(i, j, v);
            }
        }
        Operand::CompressedSparse(triplets.to_csc())
    }

    /// Converts a dense array into the representation named by `tag`
    ///
    /// This is the boundary where a runtime class tag is turned into the
    /// closed [`Representation`] set; unknown tags and arrays that do not
    /// fit the requested representation are errors.
    pub fn from_dense_tagged(tag: &str, m: &Array2<f64>) -> Result<Self> {
        match Representation::from_tag(tag)? {
            Representation::Dense => Ok(Operand::Dense(m.clone())),
            Representation::CompressedSparse => Ok(Operand::sparse_from_dense(m)),
            Representation::Permutation => Ok(Operand::Permutation(Permutation::from_dense(m)?)),
        }
    }

    /// Materialises the logical matrix densely
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            Operand::Dense(m) => m.clone(),
            Operand::CompressedSparse(m) => m.to_dense(),
            Operand::Permutation(p) => p.to_dense(),
        }
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        write!(f, "Operand::{:?}({} × {}", self.representation(), rows, cols)?;
        if let Operand::CompressedSparse(m) = self {
            write!(f, ", nnz: {}", m.nnz())?;
        }
        write!(f, ")")
    }
}

impl From<Array2<f64>> for Operand {
    fn from(m: Array2<f64>) -> Self {
        Operand::Dense(m)
    }
}

impl From<Permutation> for Operand {
    fn from(p: Permutation) -> Self {
        Operand::Permutation(p)
    }
}
