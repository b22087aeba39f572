// Matrix operands and representation-dispatched products

pub mod multiply;
pub mod operand;
pub mod permutation;
pub mod reference;

pub use multiply::{multiply, multiply_tagged};
pub use operand::{Operand, Representation};
pub use permutation::Permutation;
pub use reference::{approx_eq, reference_matmul, reference_matmul_view};
