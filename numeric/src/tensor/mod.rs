//! N-dimensional tensors

mod check;
mod ops;

// Re-export
pub use check::*;
pub use ops::*;
