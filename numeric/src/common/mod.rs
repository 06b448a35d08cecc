//! Common numeric types

mod axis;
mod float;

// Re-export
pub use axis::*;
pub use float::*;
