//! Float

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;
