//! Numeric foundation for ray compositing.

#[macro_use]
extern crate log;

pub mod common;
pub mod error;
pub mod tensor;
