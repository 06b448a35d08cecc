//! Volumetric Ray Compositing

#[macro_use]
extern crate log;

mod ray_radiance;

// Re-export
pub use ray_radiance::*;
