//! VibeLUT Core — domain layer for color grading.
//!
//! This crate contains all color science, grading math, LUT and blueprint
//! export, and scope computation. No threads and no framework dependencies;
//! every grading function is pure over its inputs.

pub mod color_management;
pub mod error;
pub mod grading;
pub mod image;
pub mod render;
pub mod scopes;
pub mod transform;

// Re-exports for convenience.
pub use error::{CoreError, CoreResult};
pub use grading::auto_balance::estimate_balance;
pub use image::{PixelBuffer, Rgba8};
pub use render::{RenderOutput, render};
pub use scopes::ScopeData;
pub use transform::blueprint::{CdlSop, NodeBlueprint};
pub use transform::evaluate::grade;
pub use transform::lut::{Lut3D, bake_lut};
pub use transform::params::{ColorParams, InputColorSpace, PipelineConfig, Rgb};
