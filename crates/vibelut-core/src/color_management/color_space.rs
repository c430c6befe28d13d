//! Camera gamut definitions and 3x3 matrix transforms into Rec.709 primaries.
//!
//! The matrices go straight from camera primaries to Rec.709 rather than
//! through an ACES intermediate. They are fixed constants.

use glam::{Mat3, Vec3};

pub use crate::transform::params::InputColorSpace;

/// ALEXA Wide Gamut → Rec.709.
const AWG_TO_REC709: [[f32; 3]; 3] = [
    [1.6175, -0.5373, -0.0802],
    [-0.0706, 1.3346, -0.2640],
    [-0.0211, -0.2270, 1.2481],
];

/// S-Gamut3.Cine → Rec.709.
const SGAMUT3_CINE_TO_REC709: [[f32; 3]; 3] = [
    [1.6475, -0.3561, -0.2914],
    [-0.0645, 1.1882, -0.1237],
    [-0.0094, -0.0384, 1.0478],
];

/// Canon Cinema Gamut → Rec.709.
const CINEMA_GAMUT_TO_REC709: [[f32; 3]; 3] = [
    [1.8688, -0.7302, -0.1386],
    [-0.1287, 1.3191, -0.1904],
    [-0.0197, -0.1508, 1.1705],
];

/// A 3x3 color matrix for linear color space conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub Mat3);

impl ColorMatrix {
    /// Build from row-major coefficients, the layout camera vendors publish.
    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        // glam is column-major
        Self(Mat3::from_cols_array_2d(&rows).transpose())
    }

    /// Apply this matrix to an RGB triplet.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        (self.0 * Vec3::from_array(rgb)).to_array()
    }
}

/// Camera-primaries → Rec.709 matrix for an input encoding.
///
/// Returns `None` for Rec.709 and the generic log curve, which carry no
/// gamut information.
pub fn gamut_matrix(space: InputColorSpace) -> Option<ColorMatrix> {
    let rows = match space {
        InputColorSpace::ArriLogC3 => AWG_TO_REC709,
        InputColorSpace::SonySLog3 => SGAMUT3_CINE_TO_REC709,
        InputColorSpace::CanonCLog3 => CINEMA_GAMUT_TO_REC709,
        InputColorSpace::Rec709 | InputColorSpace::LogGeneric => return None,
    };
    Some(ColorMatrix::from_rows(rows))
}
