//! Input device transforms (IDT).
//!
//! Converts camera-native code values into display-referred Rec.709 so the
//! creative operators can work directly on them. Camera curves go
//! decode → gamut matrix → Rec.709 gamma; the generic log curve only decodes.
//! This trades absolute colorimetric accuracy for a short pipeline with no
//! scene-linear intermediate.

use crate::color_management::color_space::gamut_matrix;
use crate::color_management::transfer::{get_transfer, linear_to_rec709};
use crate::transform::params::InputColorSpace;

/// Apply the input device transform for `space` to one sample.
pub fn apply_input_transform(rgb: [f32; 3], space: InputColorSpace) -> [f32; 3] {
    let Some(tf) = get_transfer(space) else {
        return rgb;
    };

    let linear = rgb.map(|v| tf.to_linear(v));
    match gamut_matrix(space) {
        Some(matrix) => matrix.apply(linear).map(linear_to_rec709),
        None => linear,
    }
}
