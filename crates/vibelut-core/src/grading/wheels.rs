//! ASC CDL (slope/offset/power) primary correction.
//!
//! The UI names the three controls gain, lift and gamma. They map onto the
//! CDL in the standard order:
//!
//! ```text
//!   x   = in × gain[c] + lift[c]
//!   out = pow(max(x, 0), 1 / max(gamma[c], 0.1))
//! ```
//!
//! ```text
//!   Input ──→ ×Gain ──→ +Lift ──→ max(0) ──→ ^(1/Gamma) ──→ Output
//! ```

use crate::transform::params::Rgb;

/// Smallest gamma used as an exponent denominator.
pub const GAMMA_FLOOR: f32 = 0.1;

/// Apply the CDL slope, offset and power per channel.
///
/// Identity values: lift `{0,0,0}`, gamma `{1,1,1}`, gain `{1,1,1}`.
pub fn apply_cdl(rgb: [f32; 3], lift: Rgb, gamma: Rgb, gain: Rgb) -> [f32; 3] {
    let lift = lift.to_array();
    let gamma = gamma.to_array();
    let gain = gain.to_array();

    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        let x = rgb[c] * gain[c] + lift[c];
        out[c] = apply_power(x, gamma[c]);
    }
    out
}

/// CDL power with a floored gamma and negative bases clamped to zero.
fn apply_power(x: f32, gamma: f32) -> f32 {
    // Clamp to zero before power to avoid NaN from negative bases
    let base = x.max(0.0);
    let gamma = gamma.max(GAMMA_FLOOR);
    if gamma == 1.0 {
        return base;
    }
    base.powf(1.0 / gamma)
}
