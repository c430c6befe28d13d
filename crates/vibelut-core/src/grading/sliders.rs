//! Slider-based grading adjustments (temperature/tint, contrast, saturation).

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Strength of one unit of temperature or tint, in code values.
const SHIFT_SCALE: f32 = 0.15;

/// Rec. 709 weighted luminance of an RGB triplet.
pub fn luma(rgb: [f32; 3]) -> f32 {
    rgb[0] * LUMA_REC709[0] + rgb[1] * LUMA_REC709[1] + rgb[2] * LUMA_REC709[2]
}

/// Apply temperature and tint as additive channel shifts.
///
/// ```text
/// R += temperature × 0.15
/// B −= temperature × 0.15
/// G += tint × 0.15
/// ```
///
/// Both at 0.0 produce no change.
pub fn apply_temperature_tint(rgb: [f32; 3], temperature: f32, tint: f32) -> [f32; 3] {
    let temp_shift = temperature * SHIFT_SCALE;
    let tint_shift = tint * SHIFT_SCALE;
    [rgb[0] + temp_shift, rgb[1] + tint_shift, rgb[2] - temp_shift]
}

/// Apply linear contrast around a pivot.
///
/// ```text
/// out = (in − pivot) × contrast + pivot
/// ```
///
/// `contrast = 1.0` and any pivot produce no change.
pub fn apply_contrast(rgb: [f32; 3], contrast: f32, pivot: f32) -> [f32; 3] {
    if contrast == 1.0 {
        return rgb;
    }
    rgb.map(|v| (v - pivot) * contrast + pivot)
}

/// Scale chroma relative to Rec. 709 luminance.
///
/// ```text
/// luma = dot(rgb, rec709_weights)
/// out  = luma + (rgb − luma) × saturation
/// ```
///
/// `saturation = 1.0` produces no change.
pub fn apply_saturation(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    if saturation == 1.0 {
        return rgb;
    }
    let l = luma(rgb);
    rgb.map(|v| l + (v - l) * saturation)
}
