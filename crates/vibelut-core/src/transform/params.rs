//! Parameter records that define the entire color transform.
//!
//! `ColorParams` is the single source of truth for every grading adjustment,
//! and `PipelineConfig` carries the input encoding and the safe-range toggle.
//! Both are immutable for the duration of a grading call.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// A per-channel triplet used for lift/gamma/gain and balance multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// All channels zero.
    pub const ZERO: Self = Self::splat(0.0);
    /// All channels one.
    pub const ONE: Self = Self::splat(1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to every channel.
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    fn one() -> Self {
        Self::ONE
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Identifies how the source pixels are encoded.
///
/// Serialized with the display labels so records from the UI and the
/// blueprint export round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputColorSpace {
    /// Display-referred Rec.709. No input transform.
    #[default]
    #[serde(rename = "Rec.709")]
    Rec709,
    /// Unknown flat/log footage, decoded with a sigmoid approximation.
    #[serde(rename = "Generic Log")]
    LogGeneric,
    /// ARRI LogC3 with ALEXA Wide Gamut primaries.
    #[serde(rename = "Arri LogC3")]
    ArriLogC3,
    /// Sony S-Log3 with S-Gamut3.Cine primaries.
    #[serde(rename = "Sony S-Log3")]
    SonySLog3,
    /// Canon C-Log3 with Cinema Gamut primaries.
    #[serde(rename = "Canon C-Log3")]
    CanonCLog3,
}

impl InputColorSpace {
    /// Human-readable label for menus, blueprints and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rec709 => "Rec.709",
            Self::LogGeneric => "Generic Log",
            Self::ArriLogC3 => "Arri LogC3",
            Self::SonySLog3 => "Sony S-Log3",
            Self::CanonCLog3 => "Canon C-Log3",
        }
    }

    /// Every supported input encoding.
    pub fn all() -> &'static [Self] {
        const ALL: [InputColorSpace; 5] = [
            InputColorSpace::Rec709,
            InputColorSpace::LogGeneric,
            InputColorSpace::ArriLogC3,
            InputColorSpace::SonySLog3,
            InputColorSpace::CanonCLog3,
        ];
        &ALL
    }

    /// Look up an encoding by its label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|space| space.label().eq_ignore_ascii_case(label.trim()))
    }

    /// True for every encoding other than native Rec.709.
    pub const fn is_log(&self) -> bool {
        !matches!(self, Self::Rec709)
    }
}

/// Pipeline toggles owned by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Encoding of the source pixels.
    pub input_color_space: InputColorSpace,
    /// Compress highlights above the knee instead of hard-clipping them.
    pub safe_range: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_color_space: InputColorSpace::Rec709,
            safe_range: true,
        }
    }
}

/// Every tool writes here. The LUT baker, the full-buffer pass and the
/// blueprint export all read the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorParams {
    /// CDL offset. Default: `{0, 0, 0}`.
    pub lift: Rgb,
    /// CDL power, applied as `1 / gamma`. Default: `{1, 1, 1}`.
    pub gamma: Rgb,
    /// CDL slope. Default: `{1, 1, 1}`.
    pub gain: Rgb,
    /// Saturation multiplier. 1.0 = neutral.
    pub saturation: f32,
    /// Warm/cool shift, -1.0 (cool) to 1.0 (warm).
    pub temperature: f32,
    /// Green/magenta shift, -1.0 to 1.0.
    pub tint: f32,
    /// Contrast multiplier. 1.0 = neutral.
    pub contrast: f32,
    /// Contrast pivot. Default: 0.435.
    pub contrast_pivot: f32,
    /// Skin protection strength, 0.0 to 1.0.
    pub skin_protect: f32,
    /// White balance multipliers from the grey-world estimator.
    #[serde(default = "Rgb::one")]
    pub balance: Rgb,

    /// Free-text rationale from the suggestion service. Never read by the math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_thought: Option<String>,
    /// Palette label from the suggestion service. Never read by the math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_palette: Option<String>,
}

impl Default for ColorParams {
    /// Produces an identity (no-op) grade.
    fn default() -> Self {
        Self {
            lift: Rgb::ZERO,
            gamma: Rgb::ONE,
            gain: Rgb::ONE,
            saturation: 1.0,
            temperature: 0.0,
            tint: 0.0,
            contrast: 1.0,
            contrast_pivot: 0.435,
            skin_protect: 0.0,
            balance: Rgb::ONE,
            ai_thought: None,
            ai_palette: None,
        }
    }
}

impl ColorParams {
    /// Parse a record returned by the external suggestion service.
    ///
    /// The service omits `balance`, which then defaults to `{1, 1, 1}`.
    pub fn from_suggestion_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Clamp every field into the range the suggestion service documents.
    ///
    /// `balance` is left alone; it comes from the estimator, not the service.
    pub fn clamp_to_suggestion_ranges(mut self) -> Self {
        self.lift = self.lift.map(|v| v.clamp(-0.2, 0.2));
        self.gamma = self.gamma.map(|v| v.clamp(0.5, 2.0));
        self.gain = self.gain.map(|v| v.clamp(0.5, 2.0));
        self.saturation = self.saturation.clamp(0.0, 2.0);
        self.temperature = self.temperature.clamp(-1.0, 1.0);
        self.tint = self.tint.clamp(-1.0, 1.0);
        self.contrast = self.contrast.clamp(0.5, 1.5);
        self.contrast_pivot = self.contrast_pivot.clamp(0.0, 1.0);
        self.skin_protect = self.skin_protect.clamp(0.0, 1.0);
        self
    }

    /// Adopt a suggestion while keeping the manual overrides
    /// (`balance` and `skin_protect`) from `self`.
    pub fn merge_suggestion(&self, suggestion: ColorParams) -> Self {
        Self {
            balance: self.balance,
            skin_protect: self.skin_protect,
            ..suggestion
        }
    }
}
