//! Transfer function (OETF/EOTF) implementations for camera log curves and
//! the Rec.709 reference gamma.
//!
//! Transfer functions convert between non-linear (encoded) and linear light
//! values. All of them are total over the reals: out-of-range inputs are
//! not special-cased here, clamping happens later in the operator chain.

use crate::transform::params::InputColorSpace;

/// A transfer function that converts between linear and non-linear encodings.
pub trait TransferFunction: Send + Sync {
    /// Convert from non-linear (encoded) to linear light.
    fn to_linear(&self, encoded: f32) -> f32;

    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f32) -> f32;
}

/// Get the decode curve for an input encoding.
///
/// Returns `None` for Rec.709, which enters the grade without decoding.
pub fn get_transfer(space: InputColorSpace) -> Option<&'static dyn TransferFunction> {
    match space {
        InputColorSpace::Rec709 => None,
        InputColorSpace::LogGeneric => Some(&GenericLogTransfer),
        InputColorSpace::ArriLogC3 => Some(&ArriLogC3Transfer),
        InputColorSpace::SonySLog3 => Some(&SLog3Transfer),
        InputColorSpace::CanonCLog3 => Some(&CLog3Transfer),
    }
}

// ---------------------------------------------------------------------------
// Rec.709 (ITU-R BT.709 OETF)
// ---------------------------------------------------------------------------

/// Rec.709 reference gamma: linear slope below the knee, power law above.
///
/// ```text
/// to_encoded: L < 0.018 → 4.5 × L
///             L ≥ 0.018 → 1.099 × L^0.45 − 0.099
///
/// to_linear:  V < 0.081 → V / 4.5
///             V ≥ 0.081 → ((V + 0.099) / 1.099)^(1/0.45)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Rec709Transfer;

impl Rec709Transfer {
    const CUT: f32 = 0.018;
    const CUT_ENCODED: f32 = 0.081;
    const SLOPE: f32 = 4.5;
    const A: f32 = 1.099;
    const B: f32 = 0.099;
    const POWER: f32 = 0.45;
}

impl TransferFunction for Rec709Transfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        if encoded < Self::CUT_ENCODED {
            encoded / Self::SLOPE
        } else {
            ((encoded + Self::B) / Self::A).powf(1.0 / Self::POWER)
        }
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        if linear < Self::CUT {
            linear * Self::SLOPE
        } else {
            Self::A * linear.powf(Self::POWER) - Self::B
        }
    }
}

/// Re-encode a linear value with the Rec.709 reference gamma.
pub fn linear_to_rec709(linear: f32) -> f32 {
    Rec709Transfer.to_encoded(linear)
}

// ---------------------------------------------------------------------------
// ARRI LogC3 (ALEXA classic, EI 800)
// ---------------------------------------------------------------------------

/// ARRI LogC3 transfer function for ALEXA classic cameras at EI 800.
///
/// # Reference
/// ARRI LogC Curve — Usage in VFX (2017)
///
/// ```text
/// to_linear: t <= E_CUT → (t - F) / E
///            t >  E_CUT → (10^((t - D) / C) - B) / A
///
/// from_linear: x <= CUT → E × x + F
///              x >  CUT → C × log10(A × x + B) + D
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArriLogC3Transfer;

impl ArriLogC3Transfer {
    // EI 800 constants from the ARRI white paper
    const A: f32 = 5.555556;
    const B: f32 = 0.052272;
    const C: f32 = 0.247190;
    const D: f32 = 0.385537;
    const CUT: f32 = 0.010591;
    // Linear segment uses separate E/F constants
    const E: f32 = 5.367655;
    const F: f32 = 0.092809;
    const E_CUT: f32 = 0.149_658; // E * CUT + F
}

impl TransferFunction for ArriLogC3Transfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        if encoded <= Self::E_CUT {
            (encoded - Self::F) / Self::E
        } else {
            (10.0_f32.powf((encoded - Self::D) / Self::C) - Self::B) / Self::A
        }
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        if linear <= Self::CUT {
            Self::E * linear + Self::F
        } else {
            Self::C * (Self::A * linear + Self::B).log10() + Self::D
        }
    }
}

// ---------------------------------------------------------------------------
// Sony S-Log3
// ---------------------------------------------------------------------------

/// Sony S-Log3 transfer function.
///
/// # Reference
/// Sony Technical Summary for S-Gamut3.Cine/S-Log3 (2014)
///
/// ```text
/// to_linear: t >= 171.2102946929 / 1023 → 10^((t × 1023 − 420) / 261.5) × 0.19 − 0.01
///            t <  171.2102946929 / 1023 → (t × 1023 − 95) × 0.01125 / (171.2102946929 − 95)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SLog3Transfer;

impl SLog3Transfer {
    const THRESHOLD: f32 = 0.011_25;
    const THRESHOLD_E: f32 = 0.167_361; // 171.2102946929 / 1023
}

impl TransferFunction for SLog3Transfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        if encoded >= Self::THRESHOLD_E {
            0.19 * 10.0_f32.powf((encoded * 1023.0 - 420.0) / 261.5) - 0.01
        } else {
            (encoded * 1023.0 - 95.0) * 0.011_25 / (171.210_3 - 95.0)
        }
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        if linear >= Self::THRESHOLD {
            (420.0 + 261.5 * ((linear + 0.01) / 0.19).log10()) / 1023.0
        } else {
            (linear * (171.210_3 - 95.0) / 0.011_25 + 95.0) / 1023.0
        }
    }
}

// ---------------------------------------------------------------------------
// Canon C-Log3
// ---------------------------------------------------------------------------

/// Canon C-Log3 transfer function with a hard black clip.
///
/// The log segment of Canon's curve, `(10^((t − 0.12783901) / 0.36726845) − 1) / 14.98325`,
/// folded into a single exponential with an offset. Code values below the
/// clip are treated as sensor noise and decode to zero.
///
/// # Reference
/// Canon Log 3 Gamma Curve White Paper (2016)
///
/// ```text
/// to_linear: t <  CLIP → 0
///            t >= CLIP → 10^((t − A) / B) − C
///
/// from_linear: x <= 0 → A + B × log10(C)
///              x >  0 → A + B × log10(x + C)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CLog3Transfer;

impl CLog3Transfer {
    const A: f32 = 0.559_599; // 0.12783901 + B * log10(14.98325)
    const B: f32 = 0.367_268_45;
    const C: f32 = 0.066_741_1; // 1 / 14.98325
    const CLIP: f32 = 0.0975;
}

impl TransferFunction for CLog3Transfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        if encoded < Self::CLIP {
            0.0
        } else {
            10.0_f32.powf((encoded - Self::A) / Self::B) - Self::C
        }
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        Self::A + Self::B * (linear.max(0.0) + Self::C).log10()
    }
}

// ---------------------------------------------------------------------------
// Generic log (logistic approximation)
// ---------------------------------------------------------------------------

/// Sigmoid stand-in for flat footage of unknown provenance.
///
/// ```text
/// to_linear:  s = 1 / (1 + e^(−5 × (t − 0.5)))
///             out = (s − 0.07) × 1.15
///
/// from_linear: s = x / 1.15 + 0.07
///              out = 0.5 − ln(1/s − 1) / 5
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GenericLogTransfer;

impl GenericLogTransfer {
    const SLOPE: f32 = 5.0;
    const MIDPOINT: f32 = 0.5;
    const LIFT: f32 = 0.07;
    const SCALE: f32 = 1.15;
}

impl TransferFunction for GenericLogTransfer {
    fn to_linear(&self, encoded: f32) -> f32 {
        let sigmoid = 1.0 / (1.0 + (-Self::SLOPE * (encoded - Self::MIDPOINT)).exp());
        (sigmoid - Self::LIFT) * Self::SCALE
    }

    fn to_encoded(&self, linear: f32) -> f32 {
        // The sigmoid only reaches (0, 1); keep the logit finite at the ends.
        let s = (linear / Self::SCALE + Self::LIFT).clamp(1e-6, 1.0 - 1e-6);
        Self::MIDPOINT - (1.0 / s - 1.0).ln() / Self::SLOPE
    }
}
