//! Parameter transitions.
//!
//! Interpolates every numeric field of `ColorParams` between two grades.
//! The caller owns the frame clock and feeds elapsed time in.

use std::time::Duration;

use crate::transform::params::{ColorParams, Rgb};

// Exact at both endpoints.
fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

fn lerp_rgb(start: Rgb, end: Rgb, t: f32) -> Rgb {
    Rgb::new(
        lerp(start.r, end.r, t),
        lerp(start.g, end.g, t),
        lerp(start.b, end.b, t),
    )
}

/// Ease-out cubic: fast start, gentle landing.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

impl ColorParams {
    /// Linear interpolation of every numeric field. `t` is clamped to `[0, 1]`.
    ///
    /// Text metadata is not interpolated; it is taken from `to`.
    pub fn lerp(from: &ColorParams, to: &ColorParams, t: f32) -> ColorParams {
        let t = t.clamp(0.0, 1.0);
        ColorParams {
            lift: lerp_rgb(from.lift, to.lift, t),
            gamma: lerp_rgb(from.gamma, to.gamma, t),
            gain: lerp_rgb(from.gain, to.gain, t),
            saturation: lerp(from.saturation, to.saturation, t),
            temperature: lerp(from.temperature, to.temperature, t),
            tint: lerp(from.tint, to.tint, t),
            contrast: lerp(from.contrast, to.contrast, t),
            contrast_pivot: lerp(from.contrast_pivot, to.contrast_pivot, t),
            skin_protect: lerp(from.skin_protect, to.skin_protect, t),
            balance: lerp_rgb(from.balance, to.balance, t),
            ai_thought: to.ai_thought.clone(),
            ai_palette: to.ai_palette.clone(),
        }
    }
}

/// An eased transition between two grades.
#[derive(Debug, Clone)]
pub struct ParamTransition {
    pub from: ColorParams,
    pub to: ColorParams,
    pub duration: Duration,
}

impl ParamTransition {
    pub fn new(from: ColorParams, to: ColorParams, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Linear progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Parameters at `elapsed` since the transition started.
    pub fn sample(&self, elapsed: Duration) -> ColorParams {
        let t = ease_out_cubic(self.progress(elapsed));
        ColorParams::lerp(&self.from, &self.to, t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}
