//! Safe-range highlight compression.
//!
//! ```text
//! in <= KNEE → in
//! in >  KNEE → KNEE + x / (x + 0.5) × (1 − KNEE),   x = in − KNEE
//! ```
//!
//! Continuous and increasing above the knee, approaching but never reaching
//! 1.0. In f32 the quotient rounds to 1 for inputs past about 1e7, so the
//! result is capped at [`MAX_OUTPUT`].

/// Values at or below the knee pass through untouched.
pub const ROLLOFF_KNEE: f32 = 0.8;

/// Input excess at which the compressed excess reaches half the headroom.
const HALF_POINT: f32 = 0.5;

/// Largest f32 below 1.0.
pub const MAX_OUTPUT: f32 = 1.0 - f32::EPSILON / 2.0;

/// Compress `value` above the knee.
pub fn rolloff(value: f32) -> f32 {
    if value <= ROLLOFF_KNEE {
        return value;
    }
    let x = value - ROLLOFF_KNEE;
    let compressed = x / (x + HALF_POINT);
    (ROLLOFF_KNEE + compressed * (1.0 - ROLLOFF_KNEE)).min(MAX_OUTPUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_below_knee() {
        for v in [-0.5, 0.0, 0.3, 0.8] {
            assert_eq!(rolloff(v), v);
        }
    }

    #[test]
    fn test_known_value_at_one() {
        // 0.8 + (0.2 / 0.7) * 0.2
        assert!((rolloff(1.0) - 0.857_142_9).abs() < EPSILON);
    }

    #[test]
    fn test_strictly_increasing_above_knee() {
        let mut prev = rolloff(ROLLOFF_KNEE);
        for i in 1..=200 {
            let v = rolloff(ROLLOFF_KNEE + i as f32 * 0.01);
            assert!(v > prev, "not increasing at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_never_reaches_one() {
        for v in [0.9, 1.0, 2.0, 10.0, 100.0] {
            assert!(rolloff(v) < 1.0, "rolloff({v}) = {}", rolloff(v));
        }
    }

    #[test]
    fn test_huge_inputs_stay_below_one() {
        for v in [1e7, 1e8, 1e20, f32::MAX] {
            let out = rolloff(v);
            assert!(out < 1.0, "rolloff({v}) = {out}");
            assert_eq!(out, MAX_OUTPUT);
        }
        assert!(rolloff(1e6) <= rolloff(1e7));
    }

    #[test]
    fn test_continuous_at_knee() {
        let just_above = rolloff(ROLLOFF_KNEE + 1e-4);
        assert!((just_above - ROLLOFF_KNEE).abs() < 1e-4);
    }
}
