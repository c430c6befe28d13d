//! Grading tools — wheels, sliders, skin protection, highlight rolloff,
//! and automatic adjustments.

pub mod animation;
pub mod auto_balance;
pub mod rolloff;
pub mod skin;
pub mod sliders;
pub mod wheels;
