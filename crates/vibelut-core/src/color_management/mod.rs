//! Color management — camera decode curves, gamut matrices, and the input device transform.

pub mod color_space;
pub mod idt;
pub mod transfer;
