//! Transform pipeline — parameter definitions, evaluation, LUT and
//! blueprint export.

pub mod blueprint;
pub mod evaluate;
pub mod lut;
pub mod params;
