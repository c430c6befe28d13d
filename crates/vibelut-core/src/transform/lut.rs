//! 3D LUT baking, application, and `.cube` file I/O.
//!
//! # Format
//!
//! ```text
//! TITLE "Vibe-to-LUT Generated"
//! LUT_3D_SIZE 33
//!
//! 0.000000 0.000000 0.000000
//! 0.031250 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! Entries are written with red varying fastest, then green, then blue.
//! Downstream grading hosts depend on that nesting.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::transform::evaluate::grade;
use crate::transform::params::{ColorParams, PipelineConfig};

/// Grid size of every baked LUT.
pub const CUBE_SIZE: usize = 33;

/// Title written when the caller doesn't provide one.
pub const DEFAULT_TITLE: &str = "Vibe-to-LUT Generated";

/// A 3D lookup table for fast color transform application.
///
/// Entries are stored in file order: `index = r + size * (g + size * b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    pub title: String,
    /// Grid size per axis.
    pub size: usize,
    /// RGB output per grid node. Length = size³.
    pub data: Vec<[f32; 3]>,
}

impl Lut3D {
    /// Bake the full grading transform into a 33³ LUT.
    pub fn bake(params: &ColorParams, config: &PipelineConfig) -> Self {
        Self::from_fn(CUBE_SIZE, |rgb| grade(rgb, params, config))
    }

    /// A LUT that maps every input to itself.
    ///
    /// # Panics
    /// If `size < 2`.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 2, "LUT grid size must be at least 2");
        Self::from_fn(size, |rgb| rgb)
    }

    /// Validate and wrap file-ordered node data.
    pub fn from_data(size: usize, data: Vec<[f32; 3]>) -> CoreResult<Self> {
        if size < 2 {
            return Err(CoreError::LutSize(format!("grid size {size} is below 2")));
        }
        let expected = size
            .checked_mul(size)
            .and_then(|s| s.checked_mul(size))
            .ok_or_else(|| CoreError::LutSize(format!("grid size {size} is too large")))?;
        if data.len() != expected {
            return Err(CoreError::LutSize(format!(
                "expected {} entries for size {}, found {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            title: DEFAULT_TITLE.to_string(),
            size,
            data,
        })
    }

    fn from_fn(size: usize, f: impl Fn([f32; 3]) -> [f32; 3]) -> Self {
        let scale = 1.0 / (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(f([r as f32 * scale, g as f32 * scale, b as f32 * scale]));
                }
            }
        }
        Self {
            title: DEFAULT_TITLE.to_string(),
            size,
            data,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Node value at grid coordinates.
    pub fn node(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[r + self.size * (g + self.size * b)]
    }

    /// Apply this LUT to an RGB pixel using trilinear interpolation.
    ///
    /// Inputs outside `[0, 1]` are clamped to the grid edge.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let max = (self.size - 1) as f32;
        let mut lo = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for c in 0..3 {
            let pos = rgb[c].clamp(0.0, 1.0) * max;
            let i = (pos.floor() as usize).min(self.size - 2);
            lo[c] = i;
            frac[c] = pos - i as f32;
        }

        let mut out = [0.0f32; 3];
        for corner in 0..8 {
            let dr = corner & 1;
            let dg = (corner >> 1) & 1;
            let db = (corner >> 2) & 1;
            let w = weight(frac[0], dr) * weight(frac[1], dg) * weight(frac[2], db);
            if w == 0.0 {
                continue;
            }
            let v = self.node(lo[0] + dr, lo[1] + dg, lo[2] + db);
            for c in 0..3 {
                out[c] += v[c] * w;
            }
        }
        out
    }

    /// Serialize to `.cube` text.
    pub fn to_cube_string(&self) -> String {
        self.to_string()
    }

    /// Write `.cube` text to any writer.
    pub fn write_cube<W: Write>(&self, mut writer: W) -> CoreResult<()> {
        write!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }

    /// Save this 3D LUT to a `.cube` file.
    pub fn save_cube(&self, path: &Path) -> CoreResult<()> {
        let file = File::create(path)?;
        self.write_cube(BufWriter::new(file))?;
        tracing::info!("saved {}³ LUT to {}", self.size, path.display());
        Ok(())
    }

    /// Load a 3D LUT from a `.cube` file.
    pub fn load_cube(path: &Path) -> CoreResult<Self> {
        let file = File::open(path)?;
        parse_cube(BufReader::new(file))
    }
}

impl fmt::Display for Lut3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The title is a single quoted token.
        let title: String = self
            .title
            .chars()
            .map(|c| match c {
                '"' => '\'',
                '\r' | '\n' => ' ',
                c => c,
            })
            .collect();
        writeln!(f, "TITLE \"{title}\"")?;
        writeln!(f, "LUT_3D_SIZE {}", self.size)?;
        writeln!(f)?;
        for rgb in &self.data {
            writeln!(f, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
        }
        Ok(())
    }
}

fn weight(frac: f32, upper: usize) -> f32 {
    if upper == 1 { frac } else { 1.0 - frac }
}

/// Bake `params` under `config` and return `.cube` text with the default title.
pub fn bake_lut(params: &ColorParams, config: &PipelineConfig) -> String {
    Lut3D::bake(params, config).to_cube_string()
}

/// Parse a 3D LUT from `.cube` text.
pub fn parse_cube<R: BufRead>(reader: R) -> CoreResult<Lut3D> {
    let mut title = None;
    let mut size: Option<usize> = None;
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = idx + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("TITLE") {
            title = Some(rest.trim().trim_matches('"').to_string());
        } else if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            let n = rest.trim().parse().map_err(|_| parse_error(line_no, "invalid size value"))?;
            size = Some(n);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(parse_error(line_no, "expected 3D LUT, found 1D"));
        } else if let Some(rest) = line.strip_prefix("DOMAIN_MIN") {
            if parse_triplet(rest, line_no)? != [0.0; 3] {
                return Err(parse_error(line_no, "only a 0..1 domain is supported"));
            }
        } else if let Some(rest) = line.strip_prefix("DOMAIN_MAX") {
            if parse_triplet(rest, line_no)? != [1.0; 3] {
                return Err(parse_error(line_no, "only a 0..1 domain is supported"));
            }
        } else {
            data.push(parse_triplet(line, line_no)?);
        }
    }

    let size = size.ok_or_else(|| CoreError::LutSize("missing LUT_3D_SIZE".into()))?;
    let lut = Lut3D::from_data(size, data)?;
    Ok(match title {
        Some(title) => lut.with_title(title),
        None => lut,
    })
}

fn parse_triplet(text: &str, line_no: usize) -> CoreResult<[f32; 3]> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(parse_error(line_no, format!("expected 3 values, found {}", parts.len())));
    }
    let mut out = [0.0f32; 3];
    for (c, part) in parts.iter().enumerate() {
        out[c] = part
            .parse()
            .map_err(|_| parse_error(line_no, format!("invalid number '{part}'")))?;
    }
    Ok(out)
}

fn parse_error(line: usize, message: impl Into<String>) -> CoreError {
    CoreError::LutParse {
        line,
        message: message.into(),
    }
}
