//! Pixel buffer representation for the grading pipeline.

use bytemuck::{Pod, Zeroable};

use crate::error::{CoreError, CoreResult};

/// One 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color channels normalized to `[0, 1]`.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Quantize a `[0, 1]` sample to 8 bits, rounding to nearest.
pub fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Row-major RGBA8 image. Source buffers are never mutated by the pipeline;
/// every grading pass allocates a fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. Fails fast when the length doesn't match the
    /// dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Build from typed pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> CoreResult<Self> {
        let data = bytemuck::cast_slice(&pixels).to_vec();
        Self::new(width, height, data)
    }

    /// A buffer filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        let count = width as usize * height as usize;
        let data = bytemuck::cast_slice(&vec![pixel; count]).to_vec();
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixels as typed RGBA values.
    pub fn pixels(&self) -> &[Rgba8] {
        bytemuck::cast_slice(&self.data)
    }

    /// A new buffer of the same size with `f` applied to every pixel in
    /// row-major order. `self` is left untouched.
    pub fn map_pixels(&self, mut f: impl FnMut(Rgba8) -> Rgba8) -> PixelBuffer {
        let pixels: Vec<Rgba8> = self.pixels().iter().map(|&px| f(px)).collect();
        Self {
            width: self.width,
            height: self.height,
            data: bytemuck::cast_slice(&pixels).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::BufferSize { expected: 16, actual: 15, .. }
        ));
    }

    #[test]
    fn test_pixels_view_matches_bytes() {
        let buf = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(buf.pixels(), &[Rgba8::new(1, 2, 3, 4), Rgba8::new(5, 6, 7, 8)]);
        assert_eq!(buf.pixel_count(), 2);
    }

    #[test]
    fn test_filled_has_expected_size() {
        let buf = PixelBuffer::filled(3, 2, Rgba8::new(10, 20, 30, 255));
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.pixels().iter().all(|p| p.g == 20));
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixel_count(), 0);
    }

    #[test]
    fn test_map_pixels_keeps_dimensions() {
        let src = PixelBuffer::filled(3, 2, Rgba8::new(10, 20, 30, 40));
        let out = src.map_pixels(|p| Rgba8::new(p.b, p.g, p.r, p.a));
        assert_eq!((out.width(), out.height()), (3, 2));
        assert!(out.pixels().iter().all(|&p| p == Rgba8::new(30, 20, 10, 40)));
        assert_eq!(src.pixels()[0], Rgba8::new(10, 20, 30, 40));
    }

    #[test]
    fn test_quantize_rounds_and_clamps() {
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(2.0), 255);
        assert_eq!(quantize(1.0 / 255.0), 1);
    }
}
