#![forbid(unsafe_code)]

//! Field-to-pixel shading.

use mottle_core::ScalarField;

use crate::color::PackedRgba;
use crate::colormap::{Colormap, ColormapError, Palette};

/// How normalized values become pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shading {
    /// `value * 255`, truncated, on all three channels.
    Gray,
    /// Lookup through a colormap.
    Lut(Colormap),
}

impl Shading {
    /// Shading for a named palette.
    pub fn for_palette(palette: Palette) -> Result<Self, ColormapError> {
        match palette.anchors() {
            None => Ok(Self::Gray),
            Some(anchors) => Colormap::from_anchors(&anchors).map(Self::Lut),
        }
    }

    /// Colour for one value in `[0, 1]`.
    #[inline]
    pub fn color_at(&self, value: f64) -> PackedRgba {
        match self {
            // `as u8` saturates and maps NaN to 0.
            Self::Gray => PackedRgba::gray((value * 255.0) as u8),
            Self::Lut(map) => map.color_at(value),
        }
    }
}

/// Shade `values` into `out`, one pixel per value.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn shade_into(values: &[f64], shading: &Shading, out: &mut [PackedRgba]) {
    assert_eq!(values.len(), out.len(), "pixel buffer length mismatch");
    for (pixel, &value) in out.iter_mut().zip(values) {
        *pixel = shading.color_at(value);
    }
}

/// Shade a whole field, resizing `out` to match.
pub fn shade_field(field: &ScalarField, shading: &Shading, out: &mut Vec<PackedRgba>) {
    out.resize(field.len(), PackedRgba::TRANSPARENT);
    shade_into(field.values(), shading, out);
}

/// Flatten pixels to `RGBA8` bytes.
pub fn rgba_bytes(pixels: &[PackedRgba]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_rgba_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_endpoints() {
        let shading = Shading::Gray;
        assert_eq!(shading.color_at(0.0), PackedRgba::BLACK);
        assert_eq!(shading.color_at(1.0), PackedRgba::WHITE);
        assert_eq!(shading.color_at(0.5), PackedRgba::gray(127));
    }

    #[test]
    fn palette_shading_uses_lut() {
        let shading = Shading::for_palette(Palette::Lava).unwrap();
        assert!(matches!(shading, Shading::Lut(_)));
        assert_eq!(shading.color_at(1.0), PackedRgba::WHITE);
    }

    #[test]
    fn shade_into_fills_every_pixel() {
        let values = [0.0, 0.25, 1.0];
        let mut out = [PackedRgba::TRANSPARENT; 3];
        shade_into(&values, &Shading::Gray, &mut out);
        assert_eq!(out[0], PackedRgba::BLACK);
        assert_eq!(out[1], PackedRgba::gray(63));
        assert_eq!(out[2], PackedRgba::WHITE);
    }

    #[test]
    fn shade_field_resizes_output() {
        let field = ScalarField::from_values(2, 1, vec![0.0, 1.0]).unwrap();
        let mut out = Vec::new();
        shade_field(&field, &Shading::Gray, &mut out);
        assert_eq!(out, vec![PackedRgba::BLACK, PackedRgba::WHITE]);
    }

    #[test]
    fn rgba_bytes_are_channel_ordered() {
        let bytes = rgba_bytes(&[PackedRgba::rgba(1, 2, 3, 4), PackedRgba::WHITE]);
        assert_eq!(bytes, vec![1, 2, 3, 4, 255, 255, 255, 255]);
    }
}
