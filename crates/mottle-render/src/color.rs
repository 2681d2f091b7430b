#![forbid(unsafe_code)]

//! Packed colour type.

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Anchor tables are often written as ARGB literals (`0xAARRGGBB`); use
/// [`PackedRgba::from_argb`] for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Convert from an `0xAARRGGBB` literal.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgba(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    /// Convert to an `0xAARRGGBB` value.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a() as u32) << 24)
            | ((self.r() as u32) << 16)
            | ((self.g() as u32) << 8)
            | (self.b() as u32)
    }

    /// Opaque gray with all channels equal to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Channels as `[r, g, b, a]`, the byte order image encoders expect.
    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(c.to_rgba_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn argb_conversion() {
        let orange = PackedRgba::from_argb(0xFFFF_8000);
        assert_eq!(orange, PackedRgba::rgb(255, 128, 0));
        assert_eq!(orange.to_argb(), 0xFFFF_8000);
    }

    #[test]
    fn gray_is_opaque() {
        assert_eq!(PackedRgba::gray(0), PackedRgba::BLACK);
        assert_eq!(PackedRgba::gray(255), PackedRgba::WHITE);
    }
}
