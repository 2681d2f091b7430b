#![forbid(unsafe_code)]

//! Anchor-colour lookup tables.
//!
//! A [`Colormap`] is a fixed table of [`LUT_LEN`] colours built from `N`
//! anchors. The table is split into `N - 1` equal segments of
//! `LUT_LEN / (N - 1)` entries; each segment is a per-channel linear
//! gradient from one anchor towards the next. Entries left over by the
//! integer division take the last anchor.

use std::fmt;

use crate::color::PackedRgba;

/// Number of entries in every colormap.
pub const LUT_LEN: usize = 255;

/// Errors raised while building a colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapError {
    /// The anchor list was empty.
    NoAnchors,
}

impl fmt::Display for ColormapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAnchors => write!(f, "colormap needs at least one anchor colour"),
        }
    }
}

impl std::error::Error for ColormapError {}

/// Lookup table from a normalized value to a colour.
#[derive(Clone, PartialEq, Eq)]
pub struct Colormap {
    table: [PackedRgba; LUT_LEN],
}

impl Colormap {
    /// Build a table from anchor colours, first anchor at value `0`.
    pub fn from_anchors(anchors: &[PackedRgba]) -> Result<Self, ColormapError> {
        let (&last, _) = anchors.split_last().ok_or(ColormapError::NoAnchors)?;
        let mut table = [last; LUT_LEN];

        if anchors.len() > 1 {
            let depth = LUT_LEN / (anchors.len() - 1);
            for (segment, pair) in anchors.windows(2).enumerate() {
                let start = segment * depth;
                if start >= LUT_LEN {
                    break;
                }
                let end = (start + depth).min(LUT_LEN);
                fill_gradient(pair[0], pair[1], depth, &mut table[start..end]);
            }
        }

        Ok(Self { table })
    }

    /// Colour for a value in `[0, 1]`. Out-of-range and NaN inputs clamp to
    /// the ends of the table.
    #[inline]
    pub fn color_at(&self, value: f64) -> PackedRgba {
        // `as usize` saturates: negatives and NaN map to 0.
        let index = ((value * LUT_LEN as f64) as usize).min(LUT_LEN - 1);
        self.table[index]
    }

    /// The full table.
    #[inline]
    pub fn table(&self) -> &[PackedRgba; LUT_LEN] {
        &self.table
    }
}

impl fmt::Debug for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colormap")
            .field("first", &self.table[0])
            .field("last", &self.table[LUT_LEN - 1])
            .finish()
    }
}

/// Write `out.len()` entries stepping from `begin` towards `end` in
/// `depth` steps. Each channel is `begin + trunc(k * (end - begin) / depth)`.
fn fill_gradient(begin: PackedRgba, end: PackedRgba, depth: usize, out: &mut [PackedRgba]) {
    let channel = |from: u8, to: u8, k: usize| -> u8 {
        let step = (i32::from(to) - i32::from(from)) as f32 / depth as f32;
        (i32::from(from) + (k as f32 * step) as i32).clamp(0, 255) as u8
    };
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = PackedRgba::rgba(
            channel(begin.r(), end.r(), k),
            channel(begin.g(), end.g(), k),
            channel(begin.b(), end.b(), k),
            channel(begin.a(), end.a(), k),
        );
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

const BLACK_WHITE: [u32; 2] = [
    0xFF00_0000, // black
    0xFFFF_FFFF, // white
];

const RAINBOW: [u32; 7] = [
    0xFFFF_0000, // red
    0xFFFF_8000, // orange
    0xFFFF_FF00, // yellow
    0xFF00_FF00, // green
    0xFF00_00FF, // blue
    0xFF4B_0082, // indigo
    0xFF80_00FF, // violet
];

const LAVA: [u32; 5] = [
    0xFF00_0000, // black
    0xFFFF_0000, // red
    0xFFFF_8000, // orange
    0xFFFF_FF00, // yellow
    0xFFFF_FFFF, // white
];

/// Named display palettes.
///
/// [`Palette::Gray`] maps values straight to 8-bit gray; the others go
/// through a [`Colormap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    /// Direct grayscale, no lookup table.
    #[default]
    Gray,
    /// Black to white through the lookup table.
    BlackWhite,
    /// Red, orange, yellow, green, blue, indigo, violet.
    Rainbow,
    /// Black, red, orange, yellow, white.
    Lava,
}

impl Palette {
    /// Every palette, in cycling order.
    pub const ALL: [Palette; 4] = [Self::Gray, Self::BlackWhite, Self::Rainbow, Self::Lava];

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::BlackWhite => "bw",
            Self::Rainbow => "rainbow",
            Self::Lava => "lava",
        }
    }

    /// Parse a short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Next palette in [`Palette::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Anchor colours, or `None` for direct grayscale.
    pub fn anchors(self) -> Option<Vec<PackedRgba>> {
        let argb: &[u32] = match self {
            Self::Gray => return None,
            Self::BlackWhite => &BLACK_WHITE,
            Self::Rainbow => &RAINBOW,
            Self::Lava => &LAVA,
        };
        Some(argb.iter().map(|&c| PackedRgba::from_argb(c)).collect())
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(palette: Palette) -> Colormap {
        Colormap::from_anchors(&palette.anchors().unwrap()).unwrap()
    }

    #[test]
    fn empty_anchor_list_is_rejected() {
        assert_eq!(Colormap::from_anchors(&[]), Err(ColormapError::NoAnchors));
    }

    #[test]
    fn single_anchor_fills_table() {
        let teal = PackedRgba::rgb(0, 128, 128);
        let map = Colormap::from_anchors(&[teal]).unwrap();
        assert!(map.table().iter().all(|&c| c == teal));
    }

    #[test]
    fn black_white_is_linear_ramp() {
        let map = preset(Palette::BlackWhite);
        for (k, &c) in map.table().iter().enumerate() {
            assert_eq!(c, PackedRgba::gray(k as u8), "entry {k}");
        }
    }

    #[test]
    fn segments_start_at_anchors() {
        // 5 anchors: 4 segments of 63 entries, 3 left over.
        let anchors = Palette::Lava.anchors().unwrap();
        let map = preset(Palette::Lava);
        for (segment, &anchor) in anchors[..4].iter().enumerate() {
            assert_eq!(map.table()[segment * 63], anchor);
        }
        for &c in &map.table()[252..] {
            assert_eq!(c, PackedRgba::WHITE);
        }
    }

    #[test]
    fn descending_channels_truncate_towards_begin() {
        // Rainbow starts red -> orange: green rises, red stays at 255.
        let map = preset(Palette::Rainbow);
        let depth = LUT_LEN / 6;
        assert_eq!(depth, 42);
        let c = map.table()[1];
        assert_eq!(c.r(), 255);
        assert_eq!(c.g(), (128.0f32 / 42.0) as u8);
        // Blue -> indigo segment: blue channel falls from 255 towards 130.
        let start = 4 * depth;
        let step = (130.0f32 - 255.0) / 42.0;
        assert_eq!(map.table()[start + 1].b(), (255 + step as i32) as u8);
    }

    #[test]
    fn color_at_clamps() {
        let map = preset(Palette::Lava);
        assert_eq!(map.color_at(0.0), PackedRgba::BLACK);
        assert_eq!(map.color_at(1.0), PackedRgba::WHITE);
        assert_eq!(map.color_at(-3.0), PackedRgba::BLACK);
        assert_eq!(map.color_at(7.0), PackedRgba::WHITE);
        assert_eq!(map.color_at(f64::NAN), PackedRgba::BLACK);
    }

    #[test]
    fn palette_names_round_trip() {
        for palette in Palette::ALL {
            assert_eq!(Palette::from_name(palette.name()), Some(palette));
        }
        assert_eq!(Palette::from_name("plaid"), None);
        assert_eq!(Palette::Lava.next(), Palette::Gray);
    }

    #[test]
    fn more_anchors_than_entries_uses_last() {
        let anchors: Vec<_> = (0..300).map(|i| PackedRgba::gray((i % 256) as u8)).collect();
        let map = Colormap::from_anchors(&anchors).unwrap();
        assert!(map.table().iter().all(|&c| c == anchors[299]));
    }
}
