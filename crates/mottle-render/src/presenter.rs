#![forbid(unsafe_code)]

//! Half-block presenter: two pixel rows per terminal row.
//!
//! Each terminal cell prints `▀` with the upper pixel as foreground and the
//! lower pixel as background, so a `w x h` pixel buffer fills `w` columns
//! and `ceil(h / 2)` rows.
//!
//! # Design Principles
//!
//! - **State tracking**: colours are only re-emitted when they change
//! - **Single write**: the frame is built in memory and written once
//! - **Synchronized output**: DEC 2026 brackets each frame to avoid tearing

use std::io::{self, Write};

use crate::ansi;
use crate::color::PackedRgba;

/// Upper half block.
const UPPER_HALF: &str = "\u{2580}";

/// Colour of the missing lower pixel when the height is odd.
const PAD: PackedRgba = PackedRgba::BLACK;

/// Writes pixel frames as ANSI half-block art.
#[derive(Debug)]
pub struct HalfBlockPresenter<W: Write> {
    writer: W,
    buf: Vec<u8>,
}

impl<W: Write> HalfBlockPresenter<W> {
    /// Wrap a writer (usually stdout).
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::new(),
        }
    }

    /// Terminal rows needed for `pixel_height` pixel rows.
    #[inline]
    pub const fn rows_for(pixel_height: usize) -> usize {
        pixel_height.div_ceil(2)
    }

    /// Draw `pixels` (row-major, `width` wide) from the top-left corner,
    /// followed by an optional status line on the next row.
    pub fn present(
        &mut self,
        pixels: &[PackedRgba],
        width: usize,
        status: Option<&str>,
    ) -> io::Result<()> {
        self.buf.clear();
        let mut out = std::mem::take(&mut self.buf);
        let result = self.encode(&mut out, pixels, width, status);
        if result.is_ok() {
            self.writer.write_all(&out)?;
            self.writer.flush()?;
        }
        self.buf = out;
        result
    }

    fn encode(
        &self,
        out: &mut Vec<u8>,
        pixels: &[PackedRgba],
        width: usize,
        status: Option<&str>,
    ) -> io::Result<()> {
        ansi::sync_begin(out)?;
        let height = if width == 0 { 0 } else { pixels.len() / width };
        let rows = Self::rows_for(height);

        let mut fg = None;
        let mut bg = None;
        for row in 0..rows {
            ansi::cup(out, clamp_u16(row), 0)?;
            let top = &pixels[2 * row * width..(2 * row + 1) * width];
            let bottom = (2 * row + 1 < height)
                .then(|| &pixels[(2 * row + 1) * width..(2 * row + 2) * width]);

            for x in 0..width {
                let upper = top[x];
                let lower = bottom.map_or(PAD, |b| b[x]);
                if fg != Some(upper) {
                    ansi::sgr_fg_packed(out, upper)?;
                    fg = Some(upper);
                }
                if bg != Some(lower) {
                    ansi::sgr_bg_packed(out, lower)?;
                    bg = Some(lower);
                }
                out.extend_from_slice(UPPER_HALF.as_bytes());
            }
        }
        ansi::sgr_reset(out)?;

        if let Some(text) = status {
            ansi::cup(out, clamp_u16(rows), 0)?;
            out.extend_from_slice(text.as_bytes());
            out.extend_from_slice(b"\x1b[K");
        }

        ansi::sync_end(out)
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(pixels: &[PackedRgba], width: usize, status: Option<&str>) -> String {
        let mut presenter = HalfBlockPresenter::new(Vec::new());
        presenter.present(pixels, width, status).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn rows_round_up() {
        assert_eq!(HalfBlockPresenter::<Vec<u8>>::rows_for(0), 0);
        assert_eq!(HalfBlockPresenter::<Vec<u8>>::rows_for(3), 2);
        assert_eq!(HalfBlockPresenter::<Vec<u8>>::rows_for(4), 2);
    }

    #[test]
    fn two_by_two_frame() {
        let red = PackedRgba::rgb(255, 0, 0);
        let blue = PackedRgba::rgb(0, 0, 255);
        let out = present(&[red, red, blue, blue], 2, None);
        assert_eq!(
            out,
            "\x1b[?2026h\x1b[1;1H\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m▀▀\x1b[0m\x1b[?2026l"
        );
    }

    #[test]
    fn odd_height_pads_bottom() {
        let white = PackedRgba::WHITE;
        let out = present(&[white], 1, None);
        assert!(out.contains("\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m▀"));
    }

    #[test]
    fn colours_only_change_when_needed() {
        let a = PackedRgba::gray(10);
        let b = PackedRgba::gray(20);
        let out = present(&[a, a, b, b, a, a], 2, None);
        // One fg + one bg for row 0; row 1 repeats fg and changes bg to pad.
        assert_eq!(out.matches("\x1b[38;2;").count(), 1);
        assert_eq!(out.matches("\x1b[48;2;").count(), 2);
    }

    #[test]
    fn status_line_follows_pixels() {
        let out = present(&[PackedRgba::BLACK; 4], 2, Some("gen 3"));
        assert!(out.contains("\x1b[2;1Hgen 3\x1b[K"));
    }

    #[test]
    fn empty_frame_is_only_brackets() {
        let out = present(&[], 0, None);
        assert_eq!(out, "\x1b[?2026h\x1b[0m\x1b[?2026l");
    }
}
