#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte-generation functions; no state tracking. The presenter decides
//! when a sequence is needed.
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ 0 m` | SGR reset |
//! | CSI | `ESC [ 38;2;r;g;b m` | True colour foreground |
//! | CSI | `ESC [ 48;2;r;g;b m` | True colour background |
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ ? 2026 h/l` | Synchronized Output (DEC) |

use std::io::{self, Write};

use crate::color::PackedRgba;

/// Write SGR reset: `CSI 0 m`
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Write SGR sequence for true color foreground: `CSI 38;2;r;g;b m`
pub fn sgr_fg_packed<W: Write>(w: &mut W, color: PackedRgba) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", color.r(), color.g(), color.b())
}

/// Write SGR sequence for true color background: `CSI 48;2;r;g;b m`
pub fn sgr_bg_packed<W: Write>(w: &mut W, color: PackedRgba) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", color.r(), color.g(), color.b())
}

/// Move cursor to 0-indexed `(row, col)`: `CSI row+1 ; col+1 H`
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Begin synchronized output: `CSI ? 2026 h`
pub fn sync_begin<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output: `CSI ? 2026 l`
pub fn sync_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn sgr_fg_bytes() {
        assert_eq!(
            to_bytes(|w| sgr_fg_packed(w, PackedRgba::rgb(255, 128, 0))),
            b"\x1b[38;2;255;128;0m"
        );
    }

    #[test]
    fn sgr_bg_bytes() {
        assert_eq!(
            to_bytes(|w| sgr_bg_packed(w, PackedRgba::BLACK)),
            b"\x1b[48;2;0;0;0m"
        );
    }

    #[test]
    fn cup_is_one_indexed() {
        assert_eq!(to_bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(to_bytes(|w| cup(w, u16::MAX, 4)), b"\x1b[65536;5H");
    }
}
