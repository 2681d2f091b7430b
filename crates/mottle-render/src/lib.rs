#![forbid(unsafe_code)]

//! Render side: colours, colormaps, shading, and ANSI presentation.
//!
//! Nothing here feeds back into the simulation. A host reads the engine's
//! field, shades it into [`PackedRgba`] pixels, and hands the pixels to a
//! presenter or an image encoder.

pub mod ansi;
pub mod color;
pub mod colormap;
pub mod presenter;
pub mod shade;

pub use color::PackedRgba;
pub use colormap::{Colormap, ColormapError, LUT_LEN, Palette};
pub use presenter::HalfBlockPresenter;
pub use shade::{Shading, rgba_bytes, shade_field, shade_into};
