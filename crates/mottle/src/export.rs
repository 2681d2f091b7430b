#![forbid(unsafe_code)]

//! Headless PNG export.

use std::path::Path;
use std::time::Instant;

use mottle_core::{EngineOptions, PatternEngine, ScaleSet};
use mottle_render::{Shading, rgba_bytes, shade_field};

use crate::cli::Opts;
use crate::error::AppError;

/// Step a fresh engine `opts.steps` times and write the final field to
/// `path` as an RGBA PNG.
pub fn run(opts: &Opts, scales: ScaleSet, path: &Path) -> Result<(), AppError> {
    let options = EngineOptions {
        seed: opts.seed,
        concurrent_blur: opts.concurrent_blur,
    };
    let mut engine = PatternEngine::with_options(opts.width, opts.height, scales, options)?;

    let started = Instant::now();
    for _ in 0..opts.steps {
        engine.step();
    }
    tracing::info!(
        steps = opts.steps,
        width = opts.width,
        height = opts.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pattern evolved"
    );

    write_png(&engine, &Shading::for_palette(opts.palette)?, path)?;
    tracing::info!(path = %path.display(), palette = %opts.palette, "PNG written");
    Ok(())
}

/// Encode the engine's current field as a PNG.
pub fn write_png(engine: &PatternEngine, shading: &Shading, path: &Path) -> Result<(), AppError> {
    let mut pixels = Vec::new();
    shade_field(engine.field(), shading, &mut pixels);
    let bytes = rgba_bytes(&pixels);
    let (Ok(width), Ok(height)) = (
        u32::try_from(engine.width()),
        u32::try_from(engine.height()),
    ) else {
        return Err(AppError::Image(image::ImageError::Limits(
            image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
        )));
    };
    image::save_buffer_with_format(
        path,
        &bytes,
        width,
        height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mottle_core::Scale;
    use mottle_render::Palette;

    fn opts(width: usize, height: usize, steps: u64, palette: Palette) -> Opts {
        Opts {
            width,
            height,
            steps,
            palette,
            seed: Some(11),
            ..Opts::default()
        }
    }

    #[test]
    fn writes_png_with_field_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.png");
        run(&opts(24, 16, 3, Palette::Lava), ScaleSet::fine(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (24, 16));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn gray_export_spans_black_to_white() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let scales = ScaleSet::new(vec![Scale::new(2, 1, 0.05)]).unwrap();
        run(&opts(16, 16, 2, Palette::Gray), scales, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let reds: Vec<u8> = img.pixels().map(|p| p.0[0]).collect();
        assert_eq!(reds.iter().copied().min(), Some(0));
        assert_eq!(reds.iter().copied().max(), Some(255));
    }

    #[test]
    fn same_seed_same_image() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        let o = opts(20, 12, 2, Palette::Rainbow);
        run(&o, ScaleSet::fine(), &a).unwrap();
        run(&o, ScaleSet::fine(), &b).unwrap();
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    #[test]
    fn zero_dimension_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &opts(0, 8, 1, Palette::Gray),
            ScaleSet::fine(),
            &dir.path().join("x.png"),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Engine(_)));
    }
}
