#![forbid(unsafe_code)]

//! Host-level errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use mottle_core::EngineError;
use mottle_render::ColormapError;

use crate::cli::CliError;

/// Anything that can stop the viewer or the exporter.
#[derive(Debug)]
pub enum AppError {
    Cli(CliError),
    Engine(EngineError),
    Colormap(ColormapError),
    Io(io::Error),
    /// Scale file could not be read.
    ScaleFile { path: PathBuf, source: io::Error },
    /// Scale file is not a valid JSON scale list.
    ScaleJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    Image(image::ImageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli(e) => write!(f, "{e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
            Self::Colormap(e) => write!(f, "colormap: {e}"),
            Self::Io(e) => write!(f, "I/O: {e}"),
            Self::ScaleFile { path, source } => {
                write!(f, "cannot read scale file {}: {source}", path.display())
            }
            Self::ScaleJson { path, source } => {
                write!(f, "invalid scale file {}: {source}", path.display())
            }
            Self::Image(e) => write!(f, "image export: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cli(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Colormap(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::ScaleFile { source, .. } => Some(source),
            Self::ScaleJson { source, .. } => Some(source),
            Self::Image(e) => Some(e),
        }
    }
}

impl From<CliError> for AppError {
    fn from(err: CliError) -> Self {
        Self::Cli(err)
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<ColormapError> for AppError {
    fn from(err: ColormapError) -> Self {
        Self::Colormap(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}
