#![forbid(unsafe_code)]

//! Scale set resolution.
//!
//! A scale file is a JSON array of scales:
//!
//! ```json
//! [
//!   { "activator_radius": 100, "inhibitor_radius": 50, "increment": 0.05 },
//!   { "activator_radius": 50, "inhibitor_radius": 25, "increment": 0.04 }
//! ]
//! ```

use std::fs;
use std::path::Path;

use mottle_core::ScaleSet;

use crate::cli::ScaleSource;
use crate::error::AppError;

/// Produce the scale set named by `source`, reading the file if needed.
pub fn resolve_scales(source: &ScaleSource) -> Result<ScaleSet, AppError> {
    match source {
        ScaleSource::Preset(set) | ScaleSource::Inline(set) => Ok(set.clone()),
        ScaleSource::File(path) => load_scale_file(path),
    }
}

/// Read and validate a JSON scale file.
pub fn load_scale_file(path: &Path) -> Result<ScaleSet, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ScaleFile {
        path: path.to_path_buf(),
        source,
    })?;
    let scales: ScaleSet = serde_json::from_str(&text).map_err(|source| AppError::ScaleJson {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), scales = scales.len(), "scale file loaded");
    Ok(scales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mottle_core::Scale;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn presets_pass_through() {
        let set = resolve_scales(&ScaleSource::Preset(ScaleSet::fine())).unwrap();
        assert_eq!(set, ScaleSet::fine());
    }

    #[test]
    fn loads_json_file() {
        let file = write_temp(
            r#"[{"activator_radius": 8, "inhibitor_radius": 4, "increment": 0.05}]"#,
        );
        let set = resolve_scales(&ScaleSource::File(file.path().to_path_buf())).unwrap();
        assert_eq!(set.as_slice(), &[Scale::new(8, 4, 0.05)]);
    }

    #[test]
    fn rejects_invalid_increment() {
        let file = write_temp(
            r#"[{"activator_radius": 8, "inhibitor_radius": 4, "increment": -1.0}]"#,
        );
        let err = load_scale_file(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ScaleJson { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scale_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::ScaleFile { .. }));
    }
}
