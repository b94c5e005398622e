use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageReader, RgbaImage};
use log::{debug, warn};

use crate::error::WhiteoutError;

/// Extensions picked up from directories and glob matches
const SUPPORTED_EXTENSIONS: &[&str] = &["png"];

/// Expand inputs (files, directories, glob patterns) into a sorted,
/// de-duplicated list of PNG files.
///
/// Directories are scanned recursively. An explicit file or directory that
/// does not exist is an error; a glob that matches nothing is not.
pub fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        let pattern = path.to_string_lossy();

        if is_glob_pattern(&pattern) {
            collect_from_glob(&pattern, &mut paths)?;
        } else if !path.exists() {
            return Err(WhiteoutError::InputNotFound(path.to_path_buf()).into());
        } else if path.is_file() {
            if is_supported_image(path) {
                paths.push(path.to_path_buf());
            } else {
                warn!("Skipping non-PNG input {}", path.display());
            }
        } else if path.is_dir() {
            collect_from_directory(path, &mut paths)?;
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn collect_from_glob(pattern: &str, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = glob::glob(pattern).map_err(|e| WhiteoutError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let before = paths.len();
    for entry in entries {
        let path = entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    debug!("{} matched {} files", pattern, paths.len() - before);

    Ok(())
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry_path(entry, dir)?;

        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

fn entry_path(entry: std::io::Result<DirEntry>, dir: &Path) -> Result<PathBuf> {
    let entry = entry
        .with_context(|| format!("failed to read directory entry in {}", dir.display()))?;
    Ok(entry.path())
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode any supported image file and convert it to 8-bit RGBA
pub fn load_rgba(path: &Path) -> Result<RgbaImage, WhiteoutError> {
    let img = ImageReader::open(path)
        .map_err(|e| WhiteoutError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| WhiteoutError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| WhiteoutError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn touch_png(path: &Path) {
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("*.png"));
        assert!(is_glob_pattern("agents/**/*.png"));
        assert!(is_glob_pattern("sprite?.png"));
        assert!(is_glob_pattern("sprite[0-9].png"));
        assert!(!is_glob_pattern("sprite.png"));
        assert!(!is_glob_pattern("agents/hero.png"));
    }

    #[test]
    fn test_is_supported_image_is_case_insensitive() {
        assert!(is_supported_image(Path::new("a/HERO.PNG")));
        assert!(!is_supported_image(Path::new("a/hero.jpg")));
        assert!(!is_supported_image(Path::new("a/hero")));
    }

    #[test]
    fn test_collect_directory_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        touch_png(&dir.path().join("b.png"));
        touch_png(&nested.join("a.png"));
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let paths = collect_image_paths(&[dir.path()]).unwrap();

        let expected = vec![dir.path().join("b.png"), nested.join("a.png")];
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_collect_glob_and_dedup() {
        let dir = TempDir::new().unwrap();
        touch_png(&dir.path().join("one.png"));
        touch_png(&dir.path().join("two.png"));

        let pattern = dir.path().join("*.png");
        let explicit = dir.path().join("one.png");
        let paths = collect_image_paths(&[pattern, explicit]).unwrap();

        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_collect_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let err = collect_image_paths(&[dir.path().join("missing.png")]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WhiteoutError>(),
            Some(WhiteoutError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_entry_error_names_directory() {
        let entry = Err(std::io::Error::other("device went away"));

        let err = entry_path(entry, Path::new("agents")).unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("failed to read directory entry in agents"));
        assert!(message.contains("device went away"));
    }

    #[test]
    fn test_load_rgba_reports_path() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"not a png").unwrap();

        let err = load_rgba(&bogus).unwrap_err();
        assert!(err.to_string().contains("bogus.png"));
    }
}
