use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, error, info};

use crate::cli::CompressionLevel;
use crate::error::WhiteoutError;
use crate::input::load_rgba;
use crate::matte::{FillStats, remove_border_background};
use crate::output::save_png;

/// Settings for a background removal run
#[derive(Debug, Clone)]
pub struct RemoveOptions {
    /// Near-white cut-off for the border flood fill
    pub threshold: u8,
    /// Write results here instead of overwriting the inputs
    pub output_dir: Option<PathBuf>,
    /// Optional oxipng pass on each written PNG
    pub compress: Option<CompressionLevel>,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            threshold: crate::config::Thresholds::default().remove_background,
            output_dir: None,
            compress: None,
        }
    }
}

impl RemoveOptions {
    /// Where the processed copy of `input` is written
    pub fn destination(&self, input: &Path) -> PathBuf {
        match (&self.output_dir, input.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => input.to_path_buf(),
        }
    }
}

/// Remove the border-connected background of one PNG file.
///
/// Returns the path written and the fill statistics.
pub fn remove_background_file(
    input: &Path,
    options: &RemoveOptions,
) -> Result<(PathBuf, FillStats)> {
    let mut image = load_rgba(input)?;
    let stats = remove_border_background(&mut image, options.threshold);

    let destination = options.destination(input);
    save_png(&image, &destination, options.compress)?;

    Ok((destination, stats))
}

/// Process files one after another.
///
/// A file that fails to load or save is logged and skipped; the remaining
/// files are still processed. Fails with [`WhiteoutError::BatchFailed`] if
/// any file failed, otherwise returns the number of files written.
pub fn remove_backgrounds(paths: &[PathBuf], options: &RemoveOptions) -> Result<usize> {
    if paths.is_empty() {
        return Err(WhiteoutError::NoImages.into());
    }

    if let Some(dir) = &options.output_dir
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| WhiteoutError::OutputWrite {
            path: dir.clone(),
            source: e,
        })?;
    }

    let mut failed = 0;
    for path in paths {
        match remove_background_file(path, options) {
            Ok((destination, stats)) => {
                debug!(
                    "{}: cleared {} of {} visited pixels",
                    destination.display(),
                    stats.cleared,
                    stats.visited
                );
                info!("Deep Processed: {}", display_name(path));
            }
            Err(e) => {
                error!("{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(WhiteoutError::BatchFailed {
            failed,
            total: paths.len(),
        }
        .into());
    }

    Ok(paths.len())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_framed(path: &Path) {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([250, 250, 250, 255]));
        for y in 2..8 {
            for x in 2..8 {
                img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        img.put_pixel(4, 4, Rgba([255, 255, 255, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_destination() {
        let overwrite = RemoveOptions::default();
        assert_eq!(
            overwrite.destination(Path::new("a/b/hero.png")),
            PathBuf::from("a/b/hero.png")
        );

        let redirected = RemoveOptions {
            output_dir: Some(PathBuf::from("out")),
            ..RemoveOptions::default()
        };
        assert_eq!(
            redirected.destination(Path::new("a/b/hero.png")),
            PathBuf::from("out/hero.png")
        );
    }

    #[test]
    fn test_file_is_overwritten_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agent.png");
        write_framed(&path);

        let (written, stats) = remove_background_file(&path, &RemoveOptions::default()).unwrap();

        assert_eq!(written, path);
        assert_eq!(stats.cleared, 100 - 36);
        let result = image::open(&path).unwrap().into_rgba8();
        assert_eq!(result.get_pixel(0, 0)[3], 0);
        assert_eq!(*result.get_pixel(4, 4), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_output_dir_leaves_source_untouched() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("agent.png");
        write_framed(&source);
        let original = std::fs::read(&source).unwrap();

        let options = RemoveOptions {
            output_dir: Some(dir.path().join("clean")),
            ..RemoveOptions::default()
        };
        let count = remove_backgrounds(std::slice::from_ref(&source), &options).unwrap();

        assert_eq!(count, 1);
        assert_eq!(std::fs::read(&source).unwrap(), original);
        let cleaned = image::open(dir.path().join("clean/agent.png"))
            .unwrap()
            .into_rgba8();
        assert_eq!(cleaned.get_pixel(9, 9)[3], 0);
    }

    #[test]
    fn test_batch_continues_past_broken_file() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("a_broken.png");
        let good = dir.path().join("b_good.png");
        std::fs::write(&broken, b"definitely not a png").unwrap();
        write_framed(&good);

        let paths = [broken, good.clone()];
        let err = remove_backgrounds(&paths, &RemoveOptions::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WhiteoutError>(),
            Some(WhiteoutError::BatchFailed {
                failed: 1,
                total: 2
            })
        ));
        let result = image::open(&good).unwrap().into_rgba8();
        assert_eq!(result.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let err = remove_backgrounds(&[], &RemoveOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WhiteoutError>(),
            Some(WhiteoutError::NoImages)
        ));
    }
}
