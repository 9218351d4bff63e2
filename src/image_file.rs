//! Discovery and decoding of the images to sort.
//!
//! Only names ending in one of [`IMAGE_EXTENSIONS`] are considered. The match
//! is a case-sensitive suffix check, so `photo.PNG` is left alone.
//!
//! # Examples
//!
//! ```
//! use imagesorter::image_file::is_image_name;
//!
//! assert!(is_image_name("cat.png"));
//! assert!(is_image_name("cat.jpeg"));
//! assert!(!is_image_name("cat.JPG"));
//! assert!(!is_image_name("notes.txt"));
//! ```
use crate::error::{SortError, SortResult};
use image::{DynamicImage, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffixes of the files offered for sorting.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpeg", ".jpg"];

/// Returns true if the file name ends in a recognised image extension.
pub fn is_image_name(name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Lists the image files directly inside `source`, ordered by file name.
///
/// Subdirectories and files with other extensions are left out.
///
/// # Errors
///
/// Returns [`SortError::ReadSource`] if the directory cannot be listed.
pub fn list_images(source: &Path) -> SortResult<Vec<PathBuf>> {
    let entries = fs::read_dir(source).map_err(|e| SortError::ReadSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SortError::ReadSource {
            path: source.to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }

        let name = entry.file_name();
        if is_image_name(&name.to_string_lossy()) {
            images.push(entry.path());
        } else {
            tracing::debug!("skipping {}", name.to_string_lossy());
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// An image loaded for one iteration of the sorting loop.
#[derive(Debug)]
pub struct ImageFile {
    /// File name as shown to the user.
    pub name: String,
    /// Location in the source directory.
    pub path: PathBuf,
    /// Decoded pixel grid.
    pub pixels: DynamicImage,
}

impl ImageFile {
    /// Opens and decodes the image at `path`.
    ///
    /// The format is sniffed from the file contents, so a PNG saved as
    /// `.jpg` still decodes.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::OpenImage`] if the file cannot be read and
    /// [`SortError::DecodeImage`] if its contents are not a supported image.
    pub fn open(path: &Path) -> SortResult<Self> {
        let open_error = |e| SortError::OpenImage {
            path: path.to_path_buf(),
            source: e,
        };

        let pixels = ImageReader::open(path)
            .map_err(open_error)?
            .with_guessed_format()
            .map_err(open_error)?
            .decode()
            .map_err(|e| SortError::DecodeImage {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn test_extension_match_is_case_sensitive() {
        assert!(is_image_name("a.png"));
        assert!(is_image_name("a.jpg"));
        assert!(is_image_name("a.tar.jpeg"));
        assert!(!is_image_name("a.PNG"));
        assert!(!is_image_name("a.png.bak"));
        assert!(!is_image_name("png"));
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        for name in ["c.jpg", "a.png", "b.txt", "d.GIF"] {
            fs::write(base.join(name), b"x").expect("Failed to write file");
        }
        fs::create_dir(base.join("nested.png")).expect("Failed to create directory");

        let images = list_images(base).expect("listing should succeed");
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "c.jpg"]);
    }

    #[test]
    fn test_list_images_missing_source() {
        let result = list_images(Path::new("/non/existent/source"));
        assert!(matches!(result, Err(SortError::ReadSource { .. })));
    }

    #[test]
    fn test_open_decodes_by_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("dot.png");
        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]))
            .save(&path)
            .expect("Failed to save image");

        let image = ImageFile::open(&path).expect("image should decode");
        assert_eq!(image.name, "dot.png");
        assert_eq!((image.pixels.width(), image.pixels.height()), (3, 2));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").expect("Failed to write file");

        let err = ImageFile::open(&path).unwrap_err();
        assert!(matches!(err, SortError::DecodeImage { .. }));
        assert!(err.is_unreadable_image());
    }
}
