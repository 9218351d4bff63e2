//! Moving sorted images into their destination.

use crate::error::{SortError, SortResult};
use std::fs;
use std::path::{Path, PathBuf};

/// A completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Where the file was.
    pub original_path: PathBuf,
    /// Where the file is now.
    pub new_path: PathBuf,
}

/// Moves files between directories by renaming them.
pub struct FileMover;

impl FileMover {
    /// Moves `file_path` into `destination`, keeping its file name.
    ///
    /// A file with the same name in `destination` is replaced. The rename does
    /// not copy across filesystems, so a destination on another device fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imagesorter::mover::FileMover;
    /// use std::path::Path;
    ///
    /// let done = FileMover::move_into(Path::new("inbox/cat.png"), Path::new("keep"));
    /// match done {
    ///     Ok(m) => println!("moved to {}", m.new_path.display()),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn move_into(file_path: &Path, destination: &Path) -> SortResult<Move> {
        let file_name = file_path.file_name().ok_or_else(|| SortError::MoveFile {
            from: file_path.to_path_buf(),
            to: destination.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;
        let new_path = destination.join(file_name);

        fs::rename(file_path, &new_path).map_err(|e| SortError::MoveFile {
            from: file_path.to_path_buf(),
            to: new_path.clone(),
            source: e,
        })?;

        Ok(Move {
            original_path: file_path.to_path_buf(),
            new_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_into_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("a.png");
        let keep = temp_dir.path().join("keep");
        fs::write(&file_path, "pixels").unwrap();
        fs::create_dir(&keep).unwrap();

        let done = FileMover::move_into(&file_path, &keep).expect("move should succeed");

        assert!(!file_path.exists());
        assert_eq!(done.new_path, keep.join("a.png"));
        assert_eq!(fs::read_to_string(&done.new_path).unwrap(), "pixels");
    }

    #[test]
    fn test_move_overwrites_same_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("a.png");
        let keep = temp_dir.path().join("keep");
        fs::create_dir(&keep).unwrap();
        fs::write(&file_path, "new").unwrap();
        fs::write(keep.join("a.png"), "old").unwrap();

        FileMover::move_into(&file_path, &keep).expect("move should succeed");

        assert_eq!(fs::read_to_string(keep.join("a.png")).unwrap(), "new");
    }

    #[test]
    fn test_move_into_missing_destination_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("a.png");
        fs::write(&file_path, "pixels").unwrap();

        let result = FileMover::move_into(&file_path, &temp_dir.path().join("nowhere"));

        assert!(matches!(result, Err(SortError::MoveFile { .. })));
        assert!(file_path.exists());
    }
}
