//! Session configuration.
//!
//! Command-line flags are mixed freely with directory paths, so they are
//! resolved exactly once into a [`SortConfig`] before any other component is
//! built. Nothing downstream looks at raw arguments again.

use crate::cli::SortArgs;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Which inline-image encoding the renderer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Kitty terminal graphics protocol.
    #[default]
    Kitty,
    /// Sixel, for terminals without kitty graphics support.
    Sixel,
}

impl RenderMode {
    /// Name used in diagnostics.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            RenderMode::Kitty => "Kitty's terminal graphics protocol",
            RenderMode::Sixel => "Sixel",
        }
    }
}

/// How the initial set of destinations is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMode {
    /// Every listed directory is a destination, created if absent.
    Explicit(Vec<PathBuf>),
    /// Every direct subdirectory of the target is a destination.
    Scan(PathBuf),
}

/// Fully resolved settings for one sorting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Directory whose images are sorted.
    pub source: PathBuf,
    /// How destinations are seeded.
    pub catalog: CatalogMode,
    /// Encoding used to show images.
    pub render_mode: RenderMode,
    /// Whether an unrecognised answer creates a new destination directory.
    /// When false the user is asked again.
    pub allow_new_directories: bool,
    /// Whether files that fail to open or decode are skipped with a warning
    /// instead of aborting the run.
    pub skip_unreadable: bool,
}

impl SortConfig {
    /// Creates a configuration with an explicit destination list and default
    /// behaviour for everything else.
    pub fn new(source: impl Into<PathBuf>, destinations: Vec<PathBuf>) -> Self {
        Self {
            source: source.into(),
            catalog: CatalogMode::Explicit(destinations),
            render_mode: RenderMode::default(),
            allow_new_directories: true,
            skip_unreadable: false,
        }
    }

    /// Resolves parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the source or destinations are missing,
    /// or when scan mode is given anything but a single target.
    pub fn from_args(args: &SortArgs) -> Result<Self, ConfigError> {
        let source = args.source.clone().ok_or(ConfigError::MissingSource)?;

        let catalog = if args.scan {
            match args.destinations.as_slice() {
                [target] => CatalogMode::Scan(target.clone()),
                other => return Err(ConfigError::ScanTargetCount(other.len())),
            }
        } else {
            if args.destinations.is_empty() {
                return Err(ConfigError::MissingDestinations);
            }
            CatalogMode::Explicit(args.destinations.clone())
        };

        let render_mode = if args.sixel {
            RenderMode::Sixel
        } else {
            RenderMode::Kitty
        };

        Ok(Self {
            source,
            catalog,
            render_mode,
            allow_new_directories: !args.no_create,
            skip_unreadable: args.skip_unreadable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> SortArgs {
        SortArgs::try_parse_from(std::iter::once("imagesorter").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults_to_kitty_and_explicit_list() {
        let config = SortConfig::from_args(&parse(&["pics", "keep", "trash"])).unwrap();

        assert_eq!(config.source, PathBuf::from("pics"));
        assert_eq!(
            config.catalog,
            CatalogMode::Explicit(vec![PathBuf::from("keep"), PathBuf::from("trash")])
        );
        assert_eq!(config.render_mode, RenderMode::Kitty);
        assert!(config.allow_new_directories);
        assert!(!config.skip_unreadable);
    }

    #[test]
    fn test_flags_mixed_with_paths() {
        let config =
            SortConfig::from_args(&parse(&["pics", "--sixel", "keep", "--no-create"])).unwrap();

        assert_eq!(config.render_mode, RenderMode::Sixel);
        assert!(!config.allow_new_directories);
        assert_eq!(
            config.catalog,
            CatalogMode::Explicit(vec![PathBuf::from("keep")])
        );
    }

    #[test]
    fn test_scan_mode_single_target() {
        let config = SortConfig::from_args(&parse(&["--scan", "pics", "Sorted"])).unwrap();
        assert_eq!(config.catalog, CatalogMode::Scan(PathBuf::from("Sorted")));
    }

    #[test]
    fn test_scan_mode_rejects_wrong_target_count() {
        assert_eq!(
            SortConfig::from_args(&parse(&["--scan", "pics", "a", "b"])),
            Err(ConfigError::ScanTargetCount(2))
        );
        assert_eq!(
            SortConfig::from_args(&parse(&["--scan", "pics"])),
            Err(ConfigError::ScanTargetCount(0))
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            SortConfig::from_args(&parse(&[])),
            Err(ConfigError::MissingSource)
        );
        assert_eq!(
            SortConfig::from_args(&parse(&["pics"])),
            Err(ConfigError::MissingDestinations)
        );
    }
}
