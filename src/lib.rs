//! imagesorter - sort images into directories by looking at them
//!
//! This library shows each image of a source directory inline in the terminal
//! (kitty graphics protocol, or sixel as a fallback), asks which destination
//! directory it belongs in and moves it there. Destinations come from an
//! explicit list or a scan of a target's subdirectories, and can grow during
//! the session when the user types a new directory name.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_file;
pub mod mover;
pub mod output;
pub mod prompt;
pub mod render;
pub mod sixel;
pub mod sorter;

pub use catalog::DestinationSet;
pub use config::{CatalogMode, RenderMode, SortConfig};
pub use error::{ConfigError, RenderError, SortError, SortResult};
pub use image_file::ImageFile;
pub use render::Renderer;
pub use sorter::{Outcome, SessionReport, Sorter};

pub use cli::{SortArgs, run_cli};
