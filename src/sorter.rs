//! The interactive sorting loop.
//!
//! For every image in the source directory the [`Sorter`] decodes the file,
//! clears the terminal, draws the image and its name, asks where it should go
//! and then moves or skips it. The loop ends when the listing is exhausted or
//! the input stream closes.

use crate::catalog::DestinationSet;
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::image_file::{ImageFile, list_images};
use crate::mover::FileMover;
use crate::output::OutputFormatter;
use crate::prompt::{self, Input, Response};
use crate::render::Renderer;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every image was shown.
    Finished,
    /// The input stream closed before the last image.
    Quit,
}

/// What happened during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: Outcome,
    /// Number of images moved into each destination, keyed by its display path.
    pub moved: HashMap<String, usize>,
    /// Images left in the source directory, including unreadable ones.
    pub skipped: usize,
}

impl SessionReport {
    fn new() -> Self {
        Self {
            outcome: Outcome::Finished,
            moved: HashMap::new(),
            skipped: 0,
        }
    }

    /// Total number of images moved.
    pub fn total_moved(&self) -> usize {
        self.moved.values().sum()
    }
}

/// The user's decision for one image.
enum Resolution {
    Destination(PathBuf),
    Skip,
    Quit,
}

/// Drives one sorting session over an input and an output stream.
pub struct Sorter<R, W> {
    source: PathBuf,
    catalog: DestinationSet,
    renderer: Renderer,
    allow_new_directories: bool,
    skip_unreadable: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Sorter<R, W> {
    /// Builds the destination set and renderer described by `config`.
    ///
    /// Destination directories are created here, before any image is shown.
    ///
    /// # Errors
    ///
    /// Fails if the destinations cannot be read or created.
    pub fn new(config: &SortConfig, input: R, output: W) -> SortResult<Self> {
        let catalog = DestinationSet::from_mode(&config.catalog, config.allow_new_directories)?;
        Ok(Self {
            source: config.source.clone(),
            catalog,
            renderer: Renderer::new(config.render_mode),
            allow_new_directories: config.allow_new_directories,
            skip_unreadable: config.skip_unreadable,
            input,
            output,
        })
    }

    /// Current destinations.
    pub fn catalog(&self) -> &DestinationSet {
        &self.catalog
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Gives back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session until every image was handled or input ends.
    ///
    /// # Errors
    ///
    /// Any failure to list the source, decode, display or move an image ends
    /// the session. With `skip_unreadable` set, open and decode failures only
    /// skip the file.
    pub fn run(&mut self) -> SortResult<SessionReport> {
        let images = list_images(&self.source)?;
        let mut report = SessionReport::new();

        for path in images {
            let image = match self.load(&path) {
                Ok(image) => image,
                Err(e) if self.skip_unreadable && e.is_unreadable_image() => {
                    tracing::warn!("{}", e);
                    self.catalog.warn(format!("skipped unreadable image: {}", e));
                    report.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            OutputFormatter::clear_screen(&mut self.output)?;
            self.renderer.display(&mut self.output, &image.pixels)?;
            writeln!(self.output, "{}\n", image.name)?;

            match self.resolve()? {
                Resolution::Quit => {
                    report.outcome = Outcome::Quit;
                    return Ok(report);
                }
                Resolution::Skip => {
                    tracing::debug!("skipped {}", image.name);
                    report.skipped += 1;
                }
                Resolution::Destination(destination) => {
                    let done = FileMover::move_into(&image.path, &destination)?;
                    tracing::debug!("moved {} to {}", image.name, done.new_path.display());
                    *report
                        .moved
                        .entry(destination.display().to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        OutputFormatter::clear_screen(&mut self.output)?;
        for warning in self.catalog.take_warnings() {
            OutputFormatter::warning(&mut self.output, &warning)?;
        }
        writeln!(self.output, "Done! Every image has been sorted.")?;
        self.output.flush()?;
        Ok(report)
    }

    fn load(&self, path: &Path) -> SortResult<ImageFile> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let spinner = OutputFormatter::decode_spinner(&name);
        let image = ImageFile::open(path);
        spinner.finish_and_clear();
        image
    }

    /// Prompts until the answer names a destination, a skip or end of input.
    fn resolve(&mut self) -> SortResult<Resolution> {
        loop {
            for warning in self.catalog.take_warnings() {
                OutputFormatter::warning(&mut self.output, &warning)?;
            }
            write!(self.output, "{}", self.catalog.menu())?;
            self.output.flush()?;

            let line = match prompt::read_response(&mut self.input)? {
                Input::EndOfInput => return Ok(Resolution::Quit),
                Input::Line(line) => line,
            };

            match prompt::parse(&line, self.catalog.len()) {
                Response::Skip => return Ok(Resolution::Skip),
                Response::Number(n) => {
                    if let Some(destination) = self.catalog.get(n - 1) {
                        return Ok(Resolution::Destination(destination.to_path_buf()));
                    }
                }
                Response::NewName(name) if self.allow_new_directories => {
                    match self.catalog.find_or_create(&name) {
                        Ok(index) => {
                            if let Some(destination) = self.catalog.get(index) {
                                return Ok(Resolution::Destination(destination.to_path_buf()));
                            }
                        }
                        Err(e @ (SortError::NotADirectory(_) | SortError::CreateDirectory { .. })) => {
                            let hint = format!("{}, try again", e);
                            OutputFormatter::hint(&mut self.output, &hint)?;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Response::NewName(_) | Response::OutOfRange => {
                    let hint = prompt::range_hint(self.catalog.len(), self.allow_new_directories);
                    OutputFormatter::hint(&mut self.output, &hint)?;
                }
            }
        }
    }
}
