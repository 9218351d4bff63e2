//! Inline image output.
//!
//! [`Renderer`] hides the two supported encodings behind a single `display`
//! call. The encoding is fixed when the renderer is built; nothing is probed
//! at runtime.

use crate::config::RenderMode;
use crate::error::RenderError;
use crate::sixel::SixelEncoder;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use std::io::{self, Write};

/// Largest base64 payload the kitty protocol accepts per escape sequence.
const KITTY_CHUNK_SIZE: usize = 4096;

/// Writes decoded images to the terminal.
pub struct Renderer {
    mode: RenderMode,
    sixel: Option<SixelEncoder>,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode, sixel: None }
    }

    /// The encoding this renderer writes.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Returns true once the sixel encoder has been set up.
    pub fn has_sixel_encoder(&self) -> bool {
        self.sixel.is_some()
    }

    /// Writes `image` to `out` unchanged in size.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] naming the active protocol if writing fails.
    pub fn display<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        image: &DynamicImage,
    ) -> Result<(), RenderError> {
        let rgba = image.to_rgba8();
        let result = match self.mode {
            RenderMode::Kitty => write_kitty(out, rgba.width(), rgba.height(), rgba.as_raw()),
            RenderMode::Sixel => self
                .sixel
                .get_or_insert_with(SixelEncoder::new)
                .encode(out, &rgba),
        };

        result.map_err(|source| RenderError {
            protocol: self.mode.protocol_name(),
            source,
        })
    }
}

/// Transmits and displays raw RGBA pixels with the kitty graphics protocol,
/// followed by a newline.
fn write_kitty<W: Write + ?Sized>(
    out: &mut W,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> io::Result<()> {
    let payload = STANDARD.encode(rgba);
    let mut chunks = payload.as_bytes().chunks(KITTY_CHUNK_SIZE).peekable();

    if chunks.peek().is_none() {
        write!(out, "\x1b_Ga=T,f=32,s={},v={};\x1b\\", width, height)?;
    }

    let mut first = true;
    while let Some(chunk) = chunks.next() {
        let more = u8::from(chunks.peek().is_some());
        if first {
            write!(out, "\x1b_Ga=T,f=32,s={},v={},m={};", width, height, more)?;
            first = false;
        } else {
            write!(out, "\x1b_Gm={};", more)?;
        }
        out.write_all(chunk)?;
        out.write_all(b"\x1b\\")?;
    }

    writeln!(out)?;
    out.flush()
}
