//! Sixel encoder used when the kitty graphics protocol is unavailable.
//!
//! Pixels are mapped onto a fixed 6x6x6 colour cube so the palette header can
//! be built once and the same encoder reused for every frame. Each band of six
//! rows is emitted colour by colour with run-length encoding. Pixels with
//! alpha below 128 are left unset and keep the terminal background.

use image::RgbaImage;
use std::io::{self, Write};

/// Colour levels per channel.
const LEVELS: usize = 6;
/// Number of palette registers in use.
pub const PALETTE_SIZE: usize = LEVELS * LEVELS * LEVELS;
/// Marks a pixel that is not drawn.
const TRANSPARENT: u8 = u8::MAX;
/// Runs longer than this are written as `!<n><char>`.
const RLE_THRESHOLD: usize = 3;

/// Reusable sixel encoder.
///
/// Holds the palette definition and scratch buffers; both survive across
/// frames, so the encoder should be created once per session.
pub struct SixelEncoder {
    palette: Vec<u8>,
    indices: Vec<u8>,
    row: Vec<u8>,
    buffer: Vec<u8>,
}

impl SixelEncoder {
    /// Builds the palette definition.
    pub fn new() -> Self {
        let mut palette = Vec::with_capacity(PALETTE_SIZE * 16);
        for index in 0..PALETTE_SIZE {
            let (r, g, b) = register_levels(index);
            // Sixel colour components are percentages.
            let _ = write!(
                palette,
                "#{};2;{};{};{}",
                index,
                level_percent(r),
                level_percent(g),
                level_percent(b)
            );
        }

        Self {
            palette,
            indices: Vec::new(),
            row: Vec::new(),
            buffer: Vec::new(),
        }
    }

    /// Encodes one frame and writes it to `out` in a single write.
    pub fn encode<W: Write + ?Sized>(&mut self, out: &mut W, image: &RgbaImage) -> io::Result<()> {
        let (width, height) = (image.width() as usize, image.height() as usize);

        self.indices.clear();
        self.indices.extend(image.pixels().map(|p| {
            let [r, g, b, a] = p.0;
            if a < 128 {
                TRANSPARENT
            } else {
                quantize(r, g, b)
            }
        }));

        self.buffer.clear();
        // P2=1: unset pixels keep the current background.
        self.buffer.extend_from_slice(b"\x1bP0;1;0q");
        write!(self.buffer, "\"1;1;{};{}", width, height)?;
        self.buffer.extend_from_slice(&self.palette);

        let mut used = [false; PALETTE_SIZE];
        for band_top in (0..height).step_by(6) {
            let band_rows = (height - band_top).min(6);

            used.fill(false);
            for y in band_top..band_top + band_rows {
                for &index in &self.indices[y * width..(y + 1) * width] {
                    if index != TRANSPARENT {
                        used[index as usize] = true;
                    }
                }
            }

            let mut first = true;
            for color in (0..PALETTE_SIZE).filter(|&c| used[c]) {
                if !first {
                    self.buffer.push(b'$');
                }
                first = false;

                self.row.clear();
                for x in 0..width {
                    let mut bits = 0u8;
                    for dy in 0..band_rows {
                        if self.indices[(band_top + dy) * width + x] as usize == color {
                            bits |= 1 << dy;
                        }
                    }
                    self.row.push(b'?' + bits);
                }

                write!(self.buffer, "#{}", color)?;
                write_runs(&mut self.buffer, &self.row)?;
            }
            self.buffer.push(b'-');
        }
        self.buffer.extend_from_slice(b"\x1b\\");

        out.write_all(&self.buffer)?;
        out.flush()
    }
}

impl Default for SixelEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Palette register for an 8-bit colour.
fn quantize(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| (c as usize * (LEVELS - 1) + 127) / 255;
    (level(r) * LEVELS * LEVELS + level(g) * LEVELS + level(b)) as u8
}

fn register_levels(index: usize) -> (usize, usize, usize) {
    (
        index / (LEVELS * LEVELS),
        (index / LEVELS) % LEVELS,
        index % LEVELS,
    )
}

fn level_percent(level: usize) -> usize {
    level * 100 / (LEVELS - 1)
}

/// Writes sixel characters, collapsing long runs.
fn write_runs(out: &mut Vec<u8>, row: &[u8]) -> io::Result<()> {
    let mut i = 0;
    while i < row.len() {
        let ch = row[i];
        let run = row[i..].iter().take_while(|&&c| c == ch).count();
        if run > RLE_THRESHOLD {
            write!(out, "!{}", run)?;
            out.push(ch);
        } else {
            out.extend(std::iter::repeat(ch).take(run));
        }
        i += run;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn encode(image: &RgbaImage) -> String {
        let mut out = Vec::new();
        SixelEncoder::new()
            .encode(&mut out, image)
            .expect("encoding into a Vec cannot fail");
        String::from_utf8(out).expect("sixel output is ASCII")
    }

    #[test]
    fn test_quantize_corners() {
        assert_eq!(quantize(0, 0, 0), 0);
        assert_eq!(quantize(255, 255, 255) as usize, PALETTE_SIZE - 1);
        assert_eq!(quantize(255, 0, 0), 180);
        assert_eq!(register_levels(180), (5, 0, 0));
    }

    #[test]
    fn test_frame_envelope_and_raster_attributes() {
        let output = encode(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));

        assert!(output.starts_with("\x1bP0;1;0q\"1;1;2;2"));
        assert!(output.contains("#215;2;100;100;100"));
        assert!(output.ends_with("-\x1b\\"));
    }

    #[test]
    fn test_long_runs_are_compressed() {
        let output = encode(&RgbaImage::from_pixel(10, 1, Rgba([255, 0, 0, 255])));
        assert!(output.contains("#180!10@-"));
    }

    #[test]
    fn test_short_runs_are_literal() {
        let output = encode(&RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255])));
        // Rows 0 and 1 set: '?' + 0b11.
        assert!(output.contains("#0BBB-"));
    }

    #[test]
    fn test_transparent_pixels_are_not_drawn() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        let output = encode(&image);

        assert!(output.contains("#215?@-"));
        assert!(!output.contains("$"));
    }

    #[test]
    fn test_encoder_is_reusable() {
        let mut encoder = SixelEncoder::new();
        let mut first = Vec::new();
        let mut second = Vec::new();
        let image = RgbaImage::from_pixel(4, 7, Rgba([10, 200, 90, 255]));

        encoder.encode(&mut first, &image).unwrap();
        encoder.encode(&mut second, &image).unwrap();
        assert_eq!(first, second);
        // Seven rows need two bands.
        assert_eq!(String::from_utf8(second).unwrap().matches('-').count(), 2);
    }
}
