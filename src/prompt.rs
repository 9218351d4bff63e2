//! Reading and interpreting the user's answer.
//!
//! Reading and parsing are separate steps: [`read_response`] turns the input
//! stream into a line or an explicit end-of-input signal, and [`parse`] maps a
//! line onto a [`Response`] without touching any I/O.

use crate::error::{SortError, SortResult};
use std::io::BufRead;
use std::num::IntErrorKind;

/// One read from the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line, without its trailing newline.
    Line(String),
    /// The stream is closed. The user wants to quit.
    EndOfInput,
}

/// The meaning of one answer at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A menu entry, 1-based.
    Number(usize),
    /// Leave the image where it is.
    Skip,
    /// A number that is not on the menu.
    OutOfRange,
    /// Anything else: a directory path, trimmed.
    NewName(String),
}

/// Reads one line from `reader`.
///
/// # Errors
///
/// Returns [`SortError::ReadInput`] if the underlying read fails.
pub fn read_response<R: BufRead + ?Sized>(reader: &mut R) -> SortResult<Input> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(SortError::ReadInput)?;
    if read == 0 {
        return Ok(Input::EndOfInput);
    }

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Input::Line(line))
}

/// Interprets `line` against a menu of `options` entries.
///
/// # Examples
///
/// ```
/// use imagesorter::prompt::{parse, Response};
///
/// assert_eq!(parse("2", 3), Response::Number(2));
/// assert_eq!(parse("", 3), Response::Skip);
/// assert_eq!(parse("9", 3), Response::OutOfRange);
/// assert_eq!(parse(" keep/best ", 3), Response::NewName("keep/best".to_string()));
/// ```
pub fn parse(line: &str, options: usize) -> Response {
    let answer = line.trim();
    if answer.is_empty() {
        return Response::Skip;
    }

    match answer.parse::<i64>() {
        Ok(n) if n >= 1 && (n as u64) <= options as u64 => Response::Number(n as usize),
        Ok(_) => Response::OutOfRange,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Response::OutOfRange
        }
        Err(_) => Response::NewName(answer.to_string()),
    }
}

/// Hint printed after an answer that cannot be used.
pub fn range_hint(options: usize, allow_new_directories: bool) -> String {
    if options == 0 {
        "Please enter a new directory name, or an empty line to skip".to_string()
    } else if allow_new_directories {
        format!(
            "Please enter a number between 1 and {}, a new directory name, or an empty line to skip",
            options
        )
    } else {
        format!("Please enter a number between 1 and {}", options)
    }
}
