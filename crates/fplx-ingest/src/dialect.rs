//! Line terminator conventions of the FamPlex CSV dialect.
//!
//! The tables are written with minimal quoting and `\r\n` terminators so
//! that they survive a spreadsheet round trip. Only the terminator ending a
//! record is checked; line breaks inside quoted fields belong to the value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
    /// Accept any mix of terminators.
    Any,
}

impl LineTerminator {
    pub fn label(self) -> &'static str {
        match self {
            Self::Crlf => "CRLF",
            Self::Lf => "LF",
            Self::Any => "any",
        }
    }

    fn accepts(self, ending: LineEnding) -> bool {
        match self {
            Self::Crlf => ending == LineEnding::Crlf,
            Self::Lf => ending == LineEnding::Lf,
            Self::Any => true,
        }
    }
}

/// Terminator actually found at the end of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
    Cr,
}

impl LineEnding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Crlf => "CRLF",
            Self::Lf => "LF",
            Self::Cr => "CR",
        }
    }
}

/// Physical line breaks of a text, recognised the way the csv reader
/// recognises record terminators: `\r\n`, `\n` and a lone `\r`.
#[derive(Debug, Clone, Default)]
pub struct LineBreaks {
    /// Offset just past each break, with its kind.
    breaks: Vec<(usize, LineEnding)>,
    len: usize,
}

impl LineBreaks {
    pub fn scan(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut breaks = Vec::new();
        let mut idx = 0usize;
        while idx < bytes.len() {
            match bytes[idx] {
                b'\r' if bytes.get(idx + 1) == Some(&b'\n') => {
                    idx += 2;
                    breaks.push((idx, LineEnding::Crlf));
                }
                b'\r' => {
                    idx += 1;
                    breaks.push((idx, LineEnding::Cr));
                }
                b'\n' => {
                    idx += 1;
                    breaks.push((idx, LineEnding::Lf));
                }
                _ => idx += 1,
            }
        }
        Self {
            breaks,
            len: bytes.len(),
        }
    }

    /// 1-based line holding the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.breaks.partition_point(|(end, _)| *end <= offset) + 1
    }

    /// Terminator ending `line`; `None` for an unterminated last line.
    pub fn ending_of(&self, line: usize) -> Option<LineEnding> {
        line.checked_sub(1)
            .and_then(|idx| self.breaks.get(idx))
            .map(|(_, ending)| *ending)
    }

    /// Lines in the text. Nothing after a final terminator is not a line.
    pub fn line_count(&self) -> usize {
        let unterminated = self
            .breaks
            .last()
            .map_or(self.len > 0, |(end, _)| *end < self.len);
        self.breaks.len() + usize::from(unterminated)
    }
}

/// Line breaks inside a single field value.
pub fn breaks_within(value: &str) -> usize {
    let bytes = value.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(idx, &byte)| match byte {
            b'\n' => true,
            b'\r' => bytes.get(idx + 1) != Some(&b'\n'),
            _ => false,
        })
        .count()
}

/// Record terminators that deviate from `expected`, as `(line, ending)`.
///
/// A file where no record follows the convention at all is rejected
/// outright: it was saved with the wrong dialect rather than damaged on a
/// few rows.
pub fn deviating_lines(
    endings: &[(usize, LineEnding)],
    expected: LineTerminator,
    path: &Path,
) -> Result<Vec<(usize, LineEnding)>, LoadError> {
    if expected == LineTerminator::Any {
        return Ok(Vec::new());
    }
    let deviating: Vec<(usize, LineEnding)> = endings
        .iter()
        .copied()
        .filter(|(_, ending)| !expected.accepts(*ending))
        .collect();
    if let Some((_, found)) = deviating.first()
        && deviating.len() == endings.len()
    {
        return Err(LoadError::Dialect {
            path: path.to_path_buf(),
            expected: expected.label(),
            found: found.label(),
        });
    }
    Ok(deviating)
}
