//! Raw CSV reading with dialect enforcement and row-shape checks.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use fplx_model::{Finding, FindingKind, TableKind};

use crate::dialect::{LineBreaks, LineTerminator, breaks_within, deviating_lines};
use crate::error::{LoadError, Result};

/// How many fields every row of a table must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthRule {
    /// Declared by the table format.
    Fixed(usize),
    /// The widest row in the file; shorter rows must be padded explicitly.
    Widest,
}

/// Shape of a resource table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub table: TableKind,
    pub width: WidthRule,
    /// Column names of an optional header row.
    pub header: Option<&'static [&'static str]>,
}

const GENE_PREFIX_HEADER: &[&str] = &["Pattern", "Category", "Notes"];

impl TableSchema {
    pub fn for_table(table: TableKind) -> Self {
        let (width, header): (WidthRule, Option<&'static [&'static str]>) = match table {
            TableKind::Entities => (WidthRule::Widest, None),
            TableKind::Relations => (WidthRule::Fixed(5), None),
            TableKind::GroundingMap => (WidthRule::Widest, None),
            TableKind::GenePrefixes => (WidthRule::Fixed(3), Some(GENE_PREFIX_HEADER)),
            TableKind::Equivalences => (WidthRule::Fixed(3), None),
            TableKind::Descriptions => (WidthRule::Fixed(3), None),
        };
        Self {
            table,
            width,
            header,
        }
    }
}

/// A parsed CSV record and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Field at `idx`, or an empty string when the row is shorter.
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct RawTable {
    pub schema: TableSchema,
    pub path: PathBuf,
    /// Rows that passed the width check.
    pub rows: Vec<RawRow>,
    pub width: usize,
}

fn strip_bom<'a>(bytes: &'a [u8], path: &Path) -> Result<&'a [u8]> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(LoadError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(LoadError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    Ok(bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes))
}

fn decode(bytes: &[u8], path: &Path) -> Result<String> {
    let bytes = strip_bom(bytes, path)?;
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(error) => {
            let valid = &bytes[..error.valid_up_to()];
            let line = valid.iter().filter(|byte| **byte == b'\n').count() + 1;
            Err(LoadError::InvalidUtf8 {
                path: path.to_path_buf(),
                line,
            })
        }
    }
}

/// First byte of the record the csv reader reported at `offset`.
///
/// The reported offset can sit on the `\n` of a preceding `\r\n` or on blank
/// lines the reader skipped; a record never starts with a line break.
fn record_start(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let skipped = bytes.get(offset..).map_or(0, |rest| {
        rest.iter()
            .take_while(|byte| matches!(**byte, b'\r' | b'\n'))
            .count()
    });
    offset + skipped
}

fn is_header(row: &RawRow, header: &[&str]) -> bool {
    row.fields.len() == header.len()
        && row
            .fields
            .iter()
            .zip(header)
            .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
}

/// Read `path` as a resource table.
///
/// Returns the rows of correct width plus a malformed-row finding for every
/// row that could not be kept. Only file-level problems are errors.
pub fn read_table(
    path: &Path,
    schema: TableSchema,
    terminator: LineTerminator,
) -> Result<(RawTable, Vec<Finding>)> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::read(path, e))?;
    let text = decode(&bytes, path)?;
    let table = schema.table;
    let mut findings = Vec::new();

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(text.as_bytes());
    let breaks = LineBreaks::scan(&text);
    let mut rows = Vec::new();
    let mut endings = Vec::new();
    let mut blank_lines = Vec::new();
    let mut next_line = 1usize;
    for record in reader.records() {
        match record {
            Ok(record) => {
                let offset = record.position().map_or(0, |pos| pos.byte() as usize);
                let line = breaks.line_of(record_start(&text, offset));
                blank_lines.extend(next_line..line);
                let last_line = line + record.iter().map(breaks_within).sum::<usize>();
                if let Some(ending) = breaks.ending_of(last_line) {
                    endings.push((last_line, ending));
                }
                next_line = last_line + 1;
                rows.push(RawRow {
                    line,
                    fields: record.iter().map(str::to_string).collect(),
                });
            }
            Err(error) => {
                let Some(pos) = error.position() else {
                    return Err(LoadError::CsvParse {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    });
                };
                let line = breaks.line_of(record_start(&text, pos.byte() as usize));
                next_line = next_line.max(line + 1);
                findings.push(
                    Finding::new(table, FindingKind::MalformedRow, error.to_string())
                        .at_line(line),
                );
            }
        }
    }
    blank_lines.extend(next_line..=breaks.line_count());

    for (line, ending) in deviating_lines(&endings, terminator, path)? {
        findings.push(
            Finding::new(
                table,
                FindingKind::MalformedRow,
                format!(
                    "line ends with {}, expected {}",
                    ending.label(),
                    terminator.label()
                ),
            )
            .at_line(line),
        );
    }
    for line in blank_lines {
        findings.push(
            Finding::new(table, FindingKind::MalformedRow, "blank line has 0 fields")
                .at_line(line),
        );
    }

    if let (Some(header), Some(first)) = (schema.header, rows.first())
        && is_header(first, header)
    {
        rows.remove(0);
    }

    let width = match schema.width {
        WidthRule::Fixed(width) => width,
        WidthRule::Widest => rows.iter().map(|row| row.fields.len()).max().unwrap_or(0),
    };
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if row.fields.len() == width {
            kept.push(row);
            continue;
        }
        findings.push(
            Finding::new(
                table,
                FindingKind::MalformedRow,
                format!(
                    "row has {} fields, expected {width} \
                     (pad missing trailing fields with empty values)",
                    row.fields.len()
                ),
            )
            .at_line(row.line),
        );
    }

    debug!(
        table = %table,
        path = %path.display(),
        rows = kept.len(),
        width,
        malformed = findings.len(),
        "read table"
    );

    Ok((
        RawTable {
            schema,
            path: path.to_path_buf(),
            rows: kept,
            width,
        },
        findings,
    ))
}
