//! Module for reading delimited text sources with a header row.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::util::{open_source, read_failure};
use crate::error::{EhrError, Result};

/// UTF-8 byte-order mark as it appears after decoding
const BOM: char = '\u{feff}';

/// Column names of a source, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    fn parse(line: &str, delimiter: char) -> Self {
        let line = line.strip_prefix(BOM).unwrap_or(line);
        Self {
            columns: split_fields(line, delimiter),
        }
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in header order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column by name
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column, failing with `MissingColumn` if absent
    pub fn require(&self, name: &str, path: &Path) -> Result<usize> {
        self.index_of(name).ok_or_else(|| EhrError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    }
}

/// One data row of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based physical line number (the header is line 1)
    pub line: usize,
    /// Field values in header order
    pub fields: Vec<String>,
}

/// Reader over a delimited source whose first line names the columns
///
/// Fields are split strictly on the delimiter, so consecutive delimiters
/// yield empty fields. Every data row must have exactly as many fields as
/// the header.
pub struct DelimitedReader {
    path: PathBuf,
    header: Header,
    delimiter: char,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl DelimitedReader {
    /// Open a source and read its header row
    pub fn open(path: &Path, delimiter: char) -> Result<Self> {
        let file = open_source(path, "reading delimited source")?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => Header::parse(&line.map_err(|e| read_failure(path, 1, e))?, delimiter),
            None => Header {
                columns: Vec::new(),
            },
        };

        log::debug!(
            "Opened {} with {} columns",
            path.display(),
            header.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            delimiter,
            lines,
            line_no: 1,
        })
    }

    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for DelimitedReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_no += 1;

        let line = match line {
            Ok(line) => line,
            Err(e) => return Some(Err(read_failure(&self.path, self.line_no, e))),
        };

        // An empty line is a single empty field and goes through the count check
        let fields = split_fields(&line, self.delimiter);
        if fields.len() != self.header.len() {
            return Some(Err(EhrError::MalformedRow {
                path: self.path.clone(),
                line: self.line_no,
                expected: self.header.len(),
                found: fields.len(),
            }));
        }

        Some(Ok(Row {
            line: self.line_no,
            fields,
        }))
    }
}

fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}
