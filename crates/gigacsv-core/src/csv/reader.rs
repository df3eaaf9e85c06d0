//! Record splitting with RFC 4180 quoting.

use std::iter::Peekable;
use std::str::Chars;

use tracing::debug;

use crate::error::FormatError;

use super::CsvTable;

/// Parses CSV text into a header and a rectangular body.
///
/// The first record is the header. Blank lines between records are skipped,
/// and a leading byte-order mark is ignored.
///
/// # Errors
///
/// Returns [`FormatError`] when the text is empty, a quoted field is never
/// closed, or a data record's width differs from the header's.
pub fn parse(text: &str) -> Result<CsvTable, FormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = RecordReader::new(text);

    let Some(header) = reader.next_record()? else {
        return Err(FormatError::Empty);
    };
    let expected = header.fields.len();

    let mut rows = Vec::new();
    while let Some(record) = reader.next_record()? {
        if record.fields.len() != expected {
            return Err(FormatError::FieldCount {
                // Header is record 1
                record: rows.len() + 2,
                line: record.line,
                expected,
                found: record.fields.len(),
            });
        }
        rows.push(record.fields);
    }

    debug!(columns = expected, rows = rows.len(), "parsed CSV text");
    Ok(CsvTable::new(header.fields, rows))
}

struct RawRecord {
    fields: Vec<String>,
    /// 1-based line the record starts on.
    line: usize,
}

struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    /// Consumes a line terminator whose first character was already read.
    fn finish_terminator(&mut self, c: char) {
        if c == '\r' && self.chars.peek() == Some(&'\n') {
            self.chars.next();
        }
        self.line += 1;
    }

    fn skip_blank_lines(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c != '\n' && c != '\r' {
                break;
            }
            self.chars.next();
            self.finish_terminator(c);
        }
    }

    fn next_record(&mut self) -> Result<Option<RawRecord>, FormatError> {
        self.skip_blank_lines();
        if self.chars.peek().is_none() {
            return Ok(None);
        }

        let line = self.line;
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;
        let mut quote_line = line;

        while let Some(c) = self.chars.next() {
            match c {
                '"' if in_quotes => {
                    // Check for escaped quote ("")
                    if self.chars.peek() == Some(&'"') {
                        current.push('"');
                        self.chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                '"' if at_field_start => {
                    in_quotes = true;
                    at_field_start = false;
                    quote_line = self.line;
                }
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut current));
                    at_field_start = true;
                }
                '\n' | '\r' if !in_quotes => {
                    self.finish_terminator(c);
                    fields.push(current);
                    return Ok(Some(RawRecord { fields, line }));
                }
                _ => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    current.push(c);
                    at_field_start = false;
                }
            }
        }

        if in_quotes {
            return Err(FormatError::UnterminatedQuote { line: quote_line });
        }
        fields.push(current);
        Ok(Some(RawRecord { fields, line }))
    }
}
