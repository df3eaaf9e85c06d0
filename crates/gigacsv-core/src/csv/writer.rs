//! CSV serialization backed by the `csv` crate writer.

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{GridError, Result};

const BOM: char = '\u{feff}';

/// Serializes a header and body to CSV text.
///
/// Fields are quoted only when they contain a comma, a quote, or a line
/// break; embedded quotes are doubled. Records end with `\n`.
///
/// A header whose first cell starts with a byte-order mark is written fully
/// quoted, since `parse` drops an unquoted BOM at the start of the text.
pub fn serialize(header: &[String], rows: &[Vec<String>]) -> Result<String> {
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != header.len())
    {
        return Err(GridError::Serialize {
            message: format!(
                "row {row} has {} fields, expected {}",
                cells.len(),
                header.len()
            ),
        });
    }

    let header_style = if header.first().is_some_and(|cell| cell.starts_with(BOM)) {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut text = write_records(header_style, [header])?;
    text.push_str(&write_records(
        QuoteStyle::Necessary,
        rows.iter().map(Vec::as_slice),
    )?);
    Ok(text)
}

fn write_records<'a>(
    style: QuoteStyle,
    records: impl IntoIterator<Item = &'a [String]>,
) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .flexible(false)
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| GridError::Serialize {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| GridError::Serialize {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_serialize_plain() {
        let text = serialize(
            &strings(&["id", "name"]),
            &[strings(&["1", "foo"]), strings(&["2", "bar"])],
        )
        .unwrap();
        assert_eq!(text, "id,name\n1,foo\n2,bar\n");
    }

    #[test]
    fn test_serialize_quotes_only_when_needed() {
        let text = serialize(
            &strings(&["note", "plain"]),
            &[
                strings(&["a,b", "x"]),
                strings(&["say \"hi\"", "y"]),
                strings(&["two\nlines", "z"]),
            ],
        )
        .unwrap();
        insta::assert_snapshot!(text, @r#"
        note,plain
        "a,b",x
        "say ""hi""",y
        "two
        lines",z
        "#);
    }

    #[test]
    fn test_serialize_single_empty_field_is_quoted() {
        let text = serialize(&strings(&["a"]), &[strings(&[""])]).unwrap();
        assert_eq!(text, "a\n\"\"\n");
    }

    #[test]
    fn test_serialize_rejects_ragged_rows() {
        let result = serialize(&strings(&["a", "b"]), &[strings(&["1"])]);
        assert!(matches!(result, Err(GridError::Serialize { .. })));
    }

    #[test]
    fn test_serialize_quotes_header_with_leading_bom() {
        let header = strings(&["\u{feff}id", "name"]);
        let text = serialize(&header, &[strings(&["1", "x"])]).unwrap();
        assert_eq!(text, "\"\u{feff}id\",\"name\"\n1,x\n");
    }
}
