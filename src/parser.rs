use crate::ir::FormulationRecord;
use std::mem;
use thiserror::Error;
use tracing::{debug, warn};

pub const BRAND_COLUMN: &str = "Brand";
pub const TOP_COLUMN: &str = "Top";
pub const MIDDLE_COLUMN: &str = "Middle";
pub const BASE_COLUMN: &str = "Base";

/// A single row that could not be turned into a record. The row is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("line {line}: unparseable record: {reason}")]
    UnparseableRecord { line: usize, reason: String },
}

/// Failures that make the whole input unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("input has no header row")]
    MissingHeader,
    #[error("malformed header row: {0}")]
    MalformedHeader(String),
    #[error("header is missing required column `{0}`")]
    MissingColumn(&'static str),
}

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub records: Vec<FormulationRecord>,
    pub skipped: Vec<RecordError>,
}

#[derive(Debug)]
struct RawRow {
    line: usize,
    fields: Vec<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    brand: usize,
    top: Option<usize>,
    middle: Option<usize>,
    base: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, SourceError> {
        let find = |name: &str| header.iter().position(|field| field.trim() == name);
        Ok(Self {
            brand: find(BRAND_COLUMN).ok_or(SourceError::MissingColumn(BRAND_COLUMN))?,
            top: find(TOP_COLUMN),
            middle: find(MIDDLE_COLUMN),
            base: find(BASE_COLUMN),
        })
    }
}

/// Parses delimited perfume data with a `Brand,Top,Middle,Base` header.
///
/// Column order is free and unknown columns are ignored. Missing note columns
/// read as empty. Rows that cannot be parsed land in [`ParseOutput::skipped`]
/// instead of aborting the whole input.
pub fn parse_records(input: &str) -> Result<ParseOutput, SourceError> {
    // Spreadsheet exports often lead with a UTF-8 byte-order mark.
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut rows = split_rows(input).into_iter();
    let header = rows.next().ok_or(SourceError::MissingHeader)?;
    if let Some(reason) = header.error {
        return Err(SourceError::MalformedHeader(reason));
    }
    let columns = Columns::from_header(&header.fields)?;

    let mut output = ParseOutput::default();
    for row in rows {
        match row_to_record(row, columns) {
            Ok(record) => output.records.push(record),
            Err(err) => {
                warn!("skipping record: {err}");
                output.skipped.push(err);
            }
        }
    }
    debug!(
        records = output.records.len(),
        skipped = output.skipped.len(),
        "parsed formulation records"
    );
    Ok(output)
}

fn row_to_record(row: RawRow, columns: Columns) -> Result<FormulationRecord, RecordError> {
    let line = row.line;
    if let Some(reason) = row.error {
        return Err(RecordError::UnparseableRecord { line, reason });
    }
    let mut fields = row.fields;
    if fields.len() <= columns.brand {
        return Err(RecordError::UnparseableRecord {
            line,
            reason: format!("expected a `{BRAND_COLUMN}` field, found {} fields", fields.len()),
        });
    }
    let mut take = |idx: Option<usize>| {
        idx.and_then(|idx| fields.get_mut(idx))
            .map(mem::take)
            .unwrap_or_default()
    };
    Ok(FormulationRecord {
        brand: take(Some(columns.brand)),
        top: take(columns.top),
        middle: take(columns.middle),
        base: take(columns.base),
    })
}

fn split_rows(input: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    let mut row_line = 1;
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut error: Option<String> = None;

    let mut finish_row = |fields: &mut Vec<String>,
                          field: &mut String,
                          quoted: bool,
                          error: &mut Option<String>,
                          row_line: usize| {
        let blank = fields.is_empty() && field.trim().is_empty() && !quoted;
        fields.push(mem::take(field));
        if !blank {
            rows.push(RawRow {
                line: row_line,
                fields: mem::take(fields),
                error: error.take(),
            });
        }
        fields.clear();
        *error = None;
    };

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            '"' => {
                error.get_or_insert_with(|| {
                    format!("stray quote in field {}", fields.len() + 1)
                });
                field.push(ch);
            }
            ',' => {
                fields.push(mem::take(&mut field));
                quoted = false;
            }
            '\r' => {}
            '\n' => {
                finish_row(&mut fields, &mut field, quoted, &mut error, row_line);
                quoted = false;
                line += 1;
                row_line = line;
            }
            _ => {
                if quoted {
                    error.get_or_insert_with(|| {
                        format!("unexpected text after closing quote in field {}", fields.len() + 1)
                    });
                }
                field.push(ch);
            }
        }
    }

    if in_quotes {
        error.get_or_insert_with(|| "unterminated quoted field".to_string());
    }
    finish_row(&mut fields, &mut field, quoted, &mut error, row_line);

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_note_lists() {
        let input = "Name,Brand,Top,Middle,Base\n\
                     J'adore,dior,\"bergamot, lemon\",rose,\n\
                     No 5,chanel,aldehydes,\"jasmine, rose\",\"vanilla, musk\"\n";
        let output = parse_records(input).unwrap();
        assert!(output.skipped.is_empty());
        assert_eq!(
            output.records,
            vec![
                FormulationRecord::new("dior", "bergamot, lemon", "rose", ""),
                FormulationRecord::new("chanel", "aldehydes", "jasmine, rose", "vanilla, musk"),
            ]
        );
    }

    #[test]
    fn missing_note_columns_read_as_empty() {
        let output = parse_records("Brand,Top\ngucci,rose\n").unwrap();
        assert_eq!(output.records, vec![FormulationRecord::new("gucci", "rose", "", "")]);
    }

    #[test]
    fn short_rows_keep_available_fields() {
        let output = parse_records("Brand,Top,Middle,Base\ngucci,rose\r\n").unwrap();
        assert_eq!(output.records, vec![FormulationRecord::new("gucci", "rose", "", "")]);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let input = "Brand,Top,Middle,Base\n\
                     dior,x\"y,rose,musk\n\
                     gucci,rose,iris,musk\n\
                     chanel,\"unterminated,rose";
        let output = parse_records(input).unwrap();
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].brand, "gucci");
        assert_eq!(output.skipped.len(), 2);
        assert!(matches!(
            output.skipped[0],
            RecordError::UnparseableRecord { line: 2, .. }
        ));
        assert!(matches!(
            output.skipped[1],
            RecordError::UnparseableRecord { line: 4, .. }
        ));
    }

    #[test]
    fn quoted_fields_may_span_lines() {
        let input = "Brand,Top\n\"tom-ford\",\"rose,\nmusk\"\ngucci,iris\n";
        let output = parse_records(input).unwrap();
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].top, "rose,\nmusk");
        assert_eq!(output.records[0].brand, "tom-ford");
    }

    #[test]
    fn escaped_quotes_are_unescaped() {
        let output = parse_records("Brand,Top\n\"a \"\"b\"\"\",rose\n").unwrap();
        assert_eq!(output.records[0].brand, "a \"b\"");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let output = parse_records("Brand,Top\n\ngucci,rose\n\n").unwrap();
        assert_eq!(output.records.len(), 1);
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let output =
            parse_records("\u{feff}Brand,Top,Middle,Base\ndior,\"bergamot, lemon\",rose,\n").unwrap();
        assert!(output.skipped.is_empty());
        assert_eq!(
            output.records,
            vec![FormulationRecord::new("dior", "bergamot, lemon", "rose", "")]
        );
    }

    #[test]
    fn header_problems_are_fatal() {
        assert_eq!(parse_records("").unwrap_err(), SourceError::MissingHeader);
        assert_eq!(
            parse_records("Top,Middle\nrose,iris\n").unwrap_err(),
            SourceError::MissingColumn("Brand")
        );
    }
}
