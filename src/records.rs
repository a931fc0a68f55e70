//! Comma-separated record handling shared by the config file, the fixture
//! tables and the CSV exporter.
//!
//! Records are single lines. Fields are trimmed unless quoted; quoted fields
//! use `""` for a literal quote.

/// Errors from splitting a single record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A quoted field was opened but never closed.
    #[error("unterminated quoted field")]
    UnterminatedQuote,

    /// Something other than a separator followed a closing quote.
    #[error("unexpected character '{0}' after closing quote")]
    TrailingAfterQuote(char),
}

/// Splits one line into fields.
///
/// # Example
///
/// ```
/// use depviz::records::split_record;
///
/// let fields = split_record(r#" left ,"a, ""quoted"" value",right"#).unwrap();
/// assert_eq!(fields, vec!["left", "a, \"quoted\" value", "right"]);
/// ```
pub fn split_record(line: &str) -> Result<Vec<String>, RecordError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                    quoted = true;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(finish_field(&mut field, quoted));
                quoted = false;
            }
            '"' if !quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            c if quoted => {
                if !c.is_whitespace() {
                    return Err(RecordError::TrailingAfterQuote(c));
                }
            }
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err(RecordError::UnterminatedQuote);
    }
    fields.push(finish_field(&mut field, quoted));
    Ok(fields)
}

fn finish_field(field: &mut String, quoted: bool) -> String {
    let value = std::mem::take(field);
    if quoted {
        value
    } else {
        value.trim().to_string()
    }
}

/// Escape a field value for CSV output.
///
/// Wraps the value in quotes if it contains commas, quotes, newlines or
/// surrounding whitespace that would otherwise be trimmed on read, or if it
/// starts with `#` and would be read back as a comment.
pub fn escape_field(value: &str) -> String {
    let needs_quotes = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.trim() != value
        || value.starts_with('#');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Returns true for lines that carry no record (blank or `#` comments).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
