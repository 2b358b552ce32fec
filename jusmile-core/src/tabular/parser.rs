use std::sync::Arc;

use super::row::Row;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),
}

/// Parses permissively: an unterminated quote is closed at end of input.
pub fn parse(text: &str) -> Vec<Row> {
    let (records, unterminated) = split_records(text);
    if let Some(line) = unterminated {
        tracing::warn!(line, "Unterminated quoted field; closing it at end of input");
    }
    into_rows(records)
}

/// Parses, rejecting an unterminated quoted field.
pub fn parse_strict(text: &str) -> Result<Vec<Row>, ParseError> {
    let (records, unterminated) = split_records(text);
    match unterminated {
        Some(line) => Err(ParseError::UnterminatedQuote(line)),
        None => Ok(into_rows(records)),
    }
}

fn into_rows(mut records: Vec<Vec<String>>) -> Vec<Row> {
    if records.is_empty() {
        return Vec::new();
    }
    let headers: Arc<[String]> = records.remove(0).into();
    records
        .into_iter()
        .map(|values| Row::new(headers.clone(), values))
        .collect()
}

/// Splits text into trimmed records. Blank records are dropped. Returns the
/// line where an unterminated quote began, if any.
fn split_records(text: &str) -> (Vec<Vec<String>>, Option<usize>) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() || in_quotes {
        record.push(field);
        push_record(&mut records, record);
    }

    (records, in_quotes.then_some(quote_line))
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let record: Vec<String> = record.into_iter().map(|f| f.trim().to_string()).collect();
    if record.iter().any(|f| !f.is_empty()) {
        records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let rows = parse("food,unit,kcal\n吐司,片,70\n雞蛋,顆,70\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("food"), Some("吐司"));
        assert_eq!(rows[1].get("kcal"), Some("70"));
    }

    #[test]
    fn test_parse_crlf_and_bom() {
        let rows = parse("\u{feff}food,unit\r\n白飯,碗\r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].headers(), &["food".to_string(), "unit".to_string()]);
        assert_eq!(rows[0].get("unit"), Some("碗"));
    }

    #[test]
    fn test_parse_quoted_comma_and_escaped_quote() {
        let rows = parse("name,note\n\"Toast, white\",\"say \"\"hi\"\"\"\n");
        assert_eq!(rows[0].get("name"), Some("Toast, white"));
        assert_eq!(rows[0].get("note"), Some("say \"hi\""));
    }

    #[test]
    fn test_parse_embedded_newline() {
        let rows = parse("name,note\n\"a\",\"line one\nline two\"\nb,plain\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("note"), Some("line one\nline two"));
        assert_eq!(rows[1].get("name"), Some("b"));
    }

    #[test]
    fn test_parse_short_rows_padded() {
        let rows = parse("food,unit,kcal,protein\n吐司,片\n");
        assert_eq!(rows[0].get("kcal"), Some(""));
        assert_eq!(rows[0].get("protein"), Some(""));
    }

    #[test]
    fn test_parse_blank_lines_ignored() {
        let rows = parse("a,b\n1,2\n\n   \n3,4\n\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("a"), Some("3"));
    }

    #[test]
    fn test_parse_trims_cells() {
        let rows = parse(" food , kcal \n 吐司 , 70 \n");
        assert_eq!(rows[0].get("food"), Some("吐司"));
        assert_eq!(rows[0].get("kcal"), Some("70"));
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        let rows = parse("a,b\n1,2");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("b"), Some("2"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("only,header\n").is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_recovered() {
        let rows = parse("a,b\n1,\"open\n2,3\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("b"), Some("open\n2,3"));
    }

    #[test]
    fn test_parse_strict_rejects_unterminated_quote() {
        let err = parse_strict("a,b\n1,\"open\n").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedQuote(2));
        assert!(parse_strict("a,b\n1,\"closed\"\n").is_ok());
    }

    #[test]
    fn test_literal_quote_inside_unquoted_field() {
        let rows = parse("name\n5\" pizza\n");
        assert_eq!(rows[0].get("name"), Some("5\" pizza"));
    }
}
