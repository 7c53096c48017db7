//! Minimal CSV field handling shared by the catalog reader and the exporter.

use std::borrow::Cow;

/// Groups physical lines into CSV records, tagged with their first line
/// number. A quoted field left open at the end of a line continues on the
/// next one, so fields written with embedded line breaks read back whole.
pub(crate) fn records(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (i, line) in text.lines().enumerate() {
        let (start, record) = match pending.take() {
            Some((start, mut record)) => {
                record.push('\n');
                record.push_str(line);
                (start, record)
            }
            None => (i + 1, line.to_string()),
        };
        if record.matches('"').count() % 2 == 1 {
            pending = Some((start, record));
        } else {
            out.push((start, record));
        }
    }

    // An unterminated quote reaches split_row, which reports it.
    out.extend(pending);
    out
}

/// Splits one CSV record into fields, honouring double-quoted fields with
/// `""` escapes.
pub(crate) fn split_row(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

/// Quotes a field if it contains a separator, quote or line break.
pub(crate) fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_row() {
        assert_eq!(split_row("Mario,1.5,,3").unwrap(), vec!["Mario", "1.5", "", "3"]);
    }

    #[test]
    fn split_quoted_row() {
        assert_eq!(
            split_row(r#""Link, Champion",2,"say ""hi""""#).unwrap(),
            vec!["Link, Champion", "2", r#"say "hi""#]
        );
    }

    #[test]
    fn split_rejects_unterminated_quote() {
        assert!(split_row(r#""Mario,1"#).is_err());
    }

    #[test]
    fn records_join_lines_inside_quotes() {
        let text = "Names,Speed\n\"Dry\nBones\",1\nMario,2\n";
        let records = records(text);
        assert_eq!(
            records,
            vec![
                (1, "Names,Speed".to_string()),
                (2, "\"Dry\nBones\",1".to_string()),
                (4, "Mario,2".to_string()),
            ]
        );
        assert_eq!(split_row(&records[1].1).unwrap(), vec!["Dry\nBones", "1"]);
    }

    #[test]
    fn quoted_line_break_reads_back() {
        let name = "Dry\nBones";
        let written = format!("{},1", quote_field(name));
        let records = records(&written);
        assert_eq!(records.len(), 1);
        assert_eq!(split_row(&records[0].1).unwrap()[0], name);
    }

    #[test]
    fn records_keep_unterminated_tail_for_error() {
        let records = records("\"Mario,1\nLuigi,2");
        assert_eq!(records.len(), 1);
        assert!(split_row(&records[0].1).is_err());
    }

    #[test]
    fn quote_only_when_needed() {
        assert_eq!(quote_field("Standard Kart"), "Standard Kart");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
