//! Minimal RFC 4180 CSV reading and writing for spreadsheet import/export.
//!
//! Rows are plain `Vec<String>` cells; interpretation of the cells belongs to
//! [`crate::import`].

/// Parse CSV text into rows of cells.
///
/// Handles quoted fields, doubled quotes inside quoted fields, embedded
/// newlines, and both `\n` and `\r\n` line endings. A leading UTF-8 BOM is
/// ignored. A trailing newline does not produce an empty final row.
pub fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Quote a cell when it contains a delimiter, quote, or line break.
pub fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a header row plus data rows as CSV text (`\n` line endings).
pub fn write_csv<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut out = header
        .iter()
        .map(|h| escape_csv_field(h))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    for row in rows {
        let line = row
            .iter()
            .map(|cell| escape_csv_field(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_rows() {
        let rows = parse_csv("name,salary\nAvery,100\nJordan,200\n");
        assert_eq!(
            rows,
            vec![
                vec!["name".to_string(), "salary".to_string()],
                vec!["Avery".to_string(), "100".to_string()],
                vec!["Jordan".to_string(), "200".to_string()],
            ]
        );
    }

    #[test]
    fn parses_quotes_commas_and_crlf() {
        let rows = parse_csv("a,b\r\n\"Walker, Avery\",\"say \"\"hi\"\"\"\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Walker, Avery".to_string(), "say \"hi\"".to_string()]);
    }

    #[test]
    fn keeps_empty_cells_and_strips_bom() {
        let rows = parse_csv("\u{feff}a,,c");
        assert_eq!(rows, vec![vec!["a".to_string(), String::new(), "c".to_string()]]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("q\"q"), "\"q\"\"q\"");
    }

    #[test]
    fn written_csv_parses_back() {
        let text = write_csv(&["name", "title"], &[vec!["Kim, Jordan", "VP \"Eng\""]]);
        let rows = parse_csv(&text);
        assert_eq!(rows[1], vec!["Kim, Jordan".to_string(), "VP \"Eng\"".to_string()]);
    }
}
