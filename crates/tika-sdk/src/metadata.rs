//! Parser for the `/meta` response in `text/csv` form.
//!
//! Tika answers with one `"key","value"` pair per line. This is a best-effort
//! reader rather than a CSV parser: a line is split on every comma, the first
//! field is taken as the key and the last as the value, and each loses its
//! first and last character. Embedded commas and escaped quotes are not
//! understood.

use crate::models::Metadata;

/// Parse a metadata response body into a key/value mapping.
///
/// A line is skipped when it has fewer than two fields, or when its key or
/// value is shorter than two characters. Later keys overwrite earlier ones.
pub fn parse_metadata(body: &str) -> Metadata {
    let mut result = Metadata::new();

    for line in body.lines() {
        if let Some((key, value)) = parse_line(line) {
            result.insert(key.to_string(), value.to_string());
        }
    }

    result
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 2 {
        return None;
    }

    let key = fields[0];
    let value = fields[fields.len() - 1];
    if key.chars().count() < 2 || value.chars().count() < 2 {
        return None;
    }

    Some((unwrap_quotes(key), unwrap_quotes(value)))
}

/// Drop the first and last character, whatever they are.
fn unwrap_quotes(field: &str) -> &str {
    let mut chars = field.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_pair() {
        let meta = parse_metadata("\"key\",\"value\"");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn test_single_field_line_is_skipped() {
        let meta = parse_metadata("\"lonely\"\n\"Content-Type\",\"application/pdf\"");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("Content-Type"), Some(&"application/pdf".to_string()));
    }

    #[test]
    fn test_single_character_key_is_skipped() {
        let meta = parse_metadata("k,\"value\"");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_single_character_value_is_skipped() {
        let meta = parse_metadata("\"key\",v");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_two_character_fields_become_empty_strings() {
        let meta = parse_metadata("\"\",\"\"");
        assert_eq!(meta.get(""), Some(&String::new()));
    }

    #[test]
    fn test_middle_fields_are_ignored() {
        let meta = parse_metadata("\"dc:creator\",\"ignored\",\"Jane\"");
        assert_eq!(meta.get("dc:creator"), Some(&"Jane".to_string()));
    }

    #[test]
    fn test_embedded_comma_keeps_literal_behaviour() {
        let meta = parse_metadata("\"title\",\"Hello, world\"");
        assert_eq!(meta.get("title"), Some(&"world".to_string()));
    }

    #[test]
    fn test_later_duplicates_win() {
        let meta = parse_metadata("\"Author\",\"first\"\n\"Author\",\"second\"\n");
        assert_eq!(meta.get("Author"), Some(&"second".to_string()));
    }

    #[test]
    fn test_crlf_lines() {
        let meta = parse_metadata("\"a\",\"1\"\r\n\"b\",\"2\"\r\n");
        assert_eq!(meta.get("a"), Some(&"1".to_string()));
        assert_eq!(meta.get("b"), Some(&"2".to_string()));
    }

    #[test]
    fn test_multibyte_fields() {
        let meta = parse_metadata("«titre»,«Été»");
        assert_eq!(meta.get("titre"), Some(&"Été".to_string()));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_metadata("").is_empty());
    }
}
