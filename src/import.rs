//! CSV word-list import.
//!
//! Rows are `source,target[,emoji,example]` with a mandatory header line.
//! The delimiter is auto-detected per line by counting candidates outside
//! quotes: tab wins if present at all, semicolon only when strictly more
//! frequent than comma, comma otherwise. Quoted fields may embed delimiters
//! and escape quotes as `""`.

use serde::Serialize;

use crate::words::WordEntry;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv needs a header row and at least one data row")]
    TooShort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
}

pub fn detect_delimiter(line: &str) -> char {
    let mut commas = 0usize;
    let mut semicolons = 0usize;
    let mut tabs = 0usize;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            '\t' if !in_quotes => tabs += 1,
            _ => {}
        }
    }

    if tabs > 0 {
        '\t'
    } else if semicolons > commas {
        ';'
    } else {
        ','
    }
}

/// Splits one CSV line into trimmed fields, honoring quoting.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let delimiter = detect_delimiter(line);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_quotes {
            if ch == '"' {
                if i + 1 < chars.len() && chars[i + 1] == '"' {
                    current.push('"');
                    i += 1;
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
        i += 1;
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parses a whole CSV document into word entries. The first non-blank line
/// is treated as a header and skipped; rows missing either translation field
/// are dropped silently and only counted in the report.
pub fn import_words(text: &str) -> Result<(Vec<WordEntry>, ImportReport), ImportError> {
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(ImportError::TooShort);
    }

    let mut words = Vec::new();
    let mut report = ImportReport::default();

    for line in &lines[1..] {
        let fields = parse_csv_line(line);
        let german = fields.first().map(|s| s.as_str()).unwrap_or("");
        let dutch = fields.get(1).map(|s| s.as_str()).unwrap_or("");
        if german.is_empty() || dutch.is_empty() {
            report.rejected += 1;
            continue;
        }

        let mut entry = WordEntry::new(german, dutch);
        entry.emoji = fields.get(2).filter(|s| !s.is_empty()).cloned();
        entry.example = fields.get(3).filter(|s| !s.is_empty()).cloned();
        words.push(entry);
        report.accepted += 1;
    }

    Ok((words, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_wins_whenever_present() {
        assert_eq!(detect_delimiter("a,b;c\td"), '\t');
    }

    #[test]
    fn semicolon_needs_strict_majority() {
        assert_eq!(detect_delimiter("a;b;c,d"), ';');
        // Two semicolons, two commas: the tie falls back to comma.
        assert_eq!(detect_delimiter("a,b;c,d;e"), ',');
    }

    #[test]
    fn quoted_delimiters_are_not_counted() {
        assert_eq!(detect_delimiter("\"a;b;c\",d"), ',');
    }

    #[test]
    fn quoted_fields_embed_delimiters_and_escaped_quotes() {
        let fields = parse_csv_line("\"Guten Tag, alle\",Goedendag,\"say \"\"hi\"\"\"");
        assert_eq!(fields[0], "Guten Tag, alle");
        assert_eq!(fields[1], "Goedendag");
        assert_eq!(fields[2], "say \"hi\"");
    }

    #[test]
    fn rows_missing_fields_are_dropped_and_counted() {
        let csv = "German,Dutch\nHund,Hond\nKatze\n,Huis\nBrot,Brood,🍞,Das Brot ist frisch";
        let (words, report) = import_words(csv).unwrap();
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(words[0].german, "Hund");
        assert_eq!(words[1].emoji.as_deref(), Some("🍞"));
        assert_eq!(words[1].example.as_deref(), Some("Das Brot ist frisch"));
    }

    #[test]
    fn imported_words_get_fresh_ids() {
        let (words, _) = import_words("g,d\nHund,Hond\nKatze,Kat").unwrap();
        assert!(!words[0].id.is_empty());
        assert_ne!(words[0].id, words[1].id);
    }

    #[test]
    fn header_only_input_is_rejected() {
        assert!(matches!(import_words("German,Dutch"), Err(ImportError::TooShort)));
        assert!(matches!(import_words(""), Err(ImportError::TooShort)));
    }

    #[test]
    fn semicolon_rows_parse() {
        let (words, report) = import_words("g;d\nStra\u{df}e;Straat;🛣️\n").unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(words[0].german, "Straße");
        assert_eq!(words[0].dutch, "Straat");
    }
}
