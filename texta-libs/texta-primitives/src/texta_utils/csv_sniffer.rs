use crate::schemas::csv_batch::CsvBatch;
use crate::texta_utils::texta_logging::{texta_log, TextaLogLevel, TextaLogOption};
use csv::{ReaderBuilder, Trim};
use thiserror::Error;

/// Words that mark a first line as a header row, and that name a text column.
pub const HEADER_KEYWORDS: [&str; 8] = [
    "text", "content", "message", "sentence", "comment", "review", "feedback", "data",
];

#[derive(Error, Debug, PartialEq)]
pub enum CsvSniffError {
    #[error("The file is empty")]
    EmptyFile,
    #[error("No analyzable text found in column {column}")]
    NoTextRows { column: usize },
}

/// Decides whether the first record is a header row and which column holds
/// the text to analyze, then collects that column from every data record.
/// Quoted fields may span lines.
pub fn sniff_csv(content: &str) -> Result<CsvBatch, CsvSniffError> {
    let records = read_records(content);

    if records.is_empty() {
        return Err(CsvSniffError::EmptyFile);
    }

    if records.len() == 1 {
        return Ok(CsvBatch {
            headers: Vec::new(),
            texts: vec![content.trim().to_string()],
            total_rows: 1,
            has_headers: false,
            text_column: 0,
            warning: None,
        });
    }

    let first_line = records[0].join(",").to_lowercase();
    let has_headers = HEADER_KEYWORDS.iter().any(|k| first_line.contains(k));

    let (headers, text_column, warning, data_records) = if has_headers {
        let headers = records[0].clone();
        let exact = headers
            .iter()
            .position(|h| HEADER_KEYWORDS.contains(&h.to_lowercase().as_str()));
        match exact {
            Some(index) => (headers, index, None, &records[1..]),
            None => {
                let warning = format!(
                    "No column named one of [{}] was found; using the first column \"{}\"",
                    HEADER_KEYWORDS.join(", "),
                    headers.first().map(String::as_str).unwrap_or("")
                );
                (headers, 0, Some(warning), &records[1..])
            }
        }
    } else {
        (Vec::new(), 0, None, &records[..])
    };

    let texts: Vec<String> = data_records
        .iter()
        .filter_map(|cells| cells.get(text_column).filter(|cell| !cell.is_empty()).cloned())
        .collect();

    if texts.is_empty() {
        return Err(CsvSniffError::NoTextRows { column: text_column });
    }

    texta_log(
        TextaLogOption::Csv,
        TextaLogLevel::Debug,
        format!(
            "Sniffed CSV: has_headers={}, text_column={}, rows={}",
            has_headers,
            text_column,
            texts.len()
        )
        .as_str(),
    );

    Ok(CsvBatch {
        headers,
        total_rows: texts.len(),
        texts,
        has_headers,
        text_column,
        warning,
    })
}

/// Reads every record as trimmed cells. Records whose cells are all blank
/// are dropped, as are records the reader cannot parse.
fn read_records(content: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    reader
        .records()
        .filter_map(Result::ok)
        .map(|record| record.iter().map(String::from).collect::<Vec<String>>())
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row_with_text_column() {
        let batch = sniff_csv("text\napple\nbanana").unwrap();
        assert!(batch.has_headers);
        assert_eq!(batch.texts, vec!["apple", "banana"]);
        assert_eq!(batch.total_rows, 2);
        assert_eq!(batch.warning, None);
        assert_eq!(batch.text_column_name(), Some("text"));
    }

    #[test]
    fn test_no_header_keywords_uses_first_column() {
        let batch = sniff_csv("apple,red\nbanana,yellow").unwrap();
        assert!(!batch.has_headers);
        assert_eq!(batch.text_column, 0);
        assert_eq!(batch.texts, vec!["apple", "banana"]);
        assert!(batch.headers.is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_content() {
        assert_eq!(sniff_csv(""), Err(CsvSniffError::EmptyFile));
        assert_eq!(sniff_csv("   \n\n  \r\n"), Err(CsvSniffError::EmptyFile));
    }

    #[test]
    fn test_header_without_exact_match_falls_back_with_warning() {
        let batch = sniff_csv("user_comments,rating\nGreat stuff,5\nMeh,2").unwrap();
        assert!(batch.has_headers);
        assert_eq!(batch.text_column, 0);
        assert_eq!(batch.texts, vec!["Great stuff", "Meh"]);
        assert!(!batch.warning.unwrap().is_empty());
    }

    #[test]
    fn test_selects_exact_match_column_case_insensitive() {
        let batch = sniff_csv("id,Review,stars\n1,Loved it,5\n2,Hated it,1").unwrap();
        assert_eq!(batch.text_column, 1);
        assert_eq!(batch.texts, vec!["Loved it", "Hated it"]);
    }

    #[test]
    fn test_short_rows_and_empty_cells_are_skipped() {
        let batch = sniff_csv("id,comment\n1,first\n2\n3,\n4,  \n5,last").unwrap();
        assert_eq!(batch.texts, vec!["first", "last"]);
        assert_eq!(batch.total_rows, 2);
    }

    #[test]
    fn test_single_line_is_one_untitled_row() {
        let batch = sniff_csv("just one line, with a comma\n\n").unwrap();
        assert!(!batch.has_headers);
        assert_eq!(batch.texts, vec!["just one line, with a comma"]);
        assert_eq!(batch.total_rows, 1);
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let batch = sniff_csv("text,label\n\"Good, really good\",1\nfine,0").unwrap();
        assert_eq!(batch.texts, vec!["Good, really good", "fine"]);
    }

    #[test]
    fn test_header_with_no_text_rows_is_an_error() {
        assert_eq!(
            sniff_csv("id,text\n1,\n2,"),
            Err(CsvSniffError::NoTextRows { column: 1 })
        );
    }

    #[test]
    fn test_quoted_cells_may_span_lines() {
        let batch = sniff_csv("comment,stars\n\"Arrived late.\nStill works\",3\n\n   \nfine,4\n").unwrap();
        assert_eq!(batch.texts, vec!["Arrived late.\nStill works", "fine"]);
        assert_eq!(batch.total_rows, 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let batch = sniff_csv("message\r\nhello\r\nworld\r\n").unwrap();
        assert_eq!(batch.texts, vec!["hello", "world"]);
    }
}
