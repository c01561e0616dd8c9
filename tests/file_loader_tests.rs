use std::fs;
use texta_primitives::texta_utils::csv_sniffer::CsvSniffError;
use texta_relay::client::file_loader::{load_file, FileLoadError, LoadedFile};

#[test]
fn test_loads_text_and_csv_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let txt = dir.path().join("letter.txt");
    fs::write(&txt, "Dear team,\n\nThank you for the wonderful support.").unwrap();
    assert_eq!(
        load_file(&txt).unwrap(),
        LoadedFile::Text("Dear team,\n\nThank you for the wonderful support.".to_string())
    );

    let csv = dir.path().join("feedback.CSV");
    fs::write(&csv, "feedback\r\n\"Fast, friendly\"\r\nToo slow\r\n").unwrap();
    match load_file(&csv).unwrap() {
        LoadedFile::Csv(batch) => {
            assert!(batch.has_headers);
            assert_eq!(batch.texts, vec!["Fast, friendly", "Too slow"]);
            assert_eq!(batch.total_rows, 2);
        }
        other => panic!("expected a CSV batch, got {:?}", other),
    }
}

#[test]
fn test_docx_is_read_as_lossy_text() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("minutes.docx");
    fs::write(&docx, b"PK\x03\x04 meeting went well").unwrap();

    match load_file(&docx).unwrap() {
        LoadedFile::Text(text) => assert!(text.ends_with("meeting went well")),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.txt");
    assert!(matches!(load_file(&missing), Err(FileLoadError::Io(_))));

    // Unsupported extensions are rejected before the file is read.
    let image = dir.path().join("photo.jpg");
    assert!(matches!(load_file(&image), Err(FileLoadError::Unsupported(_))));

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "\n\n").unwrap();
    assert!(matches!(load_file(&empty), Err(FileLoadError::Empty(_))));

    let headers_only = dir.path().join("headers.csv");
    fs::write(&headers_only, "id,text\n7,\n").unwrap();
    assert!(matches!(
        load_file(&headers_only),
        Err(FileLoadError::Csv(CsvSniffError::NoTextRows { column: 1 }))
    ));
}
