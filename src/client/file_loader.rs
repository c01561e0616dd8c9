use std::fs;
use std::path::Path;
use texta_primitives::schemas::csv_batch::CsvBatch;
use texta_primitives::texta_utils::csv_sniffer::{sniff_csv, CsvSniffError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileLoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported file type: {0}. Use .txt, .csv, .doc, .docx or .pdf")]
    Unsupported(String),
    #[error("File {0} is not valid UTF-8 text")]
    InvalidEncoding(String),
    #[error("File {0} has no text to analyze")]
    Empty(String),
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] CsvSniffError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedFile {
    Text(String),
    Csv(CsvBatch),
}

pub fn load_file(path: &Path) -> Result<LoadedFile, FileLoadError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    // Check the extension before touching the disk.
    extension_of(&file_name)?;
    let bytes = fs::read(path)?;
    load_from_bytes(&file_name, &bytes)
}

/// Dispatches on the file extension. Office and PDF documents are decoded
/// lossily as UTF-8; no format-aware extraction is attempted.
pub fn load_from_bytes(file_name: &str, bytes: &[u8]) -> Result<LoadedFile, FileLoadError> {
    let text = match extension_of(file_name)?.as_str() {
        "txt" | "csv" => {
            String::from_utf8(bytes.to_vec()).map_err(|_| FileLoadError::InvalidEncoding(file_name.to_string()))?
        }
        _ => String::from_utf8_lossy(bytes).to_string(),
    };

    if text.trim().is_empty() {
        return Err(FileLoadError::Empty(file_name.to_string()));
    }

    if extension_of(file_name)? == "csv" {
        return Ok(LoadedFile::Csv(sniff_csv(&text)?));
    }
    Ok(LoadedFile::Text(text))
}

fn extension_of(file_name: &str) -> Result<String, FileLoadError> {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "txt" | "csv" | "doc" | "docx" | "pdf" => Ok(extension),
        _ => Err(FileLoadError::Unsupported(file_name.to_string())),
    }
}
