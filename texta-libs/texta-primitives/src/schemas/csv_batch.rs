use serde::{Deserialize, Serialize};

/// Texts extracted from one uploaded CSV file. Built once by the sniffer and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvBatch {
    pub headers: Vec<String>,
    pub texts: Vec<String>,
    pub total_rows: usize,
    pub has_headers: bool,
    pub text_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CsvBatch {
    pub fn text_column_name(&self) -> Option<&str> {
        self.headers.get(self.text_column).map(|h| h.as_str())
    }
}
