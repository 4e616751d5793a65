//! Uploaded payroll/trip data files and their processing state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What an uploaded file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Payroll,
    Trips,
}

impl ImportKind {
    pub const ALL: [ImportKind; 2] = [ImportKind::Payroll, ImportKind::Trips];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Payroll => "payroll",
            ImportKind::Trips => "trips",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportKind::Payroll => "Payroll",
            ImportKind::Trips => "Trips",
        }
    }
}

impl std::str::FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payroll" => Ok(ImportKind::Payroll),
            "trips" => Ok(ImportKind::Trips),
            other => Err(format!("unknown import kind '{other}'")),
        }
    }
}

/// Backend-side processing state of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ImportStatus::Pending => "Pending",
            ImportStatus::Processing => "Processing",
            ImportStatus::Completed => "Completed",
            ImportStatus::Failed => "Failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ImportStatus::Completed | ImportStatus::Failed)
    }
}

/// A file previously uploaded for ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileImport {
    pub id: i64,
    pub kind: ImportKind,
    pub file_name: String,
    pub status: ImportStatus,
    #[serde(default)]
    pub rows_total: Option<u32>,
    #[serde(default)]
    pub rows_failed: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

/// A file received from the browser or CLI, ready to forward to the backend.
#[derive(Clone)]
pub struct UploadFile {
    pub kind: ImportKind,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> UploadFile {
        UploadFile {
            kind: ImportKind::Trips,
            file_name: name.to_string(),
            content_type: None,
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(upload("march.CSV").extension().as_deref(), Some("csv"));
        assert_eq!(upload("trips.2026.xlsx").extension().as_deref(), Some("xlsx"));
        assert_eq!(upload("noext").extension(), None);
        assert_eq!(upload("trailing.").extension(), None);
    }

    #[test]
    fn test_import_kind_from_str() {
        assert_eq!("Payroll".parse::<ImportKind>(), Ok(ImportKind::Payroll));
        assert!("fuel".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_debug_hides_bytes() {
        let debug = format!("{:?}", upload("a.csv"));
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
