//! Preselection PDF uploads

use std::path::Path;
use tracing::debug;

use crate::error::{ConsoleError, Result};

/// Upload size ceiling (10 MiB)
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file about to be sent to the preselection upload endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk and detect its content type
    ///
    /// The type is sniffed from the magic bytes; files the sniffer does not
    /// recognise fall back on a `.pdf` extension check.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(hkadm_common::Error::from)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        let content_type = match infer::get(&bytes) {
            Some(kind) => kind.mime_type().to_string(),
            None if has_pdf_extension(path) => PDF_CONTENT_TYPE.to_string(),
            None => "application/octet-stream".to_string(),
        };
        debug!(file = %file_name, content_type = %content_type, size = bytes.len(), "Read upload");

        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Client-side checks run before any request
    pub fn validate(&self) -> Result<()> {
        if !self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
            return Err(ConsoleError::Validation("The file must be a PDF.".to_string()));
        }
        if self.size() > MAX_DOCUMENT_BYTES {
            return Err(ConsoleError::Validation(
                "The PDF must not exceed 10 MB.".to_string(),
            ));
        }
        Ok(())
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n";

    #[test]
    fn test_rejects_non_pdf() {
        let upload = DocumentUpload::new("notes.txt", "text/plain", b"hello".to_vec());
        let err = upload.validate().unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(ref m) if m.contains("PDF")));
    }

    #[test]
    fn test_rejects_oversized() {
        let upload = DocumentUpload::new(
            "big.pdf",
            PDF_CONTENT_TYPE,
            vec![0u8; MAX_DOCUMENT_BYTES + 1],
        );
        assert!(matches!(upload.validate(), Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_accepts_limit_exactly() {
        let upload = DocumentUpload::new("ok.pdf", PDF_CONTENT_TYPE, vec![0u8; MAX_DOCUMENT_BYTES]);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_from_path_sniffs_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.bin");
        std::fs::write(&path, PDF_HEADER).unwrap();

        let upload = DocumentUpload::from_path(&path).unwrap();
        assert_eq!(upload.content_type, PDF_CONTENT_TYPE);
        assert_eq!(upload.file_name, "list.bin");
    }

    #[test]
    fn test_from_path_unknown_bytes() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("list.txt");
        std::fs::write(&txt, "plain text").unwrap();
        assert!(DocumentUpload::from_path(&txt).unwrap().validate().is_err());

        let pdf = dir.path().join("list.pdf");
        std::fs::write(&pdf, "plain text").unwrap();
        assert_eq!(
            DocumentUpload::from_path(&pdf).unwrap().content_type,
            PDF_CONTENT_TYPE
        );
    }
}
