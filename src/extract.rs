//! Text extraction for uploaded files.
//!
//! Uploads arrive as bytes plus a content type; this module turns them into
//! plain UTF-8 text for the chunker. Only plain text is decoded for real.
//! PDF and DOCX get a placeholder body naming the file, which keeps those
//! uploads flowing through the pipeline until a real parser is plugged in
//! behind [`TextExtractor`].

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),
    #[error("{0} is not valid UTF-8 text")]
    InvalidUtf8(String),
}

/// Turns an uploaded file into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ExtractError>;
}

/// Decodes `text/plain`; stands in for PDF and DOCX.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderExtractor;

impl TextExtractor for PlaceholderExtractor {
    fn extract(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ExtractError> {
        match content_type {
            MIME_TEXT => String::from_utf8(bytes.to_vec())
                .map_err(|_| ExtractError::InvalidUtf8(filename.to_string())),
            MIME_PDF => Ok(format!(
                "[Extracted text from PDF: {}]\n\nThis is placeholder text extracted from the PDF file. \
                 PDF parsing is not available, so the document body is not indexed.",
                filename
            )),
            MIME_DOCX => Ok(format!(
                "[Extracted text from DOCX: {}]\n\nThis is placeholder text extracted from the DOCX file. \
                 Word document parsing is not available, so the document body is not indexed.",
                filename
            )),
            other => Err(ExtractError::UnsupportedContentType(other.to_string())),
        }
    }
}

/// The declared content type, or a guess from the extension when the client
/// sent none (or only `application/octet-stream`).
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    let declared = declared
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != MIME_OCTET_STREAM);
    if let Some(ct) = declared {
        return ct;
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "txt" | "md" | "text" => MIME_TEXT,
        "pdf" => MIME_PDF,
        "docx" => MIME_DOCX,
        _ => MIME_OCTET_STREAM,
    }
    .to_string()
}
