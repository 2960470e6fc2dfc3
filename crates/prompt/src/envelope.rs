//! Minimal HTML document shell for full-document responses.

use crate::types::notice_heading;

const FALLBACK_TITLE: &str = "School Notice";

/// Document title for a notice type.
pub fn document_title(notice_type: &str) -> String {
    notice_heading(notice_type).unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Wrap a notice fragment in a standalone HTML document.
pub fn wrap_document(notice_type: &str, fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>",
        handlebars::html_escape(&document_title(notice_type)),
        fragment
    )
}
