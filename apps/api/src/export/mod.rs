// Export: JSON download and the document-capture hand-off.

pub mod capture;
pub mod json;

pub use capture::{CaptureRequest, DocumentCapture, SpoolCapture};
pub use json::EXPORT_FILE_NAME;
