use serde::Serialize;

use crate::domain::{PrinterName, UploadedPdf};

/// Printer entry returned by `GET /api/printers`.
#[derive(Clone, Debug, Serialize)]
pub struct PrinterDto {
    pub name: String,
}

impl From<PrinterName> for PrinterDto {
    fn from(name: PrinterName) -> Self {
        Self {
            name: name.into_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub file_path: String,
}

impl From<UploadedPdf> for UploadResponseDto {
    fn from(upload: UploadedPdf) -> Self {
        Self {
            file_path: upload.into_path().to_string_lossy().into_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
