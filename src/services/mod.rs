//! Application services orchestrating domain logic and side effects.
pub mod printing;
pub mod uploads;

use crate::printing::PrintError;

/// Convenience alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Printer and file path required")]
    MissingPrintFields,
    #[error("Only PDF files are accepted")]
    NotPdf,
    #[error("File too large: {size} bytes exceeds the limit of {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },
    #[error("Unknown printer: {0}")]
    UnknownPrinter(String),
    #[error("File is not an uploaded document")]
    UnknownUpload,
    #[error("Could not detect printers: {0}")]
    PrinterDetection(#[source] PrintError),
    #[error("{0}")]
    Print(#[source] PrintError),
    #[error("failed to prepare upload directory")]
    StorageSetup(#[source] std::io::Error),
    #[error("failed to save file")]
    SaveFile(#[source] std::io::Error),
}

impl ServiceError {
    /// Whether the error was caused by the request rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPrintFields
                | Self::NotPdf
                | Self::FileTooLarge { .. }
                | Self::UnknownPrinter(_)
                | Self::UnknownUpload
        )
    }
}
