//! In-process printing through the Windows spooler.
use std::path::Path;

use thiserror::Error;

use crate::domain::PrinterName;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct NativePrintError(pub String);

/// Printer access through a linked library rather than a child process.
pub trait NativePrinter: Send + Sync {
    fn list_printers(&self) -> Result<Vec<PrinterName>, NativePrintError>;

    fn print_file(&self, printer: &PrinterName, file: &Path) -> Result<(), NativePrintError>;
}

#[cfg(target_os = "windows")]
pub use self::winprint_printer::WinprintPrinter;

#[cfg(target_os = "windows")]
mod winprint_printer {
    use std::path::Path;

    use winprint::printer::{FilePrinter, PdfiumPrinter, PrinterDevice};

    use super::{NativePrintError, NativePrinter};
    use crate::domain::PrinterName;

    /// Renders PDFs with pdfium and submits them to the Windows spooler.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct WinprintPrinter;

    impl NativePrinter for WinprintPrinter {
        fn list_printers(&self) -> Result<Vec<PrinterName>, NativePrintError> {
            let devices = PrinterDevice::all().map_err(|e| NativePrintError(e.to_string()))?;
            Ok(devices
                .iter()
                .filter_map(|device| PrinterName::try_from_str(device.name()).ok())
                .collect())
        }

        fn print_file(&self, printer: &PrinterName, file: &Path) -> Result<(), NativePrintError> {
            let devices = PrinterDevice::all().map_err(|e| NativePrintError(e.to_string()))?;
            let device = devices
                .into_iter()
                .find(|device| device.name() == printer.as_str())
                .ok_or_else(|| NativePrintError(format!("printer {printer} not found")))?;

            PdfiumPrinter::new(device)
                .print(file, Default::default())
                .map_err(|e| NativePrintError(e.to_string()))
        }
    }
}
