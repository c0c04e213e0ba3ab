use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};
use validator::Validate;

use crate::domain::{PrinterName, UploadRoot};
use crate::dto::{MessageDto, PrinterDto};
use crate::forms::main::PrintForm;
use crate::printing::PrintBackend;
use crate::services::{ServiceError, ServiceResult};

/// Service listing printers and sending uploaded documents to them.
#[derive(Clone)]
pub struct PrintService {
    backend: Arc<dyn PrintBackend>,
    upload_root: UploadRoot,
    remove_after_print: bool,
}

impl PrintService {
    pub fn new(
        backend: Arc<dyn PrintBackend>,
        upload_root: UploadRoot,
        remove_after_print: bool,
    ) -> Self {
        Self {
            backend,
            upload_root,
            remove_after_print,
        }
    }

    pub fn list_printers(&self) -> ServiceResult<Vec<PrinterDto>> {
        let printers = self.backend.list_printers().map_err(|err| {
            error!("Printer detection failed: {err}");
            ServiceError::PrinterDetection(err)
        })?;

        Ok(printers.into_iter().map(PrinterDto::from).collect())
    }

    /// Print a previously uploaded file on a known printer.
    pub fn print(&self, form: &PrintForm) -> ServiceResult<MessageDto> {
        form.validate()
            .map_err(|_| ServiceError::MissingPrintFields)?;
        let printer = form
            .printer
            .as_deref()
            .and_then(|name| PrinterName::try_from_str(name).ok())
            .ok_or(ServiceError::MissingPrintFields)?;
        let file_path = form
            .file_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .ok_or(ServiceError::MissingPrintFields)?;

        // Missing and foreign paths share one answer so clients cannot tell
        // which host files exist.
        let path = Path::new(file_path);
        if !self.upload_root.contains(path) {
            warn!("Rejected print of {}: not a stored upload", path.display());
            return Err(ServiceError::UnknownUpload);
        }

        let known = self.list_known_printers()?;
        if !known.contains(&printer) {
            return Err(ServiceError::UnknownPrinter(printer.into_string()));
        }

        let outcome = self.backend.print_file(&printer, path).map_err(|err| {
            error!("Printing {} on {printer} failed: {err}", path.display());
            ServiceError::Print(err)
        })?;
        info!("{} ({} on {printer})", outcome.message(), path.display());

        if self.remove_after_print {
            if let Err(err) = fs::remove_file(path) {
                warn!("Failed to remove printed upload {}: {err}", path.display());
            }
        }

        Ok(MessageDto::new(outcome.message()))
    }

    fn list_known_printers(&self) -> ServiceResult<Vec<PrinterName>> {
        self.backend
            .list_printers()
            .map_err(ServiceError::PrinterDetection)
    }
}
