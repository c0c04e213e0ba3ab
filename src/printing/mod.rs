//! OS-specific printer enumeration and print dispatch.
//!
//! Windows prints through `winprint` (pdfium and the spooler) and falls back
//! to PowerShell and SumatraPDF when the library fails. macOS and Linux use
//! the CUPS utilities (`lpstat`, `lp`, `lpr`); macOS falls back from `lpr` to
//! `lp` once.
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::domain::{Platform, PrinterName};

pub mod command;
#[cfg(test)]
pub(crate) mod fake;
pub mod native;

pub use command::{CommandError, CommandOutput, CommandRunner, SystemCommandRunner};
pub use native::{NativePrintError, NativePrinter};

use command::run_checked;

const POWERSHELL: &str = "powershell";
const LIST_PRINTERS_PS: &str = "Get-Printer | Select-Object -ExpandProperty Name";
const LPSTAT: &str = "lpstat";
const LP: &str = "lp";
const LPR: &str = "lpr";

/// Way a document reached the printer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintMethod {
    /// `winprint` or SumatraPDF on Windows, `lp` on Linux.
    Direct,
    /// `lpr` on macOS.
    MacOsLpr,
    /// `lp` on macOS after `lpr` failed.
    MacOsLpFallback,
}

/// Successful print dispatch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrintOutcome {
    pub method: PrintMethod,
}

impl PrintOutcome {
    pub fn message(&self) -> &'static str {
        match self.method {
            PrintMethod::Direct => "Printed successfully on Windows/Linux",
            PrintMethod::MacOsLpr => "Printed on macOS using lpr",
            PrintMethod::MacOsLpFallback => "Printed on macOS using lp command",
        }
    }
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("{0}")]
    Detection(#[source] CommandError),
    #[error("Printing failed: {0}")]
    Command(#[source] CommandError),
    #[error("macOS printing failed: {0}")]
    MacOs(#[source] CommandError),
}

/// Access to the printers installed on the host.
pub trait PrintBackend: Send + Sync {
    fn list_printers(&self) -> Result<Vec<PrinterName>, PrintError>;

    fn print_file(&self, printer: &PrinterName, file: &Path) -> Result<PrintOutcome, PrintError>;
}

/// [`PrintBackend`] for the host: an optional native printer first, then the
/// platform's print utilities.
#[derive(Clone)]
pub struct SystemPrinter {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    native: Option<Arc<dyn NativePrinter>>,
    sumatra_pdf_path: String,
}

impl SystemPrinter {
    pub fn new(
        platform: Platform,
        runner: Arc<dyn CommandRunner>,
        sumatra_pdf_path: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            runner,
            native: None,
            sumatra_pdf_path: sumatra_pdf_path.into(),
        }
    }

    /// Try `native` before the command-line tools. Only consulted on Windows.
    pub fn with_native(mut self, native: Arc<dyn NativePrinter>) -> Self {
        self.native = Some(native);
        self
    }

    /// Backend for the current host using real processes.
    pub fn for_host(sumatra_pdf_path: impl Into<String>) -> Self {
        let printer = Self::new(
            Platform::current(),
            Arc::new(SystemCommandRunner),
            sumatra_pdf_path,
        );
        #[cfg(target_os = "windows")]
        let printer = printer.with_native(Arc::new(native::WinprintPrinter));
        printer
    }

    fn windows_native(&self) -> Option<&dyn NativePrinter> {
        match self.platform {
            Platform::Windows => self.native.as_deref(),
            _ => None,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    fn run(&self, program: &str, args: Vec<OsString>) -> Result<CommandOutput, CommandError> {
        run_checked(self.runner.as_ref(), program, &args)
    }
}

impl PrintBackend for SystemPrinter {
    fn list_printers(&self) -> Result<Vec<PrinterName>, PrintError> {
        if let Some(native) = self.windows_native() {
            match native.list_printers() {
                Ok(printers) => return Ok(printers),
                Err(err) => warn!("winprint enumeration failed ({err}), using PowerShell"),
            }
        }

        let output = match &self.platform {
            Platform::Windows => self.run(
                POWERSHELL,
                vec!["-NoProfile".into(), "-Command".into(), LIST_PRINTERS_PS.into()],
            ),
            Platform::MacOs | Platform::Linux => self.run(LPSTAT, vec!["-e".into()]),
            Platform::Unsupported(os) => {
                return Err(PrintError::UnsupportedPlatform(os.clone()));
            }
        }
        .map_err(PrintError::Detection)?;

        Ok(parse_printer_list(&output.stdout))
    }

    fn print_file(&self, printer: &PrinterName, file: &Path) -> Result<PrintOutcome, PrintError> {
        match &self.platform {
            Platform::Windows => {
                if let Some(native) = self.windows_native() {
                    info!("Printing {} on {printer} via winprint", file.display());
                    match native.print_file(printer, file) {
                        Ok(()) => {
                            return Ok(PrintOutcome {
                                method: PrintMethod::Direct,
                            });
                        }
                        Err(err) => warn!("winprint failed ({err}), using SumatraPDF"),
                    }
                }

                info!("Printing {} on {printer} via SumatraPDF", file.display());
                self.run(
                    &self.sumatra_pdf_path,
                    vec![
                        "-print-to".into(),
                        printer.as_str().into(),
                        "-silent".into(),
                        file.into(),
                    ],
                )
                .map_err(PrintError::Command)?;
                Ok(PrintOutcome {
                    method: PrintMethod::Direct,
                })
            }
            Platform::Linux => {
                info!("Printing {} on {printer} via lp", file.display());
                self.run(LP, lp_args(printer, file))
                    .map_err(PrintError::Command)?;
                Ok(PrintOutcome {
                    method: PrintMethod::Direct,
                })
            }
            Platform::MacOs => {
                info!("Printing {} on {printer} via lpr", file.display());
                let primary = match self.run(
                    LPR,
                    vec!["-P".into(), printer.as_str().into(), file.into()],
                ) {
                    Ok(_) => {
                        return Ok(PrintOutcome {
                            method: PrintMethod::MacOsLpr,
                        });
                    }
                    Err(err) => err,
                };

                warn!("lpr failed ({primary}), retrying with lp");
                match self.run(LP, lp_args(printer, file)) {
                    Ok(_) => Ok(PrintOutcome {
                        method: PrintMethod::MacOsLpFallback,
                    }),
                    Err(fallback) => Err(PrintError::MacOs(fallback)),
                }
            }
            Platform::Unsupported(os) => Err(PrintError::UnsupportedPlatform(os.clone())),
        }
    }
}

fn lp_args(printer: &PrinterName, file: &Path) -> Vec<OsString> {
    vec!["-d".into(), printer.as_str().into(), file.into()]
}

/// Parse newline-delimited printer names, skipping blank lines.
pub fn parse_printer_list(stdout: &str) -> Vec<PrinterName> {
    stdout
        .lines()
        .filter_map(|line| PrinterName::try_from_str(line).ok())
        .collect()
}
