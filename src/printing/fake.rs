use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{CommandError, PrintBackend, PrintError, PrintMethod, PrintOutcome};
use crate::domain::PrinterName;

/// In-memory backend for service and route tests.
#[derive(Default)]
pub struct FakeBackend {
    printers: Vec<PrinterName>,
    detection_fails: bool,
    print_fails: bool,
    printed: Mutex<Vec<(PrinterName, PathBuf)>>,
}

impl FakeBackend {
    pub fn with_printers(names: &[&str]) -> Self {
        Self {
            printers: names
                .iter()
                .map(|n| PrinterName::try_from_str(n).unwrap())
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_detection() -> Self {
        Self {
            detection_fails: true,
            ..Self::default()
        }
    }

    pub fn failing_print(mut self) -> Self {
        self.print_fails = true;
        self
    }

    pub fn printed(&self) -> Vec<(PrinterName, PathBuf)> {
        self.printed.lock().unwrap().clone()
    }
}

fn exit_error(program: &str) -> CommandError {
    CommandError::Exit {
        program: program.to_string(),
        code: Some(1),
        stderr: "simulated failure".to_string(),
    }
}

impl PrintBackend for FakeBackend {
    fn list_printers(&self) -> Result<Vec<PrinterName>, PrintError> {
        if self.detection_fails {
            return Err(PrintError::Detection(exit_error("lpstat")));
        }
        Ok(self.printers.clone())
    }

    fn print_file(&self, printer: &PrinterName, file: &Path) -> Result<PrintOutcome, PrintError> {
        if self.print_fails {
            return Err(PrintError::Command(exit_error("lp")));
        }
        self.printed
            .lock()
            .unwrap()
            .push((printer.clone(), file.to_path_buf()));
        Ok(PrintOutcome {
            method: PrintMethod::Direct,
        })
    }
}
