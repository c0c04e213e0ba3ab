//! Execution of external print utilities.
use std::ffi::OsString;
use std::io;
use std::process::Command;

use thiserror::Error;

/// Captured result of a finished child process.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a program to completion and captures its output.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<CommandOutput>;
}

/// Runs commands on the host with [`std::process::Command`].
///
/// Arguments are handed to the program directly, no shell is involved.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Failure to run a command or a non-zero exit.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {}: {stderr}", exit_code_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown status".to_string(), |c| format!("code {c}"))
}

/// Run `program` and turn a spawn failure or unsuccessful exit into an error.
pub fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[OsString],
) -> Result<CommandOutput, CommandError> {
    let output = runner
        .run(program, args)
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.success {
        return Err(CommandError::Exit {
            program: program.to_string(),
            code: output.code,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticRunner(io::Result<CommandOutput>);

    impl CommandRunner for StaticRunner {
        fn run(&self, _program: &str, _args: &[OsString]) -> io::Result<CommandOutput> {
            match &self.0 {
                Ok(output) => Ok(output.clone()),
                Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
            }
        }
    }

    #[test]
    fn run_checked_reports_exit_code_and_stderr() {
        let runner = StaticRunner(Ok(CommandOutput {
            success: false,
            code: Some(1),
            stdout: String::new(),
            stderr: "lp: The printer or class does not exist.".into(),
        }));

        let err = run_checked(&runner, "lp", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`lp` exited with code 1: lp: The printer or class does not exist."
        );
    }

    #[test]
    fn run_checked_reports_spawn_failure() {
        let runner = StaticRunner(Err(io::Error::new(io::ErrorKind::NotFound, "not found")));

        let err = run_checked(&runner, "lpstat", &[]).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert!(err.to_string().starts_with("failed to run `lpstat`"));
    }

    #[test]
    fn run_checked_passes_successful_output() {
        let runner = StaticRunner(Ok(CommandOutput {
            success: true,
            code: Some(0),
            stdout: "Office\n".into(),
            stderr: String::new(),
        }));

        let output = run_checked(&runner, "lpstat", &[]).unwrap();
        assert_eq!(output.stdout, "Office\n");
    }
}
