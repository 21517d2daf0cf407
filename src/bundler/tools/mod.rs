//! External tool invocation.
//!
//! Every driver step that shells out builds a [`ToolCommand`] and hands it to a
//! [`ToolRunner`]. [`SystemRunner`] spawns real processes; tests substitute a
//! recording runner so the deploy and build pipelines run without Qt, NSIS,
//! signtool or CMake installed.

mod detection;

pub use detection::resolve_tool;

use crate::bundler::error::{Error, Result};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// A program invocation: executable name, arguments, working directory and
/// extra environment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl ToolCommand {
    /// Start a command for `program` (looked up on `PATH`).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run inside `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Working directory, if set.
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Extra environment.
    pub fn get_envs(&self) -> &[(String, String)] {
        &self.envs
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// What a finished process left behind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolOutput {
    /// Exit code, `None` when killed by a signal.
    pub status: Option<i32>,
    /// stdout followed by stderr, lossily decoded.
    pub output: String,
}

impl ToolOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into [`Error::ToolFailed`].
    pub fn into_checked(self, command: &ToolCommand) -> Result<ToolOutput> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::ToolFailed {
                command: command.to_string(),
                status: self.status,
                output: self.output,
            })
        }
    }
}

/// Executes [`ToolCommand`]s.
///
/// Implementations block (asynchronously) until the process exits; there is no
/// timeout. A non-zero exit is NOT an error at this level, callers decide.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Run `command` to completion and capture its output.
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Runs commands as real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        let program = resolve_tool(command.program())?;

        let mut cmd = tokio::process::Command::new(&program);
        cmd.args(command.get_args());
        if let Some(dir) = command.get_current_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in command.get_envs() {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|e| Error::CommandFailed {
            command: command.to_string(),
            error: e,
        })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ToolOutput {
            status: output.status.code(),
            output: text,
        })
    }
}

/// Log the command line, run it, log its output and fail on non-zero exit.
pub async fn run_checked<R: ToolRunner>(runner: &R, command: &ToolCommand) -> Result<ToolOutput> {
    log::info!("{}", command);
    let output = runner.run(command).await?.into_checked(command)?;
    log_output(&output);
    Ok(output)
}

/// Echo captured tool output line by line.
pub fn log_output(output: &ToolOutput) {
    for line in output.output.lines().filter(|l| !l.trim().is_empty()) {
        log::info!("  {}", line);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording runner shared by the pipeline tests.

    use super::*;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&ToolCommand) -> ToolOutput + Send + Sync>;

    /// Records every command and answers with a configurable output.
    pub struct FakeRunner {
        calls: Mutex<Vec<ToolCommand>>,
        responder: Responder,
    }

    impl FakeRunner {
        /// Every command succeeds with empty output.
        pub fn succeeding() -> Self {
            Self::with(|_| ToolOutput {
                status: Some(0),
                output: String::new(),
            })
        }

        /// Answer each command with `responder`.
        pub fn with(responder: impl Fn(&ToolCommand) -> ToolOutput + Send + Sync + 'static) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        /// Snapshot of the recorded commands.
        pub fn calls(&self) -> Vec<ToolCommand> {
            self.calls.lock().unwrap().clone()
        }

        /// Recorded commands for one program.
        pub fn calls_to(&self, program: &str) -> Vec<ToolCommand> {
            self.calls()
                .into_iter()
                .filter(|c| c.program() == program)
                .collect()
        }
    }

    impl ToolRunner for FakeRunner {
        async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
            self.calls.lock().unwrap().push(command.clone());
            Ok((self.responder)(command))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeRunner;
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = ToolCommand::new("makensis")
            .arg("/NOCD")
            .arg("/DproductName=My Product")
            .arg("");
        assert_eq!(cmd.to_string(), "makensis /NOCD \"/DproductName=My Product\" \"\"");
    }

    #[tokio::test]
    async fn run_checked_surfaces_output_on_failure() {
        let runner = FakeRunner::with(|_| ToolOutput {
            status: Some(2),
            output: "boom".into(),
        });
        let err = run_checked(&runner, &ToolCommand::new("cmake").arg("--build"))
            .await
            .unwrap_err();
        match err {
            Error::ToolFailed { command, status, output } => {
                assert_eq!(command, "cmake --build");
                assert_eq!(status, Some(2));
                assert_eq!(output, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn run_checked_passes_success_through() {
        let runner = FakeRunner::succeeding();
        let out = run_checked(&runner, &ToolCommand::new("cmake")).await.unwrap();
        assert!(out.success());
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn system_runner_reports_missing_tool() {
        let err = SystemRunner
            .run(&ToolCommand::new("no-such-tool-for-charm-deploy"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
