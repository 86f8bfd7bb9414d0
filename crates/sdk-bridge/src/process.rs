//! Tool Processes
//!
//! Spawns SDK tools and streams their stdout, one line at a time, into a
//! [`LineParser`]. Stderr is either drained on its own task into a console
//! or merged into the stdout pipe.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use andmore_core::{LazyConsole, SharedConsole};

use crate::error::SdkError;
use crate::parser::LineParser;

/// A command line for an external tool
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl ToolCommand {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the tool in `dir`
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the tool
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Program to run
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::null());
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn launch_error(&self, source: io::Error) -> SdkError {
        SdkError::Launch {
            program: self.program.clone(),
            source,
        }
    }

    /// Run the tool, parsing stdout and forwarding stderr to `console`.
    ///
    /// Stderr is drained on a separate task so a chatty tool cannot stall on
    /// a full pipe. That task is joined before returning, so every
    /// diagnostic line has reached the console by then.
    pub async fn run<P: LineParser>(
        &self,
        mut parser: P,
        console: &SharedConsole,
    ) -> Result<ToolRun<P::Output>, SdkError> {
        debug!("running {}", self);

        let mut child = self
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let reaper = child.stderr.take().map(|stderr| {
            let console: SharedConsole = Arc::new(LazyConsole::new(console.clone()));
            tokio::spawn(drain_errors(stderr, console))
        });

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("stdout was not captured"))?;
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        let mut last_line = None;
        let read = async {
            while let Some(line) = read_line(&mut reader, &mut buf).await? {
                parser.feed(&line)?;
                last_line = Some(line);
            }
            Ok::<_, SdkError>(())
        }
        .await;
        // stdout must be closed before the stderr task is joined
        drop(reader);

        if let Some(reaper) = reaper {
            if let Err(e) = reaper.await {
                warn!("stderr reader for {} failed: {}", self.program.display(), e);
            }
        }

        let status = child.wait().await;
        read?;
        Ok(ToolRun {
            output: parser.finish(),
            last_line,
            status,
        })
    }

    /// Run the tool with stderr written into the stdout pipe.
    ///
    /// Both streams share one OS pipe, so lines arrive in the order the tool
    /// wrote them.
    pub async fn run_merged<P>(&self, mut parser: P) -> Result<ToolRun<P::Output>, SdkError>
    where
        P: LineParser + Send + 'static,
        P::Output: Send + 'static,
    {
        debug!("running {} (merged output)", self);

        let (reader, writer) = io::pipe()?;
        let mut child = {
            let mut cmd = self.command();
            cmd.stdout(writer.try_clone()?).stderr(writer);
            // cmd is dropped at the end of this block, closing our write ends
            cmd.spawn().map_err(|e| self.launch_error(e))?
        };

        let read = tokio::task::spawn_blocking(move || {
            let mut reader = io::BufReader::new(reader);
            let mut buf = Vec::new();
            let mut last_line = None;
            while let Some(line) = read_line_blocking(&mut reader, &mut buf)? {
                parser.feed(&line)?;
                last_line = Some(line);
            }
            Ok::<_, SdkError>((parser.finish(), last_line))
        })
        .await
        .map_err(io::Error::other)?;

        let status = child.wait().await;
        let (output, last_line) = read?;
        Ok(ToolRun {
            output,
            last_line,
            status,
        })
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Outcome of a finished tool run
#[derive(Debug)]
pub struct ToolRun<T> {
    /// What the parser produced
    pub output: T,
    /// Last line read from the parsed stream
    pub last_line: Option<String>,
    /// Result of waiting for the process to exit
    pub status: io::Result<ExitStatus>,
}

impl<T> ToolRun<T> {
    /// The parsed output, if the tool exited successfully
    pub fn checked(self) -> Result<T, SdkError> {
        let status = self.status?;
        if status.success() {
            Ok(self.output)
        } else {
            Err(SdkError::exit(status, self.last_line))
        }
    }
}

/// Writes each stdout line to a console as regular output
pub struct ConsoleForwarder {
    console: SharedConsole,
}

impl ConsoleForwarder {
    /// Forward to `console`
    pub fn new(console: SharedConsole) -> Self {
        Self { console }
    }
}

impl LineParser for ConsoleForwarder {
    type Output = ();

    fn feed(&mut self, line: &str) -> Result<(), SdkError> {
        self.console.write_output(line);
        self.console.write_output("\n");
        Ok(())
    }

    fn finish(self) -> Self::Output {}
}

async fn drain_errors<R: AsyncRead + Unpin>(stderr: R, console: SharedConsole) {
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    loop {
        match read_line(&mut reader, &mut buf).await {
            Ok(Some(line)) => console.write_error(&format!("{}\n", line)),
            Ok(None) => break,
            Err(e) => {
                warn!("reporting tool errors: {}", e);
                break;
            }
        }
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    Ok(Some(decode_line(buf)))
}

fn read_line_blocking<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(decode_line(buf)))
}

/// Strip the line terminator; invalid UTF-8 is replaced rather than rejected
fn decode_line(buf: &[u8]) -> String {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
