//! The interactive loop: reads a line, runs it against the file system, prints and logs
//! the outcome.

mod command;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::action_log::ActionLog;
use crate::core::{FsBackend, Result, utils};
use crate::vfs::TransferMode;

pub use command::{Command, DEFAULT_HEAD_LINES};

pub const EXIT_MESSAGE: &str = "Exiting shell emulator.";

const INVALID_INPUT: &str = "input: line is not valid UTF-8, ignored";

/// A shell session: the file system, the action log and where the log goes.
pub struct Shell<B: FsBackend> {
    fs: B,
    log: ActionLog,
    log_path: PathBuf,
}

impl<B: FsBackend> Shell<B> {
    pub fn new<P: Into<PathBuf>>(fs: B, log_path: P) -> Self {
        Self {
            fs,
            log: ActionLog::new(),
            log_path: log_path.into(),
        }
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// `./> ` at the root, `./docs> ` below it.
    pub fn prompt(&self) -> String {
        match self.fs.pwd().as_str() {
            "." => "./> ".to_string(),
            pwd => format!("./{pwd}> "),
        }
    }

    /// Runs one input line. Returns `None` for blank lines and for `exit`, otherwise the
    /// text that was printed and logged.
    pub fn execute(&mut self, line: &str) -> Option<String> {
        let command = Command::parse(line)?;
        if command == Command::Exit {
            return None;
        }
        tracing::debug!(?command, "dispatch");
        let output = self.dispatch(command);
        self.log.record(line.trim(), output.as_str());
        Some(output)
    }

    fn dispatch(&mut self, command: Command) -> String {
        let verb = match &command {
            Command::Ls => "ls",
            Command::Cd(_) => "cd",
            Command::Head { .. } => "head",
            Command::Transfer { mode: TransferMode::Copy, .. } => "cp",
            Command::Transfer { mode: TransferMode::Move, .. } => "mv",
            Command::Chown { .. } => "chown",
            Command::Pwd | Command::Uptime | Command::Exit => "",
            Command::Usage(message) => return message.clone(),
            Command::Unknown(verb) => return format!("{verb}: command not found"),
        };
        match self.run(command) {
            Ok(output) => output,
            Err(e) => format!("{verb}: {e}"),
        }
    }

    fn run(&mut self, command: Command) -> Result<String> {
        let output = match command {
            Command::Ls => {
                let entries = self.fs.ls()?;
                entries
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Cd(path) => {
                self.fs.cd(&path)?;
                format!("Changed directory to {}", self.fs.pwd())
            }
            Command::Pwd => self.fs.pwd(),
            Command::Uptime => format!("Uptime: {} seconds", self.fs.uptime()),
            Command::Head { file, lines } => {
                let content = self.fs.read_lines(&file)?;
                content.into_iter().take(lines).collect::<Vec<_>>().join("\n")
            }
            Command::Transfer { src, dest, mode } => {
                let created = self.fs.transfer(&src, &dest, mode)?;
                let action = match mode {
                    TransferMode::Copy => "Copied",
                    TransferMode::Move => "Moved",
                };
                format!("{action} {src} to {}", utils::to_slash(created))
            }
            Command::Chown { owner, file } => {
                self.fs.chown(&owner, &file)?;
                format!("Changed owner of {file} to {owner}")
            }
            Command::Exit | Command::Usage(_) | Command::Unknown(_) => String::new(),
        };
        Ok(output)
    }

    /// Runs the read-eval-print loop until `exit` or end of input, then writes the action
    /// log. The log is written even when reading or printing fails; a log write failure is
    /// reported on `out` and does not suppress the exit message.
    pub fn run_loop<R: BufRead, W: Write>(mut self, input: R, out: &mut W) -> std::io::Result<()> {
        let session = self.interact(input, out);
        let shutdown = self.shutdown(out);
        session.and(shutdown)
    }

    fn interact<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> std::io::Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    tracing::info!("end of input");
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "unable to read input");
                    writeln!(out, "input: {e}")?;
                    return Ok(());
                }
            }

            let raw = strip_line_ending(&buf);
            let output = match std::str::from_utf8(raw) {
                Ok(line) => {
                    if Command::parse(line) == Some(Command::Exit) {
                        return Ok(());
                    }
                    self.execute(line)
                }
                Err(_) => Some(self.reject(raw)),
            };
            if let Some(output) = output.filter(|o| !o.is_empty()) {
                writeln!(out, "{output}")?;
            }
        }
    }

    /// Records a line that is not valid UTF-8 without running it.
    fn reject(&mut self, raw: &[u8]) -> String {
        let line = String::from_utf8_lossy(raw);
        tracing::warn!(line = %line, "input is not valid UTF-8");
        let output = INVALID_INPUT.to_string();
        self.log.record(line.trim(), output.as_str());
        output
    }

    fn shutdown<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let log = std::mem::take(&mut self.log);
        if let Err(e) = log.flush(&self.log_path) {
            tracing::error!(path = %self.log_path.display(), error = %e, "unable to write action log");
            writeln!(out, "log: cannot write {}: {e}", self.log_path.display())?;
        }
        writeln!(out, "{EXIT_MESSAGE}")?;
        Ok(())
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
