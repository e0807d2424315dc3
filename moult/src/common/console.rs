//! # Console I/O (`common::console`)
//!
//! File: moult/src/common/console.rs
//!
//! ## Overview
//!
//! Everything Moult prints or reads on behalf of a command (deprecation
//! notices, confirmation prompts, help output) goes through a `Console`, never
//! straight to the process streams. A console pairs a line-oriented input
//! reader with an `Output` sink:
//!
//! - `DefaultOutput` writes to the process stdout/stderr and can be redirected
//!   with `set_output`.
//! - `CapturedOutput` collects everything in shared in-memory buffers, which is
//!   what tests (and embedders that post-process output) use.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let captured = CapturedOutput::default();
//! let mut console = Console::new(std::io::Cursor::new("y\n"), captured.clone());
//! assert!(console.ask_yes_no("Deploy now?", false)?);
//! assert_eq!(captured.stdout_text(), "Deploy now? [y/N] ");
//! ```
//!
use crate::core::error::Result;
use anyhow::bail;
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;
use tracing::debug;

/// A sink for user-facing messages.
pub trait Output {
    /// Writes a message to standard output, verbatim.
    fn stdout(&mut self, msg: &str);
    /// Writes a message to standard error, verbatim.
    fn stderr(&mut self, msg: &str);
}

/// Output sink backed by writers, defaulting to the process streams.
pub struct DefaultOutput {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl DefaultOutput {
    pub fn new() -> Self {
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Replaces stdout and/or stderr. `None` keeps the current writer.
    pub fn set_output(&mut self, stdout: Option<Box<dyn Write>>, stderr: Option<Box<dyn Write>>) {
        if let Some(stdout) = stdout {
            self.stdout = stdout;
        }
        if let Some(stderr) = stderr {
            self.stderr = stderr;
        }
    }
}

impl Default for DefaultOutput {
    fn default() -> Self {
        Self::new()
    }
}

fn write_through(writer: &mut dyn Write, msg: &str) {
    if let Err(e) = writer.write_all(msg.as_bytes()).and_then(|()| writer.flush()) {
        debug!("Dropping console output after write failure: {}", e);
    }
}

impl Output for DefaultOutput {
    fn stdout(&mut self, msg: &str) {
        write_through(self.stdout.as_mut(), msg);
    }

    fn stderr(&mut self, msg: &str) {
        write_through(self.stderr.as_mut(), msg);
    }
}

/// Output sink that records everything in memory. Clones share the buffers.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    stdout: Rc<RefCell<String>>,
    stderr: Rc<RefCell<String>>,
}

impl CapturedOutput {
    pub fn stdout_text(&self) -> String {
        self.stdout.borrow().clone()
    }

    pub fn stderr_text(&self) -> String {
        self.stderr.borrow().clone()
    }
}

impl Output for CapturedOutput {
    fn stdout(&mut self, msg: &str) {
        self.stdout.borrow_mut().push_str(msg);
    }

    fn stderr(&mut self, msg: &str) {
        self.stderr.borrow_mut().push_str(msg);
    }
}

/// Line-oriented input paired with an output sink.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Output>,
}

impl Console {
    pub fn new(input: impl BufRead + 'static, output: impl Output + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Console over the process stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), DefaultOutput::new())
    }

    pub fn stdout(&mut self, msg: &str) {
        self.output.stdout(msg);
    }

    pub fn stderr(&mut self, msg: &str) {
        self.output.stderr(msg);
    }

    /// Blocks until a full line is available and returns it without the
    /// trailing line break. End of input is an error.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("unexpected end of input");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks a y/n question until a recognizable answer is given. An empty
    /// answer picks `default`.
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.stdout(&format!("{question} {hint} "));
            let answer = self.read_line()?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.stdout("Please answer y or n.\n"),
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}
