//! The I/O Adapter boundary: one line of input on demand, one line of
//! output at a time. The core never touches stdio directly so embedders
//! (a GUI console, a test harness) can supply their own.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write as _};

use crate::diag::GlossaError;

pub trait IoAdapter {
    fn write_line(&mut self, line: &str);
    fn read_line(&mut self) -> Result<String, GlossaError>;
}

/// Feeds a fixed, ordered list of input lines and collects every output
/// line written. Used by `compile_and_run` and by tests.
#[derive(Debug, Default)]
pub struct QueueIoAdapter {
    inputs: VecDeque<String>,
    pub outputs: Vec<String>,
}

impl QueueIoAdapter {
    pub fn new(inputs: Vec<String>) -> Self {
        Self { inputs: inputs.into(), outputs: Vec::new() }
    }

    pub fn into_outputs(self) -> Vec<String> {
        self.outputs
    }
}

impl IoAdapter for QueueIoAdapter {
    fn write_line(&mut self, line: &str) {
        self.outputs.push(line.to_string());
    }

    fn read_line(&mut self) -> Result<String, GlossaError> {
        self.inputs
            .pop_front()
            .ok_or_else(|| GlossaError::runtime("Δεν υπάρχει διαθέσιμη είσοδος"))
    }
}

/// Talks to the process's real stdin/stdout, for the CLI binary.
#[derive(Default)]
pub struct StdIoAdapter;

impl StdIoAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl IoAdapter for StdIoAdapter {
    fn write_line(&mut self, line: &str) {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{line}");
    }

    fn read_line(&mut self) -> Result<String, GlossaError> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(GlossaError::runtime("Δεν υπάρχει διαθέσιμη είσοδος")),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(line)
            }
            Err(err) => Err(GlossaError::runtime(format!("Σφάλμα ανάγνωσης εισόδου: {err}"))),
        }
    }
}
