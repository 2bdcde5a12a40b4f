#![allow(rustdoc::broken_intra_doc_links)]
//! A tree-walking interpreter for Glossa, the Greek-keyword pedagogical
//! programming language taught in Greek secondary-education computer
//! science courses.
//!
//! The core pipeline is scan → parse → execute, each phase producing a
//! [`diag::GlossaError`] on the first malformed input rather than
//! recovering and collecting diagnostics. Embedders supply an
//! [`io::IoAdapter`] for `ΓΡΑΨΕ`/`ΔΙΑΒΑΣΕ` and, optionally, a
//! [`debug::DebugHook`] to single-step a run.
//!
//! # Run a program end to end
//!
//! ```
//! use glossa::compile_and_run;
//!
//! let source = "\
//! ΠΡΟΓΡΑΜΜΑ Δοκιμή
//! ΜΕΤΑΒΛΗΤΕΣ
//! ΑΚΕΡΑΙΕΣ: α, β
//! ΑΡΧΗ
//! α <- 5
//! β <- 3
//! ΓΡΑΨΕ α + β
//! ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
//!
//! let outputs = compile_and_run(source, Vec::new()).unwrap();
//! assert_eq!(outputs, vec!["8"]);
//! ```
//!
//! # Scan and parse separately
//!
//! ```
//! use glossa::{lex, parse};
//!
//! let tokens = lex("ΠΡΟΓΡΑΜΜΑ Δ\nΑΡΧΗ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ").unwrap();
//! let program = parse(tokens).unwrap();
//! assert_eq!(program.name, "Δ");
//! ```

pub mod ast;
pub mod debug;
pub mod diag;
pub mod environment;
pub mod eval;
pub mod exec;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

use diag::GlossaError;
use environment::Environment;
use exec::{exec_statements, ExecCtx};
use io::QueueIoAdapter;

pub use ast::Program;
pub use lexer::token::Token;
pub use lexer::tokenize as lex;
pub use parser::parse;

/// Scans, parses, and runs a complete program against a fixed list of
/// input lines, returning every line written by `ΓΡΑΨΕ` in order.
///
/// This is the entry point embedders without their own debugger UI or
/// live stdin want: [`lex`], [`parse`], and [`exec::exec_statements`] are
/// exposed separately for callers that need to drive a debugger session
/// or supply a custom [`io::IoAdapter`].
pub fn compile_and_run(source: &str, inputs: Vec<String>) -> Result<Vec<String>, GlossaError> {
    let tokens = lex(source)?;
    let program = parse(tokens)?;

    let env = Rc::new(RefCell::new(Environment::new_root(
        &program.globals,
        Rc::new(program.procedures),
        Rc::new(program.functions),
    )));

    let mut io = QueueIoAdapter::new(inputs);
    let mut ctx = ExecCtx { io: &mut io, debug: None };
    exec_statements(&program.body, &env, &mut ctx)?;
    Ok(io.into_outputs())
}
