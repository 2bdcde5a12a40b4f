//! The Debugger Hook observer protocol.
//!
//! An optional observer bracketing every statement with `before`/`after`
//! calls. Absence of a hook (the common case, `ExecCtx { debug: None, .. }`)
//! costs nothing beyond the `Option` check: there is no hook object to
//! construct or dispatch through.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::stmt::Stmt;
use crate::environment::Environment;

/// What a hook's `before` call tells the executor to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSignal {
    Continue,
    Stop,
}

/// An observer notified around every statement execution.
///
/// `before` may block cooperatively (the single-step pause point); the
/// executor makes no assumption about how. Returning [`DebugSignal::Stop`]
/// unwinds the run as a clean cancellation, not an error, and the matching
/// `after` for that statement is never called.
pub trait DebugHook {
    fn before(&mut self, stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> DebugSignal;
    fn after(&mut self, stmt: &Stmt, env: &Rc<RefCell<Environment>>);
}

/// The zero-cost default observer: continues on every statement and
/// records nothing. `ExecCtx { debug: None, .. }` already pays no cost
/// for the no-hook case, but embedders that thread a concrete
/// `&mut dyn DebugHook` through generic code rather than an `Option`
/// can use this instead of special-casing the absent-hook branch.
#[derive(Default)]
pub struct NullDebugHook;

impl DebugHook for NullDebugHook {
    fn before(&mut self, _stmt: &Stmt, _env: &Rc<RefCell<Environment>>) -> DebugSignal {
        DebugSignal::Continue
    }

    fn after(&mut self, _stmt: &Stmt, _env: &Rc<RefCell<Environment>>) {}
}

/// A hook that records every statement it was shown, and optionally stops
/// after a fixed number of `before` calls. Used by tests to assert the
/// bracketing invariant without standing up a real debugger UI.
#[derive(Default)]
pub struct ScriptedDebugHook {
    pub before_lines: Vec<u32>,
    pub after_lines: Vec<u32>,
    pub stop_after: Option<usize>,
}

impl ScriptedDebugHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(steps: usize) -> Self {
        Self { stop_after: Some(steps), ..Self::default() }
    }
}

impl DebugHook for ScriptedDebugHook {
    fn before(&mut self, stmt: &Stmt, _env: &Rc<RefCell<Environment>>) -> DebugSignal {
        self.before_lines.push(stmt.line());
        match self.stop_after {
            Some(n) if self.before_lines.len() > n => DebugSignal::Stop,
            _ => DebugSignal::Continue,
        }
    }

    fn after(&mut self, stmt: &Stmt, _env: &Rc<RefCell<Environment>>) {
        self.after_lines.push(stmt.line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{Expr, NumberValue};

    fn write_stmt(line: u32) -> Stmt {
        Stmt::Write { values: vec![Expr::NumberLit { value: NumberValue::Integer(1), line }], line }
    }

    #[test]
    fn null_hook_never_stops() {
        let mut hook = NullDebugHook;
        let env = Rc::new(RefCell::new(Environment::new_root(
            &[],
            Rc::new(Default::default()),
            Rc::new(Default::default()),
        )));
        assert_eq!(hook.before(&write_stmt(1), &env), DebugSignal::Continue);
        hook.after(&write_stmt(1), &env);
    }

    #[test]
    fn scripted_hook_stops_after_configured_step_count() {
        let mut hook = ScriptedDebugHook::stopping_after(1);
        let env = Rc::new(RefCell::new(Environment::new_root(
            &[],
            Rc::new(Default::default()),
            Rc::new(Default::default()),
        )));
        assert_eq!(hook.before(&write_stmt(1), &env), DebugSignal::Continue);
        assert_eq!(hook.before(&write_stmt(2), &env), DebugSignal::Stop);
    }
}
