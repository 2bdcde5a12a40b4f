//! The Statement Executor and Routine Dispatcher.
//!
//! Control flow that must cross an arbitrary number of call frames —
//! `ΕΠΙΣΤΡΕΨΕ` unwinding to the nearest routine call, and a debugger's
//! stop request unwinding all the way to the top — is modelled as two
//! distinct signals rather than reusing exceptions: [`Flow::Return`] is an
//! ordinary successful outcome of running a block (consumed by the
//! routine dispatcher that owns the frame it belongs to), while
//! [`Unwind::Stop`] rides the error channel because it must cross the
//! the expression evaluator's `Result<Value, _>` boundary transparently
//! on its way to the top-level entry point, which reinterprets it as
//! clean cancellation rather than failure.

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::ast::program::{FunctionDef, Procedure, VarDecl};
use crate::ast::stmt::{CaseArm, Stmt};
use crate::diag::GlossaError;
use crate::environment::Environment;
use crate::eval::{eval, eval_indices};
use crate::io::IoAdapter;
use crate::debug::{DebugHook, DebugSignal};
use crate::value::Value;

/// I/O and debugger collaborators threaded through every statement and
/// expression evaluation. Grouped together so a single reborrow carries
/// both down the call stack.
pub struct ExecCtx<'a> {
    pub io: &'a mut dyn IoAdapter,
    pub debug: Option<&'a mut dyn DebugHook>,
}

/// How a block finished: fell off the end, or unwound via `ΕΠΙΣΤΡΕΨΕ`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    Normal,
    Return(Option<Value>),
}

/// The error-channel signal: a real error, or a debugger stop request.
/// Carried instead of `GlossaError` so `?` can transparently thread a
/// stop request through the expression evaluator, which otherwise only
/// ever deals in values.
#[derive(Debug)]
pub(crate) enum Unwind {
    Error(GlossaError),
    Stop,
}

impl From<GlossaError> for Unwind {
    fn from(err: GlossaError) -> Self {
        Unwind::Error(err)
    }
}

/// The outcome of a full program run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Stopped,
}

/// Runs a statement list at the top level, translating the internal
/// Return/Stop signals into the public contract: `Return` escaping the
/// top level is a runtime error, `Stop` is clean cancellation.
pub fn exec_statements(
    stmts: &[Stmt],
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
) -> Result<RunOutcome, GlossaError> {
    match exec_block(stmts, env, ctx) {
        Ok(Flow::Normal) => Ok(RunOutcome::Completed),
        Ok(Flow::Return(_)) => Err(GlossaError::runtime(
            "Η εντολή ΕΠΙΣΤΡΕΨΕ χρησιμοποιήθηκε εκτός συνάρτησης",
        )),
        Err(Unwind::Stop) => Ok(RunOutcome::Stopped),
        Err(Unwind::Error(err)) => Err(err),
    }
}

pub(crate) fn exec_block(stmts: &[Stmt], env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx) -> Result<Flow, Unwind> {
    for stmt in stmts {
        if let Some(hook) = ctx.debug.as_deref_mut() {
            if hook.before(stmt, env) == DebugSignal::Stop {
                return Err(Unwind::Stop);
            }
        }
        let flow = exec_stmt(stmt, env, ctx)?;
        if let Some(hook) = ctx.debug.as_deref_mut() {
            hook.after(stmt, env);
        }
        if flow != Flow::Normal {
            return Ok(flow);
        }
    }
    Ok(Flow::Normal)
}

fn exec_stmt(stmt: &Stmt, env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx) -> Result<Flow, Unwind> {
    match stmt {
        Stmt::Assignment { target, indices, value, line } => {
            exec_assignment(target, indices, value, env, ctx, *line)?;
            Ok(Flow::Normal)
        }
        Stmt::Write { values, line } => {
            exec_write(values, env, ctx, *line)?;
            Ok(Flow::Normal)
        }
        Stmt::Read { targets, line } => {
            exec_read(targets, env, ctx, *line)?;
            Ok(Flow::Normal)
        }
        Stmt::If { condition, then_body, else_body, line } => {
            if eval(condition, env, ctx)?.as_bool().map_err(Unwind::Error)? {
                exec_block(then_body, env, ctx)
            } else if let Some(else_body) = else_body {
                exec_block(else_body, env, ctx)
            } else {
                let _ = line;
                Ok(Flow::Normal)
            }
        }
        Stmt::While { condition, body, .. } => {
            loop {
                if !eval(condition, env, ctx)?.as_bool().map_err(Unwind::Error)? {
                    return Ok(Flow::Normal);
                }
                let flow = exec_block(body, env, ctx)?;
                if flow != Flow::Normal {
                    return Ok(flow);
                }
            }
        }
        Stmt::Repeat { body, condition, .. } => {
            loop {
                let flow = exec_block(body, env, ctx)?;
                if flow != Flow::Normal {
                    return Ok(flow);
                }
                if eval(condition, env, ctx)?.as_bool().map_err(Unwind::Error)? {
                    return Ok(Flow::Normal);
                }
            }
        }
        Stmt::For { var, start, end, step, body, line } => exec_for(var, start, end, step.as_ref(), body, env, ctx, *line),
        Stmt::Select { scrutinee, cases, default, line } => exec_select(scrutinee, cases, default.as_deref(), env, ctx, *line),
        Stmt::ProcedureCall { name, args, line } => {
            let values = eval_args(args, env, ctx)?;
            call_procedure(name, values, env, ctx, *line)
        }
        Stmt::Return { value, .. } => {
            let value = match value {
                Some(expr) => Some(eval(expr, env, ctx)?),
                None => None,
            };
            Ok(Flow::Return(value))
        }
    }
}

fn eval_args(args: &[crate::ast::expression::Expr], env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx) -> Result<Vec<Value>, Unwind> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval(arg, env, ctx)?);
    }
    Ok(values)
}

fn exec_assignment(
    target: &SmolStr,
    indices: &[crate::ast::expression::Expr],
    value: &crate::ast::expression::Expr,
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<(), Unwind> {
    let raw = eval(value, env, ctx)?;
    if indices.is_empty() {
        let target_type = env.borrow().scalar_base_type(target, line).map_err(Unwind::Error)?;
        let coerced = raw.coerce(target_type).map_err(Unwind::Error)?;
        env.borrow_mut().set_scalar(target, coerced, line).map_err(Unwind::Error)?;
    } else {
        let idx = eval_indices(indices, env, ctx)?;
        let target_type = env.borrow().array_base_type(target, line).map_err(Unwind::Error)?;
        let coerced = raw.coerce(target_type).map_err(Unwind::Error)?;
        env.borrow_mut().set_array_element(target, &idx, coerced, line).map_err(Unwind::Error)?;
    }
    Ok(())
}

fn exec_write(values: &[crate::ast::expression::Expr], env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx, line: u32) -> Result<(), Unwind> {
    let _ = line;
    let mut rendered = Vec::with_capacity(values.len());
    for expr in values {
        rendered.push(eval(expr, env, ctx)?.to_string());
    }
    ctx.io.write_line(&rendered.join(" "));
    Ok(())
}

fn exec_read(
    targets: &[crate::ast::stmt::ReadTarget],
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<(), Unwind> {
    let _ = line;
    for target in targets {
        let raw = ctx.io.read_line().map_err(Unwind::Error)?;
        if target.indices.is_empty() {
            let base_type = env.borrow().scalar_base_type(&target.name, target.line).map_err(Unwind::Error)?;
            let value = parse_input(&raw, base_type, target.line).map_err(Unwind::Error)?;
            env.borrow_mut().set_scalar(&target.name, value, target.line).map_err(Unwind::Error)?;
        } else {
            let base_type = env.borrow().array_base_type(&target.name, target.line).map_err(Unwind::Error)?;
            let value = parse_input(&raw, base_type, target.line).map_err(Unwind::Error)?;
            let idx = eval_indices(&target.indices, env, ctx)?;
            env.borrow_mut().set_array_element(&target.name, &idx, value, target.line).map_err(Unwind::Error)?;
        }
    }
    Ok(())
}

fn parse_input(raw: &str, base_type: crate::types::BaseType, line: u32) -> Result<Value, GlossaError> {
    use crate::types::BaseType;
    match base_type {
        BaseType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| GlossaError::runtime_at(format!("Μη έγκυρη ακέραια είσοδος: '{raw}'"), line)),
        BaseType::Real => raw
            .trim()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| GlossaError::runtime_at(format!("Μη έγκυρη πραγματική είσοδος: '{raw}'"), line)),
        BaseType::Char => Ok(Value::Str(raw.into())),
        BaseType::Bool => {
            let normalized = raw.trim().to_uppercase();
            Ok(Value::Bool(normalized == "ΑΛΗΘΗΣ" || normalized == "TRUE" || normalized == "1"))
        }
    }
}

fn exec_for(
    var: &SmolStr,
    start: &crate::ast::expression::Expr,
    end: &crate::ast::expression::Expr,
    step: Option<&crate::ast::expression::Expr>,
    body: &[Stmt],
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Flow, Unwind> {
    let start_type = env.borrow().scalar_base_type(var, line).map_err(Unwind::Error)?;
    let start_value = eval(start, env, ctx)?.coerce(start_type).map_err(Unwind::Error)?;
    let end_value = eval(end, env, ctx)?;
    let step_value = match step {
        Some(expr) => eval(expr, env, ctx)?,
        None => Value::Integer(1),
    };
    env.borrow_mut().set_scalar(var, start_value, line).map_err(Unwind::Error)?;

    let end_num = numeric_for_compare(&end_value, line).map_err(Unwind::Error)?;
    let step_num = numeric_for_compare(&step_value, line).map_err(Unwind::Error)?;
    let ascending = step_num >= 0.0;

    loop {
        let current = env.borrow().get_scalar(var, line).map_err(Unwind::Error)?;
        let current_num = numeric_for_compare(&current, line).map_err(Unwind::Error)?;
        let keep_going = if ascending { current_num <= end_num } else { current_num >= end_num };
        if !keep_going {
            return Ok(Flow::Normal);
        }
        let flow = exec_block(body, env, ctx)?;
        if flow != Flow::Normal {
            return Ok(flow);
        }
        let next_type = env.borrow().scalar_base_type(var, line).map_err(Unwind::Error)?;
        let next = add_value(&env.borrow().get_scalar(var, line).map_err(Unwind::Error)?, &step_value, line)
            .map_err(Unwind::Error)?
            .coerce(next_type)
            .map_err(Unwind::Error)?;
        env.borrow_mut().set_scalar(var, next, line).map_err(Unwind::Error)?;
    }
}

fn numeric_for_compare(value: &Value, line: u32) -> Result<f64, GlossaError> {
    match value {
        Value::Integer(n) => Ok(*n as f64),
        Value::Real(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(GlossaError::runtime_at(
            format!("Αναμενόταν αριθμητική τιμή σε ΓΙΑ, βρέθηκε {}", other.type_name()),
            line,
        )),
    }
}

fn add_value(a: &Value, b: &Value, line: u32) -> Result<Value, GlossaError> {
    let a = numeric_for_compare(a, line)?;
    let b = numeric_for_compare(b, line)?;
    Ok(Value::Real(a + b))
}

fn exec_select(
    scrutinee: &crate::ast::expression::Expr,
    cases: &[CaseArm],
    default: Option<&[Stmt]>,
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Flow, Unwind> {
    let _ = line;
    let target = eval(scrutinee, env, ctx)?;
    for arm in cases {
        for value_expr in &arm.values {
            let candidate = eval(value_expr, env, ctx)?;
            if values_select_equal(&candidate, &target) {
                return exec_block(&arm.body, env, ctx);
            }
        }
    }
    match default {
        Some(body) => exec_block(body, env, ctx),
        None => Ok(Flow::Normal),
    }
}

fn values_select_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Real(x), Value::Real(y)) => x == y,
        (Value::Integer(x), Value::Real(y)) | (Value::Real(y), Value::Integer(x)) => (*x as f64) == *y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}

/// Binds evaluated arguments and the routine's locals into a fresh child
/// scope and runs its body, per the Routine Dispatcher contract: the
/// child's lexical parent is the root, never the caller.
fn invoke(
    routine_name: &str,
    params: &[crate::ast::program::ParamDecl],
    locals: &[VarDecl],
    body: &[Stmt],
    args: Vec<Value>,
    caller_env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Flow, Unwind> {
    let _span = tracing::debug_span!("call", routine = routine_name, line).entered();
    if args.len() != params.len() {
        return Err(Unwind::Error(GlossaError::runtime_at(
            format!("Η ρουτίνα '{routine_name}' αναμένει {} ορίσματα, δόθηκαν {}", params.len(), args.len()),
            line,
        )));
    }
    let root = crate::environment::root_ancestor(caller_env);
    let child = Rc::new(RefCell::new(Environment::new_child(locals, &root)));
    for (param, value) in params.iter().zip(args) {
        let coerced = value.coerce(param.base_type).map_err(Unwind::Error)?;
        child.borrow_mut().bind_param(param.name.clone(), coerced);
    }
    exec_block(body, &child, ctx)
}

pub(crate) fn call_procedure(
    name: &str,
    args: Vec<Value>,
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Flow, Unwind> {
    let Procedure { params, locals, body, .. } = env
        .borrow()
        .lookup_procedure(name)
        .ok_or_else(|| Unwind::Error(GlossaError::runtime_at(format!("Άγνωστη διαδικασία '{name}'"), line)))?;
    match invoke(name, &params, &locals, &body, args, env, ctx, line)? {
        Flow::Normal => Ok(Flow::Normal),
        Flow::Return(_) => Err(Unwind::Error(GlossaError::runtime_at(
            format!("Η διαδικασία '{name}' δεν μπορεί να επιστρέψει τιμή"),
            line,
        ))),
    }
}

/// Called from the expression evaluator: runs the named function and
/// returns its coerced result, consuming the internal `Flow::Return`
/// signal at this boundary.
pub(crate) fn call_function(
    name: &str,
    args: Vec<Value>,
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Value, Unwind> {
    let FunctionDef { params, locals, body, return_type, .. } = env
        .borrow()
        .lookup_function(name)
        .ok_or_else(|| Unwind::Error(GlossaError::runtime_at(format!("Άγνωστη συνάρτηση '{name}'"), line)))?;
    match invoke(name, &params, &locals, &body, args, env, ctx, line)? {
        Flow::Return(Some(value)) => value.coerce(return_type).map_err(Unwind::Error),
        Flow::Return(None) | Flow::Normal => Err(Unwind::Error(GlossaError::runtime_at(
            format!("Η συνάρτηση '{name}' δεν επέστρεψε τιμή"),
            line,
        ))),
    }
}
