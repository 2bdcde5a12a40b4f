//! Expression evaluation: a pure function of an AST node and an
//! Environment, except that a `FunctionCall` may recurse into the
//! Routine Dispatcher and, through it, invoke I/O or a debugger stop.
//!
//! Evaluation carries `Unwind` rather than `GlossaError` as its error
//! channel for exactly one reason: a `FunctionCall` may run a routine body
//! containing a debugger stop request, and that `Unwind::Stop` must ride
//! `?` all the way back out to the statement executor unchanged, the same
//! way it does for a procedure call.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::ast::expression::{BinOp, Expr, NumberValue, UnOp};
use crate::diag::GlossaError;
use crate::environment::Environment;
use crate::exec::{call_function, ExecCtx, Unwind};
use crate::value::Value;

pub fn eval(expr: &Expr, env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx) -> Result<Value, Unwind> {
    match expr {
        Expr::NumberLit { value, .. } => Ok(match value {
            NumberValue::Integer(n) => Value::Integer(*n),
            NumberValue::Real(n) => Value::Real(*n),
        }),
        Expr::StringLit { value, .. } => Ok(Value::Str(value.clone())),
        Expr::BoolLit { value, .. } => Ok(Value::Bool(*value)),
        Expr::VariableRef { name, line } => env.borrow().get_scalar(name, *line).map_err(Unwind::Error),
        Expr::ArrayRef { name, indices, line } => {
            let idx = eval_indices(indices, env, ctx)?;
            env.borrow().get_array_element(name, &idx, *line).map_err(Unwind::Error)
        }
        Expr::FunctionCall { name, args, line } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, env, ctx)?);
            }
            call_function(name, values, env, ctx, *line)
        }
        Expr::Unary { op, expr: inner, line } => eval_unary(*op, inner, env, ctx, *line),
        Expr::Binary { op, left, right, line } => eval_binary(*op, left, right, env, ctx, *line),
    }
}

pub fn eval_indices(indices: &[Expr], env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx) -> Result<Vec<i64>, Unwind> {
    indices
        .iter()
        .map(|e| eval(e, env, ctx)?.coerce_index().map_err(Unwind::Error))
        .collect()
}

fn eval_unary(op: UnOp, inner: &Expr, env: &Rc<RefCell<Environment>>, ctx: &mut ExecCtx, line: u32) -> Result<Value, Unwind> {
    let v = eval(inner, env, ctx)?;
    match op {
        UnOp::Not => Ok(Value::Bool(!v.as_bool().map_err(Unwind::Error)?)),
        UnOp::Neg => Ok(match as_num(&v, line).map_err(Unwind::Error)? {
            Num::Int(n) => Value::Integer(-n),
            Num::Real(n) => Value::Real(-n),
        }),
        UnOp::Plus => Ok(match as_num(&v, line).map_err(Unwind::Error)? {
            Num::Int(n) => Value::Integer(n),
            Num::Real(n) => Value::Real(n),
        }),
    }
}

fn eval_binary(
    op: BinOp,
    left: &Expr,
    right: &Expr,
    env: &Rc<RefCell<Environment>>,
    ctx: &mut ExecCtx,
    line: u32,
) -> Result<Value, Unwind> {
    match op {
        BinOp::And => {
            let l = eval(left, env, ctx)?.as_bool().map_err(Unwind::Error)?;
            let r = eval(right, env, ctx)?.as_bool().map_err(Unwind::Error)?;
            Ok(Value::Bool(l && r))
        }
        BinOp::Or => {
            let l = eval(left, env, ctx)?.as_bool().map_err(Unwind::Error)?;
            let r = eval(right, env, ctx)?.as_bool().map_err(Unwind::Error)?;
            Ok(Value::Bool(l || r))
        }
        BinOp::Eq => Ok(Value::Bool(values_equal(&eval(left, env, ctx)?, &eval(right, env, ctx)?))),
        BinOp::Ne => Ok(Value::Bool(!values_equal(&eval(left, env, ctx)?, &eval(right, env, ctx)?))),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            let l = eval(left, env, ctx)?;
            let r = eval(right, env, ctx)?;
            let ord = compare(&l, &r, line).map_err(Unwind::Error)?;
            Ok(Value::Bool(match op {
                BinOp::Lt => ord == Ordering::Less,
                BinOp::Le => ord != Ordering::Greater,
                BinOp::Gt => ord == Ordering::Greater,
                BinOp::Ge => ord != Ordering::Less,
                _ => unreachable!(),
            }))
        }
        BinOp::Add | BinOp::Sub | BinOp::Mul => {
            let l = as_num(&eval(left, env, ctx)?, line).map_err(Unwind::Error)?;
            let r = as_num(&eval(right, env, ctx)?, line).map_err(Unwind::Error)?;
            Ok(match (l, r, op) {
                (Num::Int(a), Num::Int(b), BinOp::Add) => Value::Integer(a + b),
                (Num::Int(a), Num::Int(b), BinOp::Sub) => Value::Integer(a - b),
                (Num::Int(a), Num::Int(b), BinOp::Mul) => Value::Integer(a * b),
                (a, b, BinOp::Add) => Value::Real(a.to_f64() + b.to_f64()),
                (a, b, BinOp::Sub) => Value::Real(a.to_f64() - b.to_f64()),
                (a, b, BinOp::Mul) => Value::Real(a.to_f64() * b.to_f64()),
                _ => unreachable!(),
            })
        }
        BinOp::Div => {
            let l = as_num(&eval(left, env, ctx)?, line).map_err(Unwind::Error)?.to_f64();
            let r = as_num(&eval(right, env, ctx)?, line).map_err(Unwind::Error)?.to_f64();
            if r == 0.0 {
                return Err(Unwind::Error(GlossaError::runtime_at("Διαίρεση με το μηδέν", line)));
            }
            Ok(Value::Real(l / r))
        }
        BinOp::IntDiv => {
            let l = as_int(&eval(left, env, ctx)?, line).map_err(Unwind::Error)?;
            let r = as_int(&eval(right, env, ctx)?, line).map_err(Unwind::Error)?;
            if r == 0 {
                return Err(Unwind::Error(GlossaError::runtime_at("Διαίρεση με το μηδέν", line)));
            }
            Ok(Value::Integer(l / r))
        }
        BinOp::Mod => {
            let l = as_int(&eval(left, env, ctx)?, line).map_err(Unwind::Error)?;
            let r = as_int(&eval(right, env, ctx)?, line).map_err(Unwind::Error)?;
            if r == 0 {
                return Err(Unwind::Error(GlossaError::runtime_at("Υπόλοιπο με το μηδέν", line)));
            }
            Ok(Value::Integer(l % r))
        }
    }
}

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Real(n) => n,
        }
    }
}

fn as_num(v: &Value, line: u32) -> Result<Num, GlossaError> {
    match v {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Real(n) => Ok(Num::Real(*n)),
        Value::Bool(b) => Ok(Num::Int(if *b { 1 } else { 0 })),
        other => Err(GlossaError::runtime_at(
            format!("Αναμενόταν αριθμητική τιμή, βρέθηκε {}", other.type_name()),
            line,
        )),
    }
}

fn as_int(v: &Value, line: u32) -> Result<i64, GlossaError> {
    match as_num(v, line)? {
        Num::Int(n) => Ok(n),
        Num::Real(n) => Ok(n as i64),
    }
}

/// Equality across mismatched type families, following
/// `glossa_compiler.py`'s native `==`: since Python's `bool` is an `int`
/// subclass, a boolean compares equal to its numeric value (`ΑΛΗΘΗΣ = 1`
/// is true), but strings never compare equal to anything but a string.
fn values_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Real(a), Value::Real(b)) => a == b,
        (Value::Integer(a), Value::Real(b)) | (Value::Real(b), Value::Integer(a)) => (*a as f64) == *b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(a), Value::Integer(b)) | (Value::Integer(b), Value::Bool(a)) => (if *a { 1 } else { 0 }) == *b,
        (Value::Bool(a), Value::Real(b)) | (Value::Real(b), Value::Bool(a)) => (if *a { 1.0 } else { 0.0 }) == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}

fn compare(l: &Value, r: &Value, line: u32) -> Result<Ordering, GlossaError> {
    match (l, r) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (a, b) if is_numeric(a) && is_numeric(b) => {
            let a = as_num(a, line)?.to_f64();
            let b = as_num(b, line)?.to_f64();
            a.partial_cmp(&b).ok_or_else(|| GlossaError::runtime_at("Μη συγκρίσιμες τιμές", line))
        }
        _ => Err(GlossaError::runtime_at(
            format!(
                "Δεν συγκρίνονται τιμές τύπου {} και {}",
                l.type_name(),
                r.type_name()
            ),
            line,
        )),
    }
}

fn is_numeric(v: &Value) -> bool {
    matches!(v, Value::Integer(_) | Value::Real(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::NumberValue;
    use crate::ast::program::{FunctionDef, Procedure};
    use crate::io::QueueIoAdapter;
    use std::collections::HashMap;

    fn root_env() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::new_root(
            &[],
            Rc::new(HashMap::<smol_str::SmolStr, Procedure>::new()),
            Rc::new(HashMap::<smol_str::SmolStr, FunctionDef>::new()),
        )))
    }

    fn int(n: i64) -> Expr {
        Expr::NumberLit { value: NumberValue::Integer(n), line: 1 }
    }

    fn run(expr: &Expr) -> Result<Value, Unwind> {
        let env = root_env();
        let mut io = QueueIoAdapter::new(vec![]);
        let mut ctx = ExecCtx { io: &mut io, debug: None };
        eval(expr, &env, &mut ctx)
    }

    fn unwrap_err(result: Result<Value, Unwind>) -> GlossaError {
        match result {
            Err(Unwind::Error(err)) => err,
            Err(Unwind::Stop) => panic!("expected an error, got a debugger stop"),
            Ok(value) => panic!("expected an error, got {value:?}"),
        }
    }

    #[test]
    fn integer_addition_stays_integer() {
        let expr = Expr::Binary { op: BinOp::Add, left: Box::new(int(2)), right: Box::new(int(3)), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Integer(5));
    }

    #[test]
    fn mixed_addition_widens_to_real() {
        let real = Expr::NumberLit { value: NumberValue::Real(1.5), line: 1 };
        let expr = Expr::Binary { op: BinOp::Add, left: Box::new(int(1)), right: Box::new(real), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Real(2.5));
    }

    #[test]
    fn division_by_zero_errors() {
        let expr = Expr::Binary { op: BinOp::Div, left: Box::new(int(1)), right: Box::new(int(0)), line: 4 };
        let err = unwrap_err(run(&expr));
        assert!(err.to_string().contains("μηδέν"));
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        let expr = Expr::Binary { op: BinOp::IntDiv, left: Box::new(int(-7)), right: Box::new(int(2)), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Integer(-3));
    }

    #[test]
    fn modulo_takes_sign_of_left_operand() {
        let expr = Expr::Binary { op: BinOp::Mod, left: Box::new(int(-7)), right: Box::new(int(2)), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Integer(-1));
    }

    #[test]
    fn ordering_across_types_errors() {
        let s = Expr::StringLit { value: "a".into(), line: 1 };
        let expr = Expr::Binary { op: BinOp::Lt, left: Box::new(int(1)), right: Box::new(s), line: 1 };
        assert!(run(&expr).is_err());
    }

    #[test]
    fn equality_across_mismatched_types_is_false_not_error() {
        let s = Expr::StringLit { value: "1".into(), line: 1 };
        let expr = Expr::Binary { op: BinOp::Eq, left: Box::new(int(1)), right: Box::new(s), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Bool(false));
    }

    #[test]
    fn boolean_compares_equal_to_its_numeric_value() {
        let b = Expr::BoolLit { value: true, line: 1 };
        let expr = Expr::Binary { op: BinOp::Eq, left: Box::new(b), right: Box::new(int(1)), line: 1 };
        assert_eq!(run(&expr).unwrap(), Value::Bool(true));
    }
}
