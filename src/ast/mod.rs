//! AST node types and the program structure they compose into.

pub mod expression;
pub mod program;
pub mod stmt;

pub use expression::Expr;
pub use program::{FunctionDef, ParamDecl, Procedure, Program, VarDecl};
pub use stmt::{CaseArm, Stmt};
