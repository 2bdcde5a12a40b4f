//! Expression AST nodes for Glossa.

use smol_str::SmolStr;

/// A binary operator, ordered here by the grammar's precedence levels
/// (lowest first) though the tree itself has already resolved precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Plus,
    Not,
}

/// Any expression in Glossa.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit { value: NumberValue, line: u32 },
    StringLit { value: SmolStr, line: u32 },
    BoolLit { value: bool, line: u32 },
    VariableRef { name: SmolStr, line: u32 },
    ArrayRef { name: SmolStr, indices: Vec<Expr>, line: u32 },
    FunctionCall { name: SmolStr, args: Vec<Expr>, line: u32 },
    Unary { op: UnOp, expr: Box<Expr>, line: u32 },
    Binary { op: BinOp, left: Box<Expr>, right: Box<Expr>, line: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Integer(i64),
    Real(f64),
}

impl Expr {
    pub fn line(&self) -> u32 {
        match self {
            Expr::NumberLit { line, .. }
            | Expr::StringLit { line, .. }
            | Expr::BoolLit { line, .. }
            | Expr::VariableRef { line, .. }
            | Expr::ArrayRef { line, .. }
            | Expr::FunctionCall { line, .. }
            | Expr::Unary { line, .. }
            | Expr::Binary { line, .. } => *line,
        }
    }
}
