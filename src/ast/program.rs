//! Program and routine structure for Glossa.

use crate::ast::stmt::Stmt;
use crate::types::BaseType;
use smol_str::SmolStr;
use std::collections::HashMap;

/// A declared variable or array: a name, its base type, and (for arrays)
/// one or two positive dimension sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: SmolStr,
    pub base_type: BaseType,
    pub dims: Option<Vec<u32>>,
    pub line: u32,
}

impl VarDecl {
    pub fn is_array(&self) -> bool {
        self.dims.is_some()
    }
}

/// A formal parameter: name plus base type. Parameters are always scalar
/// and always bound by value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: SmolStr,
    pub base_type: BaseType,
    pub line: u32,
}

/// A `ΔΙΑΔΙΚΑΣΙΑ` definition: no return value.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: SmolStr,
    pub params: Vec<ParamDecl>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// A `ΣΥΝΑΡΤΗΣΗ` definition: must return a value of `return_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: SmolStr,
    pub params: Vec<ParamDecl>,
    pub return_type: BaseType,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// A complete parsed Glossa program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: SmolStr,
    pub globals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub procedures: HashMap<SmolStr, Procedure>,
    pub functions: HashMap<SmolStr, FunctionDef>,
}
