//! Recursive-descent parsing for Glossa.
//!
//! A single cursor over the token sequence with one token of lookahead.
//! Unlike an IDE-facing parser this one does not recover from errors: the
//! first malformed construct aborts parsing and returns its line, matching
//! the core's fail-fast error policy (see [`crate::diag`]).

pub mod declarations;
pub mod expressions;
pub mod statements;

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::ast::program::{FunctionDef, Procedure, Program};
use crate::diag::GlossaError;
use crate::lexer::token::{NumberLiteral, Token, TokenKind};
use crate::types::BaseType;

/// The parser's cursor over an owned token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    pub(crate) fn current_line(&self) -> u32 {
        self.tokens[self.pos].line
    }

    pub(crate) fn is_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !self.is_eof() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, GlossaError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(GlossaError::Parse {
                line: self.current_line(),
                message: format!("Αναμενόταν '{kind}', βρέθηκε '{}'", self.peek()),
            })
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<SmolStr, GlossaError> {
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(GlossaError::Parse {
                line: self.current_line(),
                message: format!("Αναμενόταν όνομα, βρέθηκε '{other}'"),
            }),
        }
    }

    pub(crate) fn expect_number(&mut self) -> Result<NumberLiteral, GlossaError> {
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            other => Err(GlossaError::Parse {
                line: self.current_line(),
                message: format!("Αναμενόταν αριθμός, βρέθηκε '{other}'"),
            }),
        }
    }

    pub(crate) fn base_type_for(&mut self) -> Result<BaseType, GlossaError> {
        let line = self.current_line();
        let base_type = match self.peek() {
            TokenKind::TypeInt => BaseType::Integer,
            TokenKind::TypeReal => BaseType::Real,
            TokenKind::TypeChar => BaseType::Char,
            TokenKind::TypeBool => BaseType::Bool,
            other => {
                return Err(GlossaError::Parse {
                    line,
                    message: format!("Αναμενόταν τύπος δεδομένων, βρέθηκε '{other}'"),
                });
            }
        };
        self.advance();
        Ok(base_type)
    }
}

/// Parses a complete token sequence into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, GlossaError> {
    let _span = tracing::debug_span!("parse", tokens = tokens.len()).entered();
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

impl Parser {
    fn parse_program(&mut self) -> Result<Program, GlossaError> {
        self.expect(TokenKind::Program)?;
        let name = self.expect_ident()?;

        let mut globals = Vec::new();
        self.parse_decl_sections(&mut globals)?;

        self.expect(TokenKind::Begin)?;

        let mut procedures: HashMap<SmolStr, Procedure> = HashMap::new();
        let mut functions: HashMap<SmolStr, FunctionDef> = HashMap::new();
        let mut body = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Proc => {
                    let proc = self.parse_procedure()?;
                    self.declare_routine_name(&procedures, &functions, &proc.name, proc.line)?;
                    procedures.insert(proc.name.clone(), proc);
                }
                TokenKind::Func => {
                    let func = self.parse_function()?;
                    self.declare_routine_name(&procedures, &functions, &func.name, func.line)?;
                    functions.insert(func.name.clone(), func);
                }
                TokenKind::EndProgram => break,
                _ => body.push(self.parse_statement()?),
            }
        }
        self.expect(TokenKind::EndProgram)?;

        // After END_PROGRAM only routine definitions may appear.
        loop {
            match self.peek() {
                TokenKind::Proc => {
                    let proc = self.parse_procedure()?;
                    self.declare_routine_name(&procedures, &functions, &proc.name, proc.line)?;
                    procedures.insert(proc.name.clone(), proc);
                }
                TokenKind::Func => {
                    let func = self.parse_function()?;
                    self.declare_routine_name(&procedures, &functions, &func.name, func.line)?;
                    functions.insert(func.name.clone(), func);
                }
                TokenKind::Eof => break,
                other => {
                    return Err(GlossaError::Parse {
                        line: self.current_line(),
                        message: format!("Μόνο ορισμοί διαδικασιών/συναρτήσεων επιτρέπονται εδώ, βρέθηκε '{other}'"),
                    });
                }
            }
        }
        self.expect(TokenKind::Eof)?;

        Ok(Program { name, globals, body, procedures, functions })
    }

    fn declare_routine_name(
        &self,
        procedures: &HashMap<SmolStr, Procedure>,
        functions: &HashMap<SmolStr, FunctionDef>,
        name: &SmolStr,
        line: u32,
    ) -> Result<(), GlossaError> {
        if procedures.contains_key(name) || functions.contains_key(name) {
            return Err(GlossaError::Parse {
                line,
                message: format!("Η ρουτίνα '{name}' έχει ήδη οριστεί"),
            });
        }
        Ok(())
    }
}
