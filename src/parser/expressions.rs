//! Expression grammar: `or` → `and` → `not` → `cmp` → `add` → `mul` →
//! `unary` → `primary`, precedence-climbing with one token of lookahead.
//! `cmp` is deliberately non-associative: at most one comparison operator
//! may appear per expression, so `α < β < γ` is a parse error rather than
//! silently chaining.

use crate::ast::expression::{BinOp, Expr, NumberValue, UnOp};
use crate::diag::GlossaError;
use crate::lexer::token::{NumberLiteral, TokenKind};

use super::Parser;

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, GlossaError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, GlossaError> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::Or) {
            let line = self.current_line();
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary { op: BinOp::Or, left: Box::new(left), right: Box::new(right), line };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, GlossaError> {
        let mut left = self.parse_not()?;
        while self.check(&TokenKind::And) {
            let line = self.current_line();
            self.advance();
            let right = self.parse_not()?;
            left = Expr::Binary { op: BinOp::And, left: Box::new(left), right: Box::new(right), line };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, GlossaError> {
        if self.check(&TokenKind::Not) {
            let line = self.current_line();
            self.advance();
            let expr = self.parse_not()?;
            return Ok(Expr::Unary { op: UnOp::Not, expr: Box::new(expr), line });
        }
        self.parse_cmp()
    }

    /// At most one comparison per level: `α < β` parses, `α < β < γ` doesn't.
    fn parse_cmp(&mut self) -> Result<Expr, GlossaError> {
        let left = self.parse_add()?;
        let op = match self.peek() {
            TokenKind::Eq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => return Ok(left),
        };
        let line = self.current_line();
        self.advance();
        let right = self.parse_add()?;
        Ok(Expr::Binary { op, left: Box::new(left), right: Box::new(right), line })
    }

    fn parse_add(&mut self) -> Result<Expr, GlossaError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let line = self.current_line();
            self.advance();
            let right = self.parse_mul()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), line };
        }
        Ok(left)
    }

    fn parse_mul(&mut self) -> Result<Expr, GlossaError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Div => BinOp::IntDiv,
                TokenKind::Mod => BinOp::Mod,
                _ => break,
            };
            let line = self.current_line();
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right), line };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, GlossaError> {
        let op = match self.peek() {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Plus => UnOp::Plus,
            _ => return self.parse_primary(),
        };
        let line = self.current_line();
        self.advance();
        let expr = self.parse_unary()?;
        Ok(Expr::Unary { op, expr: Box::new(expr), line })
    }

    fn parse_primary(&mut self) -> Result<Expr, GlossaError> {
        let line = self.current_line();
        match self.peek().clone() {
            TokenKind::Number(NumberLiteral::Integer(n)) => {
                self.advance();
                Ok(Expr::NumberLit { value: NumberValue::Integer(n), line })
            }
            TokenKind::Number(NumberLiteral::Real(n)) => {
                self.advance();
                Ok(Expr::NumberLit { value: NumberValue::Real(n), line })
            }
            TokenKind::StringLit(value) => {
                self.advance();
                Ok(Expr::StringLit { value, line })
            }
            TokenKind::BoolLit(value) => {
                self.advance();
                Ok(Expr::BoolLit { value, line })
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.matches(&TokenKind::LParen) {
                    let args = self.parse_argument_list()?;
                    self.expect(TokenKind::RParen)?;
                    return Ok(Expr::FunctionCall { name, args, line });
                }
                if self.matches(&TokenKind::LBracket) {
                    let indices = self.parse_index_list()?;
                    self.expect(TokenKind::RBracket)?;
                    return Ok(Expr::ArrayRef { name, indices, line });
                }
                Ok(Expr::VariableRef { name, line })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            other => Err(GlossaError::Parse {
                line,
                message: format!("Αναμενόταν έκφραση, βρέθηκε '{other}'"),
            }),
        }
    }

    /// One or more comma-separated expressions, used for both call
    /// arguments and array indices.
    pub(crate) fn parse_index_list(&mut self) -> Result<Vec<Expr>, GlossaError> {
        let mut indices = vec![self.parse_expr()?];
        while self.matches(&TokenKind::Comma) {
            indices.push(self.parse_expr()?);
        }
        Ok(indices)
    }

    pub(crate) fn parse_argument_list(&mut self) -> Result<Vec<Expr>, GlossaError> {
        if self.check(&TokenKind::RParen) {
            return Ok(Vec::new());
        }
        self.parse_index_list()
    }
}
