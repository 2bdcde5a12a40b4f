//! Statement grammar and statement-block parsing.

use smol_str::SmolStr;

use crate::ast::stmt::{CaseArm, ReadTarget, Stmt};
use crate::diag::GlossaError;
use crate::lexer::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parses statements until the next token is one of `terminators`,
    /// without consuming the terminator.
    pub(crate) fn parse_block(&mut self, terminators: &[TokenKind]) -> Result<Vec<Stmt>, GlossaError> {
        let mut stmts = Vec::new();
        while !terminators.iter().any(|t| self.check(t)) {
            if self.is_eof() {
                return Err(GlossaError::Parse {
                    line: self.current_line(),
                    message: "Απρόσμενο τέλος αρχείου μέσα σε μπλοκ εντολών".into(),
                });
            }
            stmts.push(self.parse_statement()?);
        }
        Ok(stmts)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, GlossaError> {
        let line = self.current_line();
        match self.peek().clone() {
            TokenKind::Write => self.parse_write(line),
            TokenKind::Read => self.parse_read(line),
            TokenKind::Call => self.parse_call(line),
            TokenKind::Return => self.parse_return(line),
            TokenKind::If => self.parse_if(line),
            TokenKind::While => self.parse_while(line),
            TokenKind::RepeatStart => self.parse_repeat(line),
            TokenKind::Select => self.parse_select(line),
            TokenKind::For => self.parse_for(line),
            TokenKind::Ident(_) => self.parse_assignment(line),
            other => Err(GlossaError::Parse {
                line,
                message: format!("Άγνωστη εντολή στη γραμμή {line}: '{other}'"),
            }),
        }
    }

    fn parse_write(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let mut values = vec![self.parse_expr()?];
        while self.matches(&TokenKind::Comma) {
            values.push(self.parse_expr()?);
        }
        Ok(Stmt::Write { values, line })
    }

    fn parse_read(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let mut targets = vec![self.parse_read_target()?];
        while self.matches(&TokenKind::Comma) {
            targets.push(self.parse_read_target()?);
        }
        Ok(Stmt::Read { targets, line })
    }

    fn parse_read_target(&mut self) -> Result<ReadTarget, GlossaError> {
        let line = self.current_line();
        let name = self.expect_ident()?;
        let indices = if self.matches(&TokenKind::LBracket) {
            let indices = self.parse_index_list()?;
            self.expect(TokenKind::RBracket)?;
            indices
        } else {
            Vec::new()
        };
        Ok(ReadTarget { name, indices, line })
    }

    fn parse_call(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let args = self.parse_argument_list()?;
        self.expect(TokenKind::RParen)?;
        Ok(Stmt::ProcedureCall { name, args, line })
    }

    /// `ΕΠΙΣΤΡΕΨΕ` takes an optional expression: a bare `ΕΠΙΣΤΡΕΨΕ` exits a
    /// procedure, while a function must supply a value (checked later, by
    /// the executor, against the routine kind).
    fn parse_return(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let value = if self.starts_expression() { Some(self.parse_expr()?) } else { None };
        Ok(Stmt::Return { value, line })
    }

    fn starts_expression(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Number(_)
                | TokenKind::StringLit(_)
                | TokenKind::BoolLit(_)
                | TokenKind::Ident(_)
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Not
        )
    }

    fn parse_if(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_body = self.parse_block(&[TokenKind::Else, TokenKind::EndIf])?;
        let else_body = if self.matches(&TokenKind::Else) {
            Some(self.parse_block(&[TokenKind::EndIf])?)
        } else {
            None
        };
        self.expect(TokenKind::EndIf)?;
        Ok(Stmt::If { condition, then_body, else_body, line })
    }

    fn parse_while(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Do)?;
        let body = self.parse_block(&[TokenKind::EndLoop])?;
        self.expect(TokenKind::EndLoop)?;
        Ok(Stmt::While { condition, body, line })
    }

    fn parse_repeat(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let body = self.parse_block(&[TokenKind::Until])?;
        self.expect(TokenKind::Until)?;
        let condition = self.parse_expr()?;
        Ok(Stmt::Repeat { body, condition, line })
    }

    /// `ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ` must be the last arm: a `ΠΕΡΙΠΤΩΣΗ` following it
    /// is a parse error rather than silently accepted and ignored.
    fn parse_select(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let scrutinee = self.parse_expr()?;
        let mut cases = Vec::new();
        let mut default = None;
        loop {
            if self.check(&TokenKind::EndSelect) {
                break;
            }
            let case_line = self.current_line();
            self.expect(TokenKind::Case)?;
            if self.matches(&TokenKind::CaseElse) {
                if default.is_some() {
                    return Err(GlossaError::Parse {
                        line: case_line,
                        message: "Μόνο μία ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ επιτρέπεται ανά ΕΠΙΛΕΞΕ".into(),
                    });
                }
                self.matches(&TokenKind::Colon);
                default = Some(self.parse_block(&[TokenKind::Case, TokenKind::EndSelect])?);
                continue;
            }
            if default.is_some() {
                return Err(GlossaError::Parse {
                    line: case_line,
                    message: "Η ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ πρέπει να είναι η τελευταία περίπτωση".into(),
                });
            }
            let values = self.parse_index_list()?;
            self.expect(TokenKind::Colon)?;
            let body = self.parse_block(&[TokenKind::Case, TokenKind::EndSelect])?;
            cases.push(CaseArm { values, body, line: case_line });
        }
        self.expect(TokenKind::EndSelect)?;
        Ok(Stmt::Select { scrutinee, cases, default, line })
    }

    fn parse_for(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        self.advance();
        let var = self.expect_ident()?;
        self.expect(TokenKind::From)?;
        let start = self.parse_expr()?;
        self.expect(TokenKind::To)?;
        let end = self.parse_expr()?;
        let step = if self.matches(&TokenKind::Step) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let body = self.parse_block(&[TokenKind::EndLoop])?;
        self.expect(TokenKind::EndLoop)?;
        Ok(Stmt::For { var, start, end, step, body, line })
    }

    fn parse_assignment(&mut self, line: u32) -> Result<Stmt, GlossaError> {
        let target: SmolStr = self.expect_ident()?;
        let indices = if self.matches(&TokenKind::LBracket) {
            let indices = self.parse_index_list()?;
            self.expect(TokenKind::RBracket)?;
            indices
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Stmt::Assignment { target, indices, value, line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn parse_block_src(src: &str) -> Vec<Stmt> {
        let tokens = tokenize(src).unwrap();
        let mut parser = Parser::new(tokens);
        parser.parse_block(&[TokenKind::Eof]).unwrap()
    }

    #[test]
    fn assignment_with_index_parses() {
        let stmts = parse_block_src("M[1,2] <- 5");
        assert!(matches!(stmts[0], Stmt::Assignment { .. }));
    }

    #[test]
    fn if_without_else_parses() {
        let stmts = parse_block_src("ΑΝ α > 0 ΤΟΤΕ\nΓΡΑΨΕ α\nΤΕΛΟΣ_ΑΝ");
        match &stmts[0] {
            Stmt::If { else_body, .. } => assert!(else_body.is_none()),
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn case_after_default_is_rejected() {
        let tokens = tokenize(
            "ΕΠΙΛΕΞΕ α\nΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ\nΓΡΑΨΕ 1\nΠΕΡΙΠΤΩΣΗ 2\nΓΡΑΨΕ 2\nΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ",
        )
        .unwrap();
        let mut parser = Parser::new(tokens);
        assert!(parser.parse_statement().is_err());
    }

    #[test]
    fn select_collects_cases_and_default() {
        let stmts = parse_block_src(
            "ΕΠΙΛΕΞΕ α\nΠΕΡΙΠΤΩΣΗ 1,2\nΓΡΑΨΕ 1\nΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ\nΓΡΑΨΕ 2\nΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ",
        );
        match &stmts[0] {
            Stmt::Select { cases, default, .. } => {
                assert_eq!(cases.len(), 1);
                assert_eq!(cases[0].values.len(), 2);
                assert!(default.is_some());
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn for_loop_with_step_parses() {
        let stmts = parse_block_src("ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 10 ΜΕ_ΒΗΜΑ 2\nΓΡΑΨΕ i\nΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ");
        match &stmts[0] {
            Stmt::For { step, .. } => assert!(step.is_some()),
            _ => panic!("expected for"),
        }
    }
}
