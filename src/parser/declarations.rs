//! Declaration sections, parameter lists, and routine headers.

use smol_str::SmolStr;

use crate::ast::program::{FunctionDef, ParamDecl, Procedure, VarDecl};
use crate::diag::GlossaError;
use crate::lexer::token::{NumberLiteral, TokenKind};

use super::Parser;

impl Parser {
    /// Parses zero or more `VARS`/`ARRAYS` sections, in any order,
    /// appending every declared name into `out`. Rejects redeclaration.
    pub(crate) fn parse_decl_sections(&mut self, out: &mut Vec<VarDecl>) -> Result<(), GlossaError> {
        loop {
            match self.peek() {
                TokenKind::Vars => {
                    self.advance();
                    self.parse_scalar_groups(out)?;
                }
                TokenKind::Arrays => {
                    self.advance();
                    self.parse_array_groups(out)?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_scalar_groups(&mut self, out: &mut Vec<VarDecl>) -> Result<(), GlossaError> {
        while self.is_type_keyword() {
            let base_type = self.base_type_for()?;
            self.expect(TokenKind::Colon)?;
            loop {
                let line = self.current_line();
                let name = self.expect_ident()?;
                self.reject_redeclaration(out, &name, line)?;
                out.push(VarDecl { name, base_type, dims: None, line });
                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(())
    }

    fn parse_array_groups(&mut self, out: &mut Vec<VarDecl>) -> Result<(), GlossaError> {
        while self.is_type_keyword() {
            let base_type = self.base_type_for()?;
            self.expect(TokenKind::Colon)?;
            loop {
                let line = self.current_line();
                let name = self.expect_ident()?;
                self.reject_redeclaration(out, &name, line)?;
                let dims = self.parse_array_dimensions()?;
                out.push(VarDecl { name, base_type, dims: Some(dims), line });
                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(())
    }

    fn reject_redeclaration(&self, out: &[VarDecl], name: &SmolStr, line: u32) -> Result<(), GlossaError> {
        if out.iter().any(|decl| &decl.name == name) {
            return Err(GlossaError::Parse {
                line,
                message: format!("Η μεταβλητή '{name}' έχει ήδη δηλωθεί"),
            });
        }
        Ok(())
    }

    fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::TypeInt | TokenKind::TypeReal | TokenKind::TypeChar | TokenKind::TypeBool
        )
    }

    /// `[ N {, N} ]` with 1 or 2 positive-integer entries.
    fn parse_array_dimensions(&mut self) -> Result<Vec<u32>, GlossaError> {
        self.expect(TokenKind::LBracket)?;
        let mut dims = vec![self.parse_positive_dimension()?];
        while self.matches(&TokenKind::Comma) {
            dims.push(self.parse_positive_dimension()?);
        }
        self.expect(TokenKind::RBracket)?;
        if dims.len() > 2 {
            return Err(GlossaError::Parse {
                line: self.current_line(),
                message: "Υποστηρίζονται μόνο μονοδιάστατοι ή δισδιάστατοι πίνακες".into(),
            });
        }
        Ok(dims)
    }

    fn parse_positive_dimension(&mut self) -> Result<u32, GlossaError> {
        let line = self.current_line();
        match self.expect_number()? {
            NumberLiteral::Integer(n) if n > 0 => Ok(n as u32),
            NumberLiteral::Integer(_) => Err(GlossaError::Parse {
                line,
                message: "Το μέγεθος πίνακα πρέπει να είναι θετικό".into(),
            }),
            NumberLiteral::Real(_) => Err(GlossaError::Parse {
                line,
                message: "Το μέγεθος πίνακα πρέπει να είναι ακέραιο".into(),
            }),
        }
    }

    /// `( [id : TYPE {, id : TYPE}] )`; rejects duplicate parameter names.
    pub(crate) fn parse_param_list(&mut self) -> Result<Vec<ParamDecl>, GlossaError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.matches(&TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let line = self.current_line();
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let base_type = self.base_type_for()?;
            if params.iter().any(|p: &ParamDecl| p.name == name) {
                return Err(GlossaError::Parse {
                    line,
                    message: format!("Η παράμετρος '{name}' έχει ήδη δηλωθεί"),
                });
            }
            params.push(ParamDecl { name, base_type, line });
            if !self.matches(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    pub(crate) fn parse_procedure(&mut self) -> Result<Procedure, GlossaError> {
        let line = self.current_line();
        self.expect(TokenKind::Proc)?;
        let name = self.expect_ident()?;
        let params = self.parse_param_list()?;
        let mut locals = Vec::new();
        self.parse_decl_sections(&mut locals)?;
        self.expect(TokenKind::Begin)?;
        let body = self.parse_block(&[TokenKind::EndProc])?;
        self.expect(TokenKind::EndProc)?;
        Ok(Procedure { name, params, locals, body, line })
    }

    pub(crate) fn parse_function(&mut self) -> Result<FunctionDef, GlossaError> {
        let line = self.current_line();
        self.expect(TokenKind::Func)?;
        let name = self.expect_ident()?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::Colon)?;
        let return_type = self.base_type_for()?;
        let mut locals = Vec::new();
        self.parse_decl_sections(&mut locals)?;
        self.expect(TokenKind::Begin)?;
        let body = self.parse_block(&[TokenKind::EndFunc])?;
        self.expect(TokenKind::EndFunc)?;
        Ok(FunctionDef { name, params, return_type, locals, body, line })
    }
}
