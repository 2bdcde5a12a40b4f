//! Lexical analysis for Glossa.
//!
//! The scanner turns source text into a finite ordered token sequence
//! terminated by `EOF`. Unlike an error-tolerant IDE lexer, it aborts on
//! the first malformed construct: Glossa programs are short enough that
//! error recovery buys little, and the core's error policy (see
//! [`crate::diag`]) is "halt and surface", not "collect and report".

pub mod keywords;
pub mod token;

use crate::diag::GlossaError;
use smol_str::SmolStr;
use token::{NumberLiteral, Token, TokenKind};

/// A lexical analyzer for Glossa source text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the source text, returning the token sequence or the
    /// first scanning error encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, GlossaError> {
        while !self.is_at_end() {
            self.skip_whitespace_and_comments();
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }
        self.tokens.push(Token::new(TokenKind::Eof, self.line));
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), GlossaError> {
        let ch = self.advance();
        let line = self.line;

        match ch {
            '"' | '«' => self.scan_string(ch, line),
            '<' => {
                if self.match_char('-') {
                    self.push(TokenKind::Assign, line);
                } else if self.match_char('=') {
                    self.push(TokenKind::Le, line);
                } else if self.match_char('>') {
                    self.push(TokenKind::Ne, line);
                } else {
                    self.push(TokenKind::Lt, line);
                }
                Ok(())
            }
            '>' => {
                if self.match_char('=') {
                    self.push(TokenKind::Ge, line);
                } else {
                    self.push(TokenKind::Gt, line);
                }
                Ok(())
            }
            '=' => self.ok_push(TokenKind::Eq, line),
            '+' => self.ok_push(TokenKind::Plus, line),
            '-' => self.ok_push(TokenKind::Minus, line),
            '*' => self.ok_push(TokenKind::Star, line),
            '/' => self.ok_push(TokenKind::Slash, line),
            '%' => self.ok_push(TokenKind::PercentOp, line),
            '(' => self.ok_push(TokenKind::LParen, line),
            ')' => self.ok_push(TokenKind::RParen, line),
            '[' => self.ok_push(TokenKind::LBracket, line),
            ']' => self.ok_push(TokenKind::RBracket, line),
            ',' => self.ok_push(TokenKind::Comma, line),
            ':' => self.ok_push(TokenKind::Colon, line),
            '0'..='9' => {
                self.pos -= 1;
                self.scan_number(line)
            }
            c if is_identifier_start(c) => {
                self.pos -= 1;
                self.scan_identifier_or_keyword(line)
            }
            other => Err(GlossaError::Scan {
                line,
                message: format!("Μη αναγνωρίσιμο σύμβολο '{other}'"),
            }),
        }
    }

    fn scan_string(&mut self, quote: char, start_line: u32) -> Result<(), GlossaError> {
        let closing = if quote == '"' { '"' } else { '»' };
        let mut value = String::new();
        loop {
            if self.is_at_end() {
                return Err(GlossaError::Scan {
                    line: start_line,
                    message: "Μη κλεισμένο αλφαριθμητικό".to_string(),
                });
            }
            let c = self.advance();
            if c == closing {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            if c == '\\' {
                if self.is_at_end() {
                    return Err(GlossaError::Scan {
                        line: start_line,
                        message: "Μη κλεισμένο αλφαριθμητικό".to_string(),
                    });
                }
                value.push(self.advance());
            } else {
                value.push(c);
            }
        }
        self.push(TokenKind::StringLit(SmolStr::new(value)), start_line);
        Ok(())
    }

    fn scan_number(&mut self, line: u32) -> Result<(), GlossaError> {
        let start = self.pos;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let mut is_real = false;
        if self.peek() == '.' && self.peek_at(1).is_ascii_digit() {
            is_real = true;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let literal = if is_real {
            let value = text
                .parse()
                .map_err(|_| GlossaError::Scan { line, message: format!("Μη έγκυρος πραγματικός αριθμός '{text}'") })?;
            NumberLiteral::Real(value)
        } else {
            let value = text
                .parse()
                .map_err(|_| GlossaError::Scan { line, message: format!("Ο ακέραιος '{text}' είναι εκτός ορίων") })?;
            NumberLiteral::Integer(value)
        };
        self.push(TokenKind::Number(literal), line);
        Ok(())
    }

    fn scan_identifier_or_keyword(&mut self, line: u32) -> Result<(), GlossaError> {
        let start = self.pos;
        self.advance();
        while is_identifier_continue(self.peek()) {
            self.advance();
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let kind = keywords::lookup_keyword(&text).unwrap_or(TokenKind::Ident(SmolStr::new(&text)));
        self.push(kind, line);
        Ok(())
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                '!' => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn ok_push(&mut self, kind: TokenKind, line: u32) -> Result<(), GlossaError> {
        self.push(kind, line);
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, line: u32) {
        self.tokens.push(Token::new(kind, line));
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_at(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if c != '\0' {
            self.pos += 1;
        }
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience function to tokenize a source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, GlossaError> {
    let _span = tracing::debug_span!("lex", len = source.len()).entered();
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn skips_comments_and_tracks_lines() {
        let tokens = tokenize("α <- 1 ! a comment\nβ <- 2").unwrap();
        assert_eq!(tokens[0].line, 1);
        let beta = tokens.iter().find(|t| matches!(&t.kind, TokenKind::Ident(s) if s == "β")).unwrap();
        assert_eq!(beta.line, 2);
    }

    #[test]
    fn multi_char_operators_take_precedence() {
        assert_eq!(
            kinds("<- <= >= <> < > ="),
            vec![
                TokenKind::Assign,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_and_real_literals() {
        assert_eq!(
            kinds("42 3.14"),
            vec![
                TokenKind::Number(NumberLiteral::Integer(42)),
                TokenKind::Number(NumberLiteral::Real(3.14)),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn greek_identifier_and_keyword() {
        let tokens = kinds("ΠΡΟΓΡΑΜΜΑ άλφα");
        assert_eq!(tokens[0], TokenKind::Program);
        assert_eq!(tokens[1], TokenKind::Ident(SmolStr::new("άλφα")));
    }

    #[test]
    fn string_literal_both_quote_styles() {
        let tokens = kinds(r#""hello" «κόσμε»"#);
        assert_eq!(tokens[0], TokenKind::StringLit(SmolStr::new("hello")));
        assert_eq!(tokens[1], TokenKind::StringLit(SmolStr::new("κόσμε")));
    }

    #[test]
    fn string_with_backslash_escape() {
        let tokens = kinds(r#""a\"b""#);
        assert_eq!(tokens[0], TokenKind::StringLit(SmolStr::new("a\"b")));
    }

    #[test]
    fn unterminated_string_is_a_scan_error() {
        let err = tokenize("\"unterminated").unwrap_err();
        assert!(err.to_string().contains("γραμμή 1"));
        match err {
            GlossaError::Scan { line, .. } => assert_eq!(line, 1),
            other => panic!("expected scan error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognised_character_is_a_scan_error() {
        let err = tokenize("α @ β").unwrap_err();
        assert!(matches!(err, GlossaError::Scan { .. }));
    }

    #[test]
    fn boolean_keywords_yield_bool_literal() {
        assert_eq!(
            kinds("ΑΛΗΘΗΣ ΨΕΥΔΗΣ"),
            vec![TokenKind::BoolLit(true), TokenKind::BoolLit(false), TokenKind::Eof]
        );
    }
}
