//! Token types and representations for Glossa lexical analysis.

use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token in Glossa.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Program structure
    Program,
    EndProgram,
    Begin,
    Vars,
    Arrays,

    // Control flow
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndLoop,
    RepeatStart,
    Until,
    For,
    From,
    To,
    Step,
    Select,
    Case,
    CaseElse,
    EndSelect,

    // Routines
    Proc,
    EndProc,
    Func,
    EndFunc,
    Call,
    Return,

    // I/O
    Write,
    Read,

    // Type keywords
    TypeInt,
    TypeReal,
    TypeChar,
    TypeBool,

    // Operator words
    Div,
    Mod,
    And,
    Or,
    Not,

    // Literals
    Number(NumberLiteral),
    StringLit(SmolStr),
    BoolLit(bool),
    Ident(SmolStr),

    // Punctuation / operators
    Assign,    // <-
    Le,        // <=
    Ge,        // >=
    Ne,        // <>
    Eq,        // =
    Lt,        // <
    Gt,        // >
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    PercentOp, // %
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,

    Eof,
}

/// A scanned numeric literal, tagged by whether it contained a `.`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    Integer(i64),
    Real(f64),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Program => write!(f, "ΠΡΟΓΡΑΜΜΑ"),
            TokenKind::EndProgram => write!(f, "ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"),
            TokenKind::Begin => write!(f, "ΑΡΧΗ"),
            TokenKind::Vars => write!(f, "ΜΕΤΑΒΛΗΤΕΣ"),
            TokenKind::Arrays => write!(f, "ΠΙΝΑΚΕΣ"),
            TokenKind::If => write!(f, "ΑΝ"),
            TokenKind::Then => write!(f, "ΤΟΤΕ"),
            TokenKind::Else => write!(f, "ΑΛΛΙΩΣ"),
            TokenKind::EndIf => write!(f, "ΤΕΛΟΣ_ΑΝ"),
            TokenKind::While => write!(f, "ΟΣΟ"),
            TokenKind::Do => write!(f, "ΕΠΑΝΑΛΑΒΕ"),
            TokenKind::EndLoop => write!(f, "ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ"),
            TokenKind::RepeatStart => write!(f, "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ"),
            TokenKind::Until => write!(f, "ΜΕΧΡΙΣ_ΟΤΟΥ"),
            TokenKind::For => write!(f, "ΓΙΑ"),
            TokenKind::From => write!(f, "ΑΠΟ"),
            TokenKind::To => write!(f, "ΜΕΧΡΙ"),
            TokenKind::Step => write!(f, "ΜΕ_ΒΗΜΑ"),
            TokenKind::Select => write!(f, "ΕΠΙΛΕΞΕ"),
            TokenKind::Case => write!(f, "ΠΕΡΙΠΤΩΣΗ"),
            TokenKind::CaseElse => write!(f, "ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ"),
            TokenKind::EndSelect => write!(f, "ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ"),
            TokenKind::Proc => write!(f, "ΔΙΑΔΙΚΑΣΙΑ"),
            TokenKind::EndProc => write!(f, "ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ"),
            TokenKind::Func => write!(f, "ΣΥΝΑΡΤΗΣΗ"),
            TokenKind::EndFunc => write!(f, "ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ"),
            TokenKind::Call => write!(f, "ΚΑΛΕΣΕ"),
            TokenKind::Return => write!(f, "ΕΠΙΣΤΡΕΨΕ"),
            TokenKind::Write => write!(f, "ΓΡΑΨΕ"),
            TokenKind::Read => write!(f, "ΔΙΑΒΑΣΕ"),
            TokenKind::TypeInt => write!(f, "ΑΚΕΡΑΙΕΣ"),
            TokenKind::TypeReal => write!(f, "ΠΡΑΓΜΑΤΙΚΕΣ"),
            TokenKind::TypeChar => write!(f, "ΧΑΡΑΚΤΗΡΕΣ"),
            TokenKind::TypeBool => write!(f, "ΛΟΓΙΚΕΣ"),
            TokenKind::Div => write!(f, "DIV"),
            TokenKind::Mod => write!(f, "MOD"),
            TokenKind::And => write!(f, "ΚΑΙ"),
            TokenKind::Or => write!(f, "Η"),
            TokenKind::Not => write!(f, "ΟΧΙ"),
            TokenKind::Number(NumberLiteral::Integer(n)) => write!(f, "{n}"),
            TokenKind::Number(NumberLiteral::Real(n)) => write!(f, "{n}"),
            TokenKind::StringLit(s) => write!(f, "\"{s}\""),
            TokenKind::BoolLit(b) => write!(f, "{b}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Assign => write!(f, "<-"),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Ne => write!(f, "<>"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::PercentOp => write!(f, "%"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Eof => write!(f, "<EOF>"),
        }
    }
}

/// A lexical token with its kind and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }
}
