//! Keyword recognition for Glossa.
//!
//! Glossa keywords are Greek words (plus the ASCII operator words `DIV` and
//! `MOD`). Matching is exact against the fixed table below; there is no
//! case-folding since Greek-alphabet curricula do not mix case.

use super::token::TokenKind;

/// Looks up an identifier against the fixed keyword table.
///
/// Returns `None` when `name` is an ordinary identifier.
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    Some(match name {
        "ΠΡΟΓΡΑΜΜΑ" => TokenKind::Program,
        "ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ" => TokenKind::EndProgram,
        "ΑΡΧΗ" => TokenKind::Begin,
        "ΜΕΤΑΒΛΗΤΕΣ" => TokenKind::Vars,
        "ΠΙΝΑΚΕΣ" => TokenKind::Arrays,

        "ΑΝ" => TokenKind::If,
        "ΤΟΤΕ" => TokenKind::Then,
        "ΑΛΛΙΩΣ" => TokenKind::Else,
        "ΤΕΛΟΣ_ΑΝ" => TokenKind::EndIf,
        "ΟΣΟ" => TokenKind::While,
        "ΕΠΑΝΑΛΑΒΕ" => TokenKind::Do,
        "ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ" => TokenKind::EndLoop,
        "ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ" => TokenKind::RepeatStart,
        "ΜΕΧΡΙΣ_ΟΤΟΥ" => TokenKind::Until,
        "ΓΙΑ" => TokenKind::For,
        "ΑΠΟ" => TokenKind::From,
        "ΜΕΧΡΙ" => TokenKind::To,
        "ΜΕ_ΒΗΜΑ" => TokenKind::Step,
        "ΕΠΙΛΕΞΕ" => TokenKind::Select,
        "ΠΕΡΙΠΤΩΣΗ" => TokenKind::Case,
        "ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ" => TokenKind::EndSelect,

        "ΔΙΑΔΙΚΑΣΙΑ" => TokenKind::Proc,
        "ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ" => TokenKind::EndProc,
        "ΣΥΝΑΡΤΗΣΗ" => TokenKind::Func,
        "ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ" => TokenKind::EndFunc,
        "ΚΑΛΕΣΕ" => TokenKind::Call,
        "ΕΠΙΣΤΡΕΨΕ" => TokenKind::Return,

        "ΓΡΑΨΕ" => TokenKind::Write,
        "ΔΙΑΒΑΣΕ" => TokenKind::Read,

        // Both the plural (name-list position) and singular (return-type
        // position) spellings are accepted, matching the original grammar.
        "ΑΚΕΡΑΙΕΣ" | "ΑΚΕΡΑΙΑ" => TokenKind::TypeInt,
        "ΠΡΑΓΜΑΤΙΚΕΣ" | "ΠΡΑΓΜΑΤΙΚΗ" => TokenKind::TypeReal,
        "ΧΑΡΑΚΤΗΡΕΣ" | "ΧΑΡΑΚΤΗΡΑΣ" => TokenKind::TypeChar,
        "ΛΟΓΙΚΕΣ" | "ΛΟΓΙΚΗ" => TokenKind::TypeBool,

        "DIV" => TokenKind::Div,
        "MOD" => TokenKind::Mod,
        "ΚΑΙ" => TokenKind::And,
        "Η" => TokenKind::Or,
        "ΟΧΙ" => TokenKind::Not,

        "ΑΛΗΘΗΣ" => TokenKind::BoolLit(true),
        "ΨΕΥΔΗΣ" => TokenKind::BoolLit(false),

        _ => return None,
    })
}
