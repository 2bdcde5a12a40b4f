//! Integration tests for parsing complete programs: routines, globals,
//! and the declarations-after-`END_PROGRAM` tail.

use glossa::ast::expression::{BinOp, Expr, NumberValue};
use glossa::ast::stmt::Stmt;
use glossa::ast::Program;
use glossa::diag::GlossaError;
use glossa::lex;
use glossa::parse;
use pretty_assertions::assert_eq;

fn parse_source(src: &str) -> Result<Program, GlossaError> {
    parse(lex(src).unwrap())
}

#[test]
fn globals_and_a_procedure_definition_parse_together() {
    let src = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: α
ΑΡΧΗ
ΚΑΛΕΣΕ Διπλασίασε(α)
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
ΔΙΑΔΙΚΑΣΙΑ Διπλασίασε(x: ΑΚΕΡΑΙΕΣ)
ΑΡΧΗ
ΓΡΑΨΕ x * 2
ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ";
    let program = parse_source(src).unwrap();
    assert_eq!(program.globals.len(), 1);
    assert!(program.procedures.contains_key("Διπλασίασε"));
}

#[test]
fn routine_definitions_may_precede_or_follow_the_program_body() {
    let src = "\
ΠΡΟΓΡΑΜΜΑ Π
ΑΡΧΗ
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
ΣΥΝΑΡΤΗΣΗ Τ(n: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ
ΑΡΧΗ
ΕΠΙΣΤΡΕΨΕ n
ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ";
    let program = parse_source(src).unwrap();
    assert!(program.functions.contains_key("Τ"));
}

#[test]
fn statement_after_end_program_is_rejected() {
    let src = "ΠΡΟΓΡΑΜΜΑ Π\nΑΡΧΗ\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\nΓΡΑΨΕ 1";
    assert!(parse_source(src).is_err());
}

#[test]
fn missing_end_if_is_a_parse_error() {
    let src = "ΠΡΟΓΡΑΜΜΑ Π\nΑΡΧΗ\nΑΝ 1 = 1 ΤΟΤΕ\nΓΡΑΨΕ 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    assert!(parse_source(src).is_err());
}

#[test]
fn program_body_matches_the_expected_statement_tree() {
    let src = "\
ΠΡΟΓΡΑΜΜΑ Π
ΑΡΧΗ
ΓΡΑΨΕ 1 + 2
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let program = parse_source(src).unwrap();
    let expected = vec![Stmt::Write {
        values: vec![Expr::Binary {
            op: BinOp::Add,
            left: Box::new(Expr::NumberLit { value: NumberValue::Integer(1), line: 3 }),
            right: Box::new(Expr::NumberLit { value: NumberValue::Integer(2), line: 3 }),
            line: 3,
        }],
        line: 3,
    }];
    assert_eq!(program.body, expected);
}

#[test]
fn mixed_vars_and_arrays_sections_both_populate_globals() {
    let src = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: α
ΠΙΝΑΚΕΣ
ΠΡΑΓΜΑΤΙΚΕΣ: M[3]
ΑΡΧΗ
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let program = parse_source(src).unwrap();
    assert_eq!(program.globals.len(), 2);
    assert!(program.globals.iter().any(|d| d.is_array()));
}
