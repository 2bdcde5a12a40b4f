//! Full scan-parse-execute scenarios against `compile_and_run`.

use glossa::compile_and_run;

fn run(source: &str) -> Vec<String> {
    compile_and_run(source, Vec::new()).expect("program should run to completion")
}

#[test]
fn arithmetic_and_control_flow() {
    let source = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: α, β, i
ΑΡΧΗ
α <- 5
β <- 3
ΓΡΑΨΕ \"Άθροισμα:\", α + β
ΑΝ α > β ΤΟΤΕ
ΓΡΑΨΕ \"μεγαλύτερο\"
ΑΛΛΙΩΣ
ΓΡΑΨΕ \"όχι\"
ΤΕΛΟΣ_ΑΝ
ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 3
ΓΡΑΨΕ i
ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    assert_eq!(
        run(source),
        vec!["Άθροισμα: 8", "μεγαλύτερο", "1", "2", "3"]
    );
}

#[test]
fn repeat_until_counts_to_three() {
    let source = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: n
ΑΡΧΗ
n <- 0
ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ
n <- n + 1
ΓΡΑΨΕ n
ΜΕΧΡΙΣ_ΟΤΟΥ n = 3
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    assert_eq!(run(source), vec!["1", "2", "3"]);
}

#[test]
fn recursive_factorial() {
    let source = "\
ΠΡΟΓΡΑΜΜΑ Π
ΑΡΧΗ
ΓΡΑΨΕ F(5)
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
ΣΥΝΑΡΤΗΣΗ F(n: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ
ΑΡΧΗ
ΑΝ n <= 1 ΤΟΤΕ
ΕΠΙΣΤΡΕΨΕ 1
ΤΕΛΟΣ_ΑΝ
ΕΠΙΣΤΡΕΨΕ n * F(n - 1)
ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ";
    assert_eq!(run(source), vec!["120"]);
}

#[test]
fn two_dimensional_array_arithmetic_and_bounds() {
    let source = "\
ΠΡΟΓΡΑΜΜΑ Π
ΠΙΝΑΚΕΣ
ΑΚΕΡΑΙΕΣ: M[2,2]
ΑΡΧΗ
M[1,1] <- 1
M[1,2] <- 2
M[2,1] <- 3
M[2,2] <- 4
ΓΡΑΨΕ M[2,1] + M[1,2]
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    assert_eq!(run(source), vec!["5"]);

    let out_of_bounds = "\
ΠΡΟΓΡΑΜΜΑ Π
ΠΙΝΑΚΕΣ
ΑΚΕΡΑΙΕΣ: M[2,2]
ΑΡΧΗ
ΓΡΑΨΕ M[3,1]
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let err = compile_and_run(out_of_bounds, Vec::new()).unwrap_err();
    assert!(err.line().is_some());
}

#[test]
fn select_with_default_arm() {
    let template = |scrutinee: i64| {
        format!(
            "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: x
ΑΡΧΗ
x <- {scrutinee}
ΕΠΙΛΕΞΕ x
ΠΕΡΙΠΤΩΣΗ 1
ΓΡΑΨΕ \"one\"
ΠΕΡΙΠΤΩΣΗ 2,3
ΓΡΑΨΕ \"two-three\"
ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ
ΓΡΑΨΕ \"other\"
ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"
        )
    };
    assert_eq!(run(&template(2)), vec!["two-three"]);
    assert_eq!(run(&template(7)), vec!["other"]);
}

#[test]
fn divide_by_zero_halts_with_greek_zero_wording() {
    let source = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: x
ΑΡΧΗ
x <- 1 / 0
ΓΡΑΨΕ x
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let err = compile_and_run(source, Vec::new()).unwrap_err();
    assert!(err.to_string().contains("μηδέν"));
}
