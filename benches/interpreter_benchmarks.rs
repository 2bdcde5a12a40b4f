//! End-to-end interpreter benchmarks.
//!
//! Measures scanning, parsing, and full execution across a handful of
//! representative Glossa programs:
//!
//! - **Scanning**: raw token throughput on a loop-heavy program
//! - **Parsing**: a program exercising every statement form
//! - **Execution**: a recursive routine call and a tight `FOR` loop
//!
//! ```bash
//! cargo bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glossa::{compile_and_run, lex, parse};

const LOOP_PROGRAM: &str = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: i, άθροισμα
ΑΡΧΗ
άθροισμα <- 0
ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 1000
άθροισμα <- άθροισμα + i
ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
ΓΡΑΨΕ άθροισμα
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";

const FULL_GRAMMAR_PROGRAM: &str = "\
ΠΡΟΓΡΑΜΜΑ Π
ΜΕΤΑΒΛΗΤΕΣ
ΑΚΕΡΑΙΕΣ: α, β, i
ΠΙΝΑΚΕΣ
ΑΚΕΡΑΙΕΣ: M[2,2]
ΑΡΧΗ
α <- 5
β <- 3
ΑΝ α > β ΤΟΤΕ
ΓΡΑΨΕ \"μεγαλύτερο\"
ΑΛΛΙΩΣ
ΓΡΑΨΕ \"όχι\"
ΤΕΛΟΣ_ΑΝ
ΕΠΙΛΕΞΕ α
ΠΕΡΙΠΤΩΣΗ 5
ΓΡΑΨΕ \"πέντε\"
ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ
ΓΡΑΨΕ \"άλλο\"
ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ
ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 2
M[i,1] <- i
ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
ΚΑΛΕΣΕ Τύπωσε(M[1,1])
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
ΔΙΑΔΙΚΑΣΙΑ Τύπωσε(x: ΑΚΕΡΑΙΕΣ)
ΑΡΧΗ
ΓΡΑΨΕ x
ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ";

const FACTORIAL_PROGRAM: &str = "\
ΠΡΟΓΡΑΜΜΑ Π
ΑΡΧΗ
ΓΡΑΨΕ F(12)
ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
ΣΥΝΑΡΤΗΣΗ F(n: ΑΚΕΡΑΙΕΣ): ΑΚΕΡΑΙΕΣ
ΑΡΧΗ
ΑΝ n <= 1 ΤΟΤΕ
ΕΠΙΣΤΡΕΨΕ 1
ΤΕΛΟΣ_ΑΝ
ΕΠΙΣΤΡΕΨΕ n * F(n - 1)
ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ";

fn bench_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");
    group.bench_function("loop_program", |b| {
        b.iter(|| lex(black_box(LOOP_PROGRAM)).unwrap());
    });
    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let tokens = lex(FULL_GRAMMAR_PROGRAM).unwrap();
    group.bench_function("full_grammar_program", |b| {
        b.iter(|| parse(black_box(tokens.clone())).unwrap());
    });
    group.finish();
}

fn bench_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution");
    group.bench_function("sum_loop_1000", |b| {
        b.iter(|| compile_and_run(black_box(LOOP_PROGRAM), Vec::new()).unwrap());
    });
    group.bench_function("recursive_factorial_12", |b| {
        b.iter(|| compile_and_run(black_box(FACTORIAL_PROGRAM), Vec::new()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_scanning, bench_parsing, bench_execution);
criterion_main!(benches);
