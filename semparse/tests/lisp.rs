//  Library for the Semparse semantic parser.
// Copyright (C) 2021 Charles Johnson
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate proptest;
extern crate semparse;

use semparse::{lisp::read, list, sem_eq, Evaluator, Execute, SemparseError, Value};

proptest! {
    // Printing an integer expression and reading it back gives the same expression.
    #[test]
    fn printed_expressions_read_back(a in -1000i64..1000, b in -1000i64..1000) {
        let expression = list!["+", a, list!["*", b, "x"]];
        prop_assert_eq!(read(&expression.to_string()).unwrap(), expression);
    }
    // Integer arithmetic agrees with Rust's.
    #[test]
    fn integer_arithmetic(a in -1000i64..1000, b in -1000i64..1000) {
        let evaluator = Evaluator::new();
        prop_assert_eq!(evaluator.evaluate(&list!["+", a, b]).unwrap(), Value::from(a + b));
        prop_assert_eq!(evaluator.evaluate(&list!["-", a, b]).unwrap(), Value::from(a - b));
        prop_assert_eq!(evaluator.evaluate(&list!["*", a, b]).unwrap(), Value::from(a * b));
    }
}

#[test]
fn nested_arithmetic_is_forty_two() {
    assert_eq!(
        Evaluator::new().run("(+ 1 (+ (* (* 4 5) 2) (- 5 4)))").unwrap(),
        Value::from(42)
    );
}

#[test]
fn constants_and_trigonometry() {
    assert_eq!(Evaluator::new().run("(sin (/ PI 2))").unwrap(), Value::from(1.0));
}

#[test]
fn unbound_symbols_fail() {
    assert_matches!(
        Evaluator::new().run("(+ 1 undefined)"),
        Err(SemparseError::UnboundSymbol { ref symbol }) if symbol == "undefined"
    );
}

#[test]
fn programs_define_and_call_procedures() {
    let evaluator = Evaluator::new();
    evaluator.run("(define square (lambda (x) (* x x)))").unwrap();
    evaluator
        .run("(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))")
        .unwrap();
    assert_eq!(evaluator.run("(square 12)").unwrap(), Value::from(144));
    assert_eq!(evaluator.run("(fact 5)").unwrap(), Value::from(120));
    assert_eq!(
        evaluator.run("(map square (list 1 2 3))").unwrap(),
        list![1, 4, 9]
    );
}

#[test]
fn counters_share_their_closure() {
    let evaluator = Evaluator::new();
    evaluator
        .run(concat!(
            "(define make-counter (lambda () ",
            "(begin (define n 0) (lambda () (begin (set! n (+ n 1)) n)))))"
        ))
        .unwrap();
    evaluator.run("(define tick (make-counter))").unwrap();
    evaluator.run("(tick)").unwrap();
    assert_eq!(evaluator.run("(tick)").unwrap(), Value::from(2));
}

#[test]
fn quoted_expressions_are_not_evaluated() {
    assert_eq!(
        Evaluator::new().run("(quote (+ 1 2))").unwrap(),
        list!["+", 1, 2]
    );
    assert_eq!(Evaluator::new().run("(car (quote (+ 1 2)))").unwrap(), Value::from("+"));
}

#[test]
fn operators_execute_to_procedures() {
    let evaluator = Evaluator::new();
    assert!(evaluator.execute(&Value::from("+")).unwrap().is_procedure());
    assert!(!evaluator.execute(&Value::from(3)).unwrap().is_procedure());
}

#[test]
fn meaning_equality() {
    assert!(sem_eq(&list!["+", 1, 2], &list!["+", 1, 2]));
    assert!(!sem_eq(&list!["+", 1, 2], &list!["+", 2, 1]));
    assert!(!sem_eq(&Value::from(1), &Value::from("1")));
    assert!(!sem_eq(&list!["+", 1], &list!["+", 1, 2]));
    assert!(!sem_eq(&list![1], &Value::from(1)));
}

#[test]
fn reader_errors() {
    assert_matches!(read("(+ 1"), Err(SemparseError::MissingSymbol { symbol: ")" }));
    assert_matches!(read(")"), Err(SemparseError::MissingSymbol { symbol: "(" }));
    assert_matches!(read(""), Err(SemparseError::UnexpectedEof));
    assert_matches!(read("1 2"), Err(SemparseError::TrailingInput { .. }));
}
