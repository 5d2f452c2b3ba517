//  Testing library for the Semparse semantic parser.
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
extern crate lazy_static;
#[macro_use]
extern crate maplit;
extern crate proptest;
extern crate semparse;

use proptest::{collection::vec, prelude::*};
use semparse::{list, Example, Rule, Value, Weights};
use std::collections::HashMap;

// Every derivation must cover exactly the tokens of the input, in order.
#[macro_export]
macro_rules! prop_assert_sound {
    ($derivations:expr, $input:expr) => {
        let tokens: Vec<&str> = $input.split_whitespace().collect();
        for derivation in $derivations.iter() {
            prop_assert_eq!(derivation.leaves(), tokens.clone());
        }
    };
}

// The meanings of parsed or ranked results, in order.
#[macro_export]
macro_rules! meanings {
    ($results:expr) => {
        $results.iter().map(|result| result.meaning().clone()).collect::<Vec<semparse::Value>>()
    };
}

lazy_static! {
    pub static ref NUMERALS: HashMap<&'static str, i64> = hashmap! {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
    };
    pub static ref OPERATORS: HashMap<&'static str, &'static str> = hashmap! {
        "plus" => "+",
        "minus" => "-",
        "times" => "*",
    };
}

pub fn numeral_rules() -> Vec<Rule> {
    vec![
        Rule::lexical("$E", "one", 1),
        Rule::lexical("$E", "two", 2),
        Rule::lexical("$E", "three", 3),
        Rule::lexical("$E", "four", 4),
    ]
}

pub fn operator_rules() -> Vec<Rule> {
    vec![
        Rule::lexical("$UnOp", "minus", "-"),
        Rule::lexical("$BinOp", "plus", "+"),
        Rule::lexical("$BinOp", "minus", "-"),
        Rule::lexical("$BinOp", "times", "*"),
    ]
}

/// `$E -> $UnOp $E`, `$EBO -> $E $BinOp` and `$E -> $EBO $E`.
pub fn compositional_rules() -> Vec<Rule> {
    vec![
        Rule::binary("$E", "$UnOp $E", |sems| list![sems[0].clone(), sems[1].clone()]),
        Rule::binary("$EBO", "$E $BinOp", |sems| list![sems[1].clone(), sems[0].clone()]),
        Rule::binary("$E", "$EBO $E", |sems| {
            list![
                sems[0].nth(0).cloned().unwrap_or(Value::Nil),
                sems[0].nth(1).cloned().unwrap_or(Value::Nil),
                sems[1].clone()
            ]
        }),
    ]
}

pub fn arithmetic_rules() -> Vec<Rule> {
    let mut rules = numeral_rules();
    rules.extend(operator_rules());
    rules.extend(compositional_rules());
    rules
}

/// Operator precedence by hand: multiplication and unary minus bind tighter than
/// addition and subtraction.
pub fn precedence_weights() -> Weights {
    btreemap! {
        "*,+".to_string() => 1.0,
        "*,-".to_string() => 1.0,
        "~,+".to_string() => 1.0,
        "~,-".to_string() => 1.0,
        "+,*".to_string() => -1.0,
        "-,*".to_string() => -1.0,
        "+,~".to_string() => -1.0,
        "-,~".to_string() => -1.0,
    }
}

fn example(input: &str, meaning: Value, output: i64) -> Example {
    Example::new(input).with_meaning(meaning).with_output(output)
}

pub fn arithmetic_examples() -> Vec<Example> {
    vec![
        example("one plus one", list!["+", 1, 1], 2),
        example("one plus two", list!["+", 1, 2], 3),
        example("one plus three", list!["+", 1, 3], 4),
        example("two plus two", list!["+", 2, 2], 4),
        example("two plus three", list!["+", 2, 3], 5),
        example("three plus one", list!["+", 3, 1], 4),
        example("three plus minus two", list!["+", 3, list!["-", 2]], 1),
        example("two plus two", list!["+", 2, 2], 4),
        example("three minus two", list!["-", 3, 2], 1),
        example("minus three minus two", list!["-", list!["-", 3], 2], -5),
        example("two times two", list!["*", 2, 2], 4),
        example("two times three", list!["*", 2, 3], 6),
        example("three plus three minus two", list!["-", list!["+", 3, 3], 2], 4),
        example("minus three", list!["-", 3], -3),
        example("three plus two", list!["+", 3, 2], 5),
        example("two times two plus three", list!["+", list!["*", 2, 2], 3], 7),
        example("minus four", list!["-", 4], -4),
    ]
}

/// The arithmetic examples in Swahili, for learning a lexicon nobody wrote down.
pub fn swahili_examples() -> Vec<Example> {
    vec![
        example("moja ongeza moja", list!["+", 1, 1], 2),
        example("moja ongeza mbili", list!["+", 1, 2], 3),
        example("moja ongeza tatu", list!["+", 1, 3], 4),
        example("mbili ongeza mbili", list!["+", 2, 2], 4),
        example("mbili ongeza tatu", list!["+", 2, 3], 5),
        example("tatu ongeza moja", list!["+", 3, 1], 4),
        example("tatu ongeza hasi mbili", list!["+", 3, list!["-", 2]], 1),
        example("tatu toa mbili", list!["-", 3, 2], 1),
        example("hasi tatu toa mbili", list!["-", list!["-", 3], 2], -5),
        example("mbili mara mbili", list!["*", 2, 2], 4),
        example("mbili mara tatu", list!["*", 2, 3], 6),
        example("tatu ongeza tatu toa mbili", list!["-", list!["+", 3, 3], 2], 4),
        example("hasi tatu", list!["-", 3], -3),
        example("tatu ongeza mbili", list!["+", 3, 2], 5),
        example("mbili mara mbili ongeza tatu", list!["+", list!["*", 2, 2], 3], 7),
        example("hasi nne", list!["-", 4], -4),
    ]
}

/// Words of the arithmetic grammar that aren't operators.
pub fn numeral() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["one", "two", "three", "four"]).prop_map(String::from)
}

/// A numeral preceded by up to two unary minuses.
pub fn operand() -> impl Strategy<Value = String> {
    (0..3usize, numeral()).prop_map(|(minuses, numeral)| {
        let mut words = vec!["minus"; minuses];
        words.push(&numeral);
        words.join(" ")
    })
}

/// Sentences the arithmetic grammar covers, with between one and `max_operands` operands.
pub fn arithmetic_sentence(max_operands: usize) -> impl Strategy<Value = String> {
    (
        operand(),
        vec(
            (prop::sample::select(vec!["plus", "minus", "times"]), operand()),
            0..max_operands,
        ),
    )
        .prop_map(|(first, rest)| {
            let mut sentence = first;
            for (operator, operand) in rest {
                sentence.push(' ');
                sentence.push_str(operator);
                sentence.push(' ');
                sentence.push_str(&operand);
            }
            sentence
        })
}

/// Sequences of grammar words in any order, most of which the grammar doesn't cover.
pub fn word_salad() -> impl Strategy<Value = String> {
    vec(prop::sample::select(vec!["one", "two", "minus", "plus", "times"]), 1..6)
        .prop_map(|words| words.join(" "))
}
