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

//! # Semantic parsing with a chart parser and a structured perceptron
//! Sentences are parsed by a CYK chart parser over a grammar of lexical rules, which map
//! phrases to literal meanings, and binary rules, which combine the meanings of two adjacent
//! categories. Every derivation of an ambiguous sentence is kept. A `Model` scores derivations
//! with a linear function of their features and learns the weights of that function from
//! examples labelled with a gold meaning or a gold output.
//!
//! Meanings are symbolic expressions (`Value`s) that the bundled lisp `Evaluator` can execute.
//!
//! # Examples
//!
//! ```
//! use semparse::{
//!     list, Evaluator, Example, Grammar, LearningConfig, Metric, Model, PrecedenceFeatures,
//!     Rule, Value,
//! };
//!
//! let grammar = Grammar::new(vec![
//!     Rule::lexical("$E", "one", 1),
//!     Rule::lexical("$E", "two", 2),
//!     Rule::lexical("$E", "three", 3),
//!     Rule::lexical("$BinOp", "plus", "+"),
//!     Rule::lexical("$BinOp", "times", "*"),
//!     Rule::binary("$EBO", "$E $BinOp", |sems| list![sems[1].clone(), sems[0].clone()]),
//!     Rule::binary("$E", "$EBO $E", |sems| {
//!         list![
//!             sems[0].nth(0).cloned().unwrap_or(Value::Nil),
//!             sems[0].nth(1).cloned().unwrap_or(Value::Nil),
//!             sems[1].clone()
//!         ]
//!     }),
//! ])?;
//!
//! // Both bracketings are derivations of an ambiguous sentence
//! assert_eq!(grammar.parse("one plus two times three").len(), 2);
//!
//! // A sentence the grammar doesn't cover simply has no parse
//! assert!(grammar.parse("one two").is_empty());
//!
//! let mut model = Model::new(grammar)
//!     .with_features(PrecedenceFeatures)
//!     .with_executor(Evaluator::new());
//! let examples = vec![
//!     Example::new("two times three plus one").with_output(7),
//!     Example::new("one plus two times three").with_output(7),
//! ];
//! model.learn(&examples, LearningConfig::default().with_metric(Metric::Output))?;
//!
//! // Multiplication now binds tighter than addition
//! let best = &model.rank("three times two plus one")?[0];
//! assert_eq!(best.meaning, list!["+", list!["*", 3, 2], 1]);
//! assert_eq!(best.output, Some(Value::from(7)));
//! # Ok::<(), semparse::SemparseError>(())
//! ```

#[macro_use]
extern crate slog;
extern crate slog_term;

/// The chart of partial parses built for one input.
mod chart;

/// Category naming conventions and learning defaults.
mod constants;

/// Parse trees and their meanings.
mod derivation;

/// The errors that a grammar, a meaning or a learning run could cause.
mod errors;

/// Sentences labelled with gold meanings and outputs.
mod example;

/// The capability that turns meanings into outputs.
mod execute;

/// Evaluating a model against labelled examples.
mod evaluation;

/// Feature functions and linear scoring.
pub mod features;

/// Indexed rules and the CYK parser.
mod grammar;

/// The loss-augmented structured perceptron.
mod learning;

/// Generating lexical rules from tokens and candidate meanings.
pub mod lexicon;

/// An interpreter for prefix expressions.
pub mod lisp;

// Structured logging.
pub mod logging;

/// Scoring and ranking parses.
mod model;

/// Grammar rules and their semantics.
mod rule;

/// Symbolic expressions.
mod value;

pub use chart::{Cell, Chart};
pub use derivation::{Children, Derivation};
pub use errors::{SemparseError, SemparseResult};
pub use evaluation::{Evaluation, ExampleEvaluation};
pub use example::Example;
pub use execute::Execute;
pub use features::{
    CombinedFeatures, FeatureFunction, Features, NoFeatures, PrecedenceFeatures, RuleFeatures,
    Weights,
};
pub use grammar::Grammar;
pub use learning::{
    loss_augmented_decode, Decoding, EpochReport, Learner, LearningConfig, Metric,
    VocabularyPolicy,
};
pub use lexicon::{expand_ambiguous_lexicon, gather_tokens, synthesize_lexicon};
pub use lisp::Evaluator;
pub use logging::Logger;
pub use model::{Model, Parse};
pub use rule::{is_category, is_operator_category, Rule, RuleShape, Semantics};
pub use value::{sem_eq, Value};
