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

use thiserror::Error;

pub type SemparseResult<T> = Result<T, SemparseError>;

/// All the expected ways a grammar, a meaning or a learning run could be invalid.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum SemparseError {
    /// When a rule is neither lexical nor binary.
    #[error("Cannot accept rule {rule}: the right hand side must be all terminals or exactly two categories")]
    InvalidRule {
        rule: String,
    },
    /// When a lexical rule is given a combinator instead of a literal meaning.
    #[error("Lexical rule {rule} must carry a literal meaning")]
    CombinatorOnLexicalRule {
        rule: String,
    },
    /// When a lisp program ends before an expression is complete.
    #[error("Unexpected end of input")]
    UnexpectedEof,
    /// When a required symbol is missing from a lisp program.
    #[error("Missing {}", symbol)]
    MissingSymbol {
        symbol: &'static str,
    },
    /// When a lisp program has tokens after its first complete expression.
    #[error("Unexpected input after expression: `{remaining}`")]
    TrailingInput {
        remaining: String,
    },
    #[error("{symbol} not found in your Environment")]
    UnboundSymbol {
        symbol: String,
    },
    #[error("`{value}` is not a procedure")]
    NotAProcedure {
        value: String,
    },
    #[error("{procedure} expects {expected} argument(s) but was given {given}")]
    WrongArgumentCount {
        procedure: String,
        expected: &'static str,
        given: usize,
    },
    #[error("{procedure} expects {expected} but was given `{given}`")]
    WrongArgumentType {
        procedure: String,
        expected: &'static str,
        given: String,
    },
    /// When a special form such as `if` or `lambda` has the wrong shape.
    #[error("Malformed `{form}` expression: {expression}")]
    MalformedSpecialForm {
        form: &'static str,
        expression: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    /// When learning against outputs with a model that cannot compute outputs.
    #[error("Learning against outputs requires the model to have an executor")]
    MissingExecutor,
    #[error("Unknown metric `{metric}`, expected `meaning` or `output`")]
    UnknownMetric {
        metric: String,
    },
}
