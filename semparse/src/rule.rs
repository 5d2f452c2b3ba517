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

use crate::{
    constants::{CATEGORY_SIGIL, OPERATOR_SUFFIX},
    errors::{SemparseError, SemparseResult},
    value::Value,
};
use std::{fmt, rc::Rc};

pub type CombinatorFn = dyn Fn(&[Value]) -> Value;

/// How a rule computes the meaning of what it derives.
#[derive(Clone)]
pub enum Semantics {
    /// The same meaning whatever the children.
    Literal(Value),
    /// Builds a meaning from the meanings of the children, in order.
    Combinator(Rc<CombinatorFn>),
}

impl Semantics {
    pub fn combinator(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Semantics::Combinator(Rc::new(f))
    }

    pub fn meaning(&self, children: &[Value]) -> Value {
        match self {
            Semantics::Literal(value) => value.clone(),
            Semantics::Combinator(f) => f(children),
        }
    }

    pub fn literal(&self) -> Option<&Value> {
        match self {
            Semantics::Literal(value) => Some(value),
            Semantics::Combinator(_) => None,
        }
    }
}

impl From<Value> for Semantics {
    fn from(value: Value) -> Self {
        Semantics::Literal(value)
    }
}

impl fmt::Debug for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantics::Literal(value) => write!(f, "Literal({})", value),
            Semantics::Combinator(_) => f.write_str("Combinator"),
        }
    }
}

impl fmt::Display for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantics::Literal(value) => write!(f, "{}", value),
            Semantics::Combinator(_) => f.write_str("λ"),
        }
    }
}

/// The two shapes a rule is allowed to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleShape {
    /// Every symbol on the right hand side is a terminal.
    Lexical,
    /// Exactly two categories on the right hand side.
    Binary,
}

/// Labels with the category sigil are categories, everything else is a terminal.
pub fn is_category(label: &str) -> bool {
    label.starts_with(CATEGORY_SIGIL)
}

pub fn is_operator_category(category: &str) -> bool {
    category.ends_with(OPERATOR_SUFFIX)
}

/// A rewrite of a category into a sequence of terminals or categories, with the
/// semantics of the rewrite.
#[derive(Clone, Debug)]
pub struct Rule {
    lhs: String,
    rhs: Vec<String>,
    semantics: Semantics,
}

impl Rule {
    /// The right hand side is split on whitespace.
    pub fn new(lhs: impl Into<String>, rhs: &str, semantics: Semantics) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.split_whitespace().map(String::from).collect(),
            semantics,
        }
    }

    pub fn lexical(lhs: impl Into<String>, rhs: &str, meaning: impl Into<Value>) -> Self {
        Self::new(lhs, rhs, Semantics::Literal(meaning.into()))
    }

    pub fn binary(
        lhs: impl Into<String>,
        rhs: &str,
        combinator: impl Fn(&[Value]) -> Value + 'static,
    ) -> Self {
        Self::new(lhs, rhs, Semantics::combinator(combinator))
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn rhs(&self) -> &[String] {
        &self.rhs
    }

    pub fn semantics(&self) -> &Semantics {
        &self.semantics
    }

    /// The same left and right hand sides with a different meaning.
    pub fn with_semantics(&self, semantics: Semantics) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            semantics,
        }
    }

    /// Whether the right hand side is a non-empty sequence of terminals.
    pub fn is_lexical(&self) -> bool {
        !self.rhs.is_empty() && self.rhs.iter().all(|label| !is_category(label))
    }

    pub fn is_binary(&self) -> bool {
        self.rhs.len() == 2 && self.rhs.iter().all(|label| is_category(label))
    }

    pub fn classify(&self) -> SemparseResult<RuleShape> {
        if !is_category(&self.lhs) {
            Err(SemparseError::InvalidRule {
                rule: self.to_string(),
            })
        } else if self.is_lexical() {
            match self.semantics {
                Semantics::Literal(_) => Ok(RuleShape::Lexical),
                Semantics::Combinator(_) => Err(SemparseError::CombinatorOnLexicalRule {
                    rule: self.to_string(),
                }),
            }
        } else if self.is_binary() {
            Ok(RuleShape::Binary)
        } else {
            Err(SemparseError::InvalidRule {
                rule: self.to_string(),
            })
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({}, {}, {})", self.lhs, self.rhs.join(" "), self.semantics)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rule, RuleShape, Semantics};
    use crate::{errors::SemparseError, list, value::Value};

    #[test]
    fn all_terminals_is_lexical() {
        assert_eq!(Rule::lexical("$E", "one", 1).classify(), Ok(RuleShape::Lexical));
        assert_eq!(
            Rule::lexical("$E", "twenty one", 21).classify(),
            Ok(RuleShape::Lexical)
        );
    }

    #[test]
    fn two_categories_is_binary() {
        let rule = Rule::binary("$E", "$UnOp $E", |sems| list![sems[0].clone(), sems[1].clone()]);
        assert_eq!(rule.classify(), Ok(RuleShape::Binary));
    }

    #[test]
    fn mixed_right_hand_side_is_invalid() {
        let rule = Rule::binary("$E", "$E plus", |_| Value::Nil);
        assert_eq!(
            rule.classify(),
            Err(SemparseError::InvalidRule {
                rule: "Rule($E, $E plus, λ)".to_string()
            })
        );
    }

    #[test]
    fn three_categories_is_invalid() {
        let rule = Rule::binary("$E", "$E $BinOp $E", |_| Value::Nil);
        assert!(matches!(rule.classify(), Err(SemparseError::InvalidRule { .. })));
    }

    #[test]
    fn unary_rules_are_invalid() {
        let rule = Rule::binary("$E", "$Num", |sems| sems[0].clone());
        assert!(matches!(rule.classify(), Err(SemparseError::InvalidRule { .. })));
    }

    #[test]
    fn empty_right_hand_side_is_invalid() {
        assert!(matches!(
            Rule::lexical("$E", "  ", 1).classify(),
            Err(SemparseError::InvalidRule { .. })
        ));
    }

    #[test]
    fn left_hand_side_must_be_a_category() {
        assert!(matches!(
            Rule::lexical("E", "one", 1).classify(),
            Err(SemparseError::InvalidRule { .. })
        ));
    }

    #[test]
    fn lexical_rules_need_literal_meanings() {
        let rule = Rule::new("$E", "one", Semantics::combinator(|_| Value::from(1)));
        assert!(matches!(
            rule.classify(),
            Err(SemparseError::CombinatorOnLexicalRule { .. })
        ));
    }

    #[test]
    fn display_shows_literal_meanings() {
        assert_eq!(Rule::lexical("$BinOp", "plus", "+").to_string(), "Rule($BinOp, plus, +)");
    }
}
