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

//! Builders that generate lexical rules instead of writing them by hand.

use crate::{
    errors::SemparseResult,
    example::Example,
    execute::Execute,
    rule::{is_operator_category, Rule, Semantics},
    value::Value,
};
use log::debug;
use std::rc::Rc;

fn same_semantics(left: &Semantics, right: &Semantics) -> bool {
    match (left, right) {
        (Semantics::Literal(left), Semantics::Literal(right)) => left == right,
        (Semantics::Combinator(left), Semantics::Combinator(right)) => Rc::ptr_eq(left, right),
        _ => false,
    }
}

/// Pairs every lexical rule with every meaning attested for its category, so that a phrase
/// can be tried against all of them. Non-lexical rules come first, unchanged, followed by
/// the expanded lexical rules grouped by category in order of first appearance.
pub fn expand_ambiguous_lexicon(rules: &[Rule]) -> Vec<Rule> {
    let mut expanded: Vec<Rule> = rules.iter().filter(|rule| !rule.is_lexical()).cloned().collect();
    let mut groups: Vec<(&str, Vec<&Rule>)> = Vec::new();
    for rule in rules.iter().filter(|rule| rule.is_lexical()) {
        match groups.iter_mut().find(|(lhs, _)| *lhs == rule.lhs()) {
            Some((_, group)) => group.push(rule),
            None => groups.push((rule.lhs(), vec![rule])),
        }
    }
    for (_, group) in groups {
        let mut meanings: Vec<&Semantics> = Vec::new();
        for rule in &group {
            if !meanings.iter().any(|meaning| same_semantics(meaning, rule.semantics())) {
                meanings.push(rule.semantics());
            }
        }
        for rule in group {
            for meaning in &meanings {
                expanded.push(rule.with_semantics((*meaning).clone()));
            }
        }
    }
    debug!("Expanded {} rule(s) into {}", rules.len(), expanded.len());
    expanded
}

/// Every lexical rule `category -> token` with a literal meaning, pairing meanings that
/// execute to a procedure only with operator categories and all other meanings only with the
/// remaining categories. Operator rules come first. Execution failures are returned.
pub fn synthesize_lexicon<E: Execute + ?Sized>(
    tokens: &[String],
    meanings: &[Value],
    categories: &[String],
    executor: &E,
) -> SemparseResult<Vec<Rule>> {
    let (operator_categories, value_categories): (Vec<&String>, Vec<&String>) =
        categories.iter().partition(|category| is_operator_category(category));
    let mut operator_meanings = Vec::new();
    let mut value_meanings = Vec::new();
    for meaning in meanings {
        if executor.execute(meaning)?.is_procedure() {
            operator_meanings.push(meaning);
        } else {
            value_meanings.push(meaning);
        }
    }
    let mut rules = Vec::with_capacity(
        tokens.len()
            * (operator_meanings.len() * operator_categories.len()
                + value_meanings.len() * value_categories.len()),
    );
    for (kind_meanings, kind_categories) in &[
        (&operator_meanings, &operator_categories),
        (&value_meanings, &value_categories),
    ] {
        for token in tokens {
            for meaning in kind_meanings.iter() {
                for category in kind_categories.iter() {
                    rules.push(Rule::lexical(category.as_str(), token, (*meaning).clone()));
                }
            }
        }
    }
    debug!("Synthesized {} lexical rule(s) from {} token(s)", rules.len(), tokens.len());
    Ok(rules)
}

/// Distinct tokens of the example inputs in order of first appearance.
pub fn gather_tokens(examples: &[Example]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in examples.iter().flat_map(Example::tokens) {
        if !tokens.iter().any(|seen| seen == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::{expand_ambiguous_lexicon, gather_tokens, synthesize_lexicon};
    use crate::{
        errors::SemparseError, example::Example, lisp::Evaluator, list, rule::Rule, value::Value,
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn expansion_crosses_rules_with_attested_meanings() {
        let rules = vec![
            Rule::lexical("$E", "one", 1),
            Rule::lexical("$E", "two", 2),
            Rule::lexical("$BinOp", "plus", "+"),
            Rule::binary("$E", "$EBO $E", |sems| list![sems[0].clone(), sems[1].clone()]),
            Rule::lexical("$E", "uno", 1),
        ];
        let expanded = expand_ambiguous_lexicon(&rules);
        let shown: Vec<String> = expanded.iter().map(Rule::to_string).collect();
        assert_eq!(
            shown,
            vec![
                "Rule($E, $EBO $E, λ)",
                "Rule($E, one, 1)",
                "Rule($E, one, 2)",
                "Rule($E, two, 1)",
                "Rule($E, two, 2)",
                "Rule($E, uno, 1)",
                "Rule($E, uno, 2)",
                "Rule($BinOp, plus, +)",
            ]
        );
    }

    #[test]
    fn synthesis_never_mixes_kinds() {
        let tokens = strings(&["one", "plus", "times"]);
        let meanings: Vec<Value> =
            vec![1.into(), 2.into(), 3.into(), "+".into(), "*".into()];
        let categories = strings(&["$E", "$BinOp", "$UnOp"]);
        let rules = synthesize_lexicon(&tokens, &meanings, &categories, &Evaluator::new()).unwrap();
        assert_eq!(rules.len(), 3 * 2 * 2 + 3 * 3 * 1);
        for rule in &rules[..12] {
            assert!(rule.lhs().ends_with("Op"));
            assert!(rule.semantics().literal().map_or(false, Value::is_symbol));
        }
        for rule in &rules[12..] {
            assert_eq!(rule.lhs(), "$E");
            assert!(rule.semantics().literal().map_or(false, Value::is_number));
        }
        assert!(rules.iter().all(Rule::is_lexical));
    }

    #[test]
    fn synthesis_with_no_operator_categories_drops_operator_meanings() {
        let rules = synthesize_lexicon(
            &strings(&["one"]),
            &[Value::from(1), Value::from("-")],
            &strings(&["$E"]),
            &Evaluator::new(),
        )
        .unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].to_string(), "Rule($E, one, 1)");
    }

    #[test]
    fn synthesis_propagates_evaluation_failures() {
        let result = synthesize_lexicon(
            &strings(&["one"]),
            &[Value::from("nonsense")],
            &strings(&["$E"]),
            &Evaluator::new(),
        );
        assert!(matches!(result, Err(SemparseError::UnboundSymbol { .. })));
    }

    #[test]
    fn tokens_are_distinct_and_ordered() {
        let examples = vec![
            Example::new("one plus one"),
            Example::new("minus two"),
            Example::new("two plus three"),
        ];
        assert_eq!(gather_tokens(&examples), strings(&["one", "plus", "minus", "two", "three"]));
    }
}
