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
    chart::Chart,
    constants::START_CATEGORY,
    derivation::Derivation,
    errors::SemparseResult,
    rule::{Rule, RuleShape},
};
use log::debug;
use std::{collections::HashMap, rc::Rc};

type CategoryPair = (String, String);

/// Rules indexed for CYK parsing.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Lexical rules keyed by the phrase they match, tokens joined by single spaces.
    lexical_rules: HashMap<String, Vec<Rc<Rule>>>,
    /// Number of tokens in the longest lexical phrase.
    longest_phrase: usize,
    binary_rules: HashMap<CategoryPair, Vec<Rc<Rule>>>,
    /// Keys of `binary_rules` in the order they were first added.
    binary_order: Vec<CategoryPair>,
    start_category: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            lexical_rules: HashMap::new(),
            longest_phrase: 0,
            binary_rules: HashMap::new(),
            binary_order: Vec::new(),
            start_category: START_CATEGORY.to_string(),
        }
    }
}

impl Grammar {
    /// Fails on the first rule that is neither lexical nor binary.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> SemparseResult<Self> {
        let mut grammar = Self::default();
        for rule in rules {
            grammar.add_rule(rule)?;
        }
        debug!(
            "Grammar with {} lexical and {} binary rule(s)",
            grammar.lexical_rules.values().map(Vec::len).sum::<usize>(),
            grammar.binary_rules.values().map(Vec::len).sum::<usize>()
        );
        Ok(grammar)
    }

    pub fn with_start_category(mut self, category: impl Into<String>) -> Self {
        self.start_category = category.into();
        self
    }

    pub fn start_category(&self) -> &str {
        &self.start_category
    }

    pub fn add_rule(&mut self, rule: Rule) -> SemparseResult<()> {
        match rule.classify()? {
            RuleShape::Lexical => {
                self.longest_phrase = self.longest_phrase.max(rule.rhs().len());
                self.lexical_rules.entry(rule.rhs().join(" ")).or_default().push(Rc::new(rule));
            },
            RuleShape::Binary => {
                let key = (rule.rhs()[0].clone(), rule.rhs()[1].clone());
                if !self.binary_rules.contains_key(&key) {
                    self.binary_order.push(key.clone());
                }
                self.binary_rules.entry(key).or_default().push(Rc::new(rule));
            },
        }
        Ok(())
    }

    pub fn lexical_rules(&self, phrase: &str) -> &[Rc<Rule>] {
        self.lexical_rules.get(phrase).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn binary_rules(&self, left: &str, right: &str) -> &[Rc<Rule>] {
        self.binary_rules
            .get(&(left.to_string(), right.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rule_count(&self) -> usize {
        self.lexical_rules.values().chain(self.binary_rules.values()).map(Vec::len).sum()
    }

    /// Every derivation of the start category spanning the whole input.
    /// An empty result means the input has no parse.
    pub fn parse(&self, input: &str) -> Vec<Rc<Derivation>> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let token_count = tokens.len();
        if token_count == 0 {
            return Vec::new();
        }
        let mut chart = Chart::new(token_count);
        self.apply_lexical_rules(&tokens, &mut chart);
        self.apply_binary_rules(&mut chart);
        let derivations = chart.take(token_count, 0, &self.start_category);
        debug!("parse({}) found {} derivation(s)", input, derivations.len());
        derivations
    }

    fn apply_lexical_rules(&self, tokens: &[&str], chart: &mut Chart) {
        for length in 1..=self.longest_phrase.min(tokens.len()) {
            for start in 0..=(tokens.len() - length) {
                let phrase = &tokens[start..start + length];
                for rule in self.lexical_rules(&phrase.join(" ")) {
                    let terminals = phrase.iter().map(|token| token.to_string()).collect();
                    chart.insert(length, start, Derivation::terminal(rule.clone(), terminals));
                }
            }
        }
    }

    fn apply_binary_rules(&self, chart: &mut Chart) {
        let token_count = chart.token_count();
        for length in 2..=token_count {
            for start in 0..=(token_count - length) {
                let mut found = Vec::new();
                for split in 1..length {
                    for (left_category, right_category) in &self.binary_order {
                        let lefts = chart.derivations(split, start, left_category);
                        let rights =
                            chart.derivations(length - split, start + split, right_category);
                        if lefts.is_empty() || rights.is_empty() {
                            continue;
                        }
                        let key = (left_category.clone(), right_category.clone());
                        for rule in &self.binary_rules[&key] {
                            for left in lefts {
                                for right in rights {
                                    found.push(Derivation::pair(
                                        rule.clone(),
                                        left.clone(),
                                        right.clone(),
                                    ));
                                }
                            }
                        }
                    }
                }
                for derivation in found {
                    chart.insert(length, start, derivation);
                }
            }
        }
    }
}
