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

use crate::{constants::UNARY_MINUS, derivation::Derivation, value::Value};
use std::collections::BTreeMap;

/// Named, non-negative feature counts of one derivation, ordered by name.
pub type Features = BTreeMap<String, f64>;

/// Feature weights. An absent feature weighs 0.
pub type Weights = BTreeMap<String, f64>;

/// Maps a derivation to the features a `Model` scores it by.
pub trait FeatureFunction {
    fn features(&self, derivation: &Derivation) -> Features;
}

impl<F> FeatureFunction for F
where
    F: Fn(&Derivation) -> Features,
{
    fn features(&self, derivation: &Derivation) -> Features {
        self(derivation)
    }
}

/// Sum of `weights[f] * count` over every feature `f` with a count, added up in name order.
pub fn dot(features: &Features, weights: &Weights) -> f64 {
    features
        .iter()
        .map(|(name, count)| weights.get(name).copied().unwrap_or(0.0) * count)
        .sum()
}

fn add_count(features: &mut Features, name: String, count: f64) {
    *features.entry(name).or_insert(0.0) += count;
}

/// Scores every derivation 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeatures;

impl FeatureFunction for NoFeatures {
    fn features(&self, _: &Derivation) -> Features {
        Features::new()
    }
}

/// Counts operator nestings in the meaning. Every list argument whose head differs from the
/// head of the list containing it adds one to the feature `"child,parent"`. A two element
/// list headed by `-` has the head `~`, so unary and binary minus are told apart.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrecedenceFeatures;

impl PrecedenceFeatures {
    pub fn of_meaning(meaning: &Value) -> Features {
        let mut features = Features::new();
        Self::collect(meaning, &mut features);
        features
    }

    fn head(list: &[Value]) -> Option<String> {
        let first = list.first()?;
        if list.len() == 2 && first.as_symbol() == Some("-") {
            Some(UNARY_MINUS.to_string())
        } else {
            Some(first.to_string())
        }
    }

    fn collect(meaning: &Value, features: &mut Features) {
        let list = match meaning.as_list() {
            Some(list) => list,
            None => return,
        };
        let head = Self::head(list);
        for child in list.iter().skip(1) {
            Self::collect(child, features);
            if let (Some(head), Some(child_head)) = (&head, child.as_list().and_then(Self::head)) {
                if &child_head != head {
                    add_count(features, format!("{},{}", child_head, head), 1.0);
                }
            }
        }
    }
}

impl FeatureFunction for PrecedenceFeatures {
    fn features(&self, derivation: &Derivation) -> Features {
        Self::of_meaning(derivation.meaning())
    }
}

/// Counts how often each rule is used in the derivation, keyed by the rule's display.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleFeatures;

impl FeatureFunction for RuleFeatures {
    fn features(&self, derivation: &Derivation) -> Features {
        let mut features = Features::new();
        derivation.walk(&mut |node: &Derivation| {
            add_count(&mut features, node.rule().to_string(), 1.0)
        });
        features
    }
}

/// Sums the counts of several feature functions.
#[derive(Default)]
pub struct CombinedFeatures {
    parts: Vec<Box<dyn FeatureFunction>>,
}

impl CombinedFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, part: impl FeatureFunction + 'static) -> Self {
        self.parts.push(Box::new(part));
        self
    }
}

impl FeatureFunction for CombinedFeatures {
    fn features(&self, derivation: &Derivation) -> Features {
        let mut features = Features::new();
        for part in &self.parts {
            for (name, count) in part.features(derivation) {
                add_count(&mut features, name, count);
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::{
        dot, CombinedFeatures, FeatureFunction, Features, NoFeatures, PrecedenceFeatures,
        RuleFeatures, Weights,
    };
    use crate::{derivation::Derivation, list, rule::Rule, value::Value};
    use maplit::btreemap;
    use std::rc::Rc;

    fn minus_three() -> Derivation {
        let minus = Derivation::terminal(
            Rc::new(Rule::lexical("$UnOp", "minus", "-")),
            vec!["minus".to_string()],
        );
        let three = Rc::new(Derivation::terminal(
            Rc::new(Rule::lexical("$E", "three", 3)),
            vec!["three".to_string()],
        ));
        let rule = Rule::binary("$E", "$UnOp $E", |sems| list![sems[0].clone(), sems[1].clone()]);
        Derivation::pair(Rc::new(rule), Rc::new(minus), three)
    }

    #[test]
    fn precedence_counts_nested_heads() {
        assert_eq!(
            PrecedenceFeatures::of_meaning(&list!["+", list!["-", 3], 2]),
            btreemap! {"~,+".to_string() => 1.0}
        );
        assert_eq!(
            PrecedenceFeatures::of_meaning(&list!["*", 4, list!["+", 2, 2]]),
            btreemap! {"+,*".to_string() => 1.0}
        );
        assert_eq!(
            PrecedenceFeatures::of_meaning(&list!["-", list!["-", 3, 2]]),
            btreemap! {"-,~".to_string() => 1.0}
        );
    }

    #[test]
    fn same_operator_nesting_is_not_counted() {
        assert!(PrecedenceFeatures::of_meaning(&list!["+", list!["+", 1, 2], 3]).is_empty());
        assert!(PrecedenceFeatures::of_meaning(&Value::from(3)).is_empty());
    }

    #[test]
    fn precedence_counts_accumulate() {
        let meaning = list!["*", list!["+", 1, 2], list!["+", 3, list!["-", 4]]];
        assert_eq!(
            PrecedenceFeatures::of_meaning(&meaning),
            btreemap! {"+,*".to_string() => 2.0, "~,+".to_string() => 1.0}
        );
    }

    #[test]
    fn rule_features_count_every_node() {
        let features = RuleFeatures.features(&minus_three());
        assert_eq!(features.len(), 3);
        assert_eq!(features["Rule($E, $UnOp $E, λ)"], 1.0);
        assert_eq!(features["Rule($E, three, 3)"], 1.0);
    }

    #[test]
    fn combined_features_add_up() {
        let combined = CombinedFeatures::new()
            .with(PrecedenceFeatures)
            .with(RuleFeatures)
            .with(|_: &Derivation| btreemap! {"Rule($E, three, 3)".to_string() => 2.0});
        let features = combined.features(&minus_three());
        assert_eq!(features["Rule($E, three, 3)"], 3.0);
        assert_eq!(features.len(), 3);
        assert!(NoFeatures.features(&minus_three()).is_empty());
    }

    #[test]
    fn dot_ignores_unweighted_features() {
        let features: Features = btreemap! {"a".to_string() => 2.0, "b".to_string() => 1.0};
        let weights = btreemap! {"a".to_string() => 0.5, "c".to_string() => 10.0};
        assert_eq!(dot(&features, &weights), 1.0);
    }

    #[test]
    fn dot_is_the_same_for_every_map() {
        let scores: Vec<f64> = (0..200)
            .map(|_| {
                let features: Features = btreemap! {
                    "c".to_string() => 1.0,
                    "a".to_string() => 1.0,
                    "b".to_string() => 1.0,
                };
                let weights: Weights = btreemap! {
                    "b".to_string() => 0.2,
                    "c".to_string() => 0.3,
                    "a".to_string() => 0.1,
                };
                dot(&features, &weights)
            })
            .collect();
        assert!(scores.iter().all(|score| score.to_bits() == scores[0].to_bits()));
        assert_eq!(scores[0], 0.1 + 0.2 + 0.3);
    }
}
