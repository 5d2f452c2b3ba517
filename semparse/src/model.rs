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
    derivation::Derivation,
    errors::SemparseResult,
    execute::Execute,
    features::{dot, FeatureFunction, Features, NoFeatures, Weights},
    grammar::Grammar,
    logging::{discard_logger, Logger},
    value::Value,
};
use log::debug;
use std::{cmp::Ordering, fmt, rc::Rc};

/// A scored derivation of an input.
#[derive(Clone, Debug)]
pub struct Parse {
    pub derivation: Rc<Derivation>,
    pub meaning: Value,
    /// The executed meaning, when the model has an executor.
    pub output: Option<Value>,
    pub score: f64,
    pub features: Features,
}

/// A grammar with a linear scorer over the features of its derivations.
pub struct Model {
    grammar: Grammar,
    feature_function: Box<dyn FeatureFunction>,
    weights: Weights,
    executor: Option<Box<dyn Execute>>,
    logger: slog::Logger,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("grammar", &self.grammar)
            .field("weights", &self.weights)
            .field("has_executor", &self.has_executor())
            .finish()
    }
}

impl Logger for Model {
    fn logger(&self) -> &slog::Logger {
        &self.logger
    }
}

impl Model {
    /// A model that scores every derivation 0 and has no executor.
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            feature_function: Box::new(NoFeatures),
            weights: Weights::new(),
            executor: None,
            logger: discard_logger(),
        }
    }

    pub fn with_features(mut self, feature_function: impl FeatureFunction + 'static) -> Self {
        self.feature_function = Box::new(feature_function);
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_executor(mut self, executor: impl Execute + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn with_logger(mut self, logger: slog::Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Weights {
        &mut self.weights
    }

    pub fn has_executor(&self) -> bool {
        self.executor.is_some()
    }

    pub fn features(&self, derivation: &Derivation) -> Features {
        self.feature_function.features(derivation)
    }

    pub fn score(&self, derivation: &Derivation) -> f64 {
        dot(&self.features(derivation), &self.weights)
    }

    /// `None` without an executor.
    pub fn execute(&self, meaning: &Value) -> SemparseResult<Option<Value>> {
        self.executor.as_ref().map(|executor| executor.execute(meaning)).transpose()
    }

    /// Every parse of the input, highest score first. Equal scores keep the order the
    /// parser found them in.
    pub fn rank(&self, input: &str) -> SemparseResult<Vec<Parse>> {
        let mut parses = self
            .grammar
            .parse(input)
            .into_iter()
            .map(|derivation| -> SemparseResult<Parse> {
                let features = self.features(&derivation);
                Ok(Parse {
                    meaning: derivation.meaning().clone(),
                    output: self.execute(derivation.meaning())?,
                    score: dot(&features, &self.weights),
                    features,
                    derivation,
                })
            })
            .collect::<SemparseResult<Vec<_>>>()?;
        parses.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        debug!("rank({}) scored {} parse(s)", input, parses.len());
        Ok(parses)
    }

    /// Weights from highest to lowest, names breaking ties.
    pub fn sorted_weights(&self) -> Vec<(&str, f64)> {
        let mut weights: Vec<(&str, f64)> =
            self.weights.iter().map(|(name, weight)| (name.as_str(), *weight)).collect();
        weights.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(b.0))
        });
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::{
        errors::SemparseError, features::PrecedenceFeatures, grammar::Grammar, lisp::Evaluator,
        list, rule::Rule, value::Value,
    };
    use maplit::btreemap;

    fn grammar() -> Grammar {
        Grammar::new(vec![
            Rule::lexical("$E", "two", 2),
            Rule::lexical("$E", "three", 3),
            Rule::lexical("$E", "four", 4),
            Rule::lexical("$BinOp", "plus", "+"),
            Rule::lexical("$BinOp", "times", "*"),
            Rule::binary("$EBO", "$E $BinOp", |sems| list![sems[1].clone(), sems[0].clone()]),
            Rule::binary("$E", "$EBO $E", |sems| {
                list![
                    sems[0].nth(0).cloned().unwrap_or(Value::Nil),
                    sems[0].nth(1).cloned().unwrap_or(Value::Nil),
                    sems[1].clone()
                ]
            }),
        ])
        .unwrap()
    }

    #[test]
    fn unweighted_parses_keep_parser_order() {
        let parses = Model::new(grammar()).rank("four times two plus two").unwrap();
        assert_eq!(parses.len(), 2);
        assert_eq!(parses[0].meaning, list!["*", 4, list!["+", 2, 2]]);
        assert!(parses.iter().all(|parse| parse.score == 0.0 && parse.output.is_none()));
    }

    #[test]
    fn weights_reorder_parses() {
        let model = Model::new(grammar())
            .with_features(PrecedenceFeatures)
            .with_weights(btreemap! {"*,+".to_string() => 1.0, "+,*".to_string() => -1.0})
            .with_executor(Evaluator::new());
        let parses = model.rank("four times two plus two").unwrap();
        assert_eq!(parses[0].meaning, list!["+", list!["*", 4, 2], 2]);
        assert_eq!(parses[0].score, 1.0);
        assert_eq!(parses[0].output, Some(Value::from(10)));
        assert_eq!(parses[1].score, -1.0);
        assert_eq!(parses[1].output, Some(Value::from(16)));
    }

    #[test]
    fn no_parse_ranks_nothing() {
        assert!(Model::new(grammar()).rank("two two").unwrap().is_empty());
    }

    #[test]
    fn executor_failures_propagate() {
        let model = Model::new(Grammar::new(vec![Rule::lexical("$E", "x", "x")]).unwrap())
            .with_executor(Evaluator::new());
        assert!(matches!(model.rank("x"), Err(SemparseError::UnboundSymbol { .. })));
    }

    #[test]
    fn weights_sort_descending() {
        let model = Model::new(grammar()).with_weights(btreemap! {
            "b".to_string() => 0.5,
            "a".to_string() => 0.5,
            "c".to_string() => -1.0,
            "d".to_string() => 2.0,
        });
        assert_eq!(model.sorted_weights(), vec![("d", 2.0), ("a", 0.5), ("b", 0.5), ("c", -1.0)]);
    }
}
