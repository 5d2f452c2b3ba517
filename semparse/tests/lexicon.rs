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
extern crate semparse;
extern crate test_semparse;

use semparse::{
    expand_ambiguous_lexicon, gather_tokens, is_operator_category, synthesize_lexicon,
    CombinedFeatures, Evaluator, Example, Grammar, LearningConfig, Metric, Model,
    PrecedenceFeatures, RuleFeatures, Value,
};
use test_semparse::{arithmetic_rules, compositional_rules, swahili_examples, NUMERALS, OPERATORS};

fn candidate_meanings() -> Vec<Value> {
    let mut meanings: Vec<Value> = vec![1.into(), 2.into(), 3.into(), 4.into()];
    meanings.extend(vec!["-", "+", "*"].into_iter().map(Value::from));
    meanings
}

fn categories() -> Vec<String> {
    vec!["$E".to_string(), "$UnOp".to_string(), "$BinOp".to_string()]
}

#[test]
fn swahili_tokens_are_gathered() {
    assert_eq!(
        gather_tokens(&swahili_examples()),
        vec!["moja", "ongeza", "mbili", "tatu", "hasi", "toa", "mara", "nne"]
    );
}

#[test]
fn synthesized_lexicon_is_the_kind_matched_cross_product() {
    let tokens = gather_tokens(&swahili_examples());
    let rules = synthesize_lexicon(&tokens, &candidate_meanings(), &categories(), &Evaluator::new())
        .unwrap();
    assert_eq!(rules.len(), tokens.len() * (3 * 2 + 4));
    let evaluator = Evaluator::new();
    for rule in &rules {
        let meaning = rule.semantics().literal().cloned().unwrap_or(Value::Nil);
        let operator = evaluator.evaluate(&meaning).unwrap().is_procedure();
        assert_eq!(operator, is_operator_category(rule.lhs()), "{}", rule);
    }
}

#[test]
fn synthesized_grammar_covers_every_reading() {
    let tokens = gather_tokens(&swahili_examples());
    let mut rules =
        synthesize_lexicon(&tokens, &candidate_meanings(), &categories(), &Evaluator::new())
            .unwrap();
    rules.extend(compositional_rules());
    let grammar = Grammar::new(rules).unwrap();
    assert_eq!(grammar.parse("moja ongeza mbili").len(), 84);

    let model = Model::new(grammar).with_executor(Evaluator::new());
    let short: Vec<_> =
        swahili_examples().into_iter().filter(|example| example.tokens().count() <= 3).collect();
    let evaluation = model.evaluate(&short).unwrap();
    assert_eq!(evaluation.meaning_oracle_accuracy, 1.0);
    assert_eq!(evaluation.output_oracle_accuracy, 1.0);
}

fn short_swahili_examples() -> Vec<Example> {
    swahili_examples().into_iter().filter(|example| example.tokens().count() <= 3).collect()
}

fn synthesized_model() -> Model {
    let tokens = gather_tokens(&swahili_examples());
    let mut rules =
        synthesize_lexicon(&tokens, &candidate_meanings(), &categories(), &Evaluator::new())
            .unwrap();
    rules.extend(compositional_rules());
    Model::new(Grammar::new(rules).unwrap())
        .with_features(CombinedFeatures::new().with(RuleFeatures).with(PrecedenceFeatures))
        .with_executor(Evaluator::new())
}

#[test]
fn learning_picks_word_meanings_from_outputs() {
    let examples = short_swahili_examples();
    assert_eq!(examples.len(), 12);
    let untrained = synthesized_model().evaluate(&examples).unwrap().output_accuracy;
    assert_eq!(untrained, 1.0 / 12.0);

    let mut improved = 0;
    for seed in 0..3 {
        let mut model = synthesized_model();
        let config = LearningConfig::default().with_metric(Metric::Output).with_seed(seed);
        let reports = model.learn(&examples, config).unwrap();
        assert_eq!(reports.len(), 20);
        // With no weights every derivation that misses the output outscores the ones that hit.
        assert_eq!(reports[0].accuracy, 0.0);
        assert_eq!(reports[0].updates, examples.len());
        if model.evaluate(&examples).unwrap().output_accuracy > untrained {
            improved += 1;
        }
    }
    assert!(improved >= 2, "only {} of 3 runs improved", improved);
}

#[test]
fn ambiguous_lexicon_tries_every_meaning_of_a_category() {
    let rules = expand_ambiguous_lexicon(&arithmetic_rules());
    // 4 numerals x 4 numbers, 1 unary operator x 1, 3 binary operators x 3 symbols
    assert_eq!(rules.len(), 3 + 16 + 1 + 9);
    let grammar = Grammar::new(rules).unwrap();
    assert_eq!(grammar.parse("one").len(), NUMERALS.len());
    assert_eq!(grammar.parse("one plus one").len(), 4 * OPERATORS.len() * 4);
}
