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
    errors::SemparseResult,
    example::Example,
    learning::Metric,
    logging::Logger,
    model::Model,
};

/// How the ranked parses of one example compare with its gold labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ExampleEvaluation {
    pub input: String,
    pub parses: usize,
    /// The top parse has the gold meaning.
    pub meaning_accuracy: bool,
    /// Some parse has the gold meaning.
    pub meaning_oracle: bool,
    pub output_accuracy: bool,
    pub output_oracle: bool,
}

/// Averages over a set of examples. Every field is 0 for an empty set.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub examples: Vec<ExampleEvaluation>,
    pub meaning_accuracy: f64,
    pub meaning_oracle_accuracy: f64,
    pub output_accuracy: f64,
    pub output_oracle_accuracy: f64,
    pub mean_parses: f64,
}

impl Evaluation {
    fn average(examples: &[ExampleEvaluation], measure: impl Fn(&ExampleEvaluation) -> f64) -> f64 {
        if examples.is_empty() {
            0.0
        } else {
            examples.iter().map(measure).sum::<f64>() / examples.len() as f64
        }
    }

    fn from_examples(examples: Vec<ExampleEvaluation>) -> Self {
        let mark = |flag: bool| if flag { 1.0 } else { 0.0 };
        Self {
            meaning_accuracy: Self::average(&examples, |e| mark(e.meaning_accuracy)),
            meaning_oracle_accuracy: Self::average(&examples, |e| mark(e.meaning_oracle)),
            output_accuracy: Self::average(&examples, |e| mark(e.output_accuracy)),
            output_oracle_accuracy: Self::average(&examples, |e| mark(e.output_oracle)),
            mean_parses: Self::average(&examples, |e| e.parses as f64),
            examples,
        }
    }
}

impl Model {
    /// Ranks every example and scores the result against its gold labels. Outputs only
    /// count when the model has an executor.
    pub fn evaluate(&self, examples: &[Example]) -> SemparseResult<Evaluation> {
        let mut evaluated = Vec::with_capacity(examples.len());
        for example in examples {
            let parses = self.rank(&example.input)?;
            let meanings: Vec<bool> =
                parses.iter().map(|parse| Metric::Meaning.matches(parse, example)).collect();
            let outputs: Vec<bool> =
                parses.iter().map(|parse| Metric::Output.matches(parse, example)).collect();
            evaluated.push(ExampleEvaluation {
                input: example.input.clone(),
                parses: parses.len(),
                meaning_accuracy: meanings.first().copied().unwrap_or(false),
                meaning_oracle: meanings.contains(&true),
                output_accuracy: outputs.first().copied().unwrap_or(false),
                output_oracle: outputs.contains(&true),
            });
        }
        let evaluation = Evaluation::from_examples(evaluated);
        info!(
            self.logger(),
            "Evaluated {} example(s)", examples.len();
            "meaning_accuracy" => evaluation.meaning_accuracy,
            "meaning_oracle_accuracy" => evaluation.meaning_oracle_accuracy,
            "output_accuracy" => evaluation.output_accuracy,
            "output_oracle_accuracy" => evaluation.output_oracle_accuracy,
            "mean_parses" => evaluation.mean_parses
        );
        Ok(evaluation)
    }
}
