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
    constants::{DEFAULT_EPOCHS, DEFAULT_ETA, DEFAULT_SEED, LOSS_AUGMENTATION},
    errors::{SemparseError, SemparseResult},
    example::Example,
    features::Features,
    logging::Logger,
    model::{Model, Parse},
    value::sem_eq,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{collections::HashSet, fmt, str::FromStr};

/// What a parse must agree with for it to count as correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// The parse's meaning equals the gold meaning.
    Meaning,
    /// The parse's executed output equals the gold output.
    Output,
}

impl Metric {
    /// A parse never matches an example without the gold label the metric checks.
    pub fn matches(self, parse: &Parse, example: &Example) -> bool {
        match self {
            Metric::Meaning => {
                example.meaning.as_ref().map_or(false, |gold| sem_eq(&parse.meaning, gold))
            },
            Metric::Output => match (&parse.output, &example.output) {
                (Some(output), Some(gold)) => output == gold,
                _ => false,
            },
        }
    }
}

impl FromStr for Metric {
    type Err = SemparseError;

    fn from_str(metric: &str) -> SemparseResult<Self> {
        match metric {
            "meaning" | "semantics" => Ok(Metric::Meaning),
            "output" | "denotation" => Ok(Metric::Output),
            _ => Err(SemparseError::UnknownMetric {
                metric: metric.to_string(),
            }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Meaning => "meaning",
            Metric::Output => "output",
        })
    }
}

/// Which feature names the learner updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VocabularyPolicy {
    /// Only features seen during the first epoch are ever updated.
    FrozenAfterFirstEpoch,
    /// Features seen in any epoch join the vocabulary.
    Growing,
}

impl Default for VocabularyPolicy {
    fn default() -> Self {
        VocabularyPolicy::FrozenAfterFirstEpoch
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LearningConfig {
    pub metric: Metric,
    /// Learning rate.
    pub eta: f64,
    pub epochs: usize,
    /// Seeds the generator that orders examples and breaks ties between competitors.
    pub seed: u64,
    pub vocabulary: VocabularyPolicy,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Meaning,
            eta: DEFAULT_ETA,
            epochs: DEFAULT_EPOCHS,
            seed: DEFAULT_SEED,
            vocabulary: VocabularyPolicy::default(),
        }
    }
}

impl LearningConfig {
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: VocabularyPolicy) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

/// What happened during one epoch.
#[derive(Clone, Debug, PartialEq)]
pub struct EpochReport {
    /// Counted from 0.
    pub epoch: usize,
    /// Examples whose sampled prediction matched, divided by the number of examples.
    pub accuracy: f64,
    pub correct: usize,
    /// Examples with a matching parse, the only ones that update the weights.
    pub updates: usize,
}

/// The target and competitors of an example's ranked parses, as indices into them.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoding {
    /// The best-ranked parse that matches, if any.
    pub target: Option<usize>,
    /// Every parse tying for the highest loss-augmented score.
    pub competitors: Vec<usize>,
}

/// Loss-augmented decoding: every parse that doesn't match gets `LOSS_AUGMENTATION` added
/// to its score before the highest scoring parses are collected. `parses` must be ranked.
pub fn loss_augmented_decode(parses: &[Parse], example: &Example, metric: Metric) -> Decoding {
    let mut target = None;
    let mut competitors = Vec::new();
    let mut best = f64::NEG_INFINITY;
    for (index, parse) in parses.iter().enumerate() {
        let matched = metric.matches(parse, example);
        if matched && target.is_none() {
            target = Some(index);
        }
        let augmented = if matched { parse.score } else { parse.score + LOSS_AUGMENTATION };
        if augmented > best {
            best = augmented;
            competitors.clear();
        }
        if augmented >= best {
            competitors.push(index);
        }
    }
    Decoding {
        target,
        competitors,
    }
}

/// Trains a model's weights one epoch per call to `next`.
///
/// Examples are visited in a fresh permutation each epoch. Updates are collected over the
/// epoch and applied at its end, so every example of an epoch is scored with the same weights.
/// After an error the learner yields nothing more.
pub struct Learner<'a> {
    model: &'a mut Model,
    examples: &'a [Example],
    config: LearningConfig,
    rng: ChaCha8Rng,
    vocabulary: HashSet<String>,
    epoch: usize,
    failed: bool,
}

impl<'a> Learner<'a> {
    pub fn new(model: &'a mut Model, examples: &'a [Example], config: LearningConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            model,
            examples,
            config,
            vocabulary: HashSet::new(),
            epoch: 0,
            failed: false,
        }
    }

    /// Feature names the learner updates.
    pub fn vocabulary(&self) -> &HashSet<String> {
        &self.vocabulary
    }

    fn records_vocabulary(&self) -> bool {
        self.epoch == 0 || self.config.vocabulary == VocabularyPolicy::Growing
    }

    fn run_epoch(&mut self) -> SemparseResult<EpochReport> {
        if self.config.metric == Metric::Output && !self.model.has_executor() {
            return Err(SemparseError::MissingExecutor);
        }
        let mut order: Vec<usize> = (0..self.examples.len()).collect();
        order.shuffle(&mut self.rng);
        let mut pending: Vec<(Features, Features)> = Vec::new();
        let mut correct = 0;
        let examples = self.examples;
        for index in order {
            let example = &examples[index];
            let parses = self.model.rank(&example.input)?;
            if self.records_vocabulary() {
                for parse in &parses {
                    self.vocabulary.extend(parse.features.keys().cloned());
                }
            }
            let decoding = loss_augmented_decode(&parses, example, self.config.metric);
            let target = match decoding.target {
                Some(target) => target,
                None => {
                    log::debug!("No parse of {} matches, skipping", example.input);
                    continue;
                },
            };
            if let Some(&chosen) = decoding.competitors.choose(&mut self.rng) {
                if self.config.metric.matches(&parses[chosen], example) {
                    correct += 1;
                }
                pending.push((parses[target].features.clone(), parses[chosen].features.clone()));
            }
        }
        let updates = pending.len();
        for (target, chosen) in pending {
            self.update(&target, &chosen);
        }
        let accuracy = if self.examples.is_empty() {
            0.0
        } else {
            correct as f64 / self.examples.len() as f64
        };
        Ok(EpochReport {
            epoch: self.epoch,
            accuracy,
            correct,
            updates,
        })
    }

    /// Moves the weights by `eta` times the difference between target and chosen features,
    /// over the vocabulary only.
    fn update(&mut self, target: &Features, chosen: &Features) {
        let eta = self.config.eta;
        let weights = self.model.weights_mut();
        for name in &self.vocabulary {
            let difference = target.get(name).copied().unwrap_or(0.0)
                - chosen.get(name).copied().unwrap_or(0.0);
            if difference != 0.0 {
                *weights.entry(name.clone()).or_insert(0.0) += eta * difference;
            }
        }
    }
}

impl<'a> Iterator for Learner<'a> {
    type Item = SemparseResult<EpochReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.epoch >= self.config.epochs {
            return None;
        }
        let report = self.run_epoch();
        match &report {
            Ok(report) => {
                info!(
                    self.model.logger(),
                    "Epoch #{} - Train Accuracy: {:.3}", report.epoch, report.accuracy;
                    "updates" => report.updates,
                    "correct" => report.correct
                );
                self.epoch += 1;
                if self.epoch == self.config.epochs {
                    info!(
                        self.model.logger(),
                        "Feature weights: {:?}",
                        self.model.sorted_weights()
                    );
                }
            },
            Err(error) => {
                self.failed = true;
                error!(self.model.logger(), "Learning stopped at epoch {}: {}", self.epoch, error);
            },
        }
        Some(report)
    }
}

impl Model {
    /// A learner over `examples` that runs one epoch per iteration.
    pub fn learner<'a>(
        &'a mut self,
        examples: &'a [Example],
        config: LearningConfig,
    ) -> Learner<'a> {
        Learner::new(self, examples, config)
    }

    /// Runs every epoch and returns their reports. Stops at the first error.
    pub fn learn(
        &mut self,
        examples: &[Example],
        config: LearningConfig,
    ) -> SemparseResult<Vec<EpochReport>> {
        self.learner(examples, config).collect()
    }
}
