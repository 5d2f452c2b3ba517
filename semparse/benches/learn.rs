#[macro_use]
extern crate criterion;
extern crate semparse;
extern crate test_semparse;

use criterion::Criterion;
use semparse::{Evaluator, Grammar, LearningConfig, Metric, Model, PrecedenceFeatures};
use test_semparse::{arithmetic_examples, arithmetic_rules};

fn bench_learn(c: &mut Criterion) {
    let examples = arithmetic_examples();
    let config = LearningConfig::default().with_metric(Metric::Output);
    c.bench_function("learn arithmetic", |b| {
        b.iter(|| {
            let mut model = Model::new(Grammar::new(arithmetic_rules()).unwrap())
                .with_features(PrecedenceFeatures)
                .with_executor(Evaluator::new());
            model.learn(&examples, config.clone())
        })
    });
}

criterion_group!(benches, bench_learn);
criterion_main!(benches);
