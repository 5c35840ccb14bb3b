mod fake_evaluator;

pub use fake_evaluator::FakeEvaluator;
