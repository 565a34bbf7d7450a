// Offline evaluation of saved models
pub mod evaluator;
pub mod test_set;

pub use evaluator::{EvaluationSummary, ModelCandidate, ModelEvaluator, default_candidates};
pub use test_set::TestSet;
