pub mod model_loader;
pub mod predictor;
pub mod smartcore_predictor;
pub mod trainer;

pub use model_loader::{LoadedModel, ModelLoader};
pub use predictor::PricePredictor;
pub use smartcore_predictor::{ModelArtifact, Regressor, SmartCorePredictor};
pub use trainer::{Algorithm, Dataset, TrainingParams};
