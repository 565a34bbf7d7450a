pub mod feature_record;
pub mod feature_registry;

pub use feature_record::FeatureRecord;
pub use feature_registry::{FEATURE_NAMES, align_features};
