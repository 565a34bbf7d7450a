use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_record::FeatureRecord;

/// Ordered list of feature names.
/// This is the column order the price models were trained with.
/// Any change here is a breaking change for serialized models.
pub const FEATURE_NAMES: &[&str] = &[
    "car_age",
    "mileage_kmpl",
    "engine_cc",
    "owner_count",
    "brand",
    "accidents_reported",
    "fuel_type_Electric",
    "fuel_type_Petrol",
    "transmission_Manual",
    "color_Blue",
    "color_Gray",
    "color_Red",
    "color_Silver",
    "color_White",
    "service_history_None",
    "service_history_Partial",
    "insurance_valid_Yes",
];

/// One-hot groups. Within a group at most one indicator may be set;
/// all zeros encodes the baseline category dropped at training time.
pub const INDICATOR_GROUPS: &[(&str, &[&str])] = &[
    ("fuel_type", &["fuel_type_Electric", "fuel_type_Petrol"]),
    ("transmission", &["transmission_Manual"]),
    (
        "color",
        &[
            "color_Blue",
            "color_Gray",
            "color_Red",
            "color_Silver",
            "color_White",
        ],
    ),
    (
        "service_history",
        &["service_history_None", "service_history_Partial"],
    ),
    ("insurance_valid", &["insurance_valid_Yes"]),
];

/// Canonical feature order as owned strings, used when an artifact
/// does not carry its own schema.
pub fn default_feature_order() -> Vec<String> {
    FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Selects the record's values in exactly the order the model expects.
pub fn align_features(
    record: &FeatureRecord,
    expected: &[String],
) -> Result<Vec<f64>, PredictionError> {
    expected
        .iter()
        .map(|name| {
            record
                .value(name)
                .ok_or_else(|| PredictionError::FeatureMismatch {
                    feature: name.clone(),
                })
        })
        .collect()
}

/// Differences between a model schema and the record schema.
#[derive(Debug, Default, PartialEq)]
pub struct SchemaDiff {
    /// Expected by the model but not provided by the record
    pub unknown: Vec<String>,
    /// Provided by the record but ignored by the model
    pub unused: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.unknown.is_empty() && self.unused.is_empty()
    }
}

pub fn schema_diff(expected: &[String]) -> SchemaDiff {
    let unknown = expected
        .iter()
        .filter(|name| !FEATURE_NAMES.contains(&name.as_str()))
        .cloned()
        .collect();
    let unused = FEATURE_NAMES
        .iter()
        .filter(|name| !expected.iter().any(|e| e == *name))
        .map(|name| name.to_string())
        .collect();

    SchemaDiff { unknown, unused }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_name_resolves() {
        let record = FeatureRecord::default();
        for name in FEATURE_NAMES {
            assert!(record.value(name).is_some(), "{} not resolvable", name);
        }
    }

    #[test]
    fn test_groups_only_reference_known_features() {
        for (_, members) in INDICATOR_GROUPS {
            for member in *members {
                assert!(FEATURE_NAMES.contains(member));
            }
        }
    }

    #[test]
    fn test_align_follows_model_order() {
        let record = FeatureRecord {
            car_age: 7,
            engine_cc: 1600,
            ..Default::default()
        };
        let expected = vec!["engine_cc".to_string(), "car_age".to_string()];

        let row = align_features(&record, &expected).unwrap();
        assert_eq!(row, vec![1600.0, 7.0]);
    }

    #[test]
    fn test_align_unknown_feature_is_mismatch() {
        let record = FeatureRecord::default();
        let expected = vec!["car_age".to_string(), "seats".to_string()];

        let err = align_features(&record, &expected).unwrap_err();
        assert_eq!(
            err,
            PredictionError::FeatureMismatch {
                feature: "seats".to_string()
            }
        );
    }

    #[test]
    fn test_schema_diff() {
        assert!(schema_diff(&default_feature_order()).is_empty());

        let mut expected = default_feature_order();
        expected.retain(|n| n != "brand");
        expected.push("seats".to_string());

        let diff = schema_diff(&expected);
        assert_eq!(diff.unknown, vec!["seats".to_string()]);
        assert_eq!(diff.unused, vec!["brand".to_string()]);
    }
}
