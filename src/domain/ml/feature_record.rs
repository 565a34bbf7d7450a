use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::INDICATOR_GROUPS;
use serde::{Deserialize, Serialize};

/// Fixed-schema input to a price prediction.
///
/// Serialized names match the column names the models were trained on,
/// hence the mixed-case indicator keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureRecord {
    pub car_age: u32,
    pub mileage_kmpl: f64,
    pub engine_cc: u32,
    pub owner_count: u32,
    pub brand: u8,
    pub accidents_reported: u32,
    #[serde(rename = "fuel_type_Electric")]
    pub fuel_type_electric: u8,
    #[serde(rename = "fuel_type_Petrol")]
    pub fuel_type_petrol: u8,
    #[serde(rename = "transmission_Manual")]
    pub transmission_manual: u8,
    #[serde(rename = "color_Blue")]
    pub color_blue: u8,
    #[serde(rename = "color_Gray")]
    pub color_gray: u8,
    #[serde(rename = "color_Red")]
    pub color_red: u8,
    #[serde(rename = "color_Silver")]
    pub color_silver: u8,
    #[serde(rename = "color_White")]
    pub color_white: u8,
    #[serde(rename = "service_history_None")]
    pub service_history_none: u8,
    #[serde(rename = "service_history_Partial")]
    pub service_history_partial: u8,
    #[serde(rename = "insurance_valid_Yes")]
    pub insurance_valid_yes: u8,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            car_age: 0,
            mileage_kmpl: 15.0,
            engine_cc: 1300,
            owner_count: 0,
            brand: 0,
            accidents_reported: 0,
            fuel_type_electric: 0,
            fuel_type_petrol: 0,
            transmission_manual: 0,
            color_blue: 0,
            color_gray: 0,
            color_red: 0,
            color_silver: 0,
            color_white: 0,
            service_history_none: 0,
            service_history_partial: 0,
            insurance_valid_yes: 0,
        }
    }
}

impl FeatureRecord {
    /// Looks a feature up by its trained column name.
    pub fn value(&self, name: &str) -> Option<f64> {
        let value = match name {
            "car_age" => self.car_age as f64,
            "mileage_kmpl" => self.mileage_kmpl,
            "engine_cc" => self.engine_cc as f64,
            "owner_count" => self.owner_count as f64,
            "brand" => self.brand as f64,
            "accidents_reported" => self.accidents_reported as f64,
            "fuel_type_Electric" => self.fuel_type_electric as f64,
            "fuel_type_Petrol" => self.fuel_type_petrol as f64,
            "transmission_Manual" => self.transmission_manual as f64,
            "color_Blue" => self.color_blue as f64,
            "color_Gray" => self.color_gray as f64,
            "color_Red" => self.color_red as f64,
            "color_Silver" => self.color_silver as f64,
            "color_White" => self.color_white as f64,
            "service_history_None" => self.service_history_none as f64,
            "service_history_Partial" => self.service_history_partial as f64,
            "insurance_valid_Yes" => self.insurance_valid_yes as f64,
            _ => return None,
        };
        Some(value)
    }

    /// Range checks that the type system alone does not express.
    pub fn validate(&self) -> Result<(), PredictionError> {
        if !self.mileage_kmpl.is_finite() || self.mileage_kmpl <= 0.0 {
            return Err(PredictionError::invalid(format!(
                "mileage_kmpl must be a positive number, got {}",
                self.mileage_kmpl
            )));
        }
        if self.engine_cc == 0 {
            return Err(PredictionError::invalid("engine_cc must be greater than 0"));
        }
        if self.brand > 10 {
            return Err(PredictionError::invalid(format!(
                "brand must be between 0 and 10, got {}",
                self.brand
            )));
        }

        for (group, members) in INDICATOR_GROUPS {
            let mut set = 0;
            for member in *members {
                let flag = self.value(member).unwrap_or(0.0);
                if flag != 0.0 && flag != 1.0 {
                    return Err(PredictionError::invalid(format!(
                        "{} must be 0 or 1, got {}",
                        member, flag
                    )));
                }
                if flag == 1.0 {
                    set += 1;
                }
            }
            if set > 1 {
                return Err(PredictionError::invalid(format!(
                    "at most one {} indicator may be set",
                    group
                )));
            }
        }

        Ok(())
    }
}
