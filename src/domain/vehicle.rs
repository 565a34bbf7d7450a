//! Car details as the user enters them.
//!
//! Each categorical choice maps to the one-hot indicator columns of
//! [`FeatureRecord`]. The baseline choice of every group (the category the
//! training pipeline dropped) leaves all of its indicators at 0.

use crate::domain::ml::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Electric,
    Petrol,
    Other,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Electric, FuelType::Petrol, FuelType::Other];

    /// (fuel_type_Electric, fuel_type_Petrol)
    pub fn indicators(self) -> (u8, u8) {
        match self {
            FuelType::Electric => (1, 0),
            FuelType::Petrol => (0, 1),
            FuelType::Other => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    pub fn indicator(self) -> u8 {
        match self {
            Transmission::Manual => 1,
            Transmission::Automatic => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    White,
    Blue,
    Gray,
    Red,
    Silver,
    Other,
}

impl CarColor {
    pub const ALL: [CarColor; 6] = [
        CarColor::White,
        CarColor::Blue,
        CarColor::Gray,
        CarColor::Red,
        CarColor::Silver,
        CarColor::Other,
    ];

    /// (Blue, Gray, Red, Silver, White)
    pub fn indicators(self) -> (u8, u8, u8, u8, u8) {
        match self {
            CarColor::Blue => (1, 0, 0, 0, 0),
            CarColor::Gray => (0, 1, 0, 0, 0),
            CarColor::Red => (0, 0, 1, 0, 0),
            CarColor::Silver => (0, 0, 0, 1, 0),
            CarColor::White => (0, 0, 0, 0, 1),
            CarColor::Other => (0, 0, 0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceHistory {
    None,
    Partial,
    Regular,
}

impl ServiceHistory {
    pub const ALL: [ServiceHistory; 3] = [
        ServiceHistory::None,
        ServiceHistory::Partial,
        ServiceHistory::Regular,
    ];

    /// (service_history_None, service_history_Partial)
    pub fn indicators(self) -> (u8, u8) {
        match self {
            ServiceHistory::None => (1, 0),
            ServiceHistory::Partial => (0, 1),
            ServiceHistory::Regular => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insurance {
    Valid,
    Invalid,
}

impl Insurance {
    pub const ALL: [Insurance; 2] = [Insurance::Valid, Insurance::Invalid];

    pub fn indicator(self) -> u8 {
        match self {
            Insurance::Valid => 1,
            Insurance::Invalid => 0,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for CarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for ServiceHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for Insurance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insurance::Valid => write!(f, "Yes"),
            Insurance::Invalid => write!(f, "No"),
        }
    }
}

/// Form state collected by the presentation client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDetails {
    pub car_age: u32,
    pub mileage_kmpl: f64,
    pub engine_cc: u32,
    pub owner_count: u32,
    /// 0 = economy brand, 10 = luxury brand
    pub brand: u8,
    pub accidents_reported: u32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub color: CarColor,
    pub service_history: ServiceHistory,
    pub insurance: Insurance,
}

impl Default for CarDetails {
    fn default() -> Self {
        Self {
            car_age: 5,
            mileage_kmpl: 15.0,
            engine_cc: 1300,
            owner_count: 1,
            brand: 5,
            accidents_reported: 0,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Manual,
            color: CarColor::White,
            service_history: ServiceHistory::Regular,
            insurance: Insurance::Valid,
        }
    }
}

impl CarDetails {
    pub fn to_feature_record(&self) -> FeatureRecord {
        let (fuel_type_electric, fuel_type_petrol) = self.fuel_type.indicators();
        let (color_blue, color_gray, color_red, color_silver, color_white) =
            self.color.indicators();
        let (service_history_none, service_history_partial) = self.service_history.indicators();

        FeatureRecord {
            car_age: self.car_age,
            mileage_kmpl: self.mileage_kmpl,
            engine_cc: self.engine_cc,
            owner_count: self.owner_count,
            brand: self.brand,
            accidents_reported: self.accidents_reported,
            fuel_type_electric,
            fuel_type_petrol,
            transmission_manual: self.transmission.indicator(),
            color_blue,
            color_gray,
            color_red,
            color_silver,
            color_white,
            service_history_none,
            service_history_partial,
            insurance_valid_yes: self.insurance.indicator(),
        }
    }
}
