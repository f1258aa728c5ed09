use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// Propulsion category of a vehicle. Stored as the exact member name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Electric,
    Hybrid,
    Combustion,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electric, Category::Hybrid, Category::Combustion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electric => "ELECTRIC",
            Category::Hybrid => "HYBRID",
            Category::Combustion => "COMBUSTION",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ELECTRIC" => Ok(Category::Electric),
            "HYBRID" => Ok(Category::Hybrid),
            "COMBUSTION" => Ok(Category::Combustion),
            other => Err(RepositoryError::Decode {
                column: "category",
                value: other.to_string(),
                reason: "expected one of ELECTRIC, HYBRID, COMBUSTION".to_string(),
            }),
        }
    }
}

/// A registered vehicle.
///
/// Instances built with [`Vehicle::new`] carry [`Vehicle::NEW_ID`] until the
/// repository stores them and hands back a copy with the assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub registration_date: NaiveDate,
    pub license_active: bool,
    pub category: Category,
}

impl Vehicle {
    /// Id of a vehicle that has not been persisted yet.
    pub const NEW_ID: i64 = -1;

    pub fn new(
        plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        registration_date: NaiveDate,
        license_active: bool,
        category: Category,
    ) -> Self {
        Self {
            id: Self::NEW_ID,
            plate: plate.into(),
            make: make.into(),
            model: model.into(),
            registration_date,
            license_active,
            category,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != Self::NEW_ID
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_registration_date(mut self, registration_date: NaiveDate) -> Self {
        self.registration_date = registration_date;
        self
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle (id = {}, plate = {}, make = {}, model = {}, registration_date = {}, license_active = {}, category = {})",
            self.id,
            self.plate,
            self.make,
            self.model,
            self.registration_date,
            self.license_active,
            self.category
        )
    }
}
