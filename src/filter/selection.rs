//! The fixed-shape filter selection record.
//!
//! Every dimension is always present. "No constraint" is the `"all"`
//! sentinel, never a missing field, so matching over [`Dimension::ALL`] is
//! exhaustive.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ALL;
use super::range::RangeFilter;

/// Value of a text dimension (make, model, fuel type, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, Choice::Only(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::All => ALL,
            Choice::Only(value) => value,
        }
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        if value == ALL { Choice::All } else { Choice::Only(value) }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::parse(value)
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::All => ALL.to_string(),
            Choice::Only(value) => value,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One independently constrainable filter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Make,
    Model,
    PriceRange,
    Mileage,
    FuelType,
    Transmission,
    BodyType,
    Year,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Dimension::Make,
        Dimension::Model,
        Dimension::PriceRange,
        Dimension::Mileage,
        Dimension::FuelType,
        Dimension::Transmission,
        Dimension::BodyType,
        Dimension::Year,
    ];

    /// Wire name, as used in query strings.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Make => "make",
            Dimension::Model => "model",
            Dimension::PriceRange => "priceRange",
            Dimension::Mileage => "mileage",
            Dimension::FuelType => "fuelType",
            Dimension::Transmission => "transmission",
            Dimension::BodyType => "bodyType",
            Dimension::Year => "year",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Dimension::ALL.into_iter().find(|dimension| dimension.key() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The complete set of filter choices.
///
/// Deserializing from a query string fills any dimension the caller left
/// out with `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    pub make: Choice,
    pub model: Choice,
    pub price_range: RangeFilter,
    pub mileage: RangeFilter,
    pub fuel_type: Choice,
    pub transmission: Choice,
    pub body_type: Choice,
    pub year: RangeFilter,
}

impl FilterSelection {
    /// Update one dimension from its wire encoding.
    ///
    /// This is the raw setter; the make → model reset rule belongs to
    /// whoever applies user changes (see `StockView::apply`).
    pub fn set(&mut self, dimension: Dimension, value: &str) {
        match dimension {
            Dimension::Make => self.make = Choice::parse(value),
            Dimension::Model => self.model = Choice::parse(value),
            Dimension::PriceRange => self.price_range = RangeFilter::parse(value),
            Dimension::Mileage => self.mileage = RangeFilter::parse(value),
            Dimension::FuelType => self.fuel_type = Choice::parse(value),
            Dimension::Transmission => self.transmission = Choice::parse(value),
            Dimension::BodyType => self.body_type = Choice::parse(value),
            Dimension::Year => self.year = RangeFilter::parse(value),
        }
    }

    /// Wire encoding of one dimension.
    pub fn get(&self, dimension: Dimension) -> String {
        match dimension {
            Dimension::Make => self.make.to_string(),
            Dimension::Model => self.model.to_string(),
            Dimension::PriceRange => self.price_range.to_string(),
            Dimension::Mileage => self.mileage.to_string(),
            Dimension::FuelType => self.fuel_type.to_string(),
            Dimension::Transmission => self.transmission.to_string(),
            Dimension::BodyType => self.body_type.to_string(),
            Dimension::Year => self.year.to_string(),
        }
    }

    pub fn is_constrained(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Make => self.make.is_constrained(),
            Dimension::Model => self.model.is_constrained(),
            Dimension::PriceRange => self.price_range.is_constrained(),
            Dimension::Mileage => self.mileage.is_constrained(),
            Dimension::FuelType => self.fuel_type.is_constrained(),
            Dimension::Transmission => self.transmission.is_constrained(),
            Dimension::BodyType => self.body_type.is_constrained(),
            Dimension::Year => self.year.is_constrained(),
        }
    }

    pub fn active_dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        Dimension::ALL.into_iter().filter(|d| self.is_constrained(*d))
    }
}
