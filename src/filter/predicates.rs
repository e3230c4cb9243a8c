//! Per-dimension match rules.

use crate::models::Vehicle;

use super::range::RangeFilter;
use super::selection::{Choice, Dimension, FilterSelection};

/// One active dimension, prepared once per filter run.
///
/// Text needles are lower-cased up front so matching a large snapshot does
/// not re-fold the selection for every vehicle.
#[derive(Debug, Clone)]
pub enum Criterion {
    Text { dimension: Dimension, needle: String },
    Range { dimension: Dimension, range: RangeFilter },
}

impl Criterion {
    /// Compile every constrained dimension of `selection`, in
    /// [`Dimension::ALL`] order. Unconstrained dimensions are skipped.
    pub fn compile(selection: &FilterSelection) -> Vec<Criterion> {
        Dimension::ALL
            .into_iter()
            .filter_map(|dimension| match dimension {
                Dimension::Make => Criterion::text(dimension, &selection.make),
                Dimension::Model => Criterion::text(dimension, &selection.model),
                Dimension::FuelType => Criterion::text(dimension, &selection.fuel_type),
                Dimension::Transmission => Criterion::text(dimension, &selection.transmission),
                Dimension::BodyType => Criterion::text(dimension, &selection.body_type),
                Dimension::PriceRange => Criterion::range(dimension, &selection.price_range),
                Dimension::Mileage => Criterion::range(dimension, &selection.mileage),
                Dimension::Year => Criterion::range(dimension, &selection.year),
            })
            .collect()
    }

    /// Criterion for a single text dimension, `None` when it is `"all"`.
    pub fn text(dimension: Dimension, choice: &Choice) -> Option<Criterion> {
        match choice {
            Choice::All => None,
            Choice::Only(wanted) => Some(Criterion::Text { dimension, needle: wanted.to_lowercase() }),
        }
    }

    fn range(dimension: Dimension, range: &RangeFilter) -> Option<Criterion> {
        range
            .is_constrained()
            .then(|| Criterion::Range { dimension, range: range.clone() })
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Criterion::Text { dimension, .. } | Criterion::Range { dimension, .. } => *dimension,
        }
    }

    pub fn is_match(&self, vehicle: &Vehicle) -> bool {
        match self {
            Criterion::Text { dimension, needle } => {
                text_field(vehicle, *dimension).is_some_and(|value| value.to_lowercase() == *needle)
            }
            Criterion::Range { dimension, range } => {
                numeric_field(vehicle, *dimension).is_some_and(|value| range.contains(value))
            }
        }
    }
}

fn text_field(vehicle: &Vehicle, dimension: Dimension) -> Option<&str> {
    match dimension {
        Dimension::Make => Some(vehicle.make.as_str()),
        Dimension::Model => Some(vehicle.model.as_str()),
        Dimension::FuelType => vehicle.fuel_type.as_deref(),
        Dimension::Transmission => vehicle.transmission.as_deref(),
        Dimension::BodyType => vehicle.body_type.as_deref(),
        Dimension::PriceRange | Dimension::Mileage | Dimension::Year => None,
    }
}

fn numeric_field(vehicle: &Vehicle, dimension: Dimension) -> Option<i64> {
    match dimension {
        Dimension::PriceRange => Some(i64::from(vehicle.price)),
        Dimension::Mileage => Some(i64::from(vehicle.mileage)),
        Dimension::Year => Some(i64::from(vehicle.year)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: "1".to_string(),
            make: "BMW".to_string(),
            model: "X5".to_string(),
            year: 2020,
            mileage: 30000,
            price: 50000,
            images: vec![],
            fuel_type: Some("Diesel".to_string()),
            transmission: None,
            body_type: Some("SUV".to_string()),
        }
    }

    fn passes(selection: &FilterSelection) -> bool {
        Criterion::compile(selection).iter().all(|criterion| criterion.is_match(&vehicle()))
    }

    #[test]
    fn test_text_match_ignores_case() {
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Make, "bmw");
        selection.set(Dimension::FuelType, "DIESEL");
        assert!(passes(&selection));
    }

    #[test]
    fn test_absent_field_fails_when_constrained() {
        let mut selection = FilterSelection::default();
        assert!(passes(&selection));
        selection.set(Dimension::Transmission, "Automatic");
        assert!(!passes(&selection));
    }

    #[test]
    fn test_compile_skips_unconstrained_dimensions() {
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Model, "x5");
        selection.set(Dimension::PriceRange, "25000-50000");
        selection.set(Dimension::Transmission, "Manual");
        selection.set(Dimension::Year, "abc-def");

        let criteria = Criterion::compile(&selection);
        let dimensions: Vec<Dimension> = criteria.iter().map(Criterion::dimension).collect();
        assert_eq!(
            dimensions,
            vec![Dimension::Model, Dimension::PriceRange, Dimension::Transmission, Dimension::Year]
        );
        let outcomes: Vec<bool> = criteria.iter().map(|c| c.is_match(&vehicle())).collect();
        assert_eq!(outcomes, vec![true, true, false, false]);
    }

    #[test]
    fn test_single_text_criterion() {
        assert!(Criterion::text(Dimension::Make, &Choice::All).is_none());
        let make = Criterion::text(Dimension::Make, &Choice::parse("Bmw")).unwrap();
        assert!(make.is_match(&vehicle()));
        let other = Criterion::text(Dimension::BodyType, &Choice::parse("Saloon")).unwrap();
        assert!(!other.is_match(&vehicle()));
    }
}
