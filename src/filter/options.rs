//! Selectable values for each filter control, derived from live data.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Vehicle;

use super::ALL;
use super::buckets::year_buckets;
use super::predicates::Criterion;
use super::selection::{Choice, Dimension};

/// One selectable value and what the control shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

impl OptionEntry {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    fn plain(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// Ordered, distinct options. The first entry is always the `"all"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<OptionEntry>);

impl OptionSet {
    fn with_all(all_label: &str, rest: impl IntoIterator<Item = OptionEntry>) -> Self {
        let mut entries = vec![OptionEntry::new(ALL, all_label)];
        entries.extend(rest);
        Self(entries)
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.0
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.value.as_str())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub makes: OptionSet,
    pub models: OptionSet,
    pub fuel_types: OptionSet,
    pub transmissions: OptionSet,
    pub body_types: OptionSet,
    pub years: OptionSet,
    pub price_ranges: OptionSet,
    pub mileages: OptionSet,
}

const PRICE_PRESETS: [(&str, &str); 6] = [
    ("0-25000", "Under £25,000"),
    ("25000-50000", "£25,000 - £50,000"),
    ("50000-75000", "£50,000 - £75,000"),
    ("75000-100000", "£75,000 - £100,000"),
    ("100000-150000", "£100,000 - £150,000"),
    ("150000+", "£150,000+"),
];

const MILEAGE_PRESETS: [(&str, &str); 6] = [
    ("0-10000", "Under 10,000 miles"),
    ("10000-30000", "10,000 - 30,000 miles"),
    ("30000-50000", "30,000 - 50,000 miles"),
    ("50000-75000", "50,000 - 75,000 miles"),
    ("75000-100000", "75,000 - 100,000 miles"),
    ("100000+", "100,000+ miles"),
];

/// Present, non-empty values, deduplicated and sorted as authored
/// (case-sensitive), behind the sentinel.
fn distinct<'a>(all_label: &str, values: impl Iterator<Item = Option<&'a str>>) -> OptionSet {
    let set: BTreeSet<&str> = values.flatten().filter(|value| !value.is_empty()).collect();
    OptionSet::with_all(all_label, set.into_iter().map(OptionEntry::plain))
}

fn presets(all_label: &str, entries: &[(&str, &str)]) -> OptionSet {
    OptionSet::with_all(all_label, entries.iter().map(|(value, label)| OptionEntry::new(*value, *label)))
}

/// Models for the model control. With a make chosen, only that make's
/// models (make compared case-insensitively).
pub fn model_options(inventory: &[Vehicle], current_make: &Choice) -> OptionSet {
    let make = Criterion::text(Dimension::Make, current_make);
    distinct(
        "All Models",
        inventory
            .iter()
            .filter(|vehicle| make.as_ref().is_none_or(|criterion| criterion.is_match(vehicle)))
            .map(|vehicle| Some(vehicle.model.as_str())),
    )
}

pub fn year_options(inventory: &[Vehicle], current_year: i32) -> OptionSet {
    let buckets = year_buckets(inventory.iter().map(|vehicle| vehicle.year), current_year);
    OptionSet::with_all(
        "All Years",
        buckets.iter().map(|bucket| OptionEntry::new(bucket.token(), bucket.label())),
    )
}

/// Derive every option set from the snapshot.
///
/// `current_year` bounds the year buckets; pass the calendar year at the
/// call site so this stays a pure function of its inputs.
pub fn derive_options(inventory: &[Vehicle], current_make: &Choice, current_year: i32) -> FilterOptions {
    FilterOptions {
        makes: distinct("All Makes", inventory.iter().map(|v| Some(v.make.as_str()))),
        models: model_options(inventory, current_make),
        fuel_types: distinct("All Fuel Types", inventory.iter().map(|v| v.fuel_type.as_deref())),
        transmissions: distinct("All Transmissions", inventory.iter().map(|v| v.transmission.as_deref())),
        body_types: distinct("All Body Types", inventory.iter().map(|v| v.body_type.as_deref())),
        years: year_options(inventory, current_year),
        price_ranges: presets("All Prices", &PRICE_PRESETS),
        mileages: presets("All Mileage", &MILEAGE_PRESETS),
    }
}
