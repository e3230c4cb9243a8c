//! Conjunctive filtering of an inventory snapshot.

use serde::Serialize;

use crate::models::Vehicle;

use super::predicates::Criterion;
use super::selection::FilterSelection;

/// The vehicles that passed every active dimension, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredResult {
    pub vehicles: Vec<Vehicle>,
    /// Size of the inventory the result was computed from.
    pub inventory_len: usize,
}

/// What a caller should show for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultStatus {
    /// The inventory itself is empty: nothing to filter.
    Empty,
    /// Vehicles exist but the selection excludes all of them.
    NoMatches,
    Results,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn status(&self) -> ResultStatus {
        if self.inventory_len == 0 {
            ResultStatus::Empty
        } else if self.vehicles.is_empty() {
            ResultStatus::NoMatches
        } else {
            ResultStatus::Results
        }
    }
}

/// Apply `selection` to `inventory`.
///
/// ## Algorithm
/// 1. Compile the constrained dimensions into criteria (sentinels drop out)
/// 2. Run each criterion over the survivors of the previous one
/// 3. Keep relative order throughout
///
/// Pure: the inventory is only read, and identical inputs give identical
/// output.
pub fn filter(inventory: &[Vehicle], selection: &FilterSelection) -> FilteredResult {
    let criteria = Criterion::compile(selection);
    let mut current: Vec<&Vehicle> = inventory.iter().collect();

    for criterion in &criteria {
        let before = current.len();
        current.retain(|vehicle| criterion.is_match(vehicle));
        tracing::debug!(
            "Applied {} filter (input count: {}, output count: {})",
            criterion.dimension(),
            before,
            current.len()
        );
    }

    FilteredResult {
        vehicles: current.into_iter().cloned().collect(),
        inventory_len: inventory.len(),
    }
}
