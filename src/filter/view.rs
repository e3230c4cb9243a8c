//! Caller-side state for one stock listing: current snapshot, selection,
//! filtered result and pagination window.
//!
//! The filter engine and option deriver are pure; this is where the rules
//! about *when* they are re-run live:
//! * a new snapshot re-filters and resets the window
//! * any filter change re-filters and resets the window
//! * choosing a make puts the model back to `"all"`

use std::sync::Arc;

use serde::Serialize;

use crate::models::{Snapshot, Vehicle};

use super::engine::{FilteredResult, ResultStatus, filter};
use super::options::{FilterOptions, derive_options};
use super::pagination::PaginationCursor;
use super::selection::{Choice, Dimension, FilterSelection};

/// What the listing should currently display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StockStatus {
    /// No snapshot has arrived yet.
    Loading,
    /// The inventory is empty.
    Empty,
    /// There is stock, but none of it passes the filters.
    NoMatches,
    Results,
}

impl From<ResultStatus> for StockStatus {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Empty => StockStatus::Empty,
            ResultStatus::NoMatches => StockStatus::NoMatches,
            ResultStatus::Results => StockStatus::Results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPage<'a> {
    pub status: StockStatus,
    pub vehicles: &'a [Vehicle],
    pub shown: usize,
    pub total: usize,
    pub has_more: bool,
    pub window_size: usize,
}

#[derive(Debug, Clone)]
pub struct StockView {
    snapshot: Option<Arc<Snapshot>>,
    selection: FilterSelection,
    result: FilteredResult,
    cursor: PaginationCursor,
}

impl StockView {
    pub fn new(cursor: PaginationCursor) -> Self {
        Self {
            snapshot: None,
            selection: FilterSelection::default(),
            result: FilteredResult::default(),
            cursor,
        }
    }

    /// A view over an existing snapshot with a complete selection already
    /// chosen, as when a request carries the whole filter state.
    pub fn with_state(
        snapshot: Option<Arc<Snapshot>>,
        selection: FilterSelection,
        cursor: PaginationCursor,
    ) -> Self {
        let mut view = Self {
            snapshot,
            selection,
            result: FilteredResult::default(),
            cursor,
        };
        view.refilter();
        view
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn result(&self) -> &FilteredResult {
        &self.result
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn inventory(&self) -> &[Vehicle] {
        match &self.snapshot {
            Some(snapshot) => &snapshot.vehicles,
            None => &[],
        }
    }

    /// Swap in a freshly fetched snapshot.
    pub fn replace_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = Some(snapshot);
        self.refilter();
    }

    /// Apply a single control change in its wire encoding.
    pub fn apply(&mut self, dimension: Dimension, value: &str) {
        self.selection.set(dimension, value);
        if dimension == Dimension::Make {
            self.selection.model = Choice::All;
        }
        tracing::debug!("Filter {} set to {}", dimension, self.selection.get(dimension));
        self.refilter();
    }

    /// Replace the whole selection at once.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.set_selection(FilterSelection::default());
    }

    pub fn load_more(&mut self) {
        self.cursor.load_more(self.result.len());
    }

    pub fn restore_window(&mut self, window_size: usize) {
        self.cursor.restore(window_size, self.result.len());
    }

    pub fn status(&self) -> StockStatus {
        match self.snapshot {
            None => StockStatus::Loading,
            Some(_) => self.result.status().into(),
        }
    }

    pub fn page(&self) -> StockPage<'_> {
        let vehicles = self.cursor.visible(&self.result.vehicles);
        StockPage {
            status: self.status(),
            vehicles,
            shown: vehicles.len(),
            total: self.result.len(),
            has_more: self.cursor.has_more(self.result.len()),
            window_size: self.cursor.window_size(),
        }
    }

    /// Option sets for the controls, with models cascading from the
    /// currently selected make.
    pub fn options(&self, current_year: i32) -> FilterOptions {
        derive_options(self.inventory(), &self.selection.make, current_year)
    }

    fn refilter(&mut self) {
        self.result = filter(self.inventory(), &self.selection);
        self.cursor.reset();
    }
}

impl Default for StockView {
    fn default() -> Self {
        Self::new(PaginationCursor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: usize, make: &str, model: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year: 2022,
            mileage: 5000,
            price: 40000,
            images: vec![],
            fuel_type: Some("Petrol".to_string()),
            transmission: None,
            body_type: None,
        }
    }

    fn snapshot(count: usize) -> Arc<Snapshot> {
        let vehicles = (0..count)
            .map(|i| if i % 2 == 0 { car(i, "Audi", "A4") } else { car(i, "BMW", "M3") })
            .collect();
        Arc::new(Snapshot::new(vehicles))
    }

    #[test]
    fn test_loading_until_first_snapshot() {
        let mut view = StockView::default();
        assert_eq!(view.status(), StockStatus::Loading);

        view.replace_snapshot(Arc::new(Snapshot::new(vec![])));
        assert_eq!(view.status(), StockStatus::Empty);
    }

    #[test]
    fn test_make_change_resets_model() {
        let mut view = StockView::default();
        view.replace_snapshot(snapshot(4));
        view.apply(Dimension::Model, "M3");
        assert_eq!(view.selection().model, Choice::parse("M3"));

        view.apply(Dimension::Make, "Audi");
        assert_eq!(view.selection().model, Choice::All);
        assert_eq!(view.page().total, 2);
    }

    #[test]
    fn test_any_change_resets_window() {
        let mut view = StockView::default();
        view.replace_snapshot(snapshot(20));
        view.load_more();
        view.load_more();
        assert_eq!(view.cursor().window_size(), 18);

        view.apply(Dimension::FuelType, "petrol");
        assert_eq!(view.cursor().window_size(), 6);

        view.load_more();
        view.replace_snapshot(snapshot(20));
        assert_eq!(view.cursor().window_size(), 6);
    }

    #[test]
    fn test_no_matches_then_clear() {
        let mut view = StockView::default();
        view.replace_snapshot(snapshot(3));
        view.apply(Dimension::PriceRange, "150000+");
        assert_eq!(view.status(), StockStatus::NoMatches);

        view.clear_filters();
        assert_eq!(view.status(), StockStatus::Results);
        assert_eq!(view.page().total, 3);
    }

    #[test]
    fn test_page_reports_window() {
        let mut view = StockView::default();
        view.replace_snapshot(snapshot(10));

        let page = view.page();
        assert_eq!(page.shown, 6);
        assert!(page.has_more);

        view.load_more();
        let page = view.page();
        assert_eq!(page.shown, 10);
        assert_eq!(page.window_size, 10);
        assert!(!page.has_more);
    }

    #[test]
    fn test_options_follow_selected_make() {
        let mut view = StockView::default();
        view.replace_snapshot(snapshot(4));
        view.apply(Dimension::Make, "bmw");
        let options = view.options(2026);
        let models: Vec<&str> = options.models.values().collect();
        assert_eq!(models, vec!["all", "M3"]);
    }
}
