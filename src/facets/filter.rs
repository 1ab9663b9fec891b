// src/facets/filter.rs
//
// County selection narrows the City checkboxes.
//
// Rule, applied to every city box on each alignment:
//   no county selected            → shown, enabled
//   city in a selected county     → shown, enabled
//   otherwise                     → hidden, disabled, unchecked

use std::collections::BTreeSet;

use crate::{ core::net::Fetch, errors::FacetLoadError };

use super::{ form::FacetForm, table::FacetTable };

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Uninitialized,
    Ready(FacetTable),
}

/// What one alignment pass did to the city boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignReport {
    pub shown: usize,
    pub hidden: usize,
    /// Boxes that were checked and got cleared because they were hidden
    pub unchecked: usize,
}

#[derive(Clone, Debug, Default)]
pub struct FacetDependencyFilter {
    state: FilterState,
}

impl FacetDependencyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: FacetTable) -> Self {
        Self { state: FilterState::Ready(table) }
    }

    /// Load the table once, and only if the form has county boxes.
    /// Once ready, later calls do nothing.
    pub fn initialize(&mut self, form: &FacetForm, fetch: &dyn Fetch, path: &str) -> Result<(), FacetLoadError> {
        if self.is_ready() {
            return Ok(());
        }
        if !form.has_county_boxes() {
            logd!("Facets: no county checkboxes; filter not loaded");
            return Ok(());
        }
        let table = FacetTable::load(fetch, path)?;
        self.state = FilterState::Ready(table);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, FilterState::Ready(_))
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn table(&self) -> Option<&FacetTable> {
        match &self.state {
            FilterState::Ready(t) => Some(t),
            FilterState::Uninitialized => None,
        }
    }

    /// Counties currently checked in the form.
    pub fn selected_counties(form: &FacetForm) -> BTreeSet<String> {
        form.county_boxes()
            .filter(|c| c.checked)
            .map(|c| c.value.clone())
            .collect()
    }

    /// Re-apply the visibility rule. `trigger` is the county box that
    /// changed, or `None` for a full realignment; the result is the same.
    pub fn on_county_change(&self, form: &mut FacetForm, trigger: Option<&str>) -> AlignReport {
        let mut report = AlignReport::default();
        let Some(table) = self.table() else {
            return report;
        };

        let selected = Self::selected_counties(form);

        for city in form.city_boxes_mut() {
            let show = selected.is_empty() || table.in_any(&city.value, &selected);
            if show {
                city.hidden = false;
                city.disabled = false;
                report.shown += 1;
            } else {
                if city.checked {
                    report.unchecked += 1;
                }
                city.hidden = true;
                city.disabled = true;
                city.checked = false;
                report.hidden += 1;
            }
        }

        logd!(
            "Facets: aligned (trigger={}) selected={} shown={} hidden={} unchecked={}",
            trigger.unwrap_or("-"), selected.len(), report.shown, report.hidden, report.unchecked
        );
        report
    }
}
