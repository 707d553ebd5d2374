//! State (UF) and city selection backed by the IBGE geography lists.
//!
//! Every UF change bumps a load generation and hands out a [`CityLoad`]
//! ticket. City responses are only applied when their ticket matches the
//! current generation, so a slow response for a previous UF can never
//! overwrite the list for the UF that is selected now.

use crate::types::SENTINEL;

const UF_PLACEHOLDER: &str = "Selecione um estado";
const CITY_PLACEHOLDER: &str = "Selecione uma cidade";

/// A dropdown entry: submitted `value` plus display `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: SENTINEL.to_owned(),
            label: label.to_owned(),
        }
    }

    fn same(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            label: value.to_owned(),
        }
    }
}

/// Ticket for one in-flight city-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityLoad {
    pub uf: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct GeoSelection {
    selected_uf: String,
    selected_city: String,
    ufs: Vec<String>,
    cities: Vec<String>,
    generation: u64,
}

impl Default for GeoSelection {
    fn default() -> Self {
        Self {
            selected_uf: SENTINEL.to_owned(),
            selected_city: SENTINEL.to_owned(),
            ufs: Vec::new(),
            cities: Vec::new(),
            generation: 0,
        }
    }
}

impl GeoSelection {
    #[must_use]
    pub fn selected_uf(&self) -> &str {
        &self.selected_uf
    }

    #[must_use]
    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    #[must_use]
    pub fn ufs(&self) -> &[String] {
        &self.ufs
    }

    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn set_ufs(&mut self, ufs: Vec<String>) {
        self.ufs = ufs;
    }

    /// Selects a UF.
    ///
    /// Returns `None` when the value did not change, or when it changed back
    /// to the sentinel; no city request is needed in either case. Any other
    /// change clears the current city list and returns the ticket the caller
    /// must present to [`GeoSelection::apply_cities`].
    ///
    /// The selected city is left as-is.
    pub fn select_uf(&mut self, uf: &str) -> Option<CityLoad> {
        if uf == self.selected_uf {
            return None;
        }

        self.selected_uf = uf.to_owned();
        self.cities.clear();
        self.generation += 1;

        if uf == SENTINEL {
            return None;
        }

        Some(CityLoad {
            uf: uf.to_owned(),
            generation: self.generation,
        })
    }

    /// Replaces the city list if `load` is still current.
    ///
    /// Returns `false` (and leaves the list untouched) for a stale ticket.
    pub fn apply_cities(&mut self, load: &CityLoad, cities: Vec<String>) -> bool {
        if load.generation != self.generation {
            return false;
        }
        self.cities = cities;
        true
    }

    pub fn select_city(&mut self, city: &str) {
        city.clone_into(&mut self.selected_city);
    }

    #[must_use]
    pub fn uf_options(&self) -> Vec<SelectOption> {
        options(UF_PLACEHOLDER, &self.ufs)
    }

    #[must_use]
    pub fn city_options(&self) -> Vec<SelectOption> {
        options(CITY_PLACEHOLDER, &self.cities)
    }
}

fn options(placeholder: &str, values: &[String]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(placeholder))
        .chain(values.iter().map(|v| SelectOption::same(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn starts_at_sentinels() {
        let geo = GeoSelection::default();
        assert_eq!(geo.selected_uf(), "0");
        assert_eq!(geo.selected_city(), "0");
        assert!(geo.ufs().is_empty());
        assert!(geo.cities().is_empty());
    }

    #[test]
    fn selecting_new_uf_returns_one_ticket_for_that_uf() {
        let mut geo = GeoSelection::default();
        let load = geo.select_uf("SP").expect("new UF must request cities");
        assert_eq!(load.uf, "SP");
        assert_eq!(geo.selected_uf(), "SP");
    }

    #[test]
    fn reselecting_same_uf_requests_nothing() {
        let mut geo = GeoSelection::default();
        let load = geo.select_uf("SP").unwrap();
        geo.apply_cities(&load, cities(&["Campinas"]));

        assert!(geo.select_uf("SP").is_none());
        assert_eq!(geo.cities(), ["Campinas"]);
    }

    #[test]
    fn selecting_sentinel_requests_nothing() {
        let mut geo = GeoSelection::default();
        assert!(geo.select_uf("0").is_none());
    }

    #[test]
    fn changing_uf_discards_previous_city_list() {
        let mut geo = GeoSelection::default();
        let sp = geo.select_uf("SP").unwrap();
        assert!(geo.apply_cities(&sp, cities(&["Campinas", "Santos"])));

        let rj = geo.select_uf("RJ").unwrap();
        assert!(geo.cities().is_empty(), "old cities must be dropped on UF change");

        assert!(geo.apply_cities(&rj, cities(&["Niterói"])));
        assert_eq!(geo.cities(), ["Niterói"]);
    }

    #[test]
    fn stale_city_response_is_discarded() {
        let mut geo = GeoSelection::default();
        let sp = geo.select_uf("SP").unwrap();
        let rj = geo.select_uf("RJ").unwrap();

        assert!(geo.apply_cities(&rj, cities(&["Niterói"])));
        assert!(!geo.apply_cities(&sp, cities(&["Campinas"])));
        assert_eq!(geo.cities(), ["Niterói"]);
    }

    #[test]
    fn returning_to_sentinel_invalidates_in_flight_load() {
        let mut geo = GeoSelection::default();
        let sp = geo.select_uf("SP").unwrap();
        assert!(geo.select_uf("0").is_none());
        assert!(!geo.apply_cities(&sp, cities(&["Campinas"])));
        assert!(geo.cities().is_empty());
    }

    #[test]
    fn uf_change_keeps_selected_city() {
        let mut geo = GeoSelection::default();
        geo.select_uf("SP");
        geo.select_city("Campinas");
        geo.select_uf("RJ");
        assert_eq!(geo.selected_city(), "Campinas");
    }

    #[test]
    fn options_start_with_placeholder() {
        let mut geo = GeoSelection::default();
        geo.set_ufs(cities(&["SP", "RJ"]));

        let opts = geo.uf_options();
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0].value, "0");
        assert_eq!(opts[0].label, "Selecione um estado");
        assert_eq!(opts[1].value, "SP");
        assert_eq!(opts[1].label, "SP");

        let city_opts = geo.city_options();
        assert_eq!(city_opts.len(), 1);
        assert_eq!(city_opts[0].label, "Selecione uma cidade");
    }
}
