//! The "create collection point" page controller.
//!
//! Owns a [`CreatePointForm`] and wires it to the outside world: the
//! backend and IBGE clients for data, a [`PositionProvider`] for the initial
//! map center. Loads are fire-and-forget from the caller's point of view: a
//! failure is logged and the corresponding state stays empty. Only
//! [`CreatePointPage::submit`] reports errors.

pub mod geolocation;

use ecoleta_client::{BackendClient, ClientError, IbgeClient};
use ecoleta_core::{CityLoad, Coordinate, CoreError, CreatePointForm, Route};

use self::geolocation::PositionProvider;

pub const SUCCESS_NOTICE: &str = "Ponto de coleta criado com sucesso!";

/// A user interaction on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A text input changed; `field` is the input's `name` attribute.
    InputChanged { field: String, value: String },
    UfSelected(String),
    CitySelected(String),
    MapClicked(Coordinate),
    ItemToggled(u32),
}

/// What the page does after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: &'static str,
    pub route: Route,
}

pub struct CreatePointPage<P> {
    backend: BackendClient,
    ibge: IbgeClient,
    geolocation: P,
    form: CreatePointForm,
}

impl<P: PositionProvider> CreatePointPage<P> {
    pub fn new(backend: BackendClient, ibge: IbgeClient, geolocation: P) -> Self {
        Self {
            backend,
            ibge,
            geolocation,
            form: CreatePointForm::new(),
        }
    }

    pub fn form(&self) -> &CreatePointForm {
        &self.form
    }

    /// Runs the initial loads concurrently: UF list, item catalog and device
    /// position. Each result is applied independently; failures leave the
    /// default state in place.
    pub async fn mount(&mut self) {
        let (ufs, items, position) = tokio::join!(
            self.ibge.list_ufs(),
            self.backend.list_items(),
            self.geolocation.current_position(),
        );

        match ufs {
            Ok(ufs) => self.form.geo.set_ufs(ufs),
            Err(error) => tracing::warn!(%error, "failed to load UF list"),
        }

        match items {
            Ok(items) => self.form.set_items(items),
            Err(error) => tracing::warn!(%error, "failed to load item catalog"),
        }

        match position {
            Ok(center) => {
                tracing::debug!(%center, "centering map on device position");
                self.form.map.recenter(center);
            }
            Err(error) => tracing::warn!(%error, "geolocation unavailable, map stays at origin"),
        }
    }

    /// Applies one user interaction. Selecting a new UF also loads its cities.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] for an input change naming a field
    /// the form does not have.
    pub async fn dispatch(&mut self, event: PageEvent) -> Result<(), CoreError> {
        match event {
            PageEvent::InputChanged { field, value } => {
                self.form.data.set_by_name(&field, &value)?;
            }
            PageEvent::UfSelected(uf) => self.select_uf(&uf).await,
            PageEvent::CitySelected(city) => self.form.geo.select_city(&city),
            PageEvent::MapClicked(at) => self.form.click_map(at),
            PageEvent::ItemToggled(id) => {
                self.form.toggle_item(id);
            }
        }
        Ok(())
    }

    /// Selects `uf` and, if that changed the selection, loads its cities.
    pub async fn select_uf(&mut self, uf: &str) {
        let Some(load) = self.begin_city_load(uf) else {
            return;
        };
        let result = self.ibge.list_cities(&load.uf).await;
        self.finish_city_load(&load, result);
    }

    /// First half of [`CreatePointPage::select_uf`]: updates the selection
    /// and returns the ticket for the city request, if one is needed.
    pub fn begin_city_load(&mut self, uf: &str) -> Option<CityLoad> {
        self.form.geo.select_uf(uf)
    }

    /// Second half of [`CreatePointPage::select_uf`]: applies a city-list
    /// response unless a newer UF selection has superseded it.
    pub fn finish_city_load(&mut self, load: &CityLoad, result: Result<Vec<String>, ClientError>) {
        match result {
            Ok(cities) => {
                let count = cities.len();
                if self.form.geo.apply_cities(load, cities) {
                    tracing::debug!(uf = %load.uf, count, "city list updated");
                } else {
                    tracing::debug!(uf = %load.uf, "discarding stale city list");
                }
            }
            Err(error) => tracing::warn!(uf = %load.uf, %error, "failed to load city list"),
        }
    }

    /// Posts the current form state to the backend.
    ///
    /// Nothing is validated first; sentinel UF/city values and an origin
    /// marker are sent as they are.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from `POST /points`. No notice or
    /// navigation is produced in that case.
    pub async fn submit(&self) -> Result<SubmitOutcome, ClientError> {
        let payload = self.form.payload();
        self.backend.create_point(&payload).await?;
        Ok(SubmitOutcome {
            notice: SUCCESS_NOTICE,
            route: Route::Home,
        })
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
