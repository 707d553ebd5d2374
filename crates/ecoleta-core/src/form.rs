//! Form state for registering a collection point.
//!
//! [`CreatePointForm`] aggregates everything the page tracks: contact fields,
//! the UF/city selection, map state, the item catalog and the selected item
//! ids. It performs no I/O; loaders feed it results and the submitter reads
//! a [`PointPayload`] back out of it.

use std::str::FromStr;

use crate::geo::GeoSelection;
use crate::map::MapView;
use crate::types::{Coordinate, Item, PointPayload};
use crate::CoreError;

/// Free-text inputs, addressed by their HTML `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Whatsapp,
}

impl FromStr for FormField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FormField::Name),
            "email" => Ok(FormField::Email),
            "whatsapp" => Ok(FormField::Whatsapp),
            other => Err(CoreError::UnknownField(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

impl FormData {
    pub fn set(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Whatsapp => &mut self.whatsapp,
        };
        value.clone_into(slot);
    }

    /// Sets the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if `name` is not one of
    /// `name`, `email` or `whatsapp`; the form is left unchanged.
    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let field = name.parse::<FormField>()?;
        self.set(field, value);
        Ok(())
    }
}

/// Ordered set of selected item ids. Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedItems(Vec<u32>);

impl SelectedItems {
    /// Adds `id` if absent, removes it if present. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.0.iter().position(|&i| i == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One cell of the item grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTile<'a> {
    pub item: &'a Item,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePointForm {
    pub data: FormData,
    pub geo: GeoSelection,
    pub map: MapView,
    items: Vec<Item>,
    selected: SelectedItems,
}

impl CreatePointForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Toggles item `id`.
    ///
    /// Ids are not checked against the catalog.
    pub fn toggle_item(&mut self, id: u32) -> bool {
        self.selected.toggle(id)
    }

    #[must_use]
    pub fn selected_items(&self) -> &SelectedItems {
        &self.selected
    }

    #[must_use]
    pub fn item_tiles(&self) -> Vec<ItemTile<'_>> {
        self.items
            .iter()
            .map(|item| ItemTile {
                item,
                selected: self.selected.contains(item.id),
            })
            .collect()
    }

    pub fn click_map(&mut self, at: Coordinate) {
        self.map.click(at);
    }

    /// Builds the `POST /points` body from the current state.
    ///
    /// Sentinel UF/city values are sent as-is.
    #[must_use]
    pub fn payload(&self) -> PointPayload {
        let marker = self.map.marker();
        PointPayload {
            name: self.data.name.clone(),
            email: self.data.email.clone(),
            whatsapp: self.data.whatsapp.clone(),
            uf: self.geo.selected_uf().to_owned(),
            city: self.geo.selected_city().to_owned(),
            lat: marker.latitude,
            long: marker.longitude,
            items: self.selected.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
