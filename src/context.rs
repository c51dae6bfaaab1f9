//! Form Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use rental_engine::ItemId;

/// Overlay regions of the form
#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    /// Review of the current selection before submitting
    Checkout,
    /// Availability chart of one item
    Availability(ItemId),
}

/// Form-wide signals provided via context
#[derive(Clone, Copy)]
pub struct FormContext {
    /// Surface currently shown (None = no overlay) - read
    pub surface: ReadSignal<Option<Surface>>,
    /// Surface currently shown - write
    set_surface: WriteSignal<Option<Surface>>,
}

impl FormContext {
    pub fn new(surface: (ReadSignal<Option<Surface>>, WriteSignal<Option<Surface>>)) -> Self {
        Self {
            surface: surface.0,
            set_surface: surface.1,
        }
    }

    /// Show a surface, replacing whichever one is open
    pub fn open(&self, surface: Surface) {
        self.set_surface.set(Some(surface));
    }

    /// Hide the open surface
    pub fn close(&self) {
        self.set_surface.set(None);
    }

    pub fn is_open(&self, surface: &Surface) -> bool {
        self.surface.with(|open| open.as_ref() == Some(surface))
    }
}

/// Get the form context
pub fn use_form_context() -> FormContext {
    use_context::<FormContext>().expect("FormContext should be provided")
}
