//! Form State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use rental_engine::{set_selected_quantity, CheckoutGate, QuantityChange, RentalItem};

/// Live state of the rental form
#[derive(Clone, Debug, Default, Store)]
pub struct FormState {
    /// Every item rendered in the form, in display order
    pub items: Vec<RentalItem>,
    /// Submit affordance, refreshed on every quantity change
    pub gate: CheckoutGate,
}

impl FormState {
    pub fn new(items: Vec<RentalItem>) -> Self {
        let gate = CheckoutGate::new(&items);
        Self { items, gate }
    }
}

/// Type alias for the store
pub type FormStore = Store<FormState>;

/// Get the form store from context
pub fn use_form_store() -> FormStore {
    expect_context::<FormStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Write a validated quantity back to its item and refresh the gate
pub fn store_set_quantity(store: &FormStore, change: &QuantityChange) {
    {
        let items_field = store.items();
        let mut items = items_field.write();
        if let Err(err) = set_selected_quantity(&mut items[..], &change.item, change.quantity) {
            log::warn!("{}", err);
        }
    }
    store.gate().write().on_quantity_changed(&store.items().read_untracked());
}
