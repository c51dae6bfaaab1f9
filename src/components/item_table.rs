//! Item Table Component
//!
//! One row per rental item with its quantity spinner and an entry point
//! to the availability chart.

use leptos::prelude::*;
use rental_engine::QuantityController;

use crate::components::QuantitySpinner;
use crate::context::{use_form_context, Surface};
use crate::store::{store_set_quantity, use_form_store, FormStateStoreFields};

/// Table of all selectable items
#[component]
pub fn ItemTable() -> impl IntoView {
    let store = use_form_store();
    let ctx = use_form_context();

    // One controller for every spinner; changes land in the store
    let controller = StoredValue::new_local({
        let mut controller = QuantityController::new();
        controller.on_quantity_changed(move |change| store_set_quantity(&store, change));
        controller
    });

    view! {
        <table class="table rental-items">
            <thead>
                <tr>
                    <th>"Item"</th>
                    <th>"Location"</th>
                    <th>"Quantity"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || store.items().get()
                    key=|item| item.id.clone()
                    children=move |item| {
                        let id = item.id.clone();
                        view! {
                            <tr class="rental-item">
                                <td class="rental-item-name">{item.name.clone()}</td>
                                <td class="rental-item-location">{item.location.clone()}</td>
                                <td class="rental-item-selected">
                                    <QuantitySpinner
                                        item=item.id.clone()
                                        bounds=item.bounds
                                        initial=item.selected_quantity
                                        controller=controller
                                    />
                                </td>
                                <td>
                                    <button
                                        type="button"
                                        class="btn btn-link availability-btn"
                                        on:click=move |_| ctx.open(Surface::Availability(id.clone()))
                                    >
                                        "Availability"
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
