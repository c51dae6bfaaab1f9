//! Quantity Spinner Component
//!
//! Text input with up/down buttons, validated on every change.

use leptos::prelude::*;
use rental_engine::{ItemId, QuantityBounds, QuantityController, QuantityField};

/// Spinner text bound to one item
#[derive(Clone)]
struct SpinnerField {
    item: ItemId,
    text: RwSignal<String>,
    bounds: QuantityBounds,
}

impl QuantityField for SpinnerField {
    fn item(&self) -> &ItemId {
        &self.item
    }

    fn value(&self) -> String {
        self.text.get_untracked()
    }

    fn set_value(&mut self, value: String) {
        self.text.set(value);
    }

    fn bounds(&self) -> QuantityBounds {
        self.bounds
    }
}

/// Quantity input of a single rental item
///
/// Button clicks stop propagating so enclosing row handlers never see them.
#[component]
pub fn QuantitySpinner(
    item: ItemId,
    bounds: QuantityBounds,
    initial: i64,
    controller: StoredValue<QuantityController, LocalStorage>,
) -> impl IntoView {
    let text = RwSignal::new(initial.to_string());
    let field = SpinnerField { item, text, bounds };

    let up_field = field.clone();
    let on_up = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let mut field = up_field.clone();
        controller.update_value(|c| {
            c.increment(&mut field);
        });
    };

    let down_field = field.clone();
    let on_down = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let mut field = down_field.clone();
        controller.update_value(|c| {
            c.decrement(&mut field);
        });
    };

    let on_change = move |ev: web_sys::Event| {
        let mut field = field.clone();
        field.set_value(event_target_value(&ev));
        controller.update_value(|c| {
            c.validate(&mut field);
        });
    };

    view! {
        <div class="number-input input-group">
            <span class="input-group-btn">
                <button type="button" class="btn btn-default number-input-down" on:click=on_down>"−"</button>
            </span>
            <input
                type="text"
                class="form-control"
                inputmode="numeric"
                data-min=bounds.min().to_string()
                data-max=bounds.max().to_string()
                prop:value=move || text.get()
                on:change=on_change
            />
            <span class="input-group-btn">
                <button type="button" class="btn btn-default number-input-up" on:click=on_up>"+"</button>
            </span>
        </div>
    }
}
