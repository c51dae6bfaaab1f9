//! Rental Form App
//!
//! Date pair, item table, checkout button and the two overlay surfaces.

use leptos::prelude::*;
use reactive_stores::Store;
use rental_engine::TimeFrame;

use crate::components::{AvailabilityModal, CheckoutModal, DateRangeFields, ItemTable};
use crate::context::{FormContext, Surface};
use crate::page;
use crate::store::{FormState, FormStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let setup = page::load_setup();
    let now = page::now();

    let items = setup.rental_items(now).unwrap_or_else(|err| {
        log::error!("{}", err);
        Vec::new()
    });
    let (initial_start, initial_end) = setup.initial_dates(now);

    // State
    let store = Store::new(FormState::new(items));
    let start = RwSignal::new(initial_start);
    let end = RwSignal::new(initial_end);
    let (surface, set_surface) = signal::<Option<Surface>>(None);
    let ctx = FormContext::new((surface, set_surface));

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Submit affordance follows the gate the quantity listener refreshes
    let enabled = Memo::new(move |_| store.gate().read().is_enabled());

    // Reloads the page with availability computed for the chosen dates
    let reload_href = move || match (start.get(), end.get()) {
        (Some(start), Some(end)) => Some(format!("?{}", TimeFrame { start, end: end.max(start) }.to_query())),
        _ => None,
    };

    let aggregator = setup.checkout.aggregator();

    view! {
        <div class="rental-form">
            <DateRangeFields
                setup=setup.dates.clone()
                start=start
                end=end
                now=now
                start_label="Start"
                end_label="Return"
            />
            <p class="help-block">
                <a href=reload_href>"Show availability for the selected period"</a>
            </p>

            <ItemTable />

            <button
                type="button"
                class="btn btn-primary checkout-btn"
                disabled=move || !enabled.get()
                on:click=move |_| ctx.open(Surface::Checkout)
            >
                "Review selection"
            </button>

            <CheckoutModal
                aggregator=aggregator
                action=setup.checkout.action.clone()
                dates=setup.dates.clone()
                start=start
                end=end
                enabled=enabled
            />
            <AvailabilityModal style=setup.chart.clone() />
        </div>
    }
}
