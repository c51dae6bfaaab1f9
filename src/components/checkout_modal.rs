//! Checkout Modal Component
//!
//! Review surface listing the selected items. Wraps the submission form
//! with one hidden field per selected item plus the two dates.

use chrono::NaiveDateTime;
use leptos::prelude::*;
use rental_engine::{CheckoutSummary, DatePairSetup, SelectionAggregator};

use crate::context::{use_form_context, Surface};
use crate::store::{use_form_store, FormStateStoreFields};

/// Checkout review and submit dialog
#[component]
pub fn CheckoutModal(
    aggregator: SelectionAggregator,
    action: Option<String>,
    dates: DatePairSetup,
    start: RwSignal<Option<NaiveDateTime>>,
    end: RwSignal<Option<NaiveDateTime>>,
    enabled: Memo<bool>,
) -> impl IntoView {
    let store = use_form_store();
    let ctx = use_form_context();
    let is_open = Memo::new(move |_| ctx.is_open(&Surface::Checkout));

    // Rebuilt from the store on every opening, empty while closed
    let summary = Memo::new(move |_| {
        if is_open.get() {
            aggregator.on_surface_opened(&store.items().read())
        } else {
            CheckoutSummary::default()
        }
    });

    let start_picker = dates.picker.clone();
    let end_picker = dates.picker;

    view! {
        <div class=move || if is_open.get() { "modal checkout-modal in" } else { "modal checkout-modal" }>
            <div class="modal-dialog">
                <form class="modal-content" method="post" action=action>
                    <div class="modal-header">
                        <button type="button" class="close" on:click=move |_| ctx.close()>"×"</button>
                        <h4 class="modal-title">"Your selection"</h4>
                    </div>
                    <div class="modal-body">
                        <table class="table rental-summary">
                            <thead>
                                <tr>
                                    <th>"Item"</th>
                                    <th>"Location"</th>
                                    <th>"Quantity"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || summary.get().rows.into_iter().map(|row| view! {
                                    <tr class="rental-summary-item">
                                        <td>{row.name}</td>
                                        <td>{row.location}</td>
                                        <td>{row.quantity}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                            <tfoot>
                                <tr class="rental-summary-total">
                                    <td colspan="2">"Total"</td>
                                    <td>{move || summary.get().total_quantity()}</td>
                                </tr>
                            </tfoot>
                        </table>

                        {move || summary.get().hidden_fields.into_iter().map(|field| view! {
                            <input type="hidden" name=field.name value=field.value />
                        }).collect_view()}

                        <input
                            type="hidden"
                            name=dates.start_name
                            value=move || start.get().map(|date| start_picker.format(date)).unwrap_or_default()
                        />
                        <input
                            type="hidden"
                            name=dates.end_name
                            value=move || end.get().map(|date| end_picker.format(date)).unwrap_or_default()
                        />
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="btn btn-default" on:click=move |_| ctx.close()>"Back"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || !enabled.get()>
                            "Submit rental request"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
