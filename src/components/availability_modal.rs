//! Availability Modal Component
//!
//! Shows the availability chart of the inspected item.

use leptos::html::Canvas;
use leptos::prelude::*;
use rental_engine::{find_item, AvailabilityChartRenderer, ChartStyle};

use crate::chart::CanvasChartBackend;
use crate::context::{use_form_context, Surface};
use crate::store::{use_form_store, FormStateStoreFields};

/// Availability inspection dialog
#[component]
pub fn AvailabilityModal(style: ChartStyle) -> impl IntoView {
    let store = use_form_store();
    let ctx = use_form_context();
    let canvas_ref = NodeRef::<Canvas>::new();

    // Dropping the stored renderer with this component destroys its chart
    let renderer = StoredValue::new_local(AvailabilityChartRenderer::new(CanvasChartBackend::new(canvas_ref), style));

    let inspected = Memo::new(move |_| match ctx.surface.get() {
        Some(Surface::Availability(id)) => find_item(&store.items().read_untracked(), &id).ok().cloned(),
        _ => None,
    });

    // Title of the chart currently shown, empty when none is
    let (caption, set_caption) = signal(String::new());
    let (live, set_live) = signal(false);

    Effect::new(move |_| {
        let item = inspected.get();
        renderer.update_value(|renderer| match &item {
            Some(item) => {
                if let Err(err) = renderer.on_surface_opened(item) {
                    log::error!("{}", err);
                }
            }
            None => renderer.on_surface_closed(),
        });
        renderer.with_value(|renderer| {
            set_caption.set(renderer.caption().unwrap_or_default().to_string());
            set_live.set(renderer.is_live());
        });
    });

    view! {
        <div class=move || if inspected.get().is_some() { "modal availability-modal in" } else { "modal availability-modal" }>
            <div class="modal-dialog modal-lg">
                <div class="modal-content">
                    <div class="modal-header">
                        <button type="button" class="close" on:click=move |_| ctx.close()>"×"</button>
                        <h4 class="modal-title">
                            "Availability of "
                            <span id="availability-item">{caption}</span>
                        </h4>
                    </div>
                    <div class="modal-body">
                        <p class="text-muted" hidden=move || live.get() || inspected.get().is_none()>
                            "The availability chart could not be drawn."
                        </p>
                        <canvas id="availability-chart" node_ref=canvas_ref></canvas>
                    </div>
                </div>
            </div>
        </div>
    }
}
