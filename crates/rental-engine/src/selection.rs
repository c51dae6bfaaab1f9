//! Selection Aggregator
//!
//! Derives the checkout summary and the hidden submission fields from the
//! current item collection. Nothing here is cached between openings of the
//! review surface.

use serde::{Deserialize, Serialize};

use crate::item::{total_selected, ItemId, RentalItem};

/// One row of the review table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub location: String,
    pub quantity: i64,
}

/// Hidden input submitted with the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Derived view of the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub rows: Vec<SummaryRow>,
    pub hidden_fields: Vec<HiddenField>,
}

impl CheckoutSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_quantity(&self) -> i64 {
        self.rows.iter().fold(0i64, |total, row| total.saturating_add(row.quantity))
    }
}

/// How hidden item fields are named for the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNaming {
    pub prefix: String,
    pub suffix: String,
}

impl Default for FieldNaming {
    fn default() -> Self {
        Self {
            prefix: "item_".to_string(),
            suffix: String::new(),
        }
    }
}

impl FieldNaming {
    pub fn field_name(&self, id: &ItemId) -> String {
        format!("{}{}{}", self.prefix, id, self.suffix)
    }
}

/// Builds checkout summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAggregator {
    naming: FieldNaming,
    emit_hidden_fields: bool,
}

impl Default for SelectionAggregator {
    fn default() -> Self {
        Self::new(FieldNaming::default(), true)
    }
}

impl SelectionAggregator {
    pub fn new(naming: FieldNaming, emit_hidden_fields: bool) -> Self {
        Self {
            naming,
            emit_hidden_fields,
        }
    }

    /// Rebuild the summary when the review surface opens
    pub fn on_surface_opened(&self, items: &[RentalItem]) -> CheckoutSummary {
        let mut summary = CheckoutSummary::default();

        for item in items.iter().filter(|item| item.is_selected()) {
            summary.rows.push(SummaryRow {
                name: item.name.clone(),
                location: item.location.clone(),
                quantity: item.selected_quantity,
            });

            if self.emit_hidden_fields {
                summary.hidden_fields.push(HiddenField {
                    name: self.naming.field_name(&item.id),
                    value: item.selected_quantity.to_string(),
                });
            }
        }

        log::debug!("checkout summary rebuilt with {} rows", summary.rows.len());
        summary
    }
}

/// Whether the collection holds anything worth submitting
pub fn checkout_enabled(items: &[RentalItem]) -> bool {
    total_selected(items) > 0
}

/// Submit affordance state, refreshed on every quantity change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutGate {
    enabled: bool,
}

impl CheckoutGate {
    pub fn new(items: &[RentalItem]) -> Self {
        Self {
            enabled: checkout_enabled(items),
        }
    }

    pub fn on_quantity_changed(&mut self, items: &[RentalItem]) -> bool {
        self.enabled = checkout_enabled(items);
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
