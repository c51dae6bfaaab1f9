//! UI Components
//!
//! Leptos components of the rental form.

mod availability_modal;
mod checkout_modal;
mod date_range_fields;
mod item_table;
mod quantity_spinner;

pub use availability_modal::AvailabilityModal;
pub use checkout_modal::CheckoutModal;
pub use date_range_fields::DateRangeFields;
pub use item_table::ItemTable;
pub use quantity_spinner::QuantitySpinner;
