//! Rental Form Engine
//!
//! State rules of the rental booking form, free of any DOM:
//! - quantity: spinner increment/decrement and clamping
//! - date_range: start/end bound propagation
//! - selection: checkout summary, hidden fields and the enablement flag
//! - chart: availability chart configuration and lifecycle
//! - availability, time_frame, setup: render-time data preparation

mod availability;
mod chart;
mod date_range;
mod error;
mod item;
mod quantity;
mod selection;
mod setup;
mod time_frame;


pub use availability::{availability_intervals, chart_points, minimum_availability, Booking, Interval};
pub use chart::{suggested_max, AvailabilityChartRenderer, ChartBackend, ChartConfig, ChartHandle, ChartStyle, LiveChart};
pub use date_range::{DateBounds, DateEnd, DatePairPolicy, DatePicker, DateRangeSync, PickerOptions};
pub use error::{EngineError, EngineResult};
pub use item::{find_item, set_selected_quantity, total_selected, AvailabilityPoint, ItemId, RentalItem};
pub use quantity::{parse_quantity, validate, QuantityBounds, QuantityChange, QuantityController, QuantityField};
pub use selection::{checkout_enabled, CheckoutGate, CheckoutSummary, FieldNaming, HiddenField, SelectionAggregator, SummaryRow};
pub use setup::{CheckoutSetup, DatePairSetup, FormSetup, ItemSetup, RawQuantity};
pub use time_frame::{parse_form_date, TimeFrame, FORM_DATE_FORMAT};
