//! Page Setup
//!
//! Render-time configuration embedded in the page as JSON. Every section
//! has a default, so a page without setup yields an empty form.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::availability::{availability_intervals, chart_points, minimum_availability, Booking};
use crate::chart::ChartStyle;
use crate::date_range::{DateEnd, DatePairPolicy, PickerOptions};
use crate::error::EngineResult;
use crate::item::{AvailabilityPoint, ItemId, RentalItem};
use crate::quantity::{validate, QuantityBounds};
use crate::selection::{FieldNaming, SelectionAggregator};
use crate::time_frame::TimeFrame;

/// Whole setup document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormSetup {
    pub items: Vec<ItemSetup>,
    pub dates: DatePairSetup,
    pub checkout: CheckoutSetup,
    pub chart: ChartStyle,
}

/// Quantity restored from an earlier submission
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSetup {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Pieces the depot owns
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub min: i64,
    /// Defaults to the lowest availability in the window
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub selected: Option<RawQuantity>,
    /// Precomputed chart samples; computed from `bookings` when absent
    #[serde(default)]
    pub availability: Option<Vec<AvailabilityPoint>>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatePairSetup {
    pub start_name: String,
    pub end_name: String,
    /// Form-formatted start, e.g. from the query string
    pub start: Option<String>,
    pub end: Option<String>,
    pub policy: DatePairPolicy,
    pub picker: PickerOptions,
}

impl Default for DatePairSetup {
    fn default() -> Self {
        Self {
            start_name: "start_date".to_string(),
            end_name: "return_date".to_string(),
            start: None,
            end: None,
            policy: DatePairPolicy::default(),
            picker: PickerOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutSetup {
    /// Form action URL
    pub action: Option<String>,
    pub emit_hidden_fields: bool,
    pub field_naming: FieldNaming,
}

impl Default for CheckoutSetup {
    fn default() -> Self {
        Self {
            action: None,
            emit_hidden_fields: true,
            field_naming: FieldNaming::default(),
        }
    }
}

impl CheckoutSetup {
    pub fn aggregator(&self) -> SelectionAggregator {
        SelectionAggregator::new(self.field_naming.clone(), self.emit_hidden_fields)
    }
}

impl FormSetup {
    /// Read the setup document; blank text gives the default setup
    pub fn from_json(text: &str) -> EngineResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    pub fn time_frame(&self, now: NaiveDateTime) -> TimeFrame {
        TimeFrame::from_form(self.dates.start.as_deref(), self.dates.end.as_deref(), now)
    }

    /// Values the date pair starts out with
    pub fn initial_dates(&self, now: NaiveDateTime) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        if self.dates.start.is_some() || self.dates.end.is_some() {
            let frame = self.time_frame(now);
            return (Some(frame.start), Some(frame.end));
        }

        let now = self.dates.picker.snap(now);
        (
            self.dates.policy.default_value(DateEnd::Start, now),
            self.dates.policy.default_value(DateEnd::End, now),
        )
    }

    /// Build the item collection with bounds and availability attached
    pub fn rental_items(&self, now: NaiveDateTime) -> EngineResult<Vec<RentalItem>> {
        let window = self.time_frame(now).availability_window();
        self.items.iter().map(|setup| setup.to_item(&window)).collect()
    }
}

impl ItemSetup {
    fn to_item(&self, window: &TimeFrame) -> EngineResult<RentalItem> {
        let (points, lowest) = match &self.availability {
            Some(points) => (points.clone(), points.iter().map(|point| point.value).min()),
            None => {
                let intervals = availability_intervals(window, self.quantity, &self.bookings);
                (chart_points(&intervals), minimum_availability(&intervals))
            }
        };

        let max = match self.max {
            Some(max) => max,
            None => lowest.unwrap_or(self.quantity).max(self.min),
        };
        let bounds = QuantityBounds::new(self.min, max)?;

        let selected = match &self.selected {
            Some(RawQuantity::Number(value)) => bounds.clamp(*value),
            Some(RawQuantity::Text(text)) => validate(text, bounds),
            None => bounds.min(),
        };

        Ok(RentalItem::new(self.id.clone(), self.name.clone(), self.location.clone(), bounds)
            .with_availability(points)
            .with_selected(selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::time_frame::parse_form_date;

    fn at(text: &str) -> NaiveDateTime {
        parse_form_date(text).unwrap()
    }

    const SETUP: &str = r#"{
        "items": [
            {"id": 7, "name": "Beamer", "location": "Shelf 2", "quantity": 3,
             "bookings": [{"start": "2018-05-02T00:00:00", "end": "2018-05-03T00:00:00", "quantity": 2}]},
            {"id": "B", "name": "Saw", "quantity": 4, "max": 2, "selected": "5",
             "availability": [{"x": "2018-05-01T00:00:00", "y": 4}, {"x": "2018-05-02T00:00:00", "y": 4}]}
        ],
        "dates": {"start": "2018-05-01 10:00", "end": "2018-05-03 10:00", "policy": {"start_not_before_now": true}},
        "checkout": {"action": "/rentals/create/", "field_naming": {"prefix": "item-", "suffix": "-quantity"}}
    }"#;

    #[test]
    fn test_blank_setup_is_empty_form() {
        let setup = FormSetup::from_json("  ").unwrap();
        assert!(setup.items.is_empty());
        assert_eq!(setup.dates.start_name, "start_date");
        assert_eq!(setup.dates.end_name, "return_date");
        assert!(setup.checkout.emit_hidden_fields);
    }

    #[test]
    fn test_malformed_setup() {
        assert!(matches!(FormSetup::from_json("{\"items\": 3}"), Err(EngineError::InvalidSetup(_))));
    }

    #[test]
    fn test_items_from_bookings_and_points() {
        let setup = FormSetup::from_json(SETUP).unwrap();
        let items = setup.rental_items(at("2018-04-01 00:00")).unwrap();

        let beamer = &items[0];
        assert_eq!(beamer.id, ItemId::from("7"));
        assert_eq!(beamer.bounds.max(), 1);
        assert_eq!(beamer.selected_quantity, 0);
        // Window 04-30..05-04 split at 05-02 and 05-03
        assert_eq!(beamer.availability.len(), 6);

        let saw = &items[1];
        assert_eq!(saw.location, "");
        assert_eq!(saw.bounds.max(), 2);
        assert_eq!(saw.selected_quantity, 2);
        assert_eq!(saw.availability.len(), 2);
    }

    #[test]
    fn test_explicit_bounds_must_be_ordered() {
        let setup = FormSetup::from_json(r#"{"items": [{"id": 1, "name": "X", "min": 3, "max": 1}]}"#).unwrap();
        assert_eq!(
            setup.rental_items(at("2018-04-01 00:00")),
            Err(EngineError::InvalidBounds { min: 3, max: 1 })
        );
    }

    #[test]
    fn test_negative_minimum_is_rejected() {
        let setup = FormSetup::from_json(r#"{"items": [{"id": "A", "name": "X", "quantity": 4, "min": -2}]}"#).unwrap();
        assert_eq!(
            setup.rental_items(at("2018-04-01 00:00")),
            Err(EngineError::InvalidBounds { min: -2, max: 4 })
        );
    }

    #[test]
    fn test_overbooked_item_keeps_valid_bounds() {
        let setup = FormSetup::from_json(
            r#"{"items": [{"id": 1, "name": "X", "quantity": 1,
                "bookings": [{"start": "2018-01-01T00:00:00", "end": "2019-01-01T00:00:00", "quantity": 2}]}]}"#,
        )
        .unwrap();
        let items = setup.rental_items(at("2018-04-01 00:00")).unwrap();
        assert_eq!(items[0].bounds.max(), 0);
    }

    #[test]
    fn test_initial_dates() {
        let setup = FormSetup::from_json(SETUP).unwrap();
        let now = at("2018-04-01 00:00");
        assert_eq!(
            setup.initial_dates(now),
            (Some(at("2018-05-01 10:00")), Some(at("2018-05-03 10:00")))
        );

        let blank = FormSetup::default();
        let now = NaiveDateTime::parse_from_str("2018-04-01 08:07:30", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(blank.initial_dates(now), (Some(at("2018-04-01 08:05")), None));
    }

    #[test]
    fn test_checkout_naming() {
        let setup = FormSetup::from_json(SETUP).unwrap();
        assert_eq!(setup.checkout.action.as_deref(), Some("/rentals/create/"));
        assert!(setup.dates.policy.start_not_before_now);
        assert!(!setup.dates.policy.default_end_to_now);
        let items = setup.rental_items(at("2018-04-01 00:00")).unwrap();
        let summary = setup.checkout.aggregator().on_surface_opened(&items);
        assert_eq!(summary.hidden_fields[0].name, "item-B-quantity");
    }
}
