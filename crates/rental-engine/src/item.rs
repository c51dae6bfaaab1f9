//! Rental Items
//!
//! The shared item collection every component reads from.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::quantity::QuantityBounds;

/// Identifier of a rental item, unique within one form render
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// Server-rendered pages use numeric primary keys, hand-written ones use strings.
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ItemId(text),
            RawId::Number(number) => ItemId(number.to_string()),
        })
    }
}

/// One sample of an item's availability time series
///
/// Serialized as `{x, y}`, the shape the chart library consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPoint {
    #[serde(rename = "x", alias = "timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "y", alias = "value")]
    pub value: i64,
}

impl AvailabilityPoint {
    pub fn new(timestamp: NaiveDateTime, value: i64) -> Self {
        Self { timestamp, value }
    }
}

/// A bookable unit shown as one row of the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalItem {
    pub id: ItemId,
    pub name: String,
    pub location: String,
    /// Always a validated value within `bounds`
    pub selected_quantity: i64,
    pub bounds: QuantityBounds,
    /// Attached at render time, never mutated afterwards
    pub availability: Vec<AvailabilityPoint>,
}

impl RentalItem {
    /// Create an item with nothing selected and no availability data
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, location: impl Into<String>, bounds: QuantityBounds) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            selected_quantity: bounds.min(),
            bounds,
            availability: Vec::new(),
        }
    }

    pub fn with_availability(mut self, availability: Vec<AvailabilityPoint>) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_selected(mut self, quantity: i64) -> Self {
        self.selected_quantity = self.bounds.clamp(quantity);
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected_quantity > 0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Find an item by ID
pub fn find_item<'a>(items: &'a [RentalItem], id: &ItemId) -> EngineResult<&'a RentalItem> {
    items
        .iter()
        .find(|item| &item.id == id)
        .ok_or_else(|| EngineError::UnknownItem(id.to_string()))
}

/// Store a validated quantity on the item with the given ID
pub fn set_selected_quantity(items: &mut [RentalItem], id: &ItemId, quantity: i64) -> EngineResult<()> {
    let item = items
        .iter_mut()
        .find(|item| &item.id == id)
        .ok_or_else(|| EngineError::UnknownItem(id.to_string()))?;
    item.selected_quantity = item.bounds.clamp(quantity);
    Ok(())
}

/// Sum of selected quantities over the whole collection
pub fn total_selected(items: &[RentalItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |total, item| total.saturating_add(item.selected_quantity))
}
