//! Quantity Input Controller
//!
//! Increment, decrement and validation rules for the per-item quantity
//! spinners. Invalid input is never reported to the user; it is clamped.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::item::ItemId;

/// Inclusive `[min, max]` range of a quantity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct QuantityBounds {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: i64,
    max: i64,
}

impl TryFrom<RawBounds> for QuantityBounds {
    type Error = EngineError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        QuantityBounds::new(raw.min, raw.max)
    }
}

impl QuantityBounds {
    /// Quantities are counts, so `min` may not be negative
    pub fn new(min: i64, max: i64) -> Result<Self, EngineError> {
        if min < 0 || min > max {
            return Err(EngineError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Read the leading integer of a raw input value
///
/// Accepts surrounding whitespace, an optional sign and trailing garbage
/// (`"3 pcs"` reads as 3). Returns `None` when no digit leads the text.
/// Values too large for `i64` saturate.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Normalize a raw value into the bounds
///
/// Non-numeric input and values below `min` become `min`, values above
/// `max` become `max`.
pub fn validate(raw: &str, bounds: QuantityBounds) -> i64 {
    match parse_quantity(raw) {
        Some(value) if value > bounds.max => bounds.max,
        Some(value) if value >= bounds.min => value,
        _ => bounds.min,
    }
}

/// Capabilities a quantity input has to offer the controller
pub trait QuantityField {
    /// The item this field selects a quantity for
    fn item(&self) -> &ItemId;
    /// Current raw text of the input
    fn value(&self) -> String;
    fn set_value(&mut self, value: String);
    fn bounds(&self) -> QuantityBounds;
}

/// Notification sent after every increment, decrement or validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub item: ItemId,
    pub quantity: i64,
}

type ChangeListener = Box<dyn FnMut(&QuantityChange)>;

/// Drives quantity fields and tells subscribers about new values
#[derive(Default)]
pub struct QuantityController {
    listeners: Vec<ChangeListener>,
}

impl QuantityController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to validated quantity changes
    pub fn on_quantity_changed(&mut self, listener: impl FnMut(&QuantityChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Step the field up by one, then validate
    pub fn increment<F: QuantityField>(&mut self, field: &mut F) -> i64 {
        self.step(field, 1)
    }

    /// Step the field down by one, then validate
    pub fn decrement<F: QuantityField>(&mut self, field: &mut F) -> i64 {
        self.step(field, -1)
    }

    /// Clamp the field's current text into its bounds and notify
    pub fn validate<F: QuantityField>(&mut self, field: &mut F) -> i64 {
        let raw = field.value();
        let value = validate(&raw, field.bounds());
        let normalized = value.to_string();
        if raw != normalized {
            log::debug!("quantity of {} normalized from {:?} to {}", field.item(), raw, value);
            field.set_value(normalized);
        }

        let change = QuantityChange {
            item: field.item().clone(),
            quantity: value,
        };
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
        value
    }

    fn step<F: QuantityField>(&mut self, field: &mut F, delta: i64) -> i64 {
        // Unreadable text counts as zero here; validation re-clamps it.
        let current = parse_quantity(&field.value()).unwrap_or(0);
        field.set_value(current.saturating_add(delta).to_string());
        self.validate(field)
    }
}
