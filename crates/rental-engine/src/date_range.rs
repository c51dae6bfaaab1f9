//! Date Range Constraint Synchronizer
//!
//! Keeps a start/end picker pair ordered by moving the opposite field's
//! bound whenever one side changes. Already chosen dates are never
//! rewritten when a bound tightens.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::time_frame::FORM_DATE_FORMAT;

/// Which field of the pair an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateEnd {
    Start,
    End,
}

/// Bound setters of an external date picker widget
pub trait DatePicker {
    /// `None` lifts the bound
    fn set_minimum_date(&mut self, date: Option<NaiveDateTime>);
    fn set_maximum_date(&mut self, date: Option<NaiveDateTime>);
}

/// Selectable range of one picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
}

impl DatePicker for DateBounds {
    fn set_minimum_date(&mut self, date: Option<NaiveDateTime>) {
        self.min = date;
    }

    fn set_maximum_date(&mut self, date: Option<NaiveDateTime>) {
        self.max = date;
    }
}

/// Widget configuration shared by both pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// chrono format string of the displayed and submitted value
    pub display_format: String,
    pub minute_stepping: u32,
    pub allow_manual_toggle: bool,
    pub show_close_button: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            display_format: FORM_DATE_FORMAT.to_string(),
            minute_stepping: 5,
            allow_manual_toggle: true,
            show_close_button: true,
        }
    }
}

impl PickerOptions {
    pub fn format(&self, date: NaiveDateTime) -> String {
        date.format(&self.display_format).to_string()
    }

    /// Step of the input control in seconds
    pub fn step_seconds(&self) -> u32 {
        self.minute_stepping.max(1).saturating_mul(60)
    }

    /// Snap a date down onto the minute grid of the picker
    pub fn snap(&self, date: NaiveDateTime) -> NaiveDateTime {
        let step = self.minute_stepping.max(1);
        let minute = date.minute() - date.minute() % step;
        date.with_minute(minute)
            .and_then(|d| d.with_second(0))
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(date)
    }
}

/// Initial constraints of a date pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePairPolicy {
    /// The start picker never offers dates before the moment of rendering
    pub start_not_before_now: bool,
    /// The end picker shows the current time until the user picks a date
    pub default_end_to_now: bool,
}

impl DatePairPolicy {
    /// Both fields unconstrained and prefilled with the current time
    pub const fn free() -> Self {
        Self {
            start_not_before_now: false,
            default_end_to_now: true,
        }
    }

    /// Unconstrained start, end left empty until chosen
    pub const fn generic() -> Self {
        Self {
            start_not_before_now: false,
            default_end_to_now: false,
        }
    }

    /// Booking forms: no start in the past, end left empty until chosen
    pub const fn booking() -> Self {
        Self {
            start_not_before_now: true,
            default_end_to_now: false,
        }
    }

    /// Value a field shows before the user touched it
    pub fn default_value(&self, which: DateEnd, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match which {
            DateEnd::Start => Some(now),
            DateEnd::End => self.default_end_to_now.then_some(now),
        }
    }
}

impl Default for DatePairPolicy {
    fn default() -> Self {
        Self::generic()
    }
}

/// Mutual bound propagation between a start and an end picker
#[derive(Debug, Clone)]
pub struct DateRangeSync<P> {
    start: P,
    end: P,
    start_value: Option<NaiveDateTime>,
    end_value: Option<NaiveDateTime>,
    policy: DatePairPolicy,
}

impl<P: DatePicker> DateRangeSync<P> {
    pub fn new(mut start: P, end: P, policy: DatePairPolicy, now: NaiveDateTime) -> Self {
        if policy.start_not_before_now {
            start.set_minimum_date(Some(now));
        }
        Self {
            start,
            end,
            start_value: None,
            end_value: None,
            policy,
        }
    }

    /// React to a picker reporting a new date
    pub fn on_date_changed(&mut self, which: DateEnd, date: Option<NaiveDateTime>) {
        match which {
            DateEnd::Start => {
                self.start_value = date;
                self.end.set_minimum_date(date);
            }
            DateEnd::End => {
                self.end_value = date;
                self.start.set_maximum_date(date);
            }
        }

        if !self.is_consistent() {
            log::warn!(
                "date pair left inconsistent: start {:?} is after end {:?}",
                self.start_value,
                self.end_value
            );
        }
    }

    pub fn value(&self, which: DateEnd) -> Option<NaiveDateTime> {
        match which {
            DateEnd::Start => self.start_value,
            DateEnd::End => self.end_value,
        }
    }

    pub fn picker(&self, which: DateEnd) -> &P {
        match which {
            DateEnd::Start => &self.start,
            DateEnd::End => &self.end,
        }
    }

    pub fn policy(&self) -> DatePairPolicy {
        self.policy
    }

    /// Whether `start <= end` holds (trivially true while either is unset)
    pub fn is_consistent(&self) -> bool {
        match (self.start_value, self.end_value) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_frame::parse_form_date;

    fn at(text: &str) -> NaiveDateTime {
        parse_form_date(text).unwrap()
    }

    fn sync(policy: DatePairPolicy) -> DateRangeSync<DateBounds> {
        DateRangeSync::new(DateBounds::default(), DateBounds::default(), policy, at("2018-05-01 09:00"))
    }

    #[test]
    fn test_start_raises_end_minimum() {
        let mut pair = sync(DatePairPolicy::generic());
        pair.on_date_changed(DateEnd::Start, Some(at("2018-05-02 10:00")));
        assert_eq!(pair.picker(DateEnd::End).min, Some(at("2018-05-02 10:00")));
        assert_eq!(pair.picker(DateEnd::Start).max, None);
    }

    #[test]
    fn test_end_lowers_start_maximum() {
        let mut pair = sync(DatePairPolicy::generic());
        pair.on_date_changed(DateEnd::End, Some(at("2018-05-04 10:00")));
        assert_eq!(pair.picker(DateEnd::Start).max, Some(at("2018-05-04 10:00")));
        assert_eq!(pair.picker(DateEnd::End).min, None);
    }

    #[test]
    fn test_bounds_follow_every_assignment() {
        let mut pair = sync(DatePairPolicy::free());
        let dates = ["2018-05-02 10:00", "2018-05-09 08:00", "2018-05-01 12:00", "2018-05-03 18:45"];
        for (i, text) in dates.iter().enumerate() {
            let which = if i % 2 == 0 { DateEnd::Start } else { DateEnd::End };
            pair.on_date_changed(which, Some(at(text)));
            match which {
                DateEnd::Start => assert_eq!(pair.picker(DateEnd::End).min, Some(at(text))),
                DateEnd::End => assert_eq!(pair.picker(DateEnd::Start).max, Some(at(text))),
            }
        }
        assert!(pair.is_consistent());
    }

    #[test]
    fn test_cleared_date_lifts_bound() {
        let mut pair = sync(DatePairPolicy::generic());
        pair.on_date_changed(DateEnd::Start, Some(at("2018-05-02 10:00")));
        pair.on_date_changed(DateEnd::Start, None);
        assert_eq!(pair.picker(DateEnd::End).min, None);
    }

    #[test]
    fn test_existing_end_is_not_rewritten() {
        let mut pair = sync(DatePairPolicy::generic());
        pair.on_date_changed(DateEnd::End, Some(at("2018-05-02 10:00")));
        pair.on_date_changed(DateEnd::Start, Some(at("2018-05-05 10:00")));
        assert_eq!(pair.value(DateEnd::End), Some(at("2018-05-02 10:00")));
        assert!(!pair.is_consistent());
    }

    #[test]
    fn test_booking_policy() {
        let pair = sync(DatePairPolicy::booking());
        let now = at("2018-05-01 09:00");
        assert_eq!(pair.picker(DateEnd::Start).min, Some(now));
        assert_eq!(pair.picker(DateEnd::Start).max, None);
        assert_eq!(pair.policy().default_value(DateEnd::Start, now), Some(now));
        assert_eq!(pair.policy().default_value(DateEnd::End, now), None);
    }

    #[test]
    fn test_free_policy_defaults_end_to_now() {
        let pair = sync(DatePairPolicy::free());
        let now = at("2018-05-01 09:00");
        assert_eq!(pair.picker(DateEnd::Start).min, None);
        assert_eq!(pair.policy().default_value(DateEnd::End, now), Some(now));
    }

    #[test]
    fn test_picker_options_snap_and_step() {
        let options = PickerOptions::default();
        let date = NaiveDateTime::parse_from_str("2018-05-01 09:13:42", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(options.snap(date), at("2018-05-01 09:10"));
        assert_eq!(options.step_seconds(), 300);
        assert_eq!(options.format(at("2018-05-01 09:10")), "2018-05-01 09:10");
    }

    #[test]
    fn test_huge_stepping_saturates() {
        let options = PickerOptions {
            minute_stepping: u32::MAX,
            ..Default::default()
        };
        assert_eq!(options.step_seconds(), u32::MAX);
        assert_eq!(options.snap(at("2018-05-01 09:13")), at("2018-05-01 09:00"));
    }
}
