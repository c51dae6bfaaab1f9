//! Date Range Fields Component
//!
//! Start and end pickers whose bounds follow each other.

use chrono::NaiveDateTime;
use leptos::prelude::*;
use rental_engine::{DateBounds, DateEnd, DatePicker, DatePairSetup, DateRangeSync};

/// Value format of `<input type="datetime-local">`
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format a date for a datetime-local input
fn input_value(date: NaiveDateTime) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Read a datetime-local value; empty or malformed input clears the date
fn parse_input_value(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Picker bounds held in a signal so the input attributes follow them
#[derive(Clone, Copy)]
struct SignalPicker(RwSignal<DateBounds>);

impl DatePicker for SignalPicker {
    fn set_minimum_date(&mut self, date: Option<NaiveDateTime>) {
        self.0.update(|bounds| bounds.set_minimum_date(date));
    }

    fn set_maximum_date(&mut self, date: Option<NaiveDateTime>) {
        self.0.update(|bounds| bounds.set_maximum_date(date));
    }
}

/// Start/end date pair of the form
#[component]
pub fn DateRangeFields(
    setup: DatePairSetup,
    start: RwSignal<Option<NaiveDateTime>>,
    end: RwSignal<Option<NaiveDateTime>>,
    now: NaiveDateTime,
    #[prop(into)] start_label: String,
    #[prop(into)] end_label: String,
) -> impl IntoView {
    let start_bounds = RwSignal::new(DateBounds::default());
    let end_bounds = RwSignal::new(DateBounds::default());

    let sync = StoredValue::new({
        let mut sync = DateRangeSync::new(SignalPicker(start_bounds), SignalPicker(end_bounds), setup.policy, now);
        sync.on_date_changed(DateEnd::Start, start.get_untracked());
        sync.on_date_changed(DateEnd::End, end.get_untracked());
        sync
    });

    let on_date_changed = move |which: DateEnd, raw: String| {
        let date = parse_input_value(&raw);
        match which {
            DateEnd::Start => start.set(date),
            DateEnd::End => end.set(date),
        }
        sync.update_value(|sync| sync.on_date_changed(which, date));
    };

    let step = setup.picker.step_seconds().to_string();

    view! {
        <div class="row date-range">
            <div class="form-group col-sm-6">
                <label for="start_date_picker">{start_label}</label>
                <input
                    type="datetime-local"
                    class="form-control"
                    id="start_date_picker"
                    step=step.clone()
                    min=move || start_bounds.get().min.map(input_value)
                    max=move || start_bounds.get().max.map(input_value)
                    prop:value=move || start.get().map(input_value).unwrap_or_default()
                    on:change=move |ev| on_date_changed(DateEnd::Start, event_target_value(&ev))
                />
            </div>
            <div class="form-group col-sm-6">
                <label for="end_date_picker">{end_label}</label>
                <input
                    type="datetime-local"
                    class="form-control"
                    id="end_date_picker"
                    step=step
                    min=move || end_bounds.get().min.map(input_value)
                    max=move || end_bounds.get().max.map(input_value)
                    prop:value=move || end.get().map(input_value).unwrap_or_default()
                    on:change=move |ev| on_date_changed(DateEnd::End, event_target_value(&ev))
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_value_round_trip() {
        let date = NaiveDateTime::parse_from_str("2018-05-01 09:05", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(input_value(date), "2018-05-01T09:05");
        assert_eq!(parse_input_value("2018-05-01T09:05"), Some(date));
    }

    #[test]
    fn test_parse_input_value_with_seconds() {
        let date = NaiveDateTime::parse_from_str("2018-05-01 09:05:30", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parse_input_value("2018-05-01T09:05:30"), Some(date));
    }

    #[test]
    fn test_parse_input_value_cleared() {
        assert_eq!(parse_input_value(""), None);
        assert_eq!(parse_input_value("tomorrow"), None);
    }
}
