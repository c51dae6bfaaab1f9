//! Availability Intervals
//!
//! Splits a time window into intervals of constant availability for one
//! item, given its stock and the approved bookings that reserve it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::item::AvailabilityPoint;
use crate::time_frame::TimeFrame;

/// Approved rental holding `quantity` pieces of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub quantity: i64,
}

impl Booking {
    fn overlaps(&self, begin: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > begin
    }
}

/// Span with a constant number of available pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
    pub value: i64,
}

/// Availability of an item with `stock` pieces across `window`
pub fn availability_intervals(window: &TimeFrame, stock: i64, bookings: &[Booking]) -> Vec<Interval> {
    let relevant: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| booking.overlaps(window.start, window.end))
        .collect();

    let mut borders = vec![window.start, window.end];
    for booking in &relevant {
        if booking.start > window.start {
            borders.push(booking.start);
        }
        if booking.end < window.end {
            borders.push(booking.end);
        }
    }
    borders.sort();
    borders.dedup();

    borders
        .windows(2)
        .map(|pair| {
            let (begin, end) = (pair[0], pair[1]);
            let reserved: i64 = relevant
                .iter()
                .filter(|booking| booking.overlaps(begin, end))
                .map(|booking| booking.quantity)
                .sum();
            Interval {
                begin,
                end,
                value: stock - reserved,
            }
        })
        .collect()
}

/// Chart samples: each interval contributes its beginning and its end
pub fn chart_points(intervals: &[Interval]) -> Vec<AvailabilityPoint> {
    intervals
        .iter()
        .flat_map(|interval| {
            [
                AvailabilityPoint::new(interval.begin, interval.value),
                AvailabilityPoint::new(interval.end, interval.value),
            ]
        })
        .collect()
}

/// Lowest availability across the intervals
pub fn minimum_availability(intervals: &[Interval]) -> Option<i64> {
    intervals.iter().map(|interval| interval.value).min()
}
