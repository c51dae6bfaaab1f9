//! Rental Time Frame
//!
//! Resolves the start/return pair a form is rendered for and the wider
//! window its availability charts cover.

use chrono::{Days, NaiveDateTime, NaiveTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Date format of the submitted form fields
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Characters kept verbatim in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Parse a date in the form format
pub fn parse_form_date(text: &str) -> EngineResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), FORM_DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(text.to_string()))
}

/// Requested rental period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeFrame {
    /// Resolve the frame from optional form values
    ///
    /// A missing or unreadable start defaults to one day from `now`, a
    /// missing or unreadable return to three days after the start. The
    /// return date never precedes the start date.
    pub fn from_form(start: Option<&str>, end: Option<&str>, now: NaiveDateTime) -> Self {
        let start = start
            .and_then(|text| parse_form_date(text).ok())
            .unwrap_or_else(|| now + Days::new(1));
        let end = end
            .and_then(|text| parse_form_date(text).ok())
            .unwrap_or_else(|| start + Days::new(3));

        Self {
            start,
            end: end.max(start),
        }
    }

    /// Midnight of the day before the start to midnight of the day after the return
    pub fn availability_window(&self) -> TimeFrame {
        let start = (self.start.date() - Days::new(1)).and_time(NaiveTime::MIN);
        let end = (self.end.date() + Days::new(1)).and_time(NaiveTime::MIN);
        TimeFrame { start, end }
    }

    /// Query string that reloads the form for this frame
    pub fn to_query(&self) -> String {
        format!(
            "start_date={}&return_date={}",
            utf8_percent_encode(&self.start.format(FORM_DATE_FORMAT).to_string(), QUERY_VALUE),
            utf8_percent_encode(&self.end.format(FORM_DATE_FORMAT).to_string(), QUERY_VALUE),
        )
    }
}
