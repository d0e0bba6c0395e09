//! Reservation payloads.
//!
//! The platform's order form is supplied as a JSON template; only the court
//! and time fields are written over it.

use std::io::ErrorKind;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{BookingError, BookingResult};
use crate::ground::Ground;
use crate::scanner::CandidateInterval;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type Template = Map<String, Value>;

pub fn parse_template(text: &str) -> BookingResult<Template> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(BookingError::TemplateNotObject),
    }
}

pub fn load_template<P: AsRef<Path>>(path: P) -> BookingResult<Template> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BookingError::TemplateMissing(path.display().to_string()),
        _ => BookingError::Io(e),
    })?;
    parse_template(&text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReservationWindow {
    pub fn of(interval: &CandidateInterval, anchor: NaiveDateTime, slot: Duration) -> Self {
        let start = anchor + slot * interval.start_index as i32;
        let end = start + slot * interval.length as i32;
        ReservationWindow { start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRequest {
    pub ground: Ground,
    pub interval: CandidateInterval,
    pub window: ReservationWindow,
    pub payload: Template,
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    template: Option<Template>,
    anchor: NaiveDateTime,
    slot: Duration,
    order_date: NaiveDateTime,
}

impl RequestBuilder {
    /// `anchor` is the target day at the first slot's wall-clock time,
    /// `order_date` the moment the order is placed.
    pub fn new(anchor: NaiveDateTime, slot: Duration, order_date: NaiveDateTime) -> Self {
        RequestBuilder {
            template: None,
            anchor,
            slot,
            order_date,
        }
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(&self, interval: &CandidateInterval, ground: &Ground) -> BookingResult<ReservationRequest> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| BookingError::TemplateMissing("no template supplied".to_string()))?;

        let window = ReservationWindow::of(interval, self.anchor, self.slot);
        let order_date = self.order_date.format(TIME_FORMAT).to_string();
        let start = window.start.format(TIME_FORMAT).to_string();
        let end = window.end.format(TIME_FORMAT).to_string();

        let mut payload = template.clone();
        payload.insert("groundId".into(), Value::from(ground.id.clone()));
        payload.insert("groundName".into(), Value::from(ground.label()));
        // The form posts every time field twice.
        for (key, tmp_key, value) in [
            ("orderDate", "tmpOrderDate", order_date),
            ("startTime", "tmpStartTime", start),
            ("endTime", "tmpEndTime", end),
        ] {
            payload.insert(key.into(), Value::from(value.clone()));
            payload.insert(tmp_key.into(), Value::from(value));
        }

        Ok(ReservationRequest {
            ground: ground.clone(),
            interval: *interval,
            window,
            payload,
        })
    }
}
