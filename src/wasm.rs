//! Bindings for the booking frontend. Records cross the boundary in their
//! REST form (`booking_date`, `"HH:MM"` times); bookable slots come back as a
//! plain object keyed by `"YYYY-MM-DD"`.

use crate::calendar::week_dates;
use crate::record::{AvailabilityWindow, Reservation};
use crate::slots::{compute_bookable_slots, compute_valid_end_times};
use crate::time::ClockTime;
use crate::validate::validate_booking;
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    Ok(value.serialize(&serializer)?)
}

fn parse_date(date: &str) -> Result<NaiveDate, JsValue> {
    date.parse()
        .map_err(|e: chrono::ParseError| JsValue::from_str(&format!("{}: {}", date, e)))
}

fn parse_time(time: &str) -> Result<ClockTime, JsValue> {
    time.parse()
        .map_err(|e: crate::time::ParseError| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = bookableSlots)]
pub fn bookable_slots(
    availability: JsValue,
    reservations: JsValue,
    today: &str,
) -> Result<JsValue, JsValue> {
    let availability: Vec<AvailabilityWindow> = serde_wasm_bindgen::from_value(availability)?;
    let reservations: Vec<Reservation> = serde_wasm_bindgen::from_value(reservations)?;

    to_js(&compute_bookable_slots(
        &availability,
        &reservations,
        parse_date(today)?,
    ))
}

#[wasm_bindgen(js_name = validEndTimes)]
pub fn valid_end_times(start_time: &str, available_start_times: JsValue) -> Result<JsValue, JsValue> {
    let available: Vec<ClockTime> = serde_wasm_bindgen::from_value(available_start_times)?;

    to_js(&compute_valid_end_times(parse_time(start_time)?, &available))
}

#[wasm_bindgen(js_name = weekDates)]
pub fn week_dates_js(offset: i32, today: &str) -> Result<JsValue, JsValue> {
    match week_dates(i64::from(offset), parse_date(today)?) {
        Some(week) => to_js(&week),
        None => Err(JsValue::from_str("Week is out of range")),
    }
}

/// Resolves to `null` when the booking is acceptable, otherwise the error
/// tagged by `kind`
#[wasm_bindgen(js_name = validateBooking)]
pub fn validate_booking_js(
    request: JsValue,
    availability: JsValue,
    reservations: JsValue,
    today: &str,
) -> Result<JsValue, JsValue> {
    let request: Reservation = serde_wasm_bindgen::from_value(request)?;
    let availability: Vec<AvailabilityWindow> = serde_wasm_bindgen::from_value(availability)?;
    let reservations: Vec<Reservation> = serde_wasm_bindgen::from_value(reservations)?;

    match validate_booking(&request, &availability, &reservations, parse_date(today)?) {
        Ok(()) => Ok(JsValue::NULL),
        Err(error) => to_js(&error),
    }
}
