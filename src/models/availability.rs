use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::lenient::Scalar;

/// Marker the calendar backend uses for a bookable slot.
pub const ENABLED_MARKER: &str = "S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: String,
    pub enabled: bool,
}

/// One calendar day of a branch with its reception slots, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Deserialize)]
struct WireDay {
    #[serde(rename = "U_Fecha")]
    date: Scalar,
    #[serde(rename = "U_HorarioRecep", default)]
    slots: Value,
}

#[derive(Deserialize)]
struct WireSlot {
    hs: Scalar,
    #[serde(default)]
    habilitad: Value,
}

/// Reads the `/getShiftPerMonth` payload without filtering anything out.
/// A day whose slot list is missing or not a list has no slots.
pub fn parse_calendar(payload: Value) -> Vec<DayAvailability> {
    let Value::Array(items) = payload else {
        warn!("calendar payload is not an array, ignoring it");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WireDay>(item) {
            Ok(day) => Some(DayAvailability {
                date: day.date.0,
                slots: parse_slots(day.slots),
            }),
            Err(e) => {
                warn!("skipping malformed calendar day: {}", e);
                None
            }
        })
        .collect()
}

fn parse_slots(raw: Value) -> Vec<TimeSlot> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WireSlot>(item) {
            Ok(slot) => Some(TimeSlot {
                time: slot.hs.0,
                enabled: slot.habilitad.as_str() == Some(ENABLED_MARKER),
            }),
            Err(e) => {
                warn!("skipping malformed time slot: {}", e);
                None
            }
        })
        .collect()
}

/// Keeps only enabled slots and drops the days left without any.
pub fn retain_enabled(days: Vec<DayAvailability>) -> Vec<DayAvailability> {
    days.into_iter()
        .filter_map(|mut day| {
            day.slots.retain(|slot| slot.enabled);
            (!day.slots.is_empty()).then_some(day)
        })
        .collect()
}

/// Times offered on `date`.
///
/// `None` means the calendar has not been loaded. An empty calendar is
/// returned as an empty list, and so is a date the calendar does not know.
pub fn available_times(days: Option<&[DayAvailability]>, date: &str) -> Option<Vec<String>> {
    let days = days?;

    let times = days
        .iter()
        .find(|day| day.date == date)
        .map(|day| {
            day.slots
                .iter()
                .filter(|slot| slot.enabled)
                .map(|slot| slot.time.clone())
                .collect()
        })
        .unwrap_or_default();

    Some(times)
}
