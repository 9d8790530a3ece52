use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::booking::Confirmation;

const TITLE: &str = "Reserva confirmada";
const EMAIL_NOTE: &str = "Te enviamos un correo con la información del turno.";

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Calendar day of a backend date, either `YYYY-MM-DD` or a timestamp read
/// in UTC.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// `miércoles, 01/05/2024`. Unreadable dates are shown as received.
pub fn format_day(raw: &str) -> String {
    match parse_day(raw) {
        Some(day) => format!("{}, {}", weekday_name(day.weekday()), day.format("%d/%m/%Y")),
        None => raw.to_string(),
    }
}

/// What the confirmation dialog shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationView {
    pub title: &'static str,
    pub date: String,
    pub time: String,
    pub message: String,
    pub note: &'static str,
    pub details: Map<String, Value>,
}

impl From<&Confirmation> for ConfirmationView {
    fn from(confirmation: &Confirmation) -> Self {
        let date = format_day(&confirmation.date);
        let message = format!(
            "Has reservado el {} a las {}.",
            date, confirmation.start_time
        );

        ConfirmationView {
            title: TITLE,
            date,
            time: confirmation.start_time.clone(),
            message,
            note: EMAIL_NOTE,
            details: confirmation.details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_weekday_and_day_month_year() {
        assert_eq!(format_day("2024-05-01"), "miércoles, 01/05/2024");
        assert_eq!(format_day("2024-05-04"), "sábado, 04/05/2024");
    }

    #[test]
    fn timestamps_are_read_in_utc() {
        assert_eq!(format_day("2024-05-01T00:00:00.000Z"), "miércoles, 01/05/2024");
        assert_eq!(format_day("2024-05-01T22:30:00-03:00"), "jueves, 02/05/2024");
        assert_eq!(format_day("2024-05-01T09:00:00"), "miércoles, 01/05/2024");
    }

    #[test]
    fn unreadable_dates_are_left_alone() {
        assert_eq!(format_day("mañana"), "mañana");
        assert_eq!(format_day(""), "");
    }

    #[test]
    fn view_reads_like_the_dialog() {
        let confirmation = Confirmation {
            date: "2024-05-01".into(),
            start_time: "10:00".into(),
            details: Map::new(),
        };

        let view = ConfirmationView::from(&confirmation);
        assert_eq!(view.title, "Reserva confirmada");
        assert_eq!(view.message, "Has reservado el miércoles, 01/05/2024 a las 10:00.");
    }
}
