use chrono::{DateTime, Datelike, FixedOffset, Utc};

const WEEKDAYS_ES_PE: [&str; 7] = ["lun.", "mar.", "mié.", "jue.", "vie.", "sáb.", "dom."];

const MONTHS_ES_PE: [&str; 12] = [
    "ene.", "feb.", "mar.", "abr.", "may.", "jun.", "jul.", "ago.", "set.", "oct.", "nov.", "dic.",
];

/// Renders a reservation date the way `es-PE` shows a short date,
/// e.g. `lun., 04 ago. 2025`.
pub fn format_reservation_date(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    let date = timestamp.with_timezone(offset).date_naive();

    let weekday = WEEKDAYS_ES_PE[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ES_PE[date.month0() as usize];

    format!("{}, {:02} {} {}", weekday, date.day(), month, date.year())
}
