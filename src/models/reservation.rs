use std::{collections::HashMap, fmt};

use chrono::{DateTime, Utc};

use crate::models::firestore::Value;

pub const CUSTOMER_NAME_FIELD: &str = "nombreCliente";
pub const PARTY_SIZE_FIELD: &str = "pax";
pub const SHIFT_FIELD: &str = "turno";
pub const RESERVATION_DATE_FIELD: &str = "fechaReserva";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationDate {
    Present(DateTime<Utc>),
    Absent,
}

/// Party size as written: a whole number, or any other scalar shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartySize {
    Count(i64),
    Text(String),
}

impl PartySize {
    /// Zero and the empty string fall back to the default like a missing value.
    pub fn is_blank(&self) -> bool {
        match self {
            PartySize::Count(count) => *count == 0,
            PartySize::Text(text) => text.is_empty(),
        }
    }
}

impl From<i64> for PartySize {
    fn from(count: i64) -> Self {
        PartySize::Count(count)
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartySize::Count(count) => write!(f, "{}", count),
            PartySize::Text(text) => f.write_str(text),
        }
    }
}

/// A reservation as written by end users. Every field may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRecord {
    pub customer_name: Option<String>,
    pub party_size: Option<PartySize>,
    pub shift: Option<String>,
    pub reservation_date: ReservationDate,
}

impl Default for ReservationRecord {
    fn default() -> Self {
        Self {
            customer_name: None,
            party_size: None,
            shift: None,
            reservation_date: ReservationDate::Absent,
        }
    }
}

impl ReservationRecord {
    /// Scalars of any type are kept in their display form; empty, zero,
    /// null, `false` and non-scalar values count as missing.
    pub fn from_fields(fields: &HashMap<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::display_text);

        let party_size = match fields.get(PARTY_SIZE_FIELD) {
            Some(Value::IntegerValue(value)) => Some(PartySize::Count(*value)),
            Some(Value::DoubleValue(value))
                if value.is_finite()
                    && value.fract() == 0.0
                    && value.abs() < i64::MAX as f64 =>
            {
                Some(PartySize::Count(*value as i64))
            }
            Some(value) => value.display_text().map(PartySize::Text),
            None => None,
        };

        let reservation_date = match fields.get(RESERVATION_DATE_FIELD) {
            Some(Value::TimestampValue(timestamp)) => ReservationDate::Present(*timestamp),
            _ => ReservationDate::Absent,
        };

        Self {
            customer_name: text(CUSTOMER_NAME_FIELD),
            party_size,
            shift: text(SHIFT_FIELD),
            reservation_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationCreated {
    pub reservation_id: String,
    pub record: ReservationRecord,
    /// Document fields as received, for diagnostics.
    pub fields: HashMap<String, Value>,
}
