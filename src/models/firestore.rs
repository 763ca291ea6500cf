//! JSON form of Firestore documents and document events.
//!
//! Values use the typed encoding of the Firestore API, e.g.
//! `{"stringValue": "Ana"}` or `{"integerValue": "2"}`.

use std::collections::HashMap;

use anyhow::{Error, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::reservation::{ReservationCreated, ReservationRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    #[serde(with = "int64")]
    IntegerValue(i64),
    #[serde(with = "double")]
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
    /// Value kinds this service does not model, or malformed payloads.
    #[serde(untagged)]
    Unsupported(serde_json::Value),
}

impl Value {
    /// Text a scalar shows when interpolated; `None` for empty, zero, null,
    /// `false` and non-scalar values.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Value::StringValue(text) if !text.is_empty() => Some(text.clone()),
            Value::IntegerValue(number) if *number != 0 => Some(number.to_string()),
            Value::DoubleValue(number) if *number != 0.0 && !number.is_nan() => {
                Some(match number {
                    n if *n == f64::INFINITY => "Infinity".to_string(),
                    n if *n == f64::NEG_INFINITY => "-Infinity".to_string(),
                    n => n.to_string(),
                })
            }
            Value::BooleanValue(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// int64 values travel as decimal strings, though some producers emit numbers.
mod int64 {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(D::Error::custom),
            Repr::Number(number) => Ok(number),
        }
    }
}

/// Non-finite doubles travel as `"NaN"`, `"Infinity"` and `"-Infinity"`.
mod double {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(number) => Ok(number),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => text.parse().map_err(D::Error::custom),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// `projects/{project}/databases/{database}/documents/{path}`
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    pub fn relative_path(&self) -> &str {
        self.name
            .split_once("/documents/")
            .map(|(_, path)| path)
            .unwrap_or(&self.name)
    }

    /// Id of this document when it sits directly under `collection`.
    pub fn id_in(&self, collection: &str) -> Result<&str, Error> {
        let path = self.relative_path();

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [parent, id] if *parent == collection && !id.is_empty() => Ok(*id),
            _ => Err(anyhow!(
                "Document {} is not in collection {}",
                path,
                collection
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Document>,
}

impl DocumentEventData {
    pub fn into_reservation(self, collection: &str) -> Result<ReservationCreated, Error> {
        let document = self
            .value
            .ok_or_else(|| anyhow!("Event carries no created document"))?;

        let reservation_id = document.id_in(collection)?.to_string();
        let record = ReservationRecord::from_fields(&document.fields);

        Ok(ReservationCreated {
            reservation_id,
            record,
            fields: document.fields,
        })
    }
}
