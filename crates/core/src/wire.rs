//! Lenient deserializers for fields the backend is inconsistent about.
//!
//! Floor labels arrive as JSON numbers or strings, progress may be `null`,
//! and unset dates may be `null` or `""`. A malformed date or status on one
//! row degrades that field instead of failing the whole list.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::status::WorkStatus;
use crate::types::Date;

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Label {
    fn into_string(self) -> String {
        match self {
            Label::Text(s) => s,
            Label::Int(n) => n.to_string(),
            Label::Float(f) => f.to_string(),
        }
    }
}

/// A required label that may be encoded as a number.
pub fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Label::deserialize(deserializer)?.into_string())
}

/// An optional label that may be encoded as a number.
pub fn opt_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Label>::deserialize(deserializer)?.map(Label::into_string))
}

/// Progress percentage; `null` reads as 0 and out-of-range values clamp.
pub fn progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Other(IgnoredAny),
}

/// Optional ISO date; blank strings read as unset, unparsable values are
/// logged and read as unset.
pub fn opt_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    let text = match Option::<Loose>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Loose::Other(_)) => {
            tracing::warn!("Ignoring non-string date");
            return Ok(None);
        }
        Some(Loose::Text(s)) => s,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    // Some rows carry a full timestamp; only the date part matters.
    let day = trimmed.split('T').next().unwrap_or(trimmed);
    match Date::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(e) => {
            tracing::warn!(value = %text, error = %e, "Ignoring unparsable date");
            Ok(None)
        }
    }
}

/// Work status; `null` and unknown names read as not started.
pub fn status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WorkStatus, D::Error> {
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(WorkStatus::default()),
        Some(Loose::Text(name)) => Ok(name.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %name, "Unknown work status, reading as not started");
            WorkStatus::default()
        })),
        Some(Loose::Other(_)) => {
            tracing::warn!("Ignoring non-string work status");
            Ok(WorkStatus::default())
        }
    }
}
