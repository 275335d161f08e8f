//! Raw driver values and their wire form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::model::time::{format_timestamp, from_epoch_millis, parse_timestamp};
use crate::model::SemanticType;

/// A value as handed over by a database driver.
///
/// Decodes from any JSON primitive. A native timestamp arrives as
/// `{"$date": "<ISO-8601>"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawValueRepr")]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Timestamp(NaiveDateTime),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValueRepr {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date {
        #[serde(rename = "$date")]
        date: String,
    },
}

impl TryFrom<RawValueRepr> for RawValue {
    type Error = String;

    fn try_from(repr: RawValueRepr) -> Result<Self, Self::Error> {
        Ok(match repr {
            RawValueRepr::Null => RawValue::Null,
            RawValueRepr::Bool(b) => RawValue::Bool(b),
            RawValueRepr::Number(n) => RawValue::Number(n),
            RawValueRepr::String(s) => RawValue::String(s),
            RawValueRepr::Date { date } => RawValue::Timestamp(
                parse_timestamp(&date).ok_or_else(|| format!("invalid $date value '{date}'"))?,
            ),
        })
    }
}

impl RawValue {
    /// JavaScript-style truthiness, used to decide whether time coercion applies.
    fn is_truthy(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            RawValue::String(s) => !s.is_empty(),
            RawValue::Timestamp(_) => true,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(RawValue::Null, RawValue::Number)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(ts: NaiveDateTime) -> Self {
        RawValue::Timestamp(ts)
    }
}

/// A value as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl From<&str> for WireValue {
    fn from(s: &str) -> Self {
        WireValue::String(s.to_string())
    }
}

impl From<String> for WireValue {
    fn from(s: String) -> Self {
        WireValue::String(s)
    }
}

impl From<i32> for WireValue {
    fn from(n: i32) -> Self {
        WireValue::Number(n.into())
    }
}

impl From<i64> for WireValue {
    fn from(n: i64) -> Self {
        WireValue::Number(n.into())
    }
}

impl From<bool> for WireValue {
    fn from(b: bool) -> Self {
        WireValue::Bool(b)
    }
}

/// Coerce a raw value for a member of `semantic_type`.
///
/// Native timestamps, and truthy values of `time` members, become
/// `YYYY-MM-DDTHH:mm:ss.SSS`. Numbers on a time member are epoch
/// milliseconds. Everything else passes through unchanged.
pub fn coerce_value(raw: &RawValue, semantic_type: SemanticType) -> WireValue {
    if let RawValue::Timestamp(ts) = raw {
        return WireValue::String(format_timestamp(ts));
    }
    if semantic_type == SemanticType::Time && raw.is_truthy() {
        if let Some(ts) = time_of(raw) {
            return WireValue::String(format_timestamp(&ts));
        }
        tracing::warn!(value = ?raw, "time value could not be parsed, passing it through");
    }

    match raw {
        RawValue::Null => WireValue::Null,
        RawValue::Bool(b) => WireValue::Bool(*b),
        RawValue::Number(n) => WireValue::Number(n.clone()),
        RawValue::String(s) => WireValue::String(s.clone()),
        RawValue::Timestamp(ts) => WireValue::String(format_timestamp(ts)),
    }
}

fn time_of(raw: &RawValue) -> Option<NaiveDateTime> {
    match raw {
        RawValue::String(s) => parse_timestamp(s),
        RawValue::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            from_epoch_millis(millis)
        }
        RawValue::Timestamp(ts) => Some(*ts),
        RawValue::Null | RawValue::Bool(_) => None,
    }
}
