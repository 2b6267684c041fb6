//! Report timestamps: `YYYY-MM-DD HH:MM:SS[.ffffff]+00:00`.
//!
//! Microseconds are only written when non-zero, matching how the stack
//! reports have always been rendered.

use chrono::{DateTime, ParseError, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

pub fn format(timestamp: &DateTime<Utc>) -> String {
    let micros = timestamp.timestamp_subsec_micros();
    if micros == 0 {
        format!("{}+00:00", timestamp.format(DATE_TIME))
    } else {
        format!("{}.{:06}+00:00", timestamp.format(DATE_TIME), micros)
    }
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(value, PARSE_FORMAT).map(|timestamp| timestamp.with_timezone(&Utc))
}

/// `#[serde(with = ...)]` adapter for optional timestamps.
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&format(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|value| parse(&value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
