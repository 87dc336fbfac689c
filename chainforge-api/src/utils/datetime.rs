//! Timestamp serialization helpers.
//!
//! Serializes `DateTime<Utc>` as RFC3339 strings; deserializes RFC3339
//! strings as well as Unix timestamps (seconds or milliseconds,
//! auto-detected), since older platform exports carried numeric timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from an RFC3339 string or Unix timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {e}"))),
        RawTimestamp::Unix(ts) => {
            from_unix(ts).ok_or_else(|| Error::custom("invalid Unix timestamp"))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Unix(i64),
}

/// Unix timestamp with second/millisecond auto-detection: values above
/// 10^11 are interpreted as milliseconds.
fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// `Option<DateTime<Utc>>` variants of the helpers above.
pub mod option {
    use super::{from_unix, DateTime, Deserialize, Deserializer, RawTimestamp, Serializer, Utc};

    /// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<DateTime<Utc>>` from RFC3339, Unix timestamp,
    /// or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(RawTimestamp::Text(s)) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {e}"))),
            Some(RawTimestamp::Unix(ts)) => from_unix(ts)
                .map(Some)
                .ok_or_else(|| Error::custom("invalid Unix timestamp")),
            None => Ok(None),
        }
    }
}
