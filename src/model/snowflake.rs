//! Serde adapters for Discord snowflake IDs.
//!
//! Discord IDs exceed the integer precision of JavaScript numbers, so every ID crosses the
//! wire as a decimal string and is parsed back into `u64` on each side. Reading also accepts
//! plain JSON numbers, which other writers of the same documents may use.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    /// `None` for an empty string.
    fn parse<E: serde::de::Error>(self) -> Result<Option<u64>, E> {
        match self {
            RawId::Number(id) => Ok(Some(id)),
            RawId::Text(text) if text.is_empty() => Ok(None),
            RawId::Text(text) => text.parse::<u64>().map(Some).map_err(E::custom),
        }
    }
}

pub mod as_string {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        RawId::deserialize(deserializer)?
            .parse::<D::Error>()?
            .ok_or_else(|| D::Error::custom("empty snowflake"))
    }
}

/// `None` is written as an empty string, and an empty string reads back as `None`.
pub mod option_as_string {
    use super::*;

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawId>::deserialize(deserializer)? {
            Some(raw) => raw.parse::<D::Error>(),
            None => Ok(None),
        }
    }
}

/// `null` reads back as an empty list.
pub mod vec_as_string {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        Option::<Vec<RawId>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(|raw| {
                raw.parse::<D::Error>()?
                    .ok_or_else(|| D::Error::custom("empty snowflake"))
            })
            .collect()
    }
}
