//! Deserialization helpers for fields the API is inconsistent about.

use serde::{Deserialize, Deserializer};

/// Accept an id sent either as a JSON number or as a numeric string.
pub(crate) fn option_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(id)) => id.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
