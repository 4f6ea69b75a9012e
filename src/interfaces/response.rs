//! The envelope every endpoint answers with.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// `{success, error, data, meta}`. `data` and `meta` vary per endpoint.
///
/// A body with `success: 0` never reaches this type: the session turns it
/// into an error first.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: Deserialize<'de> + Default, M: Deserialize<'de> + Default"))]
pub struct ApiResponse<D, M = EmptyMeta> {
    #[serde(default)]
    pub success: i64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub data: D,
    #[serde(default, deserialize_with = "lenient_default")]
    pub meta: M,
}

/// Endpoints that send `meta: []`.
pub type EmptyMeta = serde_json::Value;

/// Some fields come back as a number or a string depending on the school.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    Text(String),
}

impl Default for NumberOrString {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// Treat an explicit `null` like a missing field. The server sends `[]` for
/// an empty object, which also falls back to the default if it doesn't fit.
pub(crate) fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(T::default()),
        Some(Value::Array(items)) if items.is_empty() => {
            Ok(T::deserialize(Value::Array(items)).unwrap_or_default())
        }
        Some(value) => T::deserialize(value).map_err(de::Error::custom),
    }
}

/// Remove `null` members from every object, so the `#[serde(default)]`
/// models fill them in like missing keys.
///
/// Map-shaped payloads lose their `null` entries too.
pub(crate) fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}
