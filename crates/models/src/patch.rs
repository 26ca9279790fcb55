use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including an explicit `null`) as `Some(..)`.
///
/// Combined with `#[serde(default)]` on an `Option<Option<T>>` this separates
/// "absent" (`None`, keep) from "null" (`Some(None)`, clear).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Shallow-merge helper for nullable fields.
pub fn merge<T>(target: &mut Option<T>, update: Option<Option<T>>) {
    if let Some(v) = update {
        *target = v;
    }
}

/// Shallow-merge helper for required fields.
pub fn set<T>(target: &mut T, update: Option<T>) {
    if let Some(v) = update {
        *target = v;
    }
}
