//! Construction of domain values from untyped JSON.
//!
//! JSON decoders parse bytes into a `serde_json::Value` and then hand it to
//! the target type. A type opts in by implementing `FromJson`; keyed
//! collections additionally need `FromJsonKeyed`.

use std::collections::HashMap;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Builds one instance from an untyped JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Option<Self>;

    /// Builds every element that can be built. Elements that fail are
    /// skipped; the order of the rest is kept.
    fn from_json_array(values: &[Value]) -> Option<Vec<Self>> {
        Some(values.iter().filter_map(Self::from_json).collect())
    }
}

/// Types that can be collected into a map keyed by one of their fields.
pub trait FromJsonKeyed: FromJson {
    type Key: Eq + Hash;

    fn key(&self) -> Self::Key;

    /// Later elements replace earlier ones with the same key.
    fn from_json_keyed(values: &[Value]) -> Option<HashMap<Self::Key, Self>> {
        let items = Self::from_json_array(values)?;
        Some(items.into_iter().map(|item| (item.key(), item)).collect())
    }
}

/// Builds a serde-deserializable type from a JSON value.
///
/// ```
/// use datasource_core::{construct::from_serde_value, FromJson};
/// use serde::Deserialize;
/// use serde_json::Value;
///
/// #[derive(Deserialize)]
/// struct Tag {
///     name: String,
/// }
///
/// impl FromJson for Tag {
///     fn from_json(value: &Value) -> Option<Self> {
///         from_serde_value(value)
///     }
/// }
///
/// let tag = Tag::from_json(&serde_json::json!({ "name": "rust" })).unwrap();
/// assert_eq!(tag.name, "rust");
/// ```
pub fn from_serde_value<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}
