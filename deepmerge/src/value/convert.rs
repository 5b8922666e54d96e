//! Conversions between [`Value`] and serde data.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use super::{Key, Record, Value};
use crate::{Kind, MergeError, MergeResult, MergeResultExt, classify};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(flag) => Self::Bool(flag),
            Json::Number(number) => Self::Number(number),
            Json::String(text) => Self::String(text),
            Json::Array(items) => Self::List(Arc::new(items.into_iter().map(Self::from).collect())),
            Json::Object(entries) => Self::record(
                entries
                    .into_iter()
                    .map(|(name, value)| (name, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Convert into a [`serde_json::Value`].
    ///
    /// Undefined record entries and symbol keys are dropped, undefined list
    /// items become `null`, sets become arrays and maps whose keys are all
    /// strings become objects.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Unrepresentable`] for a root [`Value::Undefined`],
    /// opaque values, and maps with non-string keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepmerge::Value;
    /// use serde_json::json;
    ///
    /// let value = Value::from(json!({"a": [1, 2]}));
    /// assert_eq!(value.to_json()?, json!({"a": [1, 2]}));
    /// # Ok::<_, deepmerge::MergeError>(())
    /// ```
    pub fn to_json(&self) -> MergeResult<Json> {
        match self {
            Self::Undefined => Err(MergeError::Unrepresentable {
                kind: Kind::None,
                detail: "undefined has no JSON form",
            }),
            Self::Null => Ok(Json::Null),
            Self::Bool(flag) => Ok(Json::Bool(*flag)),
            Self::Number(number) => Ok(Json::Number(number.clone())),
            Self::String(text) => Ok(Json::String(text.clone())),
            Self::Record(record) => record_to_json(record),
            Self::List(items) => items_to_json(items.iter()),
            Self::Set(items) => items_to_json(items.iter()),
            Self::Map(entries) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, value) in entries.iter() {
                    let Some(name) = key.as_str() else {
                        return Err(MergeError::Unrepresentable {
                            kind: Kind::Map,
                            detail: "map keys must be strings",
                        });
                    };
                    if !value.is_undefined() {
                        object.insert(name.to_owned(), value.to_json()?);
                    }
                }
                Ok(Json::Object(object))
            }
            Self::Opaque(_) => Err(MergeError::Unrepresentable {
                kind: classify(self),
                detail: "opaque payloads have no JSON form",
            }),
        }
    }
}

fn record_to_json(record: &Record) -> MergeResult<Json> {
    let mut object = Map::with_capacity(record.len());
    for (key, value) in record {
        let Key::Name(name) = key else { continue };
        if value.is_undefined() {
            continue;
        }
        object.insert(name.clone(), value.to_json()?);
    }
    Ok(Json::Object(object))
}

fn items_to_json<'a>(items: impl Iterator<Item = &'a Value>) -> MergeResult<Json> {
    items
        .map(|item| match item {
            Value::Undefined => Ok(Json::Null),
            other => other.to_json(),
        })
        .collect::<MergeResult<Vec<_>>>()
        .map(Json::Array)
}

/// Serialise `input` into a [`Value`].
///
/// # Errors
///
/// Returns [`MergeError::Conversion`] when serialisation fails.
///
/// # Examples
///
/// ```
/// use deepmerge::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server { port: u16 }
///
/// let value = to_value(&Server { port: 80 })?;
/// assert_eq!(value.field("port").and_then(|port| port.as_i64()), Some(80));
/// # Ok::<_, deepmerge::MergeError>(())
/// ```
pub fn to_value<T: Serialize + ?Sized>(input: &T) -> MergeResult<Value> {
    serde_json::to_value(input).into_merge().map(Value::from)
}

/// Deserialise a [`Value`] into `T`.
///
/// # Errors
///
/// Returns [`MergeError::Unrepresentable`] when the value has no JSON form and
/// [`MergeError::Conversion`] when deserialisation fails.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> MergeResult<T> {
    serde_json::from_value(value.to_json()?).into_merge()
}
