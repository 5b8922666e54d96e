//! Structural deep merging of dynamically typed values.
//!
//! Values are classified into records, lists, sets, maps and everything else,
//! and each kind is merged by its own strategy:
//!
//! - records merge key by key, recursively;
//! - lists concatenate;
//! - sets and maps union, later entries winning;
//! - anything else takes the last value.
//!
//! Each strategy may be replaced with a custom function. Two modes exist:
//! [`DeepMerge`] builds a new value and never touches its inputs, while
//! [`DeepMergeInto`] mutates a target in place. Both are configured through
//! builders ([`MergeOptions`] and [`MergeIntoOptions`]) and may carry
//! caller-defined metadata down the recursion.
//!
//! ```
//! use deepmerge::Value;
//! use serde_json::json;
//!
//! let merged = deepmerge::merge(&[
//!     Value::from(json!({"a": [1], "b": {"x": 1}})),
//!     Value::from(json!({"a": [2], "b": {"y": 2}})),
//! ]);
//! assert_eq!(merged, Value::from(json!({"a": [1, 2], "b": {"x": 1, "y": 2}})));
//! ```

mod action;
mod error;
pub mod in_place;
mod kind;
mod meta;
mod options;
pub mod pure;
mod result_ext;
mod settings;
mod value;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use action::{IntoOutcome, Outcome, Resolved};
pub use error::{MergeError, MergeResult};
pub use in_place::{DeepMergeInto, MergeIntoFn, MergeIntoUtils};
pub use kind::{Kind, classify, has_own_key, record_keys};
pub use meta::{KeyContext, MetaUpdater, replace_meta};
pub use options::{MergeIntoOptions, MergeOptions, Strategy, ValueFilter};
pub use pure::{DeepMerge, FilterFn, MergeFn, MergeUtils};
pub use result_ext::{CallbackResultExt, MergeResultExt};
pub use settings::{DEFAULT_ENV_PREFIX, KindPolicy, MergeSettings};
pub use value::{Key, Opaque, Record, Symbol, Value, ValueMap, ValueSet, from_value, to_value};

/// Merge `values` with the built-in strategies.
///
/// Returns [`Value::Undefined`] when `values` is empty.
#[must_use]
pub fn merge(values: &[Value]) -> Value {
    // Built-in strategies never fail.
    DeepMerge::<KeyContext>::default()
        .merge(values)
        .unwrap_or_default()
}

/// Merge `sources` into `target` with the built-in strategies.
pub fn merge_into(target: &mut Value, sources: &[Value]) {
    // Built-in strategies never fail.
    DeepMergeInto::<KeyContext>::default()
        .merge_into(target, sources)
        .unwrap_or_default();
}

/// Merge serialisable layers and deserialise the result.
///
/// Layers are merged in order, so later layers win for scalar fields while
/// nested structs merge field by field and sequences concatenate. A `None`
/// serialises as `null` and overrides earlier layers; skip it with
/// `#[serde(skip_serializing_if = "Option::is_none")]` to let them stand.
///
/// # Errors
///
/// Returns [`MergeError::Conversion`] when a layer cannot be serialised or the
/// merged value cannot be deserialised into `T`, and
/// [`MergeError::Unrepresentable`] when there are no layers.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct Layer {
///     #[serde(skip_serializing_if = "Option::is_none")]
///     port: Option<u16>,
///     hosts: Vec<String>,
/// }
///
/// #[derive(Deserialize)]
/// struct Server { port: u16, hosts: Vec<String> }
///
/// let server: Server = deepmerge::merge_as(&[
///     Layer { port: Some(80), hosts: vec!["a".into()] },
///     Layer { port: None, hosts: vec!["b".into()] },
/// ])?;
/// assert_eq!(server.port, 80);
/// assert_eq!(server.hosts, ["a", "b"]);
/// # Ok::<_, deepmerge::MergeError>(())
/// ```
pub fn merge_as<T, S>(layers: &[S]) -> MergeResult<T>
where
    T: DeserializeOwned,
    S: Serialize,
{
    let values = layers.iter().map(to_value).collect::<MergeResult<Vec<_>>>()?;
    let merged = DeepMerge::<KeyContext>::default().merge(&values)?;
    from_value(&merged)
}
