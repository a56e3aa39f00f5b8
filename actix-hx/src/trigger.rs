use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::HxError;

#[derive(Clone, Debug)]
enum Detail {
    Absent,
    Json(Value),
    Unserializable(Arc<serde_json::Error>),
}

/// A client-side event to be fired by htmx, with an optional JSON detail.
///
/// Events without a detail keep a trigger header in its compact list form
/// (`"event1, event2"`). As soon as one event carries a detail, even an
/// explicit `null`, the header is written as a JSON object instead.
///
/// ```
/// use actix_hx::TriggerEvent;
///
/// let plain = TriggerEvent::new("refreshList");
/// let detailed = TriggerEvent::with_detail("showMessage", "Saved!");
/// assert!(!plain.has_detail());
/// assert!(detailed.has_detail());
/// ```
#[derive(Clone, Debug)]
pub struct TriggerEvent {
    name: String,
    detail: Detail,
}

impl TriggerEvent {
    /// An event without a detail.
    pub fn new(name: impl Into<String>) -> Self {
        TriggerEvent {
            name: name.into(),
            detail: Detail::Absent,
        }
    }

    /// An event carrying any serializable detail.
    ///
    /// A detail that cannot be represented as JSON does not fail here; the
    /// error is reported when the event is merged into a header, and that
    /// header is then left untouched.
    pub fn with_detail<T>(name: impl Into<String>, detail: T) -> Self
    where
        T: Serialize,
    {
        let detail = match serde_json::to_value(detail) {
            Ok(value) => Detail::Json(value),
            Err(err) => Detail::Unserializable(Arc::new(err)),
        };

        TriggerEvent {
            name: name.into(),
            detail,
        }
    }

    /// An event carrying a ready-made JSON detail.
    pub fn from_value(name: impl Into<String>, detail: Value) -> Self {
        TriggerEvent {
            name: name.into(),
            detail: Detail::Json(detail),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The JSON detail, if one was given and it could be serialized.
    pub fn detail(&self) -> Option<&Value> {
        match &self.detail {
            Detail::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn has_detail(&self) -> bool {
        !matches!(self.detail, Detail::Absent)
    }

    fn detail_value(&self) -> Result<Value, HxError> {
        match &self.detail {
            Detail::Absent => Ok(Value::Null),
            Detail::Json(value) => Ok(value.clone()),
            Detail::Unserializable(source) => Err(HxError::Serialization {
                event: self.name.clone(),
                source: Arc::clone(source),
            }),
        }
    }
}

impl From<&str> for TriggerEvent {
    fn from(name: &str) -> Self {
        TriggerEvent::new(name)
    }
}

impl From<String> for TriggerEvent {
    fn from(name: String) -> Self {
        TriggerEvent::new(name)
    }
}

/// Computes the new value of a trigger header after adding `events` to its
/// `current` value.
///
/// - With no current value and no details, the result is the trimmed event
///   names joined with `", "`, duplicates kept.
/// - A current value that parses as a JSON object is extended with the new
///   events; a new event replaces an existing entry with the same name and
///   missing details become `null`.
/// - A current value that is not JSON is read as a comma separated list of
///   names. Without details the new names are appended to it; with details
///   the list is upgraded to a JSON object mapping each old name to `null`
///   before the new events are added.
///
/// Names read back from a list are trimmed; new names are only trimmed when
/// they end up in a list, never when used as JSON keys.
///
/// ```
/// use actix_hx::{merge_trigger, TriggerEvent};
///
/// let list = merge_trigger(Some("a"), &[TriggerEvent::new("b")]).unwrap();
/// assert_eq!(list, "a, b");
///
/// let json = merge_trigger(Some("a"), &[TriggerEvent::with_detail("b", 1)]).unwrap();
/// assert_eq!(
///     serde_json::from_str::<serde_json::Value>(&json).unwrap(),
///     serde_json::json!({"a": null, "b": 1})
/// );
/// ```
pub fn merge_trigger(current: Option<&str>, events: &[TriggerEvent]) -> Result<String, HxError> {
    let current = current.filter(|value| !value.is_empty());
    let with_detail = events.iter().any(TriggerEvent::has_detail);

    let mut triggers = match current {
        None if !with_detail => return Ok(join_names(Vec::new(), events)),
        None => Map::new(),
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(triggers)) => triggers,
            Ok(_) => return Err(HxError::NonObjectTrigger(raw.to_string())),
            Err(_) => {
                let names = split_names(raw);
                if !with_detail {
                    return Ok(join_names(names, events));
                }

                debug!("Upgrading trigger list {:?} to JSON", raw);
                names.into_iter().map(|name| (name, Value::Null)).collect()
            }
        },
    };

    for event in events {
        triggers.insert(event.name.clone(), event.detail_value()?);
    }

    Ok(Value::Object(triggers).to_string())
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).collect()
}

fn join_names(mut names: Vec<String>, events: &[TriggerEvent]) -> String {
    names.extend(events.iter().map(|event| event.name.trim().to_string()));
    names.join(", ")
}
