use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

use crate::{HxError, SwapType};

/// JSON body for the `HX-Location` header.
///
/// A bare path is enough for [`location`](crate::location); this builder adds
/// the target, swap mode, extra request headers and the other options htmx
/// accepts for the follow-up request. Send it with
/// [`location_with`](crate::location_with).
///
/// ```
/// use actix_hx::{location_with, set_headers, HxLocation, SwapType};
/// use actix_web::HttpResponse;
///
/// let mut res = HttpResponse::Ok().finish();
/// set_headers(
///     &mut res,
///     [location_with(HxLocation::new("/inbox").target("#main").swap(SwapType::OuterHtml))],
/// )
/// .unwrap();
/// ```
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HxLocation {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swap: Option<SwapType>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Value>,
    #[serde(skip)]
    invalid_values: Option<Arc<serde_json::Error>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    push: Option<HistoryPush>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replace: Option<String>,
}

/// `push` is either `false` or the path to record in history.
#[derive(Clone, Debug)]
enum HistoryPush {
    Disabled,
    Path(String),
}

impl Serialize for HistoryPush {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HistoryPush::Disabled => serializer.serialize_bool(false),
            HistoryPush::Path(path) => serializer.serialize_str(path),
        }
    }
}

impl HxLocation {
    pub fn new(path: impl Into<String>) -> Self {
        HxLocation {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Element the follow-up response is swapped into.
    pub fn target(mut self, selector: impl Into<String>) -> Self {
        self.target = Some(selector.into());
        self
    }

    pub fn source(mut self, selector: impl Into<String>) -> Self {
        self.source = Some(selector.into());
        self
    }

    /// Event that triggers the follow-up request.
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn swap(mut self, swap: SwapType) -> Self {
        self.swap = Some(swap);
        self
    }

    /// Name of a client-side callback that handles the response.
    pub fn handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Part of the follow-up response to swap in.
    pub fn select(mut self, selector: impl Into<String>) -> Self {
        self.select = Some(selector.into());
        self
    }

    /// Adds a header to the follow-up request, replacing one of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Values submitted with the follow-up request.
    ///
    /// Values without a JSON representation make the header fail to build
    /// with [`HxError::Location`] when it is set.
    pub fn values<T: Serialize>(mut self, values: T) -> Self {
        match serde_json::to_value(values) {
            Ok(values) => {
                self.values = Some(values);
                self.invalid_values = None;
            }
            Err(err) => {
                self.values = None;
                self.invalid_values = Some(Arc::new(err));
            }
        }
        self
    }

    /// Keeps the navigation out of the browser history.
    pub fn disable_push(mut self) -> Self {
        self.push = Some(HistoryPush::Disabled);
        self
    }

    /// Records `path` in the browser history instead of the request path.
    pub fn push_path(mut self, path: impl Into<String>) -> Self {
        self.push = Some(HistoryPush::Path(path.into()));
        self
    }

    /// Replaces the current history entry with `path`.
    pub fn replace(mut self, path: impl Into<String>) -> Self {
        self.replace = Some(path.into());
        self
    }

    pub(crate) fn to_header_value(&self) -> Result<String, HxError> {
        if let Some(err) = &self.invalid_values {
            return Err(HxError::Location(Arc::clone(err)));
        }
        serde_json::to_string(self).map_err(|err| HxError::Location(Arc::new(err)))
    }
}
