use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::HttpResponse;
use indexmap::IndexMap;
use log::warn;

use crate::headers::ResponseHeaders;
use crate::{merge_trigger, HxError, HxLocation, SwapType, TriggerEvent, TriggerType};

/// Anything that holds response headers that decorators can read and write.
pub trait HeaderSink {
    /// The current value of `name`, if present and valid UTF-8.
    fn get_header(&self, name: &str) -> Option<&str>;

    /// Sets `name` to `value`, replacing any previous value.
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HxError>;
}

impl HeaderSink for HeaderMap {
    fn get_header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HxError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HxError::InvalidHeaderName(name.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| HxError::InvalidHeaderValue {
                name: name.to_string(),
                value: value.to_string(),
            })?;

        self.insert(header_name, header_value);
        Ok(())
    }
}

impl<B> HeaderSink for HttpResponse<B> {
    fn get_header(&self, name: &str) -> Option<&str> {
        self.headers().get_header(name)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HxError> {
        self.headers_mut().set_header(name, value)
    }
}

/// Plain header table. Names are stored exactly as given and never rejected.
impl HeaderSink for IndexMap<String, String> {
    fn get_header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HxError> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

type DecorateFn = dyn Fn(&mut dyn HeaderSink) -> Result<(), HxError>;

/// A single step that sets one or more headers on a [`HeaderSink`].
///
/// The constructors in this module cover every htmx response header; any
/// closure can be turned into a decorator with [`HeaderDecorator::new`].
pub struct HeaderDecorator(Box<DecorateFn>);

impl HeaderDecorator {
    pub fn new<F>(decorate: F) -> Self
    where
        F: Fn(&mut dyn HeaderSink) -> Result<(), HxError> + 'static,
    {
        HeaderDecorator(Box::new(decorate))
    }

    pub fn apply(&self, sink: &mut dyn HeaderSink) -> Result<(), HxError> {
        (self.0)(sink)
    }
}

/// Applies `decorators` to `sink` in order.
///
/// Later decorators may overwrite headers set by earlier ones. The first
/// failing decorator stops the chain and its error is returned; headers
/// already written by the decorators before it are left in place, and
/// removing them is up to the caller.
///
/// ```
/// use actix_hx::{reswap, retarget, set_headers, SwapType};
/// use actix_web::HttpResponse;
///
/// let mut res = HttpResponse::Ok().finish();
/// set_headers(&mut res, [retarget("#login"), reswap(SwapType::OuterHtml)]).unwrap();
///
/// assert_eq!(res.headers().get("hx-reswap").unwrap(), "outerHTML");
/// ```
pub fn set_headers<S, I>(sink: &mut S, decorators: I) -> Result<(), HxError>
where
    S: HeaderSink,
    I: IntoIterator<Item = HeaderDecorator>,
{
    for decorator in decorators {
        if let Err(err) = decorator.apply(sink) {
            warn!("Stopped setting htmx headers: {}", err);
            return Err(err);
        }
    }
    Ok(())
}

/// Sets `name` to `value`.
pub fn set_header(name: impl Into<String>, value: impl Into<String>) -> HeaderDecorator {
    let (name, value) = (name.into(), value.into());
    HeaderDecorator::new(move |sink| sink.set_header(&name, &value))
}

/// Client-side redirect without a full page reload (`HX-Location`).
pub fn location(path: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_LOCATION, path)
}

/// `HX-Location` with a full JSON body, see [`HxLocation`].
pub fn location_with(location: HxLocation) -> HeaderDecorator {
    HeaderDecorator::new(move |sink| {
        let body = location.to_header_value()?;
        sink.set_header(ResponseHeaders::HX_LOCATION, &body)
    })
}

/// Pushes `url` onto the browser history stack.
pub fn push_url(url: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_PUSH_URL, url)
}

/// Stops the browser history from being updated.
pub fn prevent_push_url() -> HeaderDecorator {
    push_url("false")
}

/// Client-side redirect to a new location with a full page load.
pub fn redirect(path: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_REDIRECT, path)
}

/// Makes the client do a full refresh of the page.
pub fn refresh() -> HeaderDecorator {
    set_header(ResponseHeaders::HX_REFRESH, "true")
}

pub fn prevent_refresh() -> HeaderDecorator {
    set_header(ResponseHeaders::HX_REFRESH, "false")
}

/// Replaces the current URL in the location bar.
pub fn replace_url(url: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_REPLACE_URL, url)
}

pub fn prevent_replace_url() -> HeaderDecorator {
    replace_url("false")
}

/// CSS selector choosing which part of the response is swapped in.
pub fn reselect(selector: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_RESELECT, selector)
}

/// Overrides how the response is swapped in.
pub fn reswap(swap: SwapType) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_RESWAP, swap.as_str())
}

/// CSS selector overriding the target of the content update.
pub fn retarget(selector: impl Into<String>) -> HeaderDecorator {
    set_header(ResponseHeaders::HX_RETARGET, selector)
}

/// Adds events without details to the trigger header selected by `when`,
/// keeping the events already present. See [`merge_trigger`] for how the
/// header value is combined.
pub fn trigger_on<I>(when: TriggerType, names: I) -> HeaderDecorator
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    trigger_with_detail_on(when, names.into_iter().map(TriggerEvent::new))
}

/// Adds `events` to the trigger header selected by `when`, keeping the events
/// already present. Fails if a detail cannot be serialized, leaving the
/// header unchanged.
pub fn trigger_with_detail_on<I>(when: TriggerType, events: I) -> HeaderDecorator
where
    I: IntoIterator<Item = TriggerEvent>,
{
    let events: Vec<TriggerEvent> = events.into_iter().collect();
    HeaderDecorator::new(move |sink| {
        let header = when.header_name();
        let merged = merge_trigger(sink.get_header(header), &events)?;
        sink.set_header(header, &merged)
    })
}

/// Adds events to `HX-Trigger`.
pub fn trigger<I>(names: I) -> HeaderDecorator
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    trigger_on(TriggerType::Standard, names)
}

/// Adds events to `HX-Trigger-After-Settle`.
pub fn trigger_after_settle<I>(names: I) -> HeaderDecorator
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    trigger_on(TriggerType::AfterSettle, names)
}

/// Adds events to `HX-Trigger-After-Swap`.
pub fn trigger_after_swap<I>(names: I) -> HeaderDecorator
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    trigger_on(TriggerType::AfterSwap, names)
}

pub fn trigger_with_detail<I>(events: I) -> HeaderDecorator
where
    I: IntoIterator<Item = TriggerEvent>,
{
    trigger_with_detail_on(TriggerType::Standard, events)
}

pub fn trigger_after_settle_with_detail<I>(events: I) -> HeaderDecorator
where
    I: IntoIterator<Item = TriggerEvent>,
{
    trigger_with_detail_on(TriggerType::AfterSettle, events)
}

pub fn trigger_after_swap_with_detail<I>(events: I) -> HeaderDecorator
where
    I: IntoIterator<Item = TriggerEvent>,
{
    trigger_with_detail_on(TriggerType::AfterSwap, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Serialize, Serializer};
    use serde_json::{json, Value};

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no JSON form"))
        }
    }

    fn failing() -> HeaderDecorator {
        HeaderDecorator::new(|_| Err(HxError::InvalidSwap("broken".to_string())))
    }

    fn sink() -> IndexMap<String, String> {
        IndexMap::new()
    }

    fn parsed(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn set_header_writes_value() {
        let cases = [
            ("HX-Reswap", "outerHTML"),
            ("HX-Retarget", "form#login"),
            ("HX-Redirect", "/login"),
        ];

        for (name, value) in cases {
            let mut headers = sink();
            set_header(name, value).apply(&mut headers).unwrap();
            assert_eq!(headers.get_header(name), Some(value));
        }
    }

    #[test]
    fn chain_stops_at_first_failure_without_rollback() {
        let mut headers = sink();
        let result = set_headers(
            &mut headers,
            [set_header("A", "1"), failing(), set_header("B", "2")],
        );

        assert!(matches!(result, Err(HxError::InvalidSwap(_))));
        assert_eq!(headers.get_header("A"), Some("1"));
        assert_eq!(headers.get_header("B"), None);
    }

    #[test]
    fn later_decorators_overwrite_earlier_ones() {
        let mut headers = sink();
        set_headers(&mut headers, [refresh(), prevent_refresh()]).unwrap();
        assert_eq!(headers.get_header(ResponseHeaders::HX_REFRESH), Some("false"));
    }

    #[test]
    fn simple_decorators_set_their_headers() {
        let mut headers = sink();
        set_headers(
            &mut headers,
            [
                location("/elsewhere"),
                push_url("/pushed"),
                redirect("/login"),
                refresh(),
                replace_url("/replaced"),
                reselect("#content"),
                reswap(SwapType::AfterEnd),
                retarget("#target"),
            ],
        )
        .unwrap();

        let expected = [
            (ResponseHeaders::HX_LOCATION, "/elsewhere"),
            (ResponseHeaders::HX_PUSH_URL, "/pushed"),
            (ResponseHeaders::HX_REDIRECT, "/login"),
            (ResponseHeaders::HX_REFRESH, "true"),
            (ResponseHeaders::HX_REPLACE_URL, "/replaced"),
            (ResponseHeaders::HX_RESELECT, "#content"),
            (ResponseHeaders::HX_RESWAP, "afterend"),
            (ResponseHeaders::HX_RETARGET, "#target"),
        ];
        for (name, value) in expected {
            assert_eq!(headers.get_header(name), Some(value), "{name}");
        }
    }

    #[test]
    fn prevent_decorators_write_false() {
        let mut headers = sink();
        set_headers(&mut headers, [prevent_push_url(), prevent_replace_url()]).unwrap();
        assert_eq!(headers.get_header(ResponseHeaders::HX_PUSH_URL), Some("false"));
        assert_eq!(
            headers.get_header(ResponseHeaders::HX_REPLACE_URL),
            Some("false")
        );
    }

    #[test]
    fn trigger_appends_to_existing_events() {
        let mut headers = sink();
        trigger_after_swap(["event1", "event2"])
            .apply(&mut headers)
            .unwrap();
        assert_eq!(
            headers.get_header(ResponseHeaders::HX_TRIGGER_AFTER_SWAP),
            Some("event1, event2")
        );

        trigger_after_swap(["event3"]).apply(&mut headers).unwrap();
        assert_eq!(
            headers.get_header(ResponseHeaders::HX_TRIGGER_AFTER_SWAP),
            Some("event1, event2, event3")
        );
    }

    #[test]
    fn trigger_decorators_target_their_header() {
        let cases = [
            (trigger(["e"]), ResponseHeaders::HX_TRIGGER),
            (trigger_after_settle(["e"]), ResponseHeaders::HX_TRIGGER_AFTER_SETTLE),
            (trigger_after_swap(["e"]), ResponseHeaders::HX_TRIGGER_AFTER_SWAP),
        ];

        for (decorator, name) in cases {
            let mut headers = sink();
            decorator.apply(&mut headers).unwrap();
            assert_eq!(headers.len(), 1);
            assert_eq!(headers.get_header(name), Some("e"));
        }
    }

    #[test]
    fn detailed_trigger_decorators_target_their_header() {
        let cases = [
            (
                trigger_with_detail([TriggerEvent::with_detail("e", 1)]),
                ResponseHeaders::HX_TRIGGER,
            ),
            (
                trigger_after_settle_with_detail([TriggerEvent::with_detail("e", 1)]),
                ResponseHeaders::HX_TRIGGER_AFTER_SETTLE,
            ),
            (
                trigger_after_swap_with_detail([TriggerEvent::with_detail("e", 1)]),
                ResponseHeaders::HX_TRIGGER_AFTER_SWAP,
            ),
        ];

        for (decorator, name) in cases {
            let mut headers = sink();
            decorator.apply(&mut headers).unwrap();
            assert_eq!(parsed(headers.get_header(name).unwrap()), json!({"e": 1}));
        }
    }

    #[test]
    fn trigger_with_detail_upgrades_existing_list() {
        let mut headers = sink();
        set_headers(
            &mut headers,
            [
                trigger(["e1"]),
                trigger_with_detail([TriggerEvent::with_detail("e2", json!({"msg": "hi"}))]),
                trigger(["e3"]),
            ],
        )
        .unwrap();

        let value = headers.get_header(ResponseHeaders::HX_TRIGGER).unwrap();
        assert_eq!(
            parsed(value),
            json!({"e1": null, "e2": {"msg": "hi"}, "e3": null})
        );
    }

    #[test]
    fn failed_trigger_merge_leaves_header_untouched() {
        let mut headers = sink();
        headers.insert(ResponseHeaders::HX_TRIGGER.to_string(), "[1]".to_string());

        let result = trigger(["e"]).apply(&mut headers);
        assert!(matches!(result, Err(HxError::NonObjectTrigger(_))));
        assert_eq!(headers.get_header(ResponseHeaders::HX_TRIGGER), Some("[1]"));
    }

    #[test]
    fn header_map_lookup_ignores_case() {
        let mut headers = HeaderMap::new();
        set_headers(&mut headers, [trigger(["first"]), trigger(["second"])]).unwrap();

        assert_eq!(headers.get_header("hx-trigger"), Some("first, second"));
        assert_eq!(headers.get_header("HX-Trigger"), Some("first, second"));
    }

    #[test]
    fn header_map_rejects_invalid_values() {
        let mut headers = HeaderMap::new();
        let result = set_headers(&mut headers, [retarget("#a"), redirect("/bad\npath")]);

        assert!(matches!(
            result,
            Err(HxError::InvalidHeaderValue { ref name, .. }) if name == ResponseHeaders::HX_REDIRECT
        ));
        assert_eq!(headers.get_header(ResponseHeaders::HX_RETARGET), Some("#a"));
        assert_eq!(headers.get_header(ResponseHeaders::HX_REDIRECT), None);
    }

    #[test]
    fn header_map_rejects_invalid_names() {
        let mut headers = HeaderMap::new();
        let result = set_header("bad name", "x").apply(&mut headers);
        assert!(matches!(result, Err(HxError::InvalidHeaderName(_))));
    }

    #[test]
    fn response_is_a_sink() {
        let mut res = HttpResponse::Ok().finish();
        set_headers(
            &mut res,
            [
                trigger_with_detail([TriggerEvent::with_detail("saved", 3)]),
                location_with(HxLocation::new("/next").target("#main")),
            ],
        )
        .unwrap();

        assert_eq!(
            parsed(res.get_header(ResponseHeaders::HX_TRIGGER).unwrap()),
            json!({"saved": 3})
        );
        assert_eq!(
            parsed(res.get_header(ResponseHeaders::HX_LOCATION).unwrap()),
            json!({"path": "/next", "target": "#main"})
        );
    }

    #[test]
    fn unserializable_detail_stops_chain() {
        let mut headers = sink();
        let result = set_headers(
            &mut headers,
            [
                set_header("A", "1"),
                trigger(["e1"]),
                trigger_with_detail([TriggerEvent::with_detail("x", Unserializable)]),
                set_header("B", "2"),
            ],
        );

        assert!(matches!(result, Err(HxError::Serialization { ref event, .. }) if event == "x"));
        assert_eq!(headers.get_header(ResponseHeaders::HX_TRIGGER), Some("e1"));
        assert_eq!(headers.get_header("A"), Some("1"));
        assert_eq!(headers.get_header("B"), None);
    }

    #[test]
    fn header_map_keeps_utf8_trigger_values() {
        let mut headers = HeaderMap::new();
        set_headers(&mut headers, [trigger(["café"]), trigger(["b"])]).unwrap();
        assert_eq!(
            headers.get_header(ResponseHeaders::HX_TRIGGER),
            Some("café, b")
        );

        let mut headers = HeaderMap::new();
        set_headers(
            &mut headers,
            [
                trigger_with_detail([TriggerEvent::with_detail("notify", "Gespeichert ✓")]),
                trigger(["refresh"]),
            ],
        )
        .unwrap();
        assert_eq!(
            parsed(headers.get_header(ResponseHeaders::HX_TRIGGER).unwrap()),
            json!({"notify": "Gespeichert ✓", "refresh": null})
        );
    }

    #[test]
    fn response_keeps_utf8_trigger_values() {
        let mut res = HttpResponse::Ok().finish();
        set_headers(
            &mut res,
            [
                trigger_after_settle_with_detail([TriggerEvent::with_detail("notify", "Größe")]),
                trigger_after_settle(["reload"]),
            ],
        )
        .unwrap();

        assert_eq!(
            parsed(res.get_header(ResponseHeaders::HX_TRIGGER_AFTER_SETTLE).unwrap()),
            json!({"notify": "Größe", "reload": null})
        );
    }

    #[test]
    fn non_utf8_header_reads_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("hx-trigger"),
            HeaderValue::from_bytes(b"\xFF").unwrap(),
        );
        assert_eq!(headers.get_header(ResponseHeaders::HX_TRIGGER), None);
    }

    #[test]
    fn unserializable_location_stops_chain() {
        let mut values = std::collections::HashMap::new();
        values.insert((1, 2), "tuple keys have no JSON form");

        let mut res = HttpResponse::Ok().finish();
        let result = set_headers(
            &mut res,
            [
                retarget("#main"),
                location_with(HxLocation::new("/next").values(values)),
                refresh(),
            ],
        );

        assert!(matches!(result, Err(HxError::Location(_))));
        assert_eq!(res.get_header(ResponseHeaders::HX_RETARGET), Some("#main"));
        assert_eq!(res.get_header(ResponseHeaders::HX_LOCATION), None);
        assert_eq!(res.get_header(ResponseHeaders::HX_REFRESH), None);
    }
}
