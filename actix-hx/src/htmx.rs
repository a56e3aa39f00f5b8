use actix_web::dev::Payload;
use actix_web::http::header::{HeaderMap, HeaderValue};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::headers::RequestHeaders;
use crate::HxError;

/// The htmx request headers of one request.
///
/// [`HxMiddleware`](crate::HxMiddleware) builds this once per request and
/// stores it in the request extensions, where handlers pick it up by taking
/// `HxRequest` as an argument. Taking `Option<HxRequest>` instead yields
/// `None` on routes the middleware does not wrap.
///
/// Missing headers leave the matching field empty or `false`. The boolean
/// fields are only set when the header is exactly `true`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HxRequest {
    /// The current URL of the browser.
    pub current_url: String,
    /// The request comes from an element using `hx-boost`.
    pub is_boosted: bool,
    /// The request restores history after a miss in the local history cache.
    pub is_history_restore_request: bool,
    /// The request was made by htmx.
    pub is_htmx_request: bool,
    /// The id of the target element, if it has one.
    pub target: String,
    /// The id of the triggered element, if it has one.
    pub trigger: String,
    /// The name of the triggered element, if it has one.
    pub trigger_name: String,
}

impl HxRequest {
    pub fn from_headers(headers: &HeaderMap) -> HxRequest {
        HxRequest {
            current_url: headers.get(RequestHeaders::HX_CURRENT_URL).as_text(),
            is_boosted: headers.get(RequestHeaders::HX_BOOSTED).is_true(),
            is_history_restore_request: headers
                .get(RequestHeaders::HX_HISTORY_RESTORE_REQUEST)
                .is_true(),
            is_htmx_request: headers.get(RequestHeaders::HX_REQUEST).is_true(),
            target: headers.get(RequestHeaders::HX_TARGET).as_text(),
            trigger: headers.get(RequestHeaders::HX_TRIGGER).as_text(),
            trigger_name: headers.get(RequestHeaders::HX_TRIGGER_NAME).as_text(),
        }
    }

    /// The record stored by [`HxMiddleware`](crate::HxMiddleware), or `None`
    /// when the middleware did not run for this request.
    pub fn from_request_extensions(req: &HttpRequest) -> Option<HxRequest> {
        req.extensions().get::<HxRequest>().cloned()
    }
}

impl FromRequest for HxRequest {
    type Error = HxError;
    type Future = Ready<Result<HxRequest, HxError>>;

    #[inline]
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(HxRequest::from_request_extensions(req).ok_or(HxError::MiddlewareNotRegistered))
    }
}

trait HeaderText {
    fn is_true(&self) -> bool;
    fn as_text(&self) -> String;
}

impl HeaderText for Option<&HeaderValue> {
    fn is_true(&self) -> bool {
        matches!(self, Some(header) if header.as_bytes() == b"true")
    }

    fn as_text(&self) -> String {
        self.and_then(|header| std::str::from_utf8(header.as_bytes()).ok())
            .map(str::to_string)
            .unwrap_or_default()
    }
}
