//! # actix-hx
//!
//! `actix-hx` reads the headers htmx sends with its requests and writes the
//! headers htmx reacts to on responses, for applications built on Actix Web.
//!
//! ## Features
//!
//! - **Request Headers**: [`HxMiddleware`] decodes the htmx request headers once per request
//!   and hands them to handlers as an [`HxRequest`]
//! - **Header Decorators**: small composable steps ([`redirect`], [`reswap`], [`retarget`], ...)
//!   applied in order with [`set_headers`]
//! - **Event Triggering**: add events to `HX-Trigger`, `HX-Trigger-After-Settle` or
//!   `HX-Trigger-After-Swap` without losing the events already set, with optional JSON details
//! - **Typed Values**: [`SwapType`], [`TriggerType`] and [`HxLocation`] instead of raw strings
//!
//! # Getting Started
//! Register [`HxMiddleware`] on your `App`, take [`HxRequest`] in your handlers and decorate
//! your responses:
//!
//! ```no_run
//! use actix_hx::{reswap, set_headers, trigger_with_detail, HxError, HxMiddleware, HxRequest};
//! use actix_hx::{SwapType, TriggerEvent};
//! use actix_web::{web, App, HttpResponse, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| {
//!         App::new()
//!             .wrap(HxMiddleware)
//!             .route("/", web::post().to(save))
//!     })
//!     .bind("127.0.0.1:8080")?
//!     .run()
//!     .await
//! }
//!
//! async fn save(hx: HxRequest) -> Result<HttpResponse, HxError> {
//!     let mut res = HttpResponse::Ok().body("<div>Saved</div>");
//!     if hx.is_htmx_request {
//!         set_headers(
//!             &mut res,
//!             [
//!                 reswap(SwapType::OuterHtml),
//!                 trigger_with_detail([TriggerEvent::with_detail("notify", "Saved!")]),
//!             ],
//!         )?;
//!     }
//!     Ok(res)
//! }
//! ```

mod decorator;
mod error;
mod headers;
mod htmx;
mod location;
mod middleware;
mod swap;
mod trigger;

pub use self::{
    decorator::{
        location, location_with, prevent_push_url, prevent_refresh, prevent_replace_url,
        push_url, redirect, refresh, replace_url, reselect, reswap, retarget, set_header,
        set_headers, trigger, trigger_after_settle, trigger_after_settle_with_detail,
        trigger_after_swap, trigger_after_swap_with_detail, trigger_on, trigger_with_detail,
        trigger_with_detail_on, HeaderDecorator, HeaderSink,
    },
    error::HxError,
    headers::{RequestHeaders, ResponseHeaders},
    htmx::HxRequest,
    location::HxLocation,
    middleware::HxMiddleware,
    swap::{SwapType, TriggerType},
    trigger::{merge_trigger, TriggerEvent},
};
