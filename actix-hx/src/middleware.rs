use crate::HxRequest;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use log::trace;
use std::future::{ready, Ready};

/// A middleware for Actix Web that reads the htmx request headers.
///
/// [`HxMiddleware`] decodes the htmx request headers once per request and
/// stores the resulting [`HxRequest`] in the request extensions, so any
/// handler on a wrapped route can take it as an argument.
///
/// # Example
///
/// ```no_run
/// use actix_web::{web, App, HttpServer, HttpResponse};
/// use actix_hx::{set_headers, trigger, HxError, HxMiddleware, HxRequest};
///
/// #[actix_web::main]
/// async fn main() -> std::io::Result<()> {
///     HttpServer::new(|| {
///         App::new()
///             .wrap(HxMiddleware)
///             .route("/", web::get().to(index))
///     })
///     .bind("127.0.0.1:8080")?
///     .run()
///     .await
/// }
///
/// async fn index(hx: HxRequest) -> Result<HttpResponse, HxError> {
///     if !hx.is_htmx_request {
///         return Ok(HttpResponse::Ok().body("<html><body>Full page</body></html>"));
///     }
///
///     let mut res = HttpResponse::Ok().body("<div>Partial</div>");
///     set_headers(&mut res, [trigger(["contentLoaded"])])?;
///     Ok(res)
/// }
/// ```
pub struct HxMiddleware;

impl<S, B> Transform<S, ServiceRequest> for HxMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = InnerHxMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InnerHxMiddleware { service }))
    }
}

#[doc(hidden)]
#[non_exhaustive]
pub struct InnerHxMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for InnerHxMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let hx_request = HxRequest::from_headers(req.headers());
        trace!("htmx request headers for {}: {:?}", req.path(), hx_request);

        req.extensions_mut().insert(hx_request);

        self.service.call(req)
    }
}
