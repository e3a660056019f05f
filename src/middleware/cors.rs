//! CORS response headers.

use crate::config::CorsConfig;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue,
    },
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};

/// Adds `Access-Control-Allow-*` headers to every response, errors included
pub struct Cors {
    headers: Rc<CorsHeaders>,
}

struct CorsHeaders {
    origin: HeaderValue,
    methods: HeaderValue,
    headers: HeaderValue,
}

impl Cors {
    /// Values that are not valid header text fall back to the defaults
    pub fn new(config: &CorsConfig) -> Self {
        let defaults = CorsConfig::default();
        let value = |configured: &str, fallback: &str| {
            HeaderValue::from_str(configured)
                .or_else(|_| HeaderValue::from_str(fallback))
                .unwrap_or_else(|_| HeaderValue::from_static("*"))
        };

        Self {
            headers: Rc::new(CorsHeaders {
                origin: value(&config.allow_origin, &defaults.allow_origin),
                methods: value(&config.allow_methods, &defaults.allow_methods),
                headers: value(&config.allow_headers, &defaults.allow_headers),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service,
            headers: Rc::clone(&self.headers),
        }))
    }
}

pub struct CorsMiddleware<S> {
    service: S,
    headers: Rc<CorsHeaders>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        let cors = Rc::clone(&self.headers);

        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();

            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, cors.origin.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_METHODS, cors.methods.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, cors.headers.clone());

            Ok(res)
        })
    }
}
