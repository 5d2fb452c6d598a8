//! Inbound port: the request handling capability.
//!
//! Gates and terminal handlers implement the same trait, so an access gate
//! can wrap a handler, another gate, or a whole router without special cases.

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::sync::Arc;

/// Something that turns a request into a response.
///
/// The request is handed over by value and must be forwarded untouched by
/// gates that let it pass. Dropping the returned future cancels the whole
/// chain below it.
#[async_trait]
pub trait RequestGate: Send + Sync {
    async fn handle(&self, req: Request<Body>) -> Response;
}

#[async_trait]
impl<G> RequestGate for Arc<G>
where
    G: RequestGate + ?Sized,
{
    async fn handle(&self, req: Request<Body>) -> Response {
        (**self).handle(req).await
    }
}

/// Terminal handler built from an async closure
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async closure as a [`RequestGate`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<Body>) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> RequestGate for HandlerFn<F>
where
    F: Fn(Request<Body>) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    async fn handle(&self, req: Request<Body>) -> Response {
        (self.f)(req).await
    }
}
