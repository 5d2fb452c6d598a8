//! Bridges between [`RequestGate`] and tower services.

use crate::ports::RequestGate;
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Service, ServiceExt};

/// Uses an infallible tower service (an axum `Router`, for instance) as the
/// downstream end of a gate chain.
#[derive(Clone)]
pub struct ServiceGate<S> {
    service: S,
}

impl<S> ServiceGate<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> RequestGate for ServiceGate<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    async fn handle(&self, req: Request<Body>) -> Response {
        match self.service.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

/// Serves a gate chain as a tower service, e.g. via `Router::fallback_service`.
pub struct GateService<G: ?Sized> {
    gate: Arc<G>,
}

impl<G: ?Sized> GateService<G> {
    pub fn new(gate: Arc<G>) -> Self {
        Self { gate }
    }
}

impl<G: ?Sized> Clone for GateService<G> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
        }
    }
}

impl<G> Service<Request<Body>> for GateService<G>
where
    G: RequestGate + ?Sized + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let gate = Arc::clone(&self.gate);
        Box::pin(async move { Ok(gate.handle(req).await) })
    }
}
