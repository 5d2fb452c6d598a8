//! Client IP access control.
//!
//! Resolves the client address of every request and lets it through only if
//! the address is on the allow-list. Everything else gets a plain-text 403.
//!
//! Resolution failures are deliberately indistinguishable from an ordinary
//! denial: the response names an empty address and carries no reason.

use crate::adapters::http::SignalHeaders;
use crate::domain::{
    config::AccessControlConfig, error::ConfigError, is_allowed, resolve, AllowList,
    ClientAddress,
};
use crate::ports::RequestGate;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, error, trace};

/// Outcome of checking one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Client is on the allow-list
    Allow(ClientAddress),
    /// Client is not on the allow-list. `client_ip` is empty when no
    /// address could be resolved.
    Deny { client_ip: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

/// Immutable access policy shared by every request.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allow_list: AllowList,
    signals: SignalHeaders,
}

impl AccessPolicy {
    /// Policy over `allow_list` using the default signal headers
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            signals: SignalHeaders::default(),
        }
    }

    pub fn with_signals(mut self, signals: SignalHeaders) -> Self {
        self.signals = signals;
        self
    }

    /// Build a policy from configuration. Any invalid setting aborts
    /// construction; there is no partially built policy.
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        let build = || -> Result<Self, ConfigError> {
            Ok(Self {
                allow_list: config.allow_list()?,
                signals: SignalHeaders::from_config(config)?,
            })
        };

        build().map_err(|e| {
            error!(error = %e, "Rejecting access control configuration");
            e
        })
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Decide whether `req` may pass.
    pub fn decide<B>(&self, req: &Request<B>) -> Decision {
        let ctx = self.signals.extract(req);

        let decision = match resolve(&ctx) {
            Ok(addr) if is_allowed(&addr, &self.allow_list) => Decision::Allow(addr),
            Ok(addr) => Decision::Deny {
                client_ip: addr.into_string(),
            },
            Err(e) => {
                trace!(error = %e, "Client address unresolved");
                Decision::Deny {
                    client_ip: String::new(),
                }
            }
        };

        match &decision {
            Decision::Allow(addr) => debug!(
                client_ip = %addr,
                method = %req.method(),
                path = req.uri().path(),
                "Client IP allowed"
            ),
            Decision::Deny { client_ip } => debug!(
                client_ip = client_ip.as_str(),
                method = %req.method(),
                path = req.uri().path(),
                "Client IP denied"
            ),
        }

        decision
    }
}

/// 403 response naming the denied address
pub fn deny_response(client_ip: &str) -> Response {
    let mut response = Response::new(Body::from(format!("Client IP {} denied", client_ip)));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Access gate in front of another [`RequestGate`].
pub struct AccessDecisionGate<G> {
    policy: Arc<AccessPolicy>,
    next: G,
}

impl<G> AccessDecisionGate<G> {
    pub fn new(policy: Arc<AccessPolicy>, next: G) -> Self {
        Self { policy, next }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}

#[async_trait]
impl<G: RequestGate> RequestGate for AccessDecisionGate<G> {
    async fn handle(&self, req: Request<Body>) -> Response {
        let decision = self.policy.decide(&req);
        match decision {
            Decision::Allow(_) => self.next.handle(req).await,
            Decision::Deny { client_ip } => deny_response(&client_ip),
        }
    }
}

/// Access control layer for axum routers
#[derive(Clone)]
pub struct AccessControlLayer {
    policy: Arc<AccessPolicy>,
}

impl AccessControlLayer {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(AccessPolicy::from_config(config)?))
    }

    /// Shared policy, for building an [`AccessDecisionGate`] with the same rules
    pub fn policy(&self) -> Arc<AccessPolicy> {
        Arc::clone(&self.policy)
    }
}

impl<S> Layer<S> for AccessControlLayer {
    type Service = AccessControlService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessControlService {
            inner,
            policy: Arc::clone(&self.policy),
        }
    }
}

/// Access control service
#[derive(Clone)]
pub struct AccessControlService<S> {
    inner: S,
    policy: Arc<AccessPolicy>,
}

impl<S> Service<Request<Body>> for AccessControlService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let decision = self.policy.decide(&req);
        match decision {
            Decision::Allow(_) => {
                // The readied service handles this request; the clone stays for the next one
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(async move { inner.call(req).await })
            }
            Decision::Deny { client_ip } => {
                let response = deny_response(&client_ip);
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
