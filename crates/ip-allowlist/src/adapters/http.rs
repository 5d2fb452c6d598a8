//! Extraction of address signals from HTTP requests.

use crate::domain::config::AccessControlConfig;
use crate::domain::error::ConfigError;
use crate::domain::resolver::RequestContext;
use axum::{
    extract::ConnectInfo,
    http::{HeaderMap, HeaderName, Request},
};
use std::borrow::Cow;
use std::net::SocketAddr;

/// Raw peer address of the underlying connection, as text.
///
/// Takes precedence over axum's `ConnectInfo` when both are present, for
/// transports that report something other than a socket address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

/// Names of the headers carrying address signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalHeaders {
    real_ip: HeaderName,
    forwarded_for: HeaderName,
}

impl Default for SignalHeaders {
    fn default() -> Self {
        Self {
            real_ip: HeaderName::from_static("x-real-ip"),
            forwarded_for: HeaderName::from_static("x-forwarded-for"),
        }
    }
}

impl SignalHeaders {
    pub fn new(real_ip: HeaderName, forwarded_for: HeaderName) -> Self {
        Self {
            real_ip,
            forwarded_for,
        }
    }

    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            real_ip: config.real_ip_header_name()?,
            forwarded_for: config.forwarded_for_header_name()?,
        })
    }

    /// Collect the three address signals of `req`.
    ///
    /// Only the first value of a repeated header is used. Values that are
    /// not visible ASCII count as absent.
    pub fn extract<'a, B>(&self, req: &'a Request<B>) -> RequestContext<'a> {
        RequestContext {
            real_ip: header_str(req.headers(), &self.real_ip),
            forwarded_for: header_str(req.headers(), &self.forwarded_for),
            peer_addr: peer_addr(req),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn peer_addr<B>(req: &Request<B>) -> Cow<'_, str> {
    if let Some(RemoteAddr(raw)) = req.extensions().get::<RemoteAddr>() {
        return Cow::Borrowed(raw.as_str());
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return Cow::Owned(addr.to_string());
    }

    Cow::Borrowed("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn request() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[test]
    fn test_extract_headers_case_insensitive() {
        let req = Request::builder()
            .header("X-REAL-IP", "10.0.0.1")
            .header("x-forwarded-for", "10.0.0.2,10.0.0.3")
            .body(())
            .unwrap();

        let ctx = SignalHeaders::default().extract(&req);
        assert_eq!(ctx.real_ip, "10.0.0.1");
        assert_eq!(ctx.forwarded_for, "10.0.0.2,10.0.0.3");
        assert_eq!(ctx.peer_addr, "");
    }

    #[test]
    fn test_first_header_value_only() {
        let req = Request::builder()
            .header("x-forwarded-for", "10.0.0.2")
            .header("x-forwarded-for", "10.0.0.3")
            .body(())
            .unwrap();

        let ctx = SignalHeaders::default().extract(&req);
        assert_eq!(ctx.forwarded_for, "10.0.0.2");
    }

    #[test]
    fn test_opaque_header_value_is_absent() {
        let mut req = request();
        req.headers_mut().insert(
            "x-real-ip",
            HeaderValue::from_bytes(b"10.0.0.1\xff").unwrap(),
        );

        let ctx = SignalHeaders::default().extract(&req);
        assert_eq!(ctx.real_ip, "");
    }

    #[test]
    fn test_peer_from_connect_info() {
        let mut req = request();
        req.extensions_mut()
            .insert(ConnectInfo("203.0.113.9:54321".parse::<SocketAddr>().unwrap()));
        assert_eq!(
            SignalHeaders::default().extract(&req).peer_addr,
            "203.0.113.9:54321"
        );

        let mut req = request();
        req.extensions_mut()
            .insert(ConnectInfo("[2001:db8::1]:443".parse::<SocketAddr>().unwrap()));
        assert_eq!(
            SignalHeaders::default().extract(&req).peer_addr,
            "[2001:db8::1]:443"
        );
    }

    #[test]
    fn test_remote_addr_wins_over_connect_info() {
        let mut req = request();
        req.extensions_mut()
            .insert(ConnectInfo("203.0.113.9:54321".parse::<SocketAddr>().unwrap()));
        req.extensions_mut()
            .insert(RemoteAddr("not-a-valid-peer".to_string()));

        assert_eq!(
            SignalHeaders::default().extract(&req).peer_addr,
            "not-a-valid-peer"
        );
    }

    #[test]
    fn test_custom_header_names() {
        let config = AccessControlConfig {
            real_ip_header: "CF-Connecting-IP".to_string(),
            ..Default::default()
        };
        let signals = SignalHeaders::from_config(&config).unwrap();

        let req = Request::builder()
            .header("x-real-ip", "10.0.0.1")
            .header("cf-connecting-ip", "10.0.0.9")
            .body(())
            .unwrap();
        assert_eq!(signals.extract(&req).real_ip, "10.0.0.9");
    }
}
