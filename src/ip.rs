//! Client IP resolution.
//!
//! Which forwarding headers can be believed is a deployment decision, so the
//! view delegates [`RequestView::ip`](crate::RequestView::ip) to a
//! [`ClientIpResolver`]. [`ForwardedIpResolver`] covers the common reverse
//! proxy setups and is configured with [`ProxyConfig`].

use std::net::IpAddr;

use serde::Deserialize;

use crate::headers::Headers;

/// Resolves the client address of a request.
///
/// Implemented for any `Fn(&Headers, Option<IpAddr>) -> Option<IpAddr>`, so a
/// closure can stand in for a custom policy.
pub trait ClientIpResolver: Send + Sync {
    /// Returns the client address, or `None` if it cannot be determined.
    ///
    /// `remote_addr` is the address of the directly connected peer.
    fn resolve(&self, headers: &Headers, remote_addr: Option<IpAddr>) -> Option<IpAddr>;
}

impl<F> ClientIpResolver for F
where
    F: Fn(&Headers, Option<IpAddr>) -> Option<IpAddr> + Send + Sync,
{
    fn resolve(&self, headers: &Headers, remote_addr: Option<IpAddr>) -> Option<IpAddr> {
        self(headers, remote_addr)
    }
}

/// Which forwarding headers to trust, and from which peers.
///
/// The default trusts nothing: the client IP is the connected peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Whether to trust the `X-Forwarded-For` header (default: false)
    pub trust_x_forwarded_for: bool,

    /// Whether to trust the `X-Real-IP` header (default: false)
    pub trust_x_real_ip: bool,

    /// Proxies allowed to set forwarding headers.
    ///
    /// Empty means any peer may set them. When non-empty, forwarding headers
    /// are only read if the connected peer is listed, and listed hops are
    /// skipped when walking the `X-Forwarded-For` chain.
    pub trusted_proxies: Vec<IpAddr>,
}

impl ProxyConfig {
    /// Trust the `X-Forwarded-For` header
    pub fn trust_forwarded_for(mut self) -> Self {
        self.trust_x_forwarded_for = true;
        self
    }

    /// Trust the `X-Real-IP` header
    pub fn trust_real_ip(mut self) -> Self {
        self.trust_x_real_ip = true;
        self
    }

    /// Add a trusted proxy address
    pub fn with_trusted_proxy(mut self, ip: IpAddr) -> Self {
        self.trusted_proxies.push(ip);
        self
    }

    fn is_trusted_proxy(&self, ip: &IpAddr) -> bool {
        self.trusted_proxies.contains(ip)
    }

    fn trusts_peer(&self, remote_addr: Option<IpAddr>) -> bool {
        if self.trusted_proxies.is_empty() {
            return true;
        }
        remote_addr.is_some_and(|ip| self.is_trusted_proxy(&ip))
    }
}

/// Resolver that honors `X-Forwarded-For` and `X-Real-IP` per [`ProxyConfig`].
///
/// # Examples
///
/// ```
/// use request_view::{ClientIpResolver, ForwardedIpResolver, Headers, ProxyConfig};
///
/// let resolver = ForwardedIpResolver::new(ProxyConfig::default().trust_forwarded_for());
/// let mut headers = Headers::new();
/// headers.insert("X-Forwarded-For", "203.0.113.7, 10.0.0.2").unwrap();
///
/// let ip = resolver.resolve(&headers, Some("10.0.0.1".parse().unwrap()));
/// assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForwardedIpResolver {
    config: ProxyConfig,
}

impl ForwardedIpResolver {
    /// Creates a resolver with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    fn from_forwarded_for(&self, value: &str) -> Option<IpAddr> {
        let chain: Vec<IpAddr> = value
            .split(',')
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .collect();

        if self.config.trusted_proxies.is_empty() {
            // Take the first IP in the chain (original client)
            return chain.first().copied();
        }

        // Walk back from the nearest hop, skipping our own proxies.
        chain
            .iter()
            .rev()
            .find(|ip| !self.config.is_trusted_proxy(ip))
            .or_else(|| chain.first())
            .copied()
    }
}

impl ClientIpResolver for ForwardedIpResolver {
    fn resolve(&self, headers: &Headers, remote_addr: Option<IpAddr>) -> Option<IpAddr> {
        if !self.config.trusts_peer(remote_addr) {
            tracing::debug!(remote_addr = ?remote_addr, "peer is not a trusted proxy, ignoring forwarding headers");
            return remote_addr;
        }

        if self.config.trust_x_forwarded_for {
            if let Some(ip) = headers
                .get("x-forwarded-for")
                .and_then(|v| self.from_forwarded_for(v))
            {
                tracing::debug!(client_ip = %ip, "client ip from x-forwarded-for");
                return Some(ip);
            }
        }

        if self.config.trust_x_real_ip {
            if let Some(ip) = headers
                .get("x-real-ip")
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
            {
                tracing::debug!(client_ip = %ip, "client ip from x-real-ip");
                return Some(ip);
            }
        }

        remote_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        Headers::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn default_config_uses_peer_address() {
        let resolver = ForwardedIpResolver::default();
        let headers = headers(&[("x-forwarded-for", "1.2.3.4"), ("x-real-ip", "5.6.7.8")]);

        assert_eq!(resolver.resolve(&headers, Some(ip("10.0.0.1"))), Some(ip("10.0.0.1")));
        assert_eq!(resolver.resolve(&headers, None), None);
    }

    #[test]
    fn forwarded_for_takes_first_hop_without_proxy_list() {
        let resolver = ForwardedIpResolver::new(ProxyConfig::default().trust_forwarded_for());
        let headers = headers(&[("X-Forwarded-For", "203.0.113.7, 198.51.100.2")]);

        assert_eq!(resolver.resolve(&headers, None), Some(ip("203.0.113.7")));
    }

    #[test]
    fn forwarded_for_skips_trusted_proxies() {
        let config = ProxyConfig::default()
            .trust_forwarded_for()
            .with_trusted_proxy(ip("10.0.0.1"))
            .with_trusted_proxy(ip("10.0.0.2"));
        let resolver = ForwardedIpResolver::new(config);
        let headers = headers(&[("x-forwarded-for", "6.6.6.6, 203.0.113.7, 10.0.0.2")]);

        assert_eq!(
            resolver.resolve(&headers, Some(ip("10.0.0.1"))),
            Some(ip("203.0.113.7"))
        );
    }

    #[test]
    fn untrusted_peer_cannot_spoof() {
        let config = ProxyConfig::default()
            .trust_forwarded_for()
            .with_trusted_proxy(ip("10.0.0.1"));
        let resolver = ForwardedIpResolver::new(config);
        let headers = headers(&[("x-forwarded-for", "1.1.1.1")]);

        assert_eq!(
            resolver.resolve(&headers, Some(ip("192.0.2.9"))),
            Some(ip("192.0.2.9"))
        );
    }

    #[test]
    fn real_ip_is_used_when_trusted() {
        let resolver = ForwardedIpResolver::new(ProxyConfig::default().trust_real_ip());
        let headers = headers(&[("X-Real-IP", " 2001:db8::1 ")]);

        assert_eq!(resolver.resolve(&headers, None), Some(ip("2001:db8::1")));
    }

    #[test]
    fn garbage_headers_fall_back_to_peer() {
        let resolver = ForwardedIpResolver::new(
            ProxyConfig::default().trust_forwarded_for().trust_real_ip(),
        );
        let headers = headers(&[("x-forwarded-for", "unknown"), ("x-real-ip", "nope")]);

        assert_eq!(resolver.resolve(&headers, Some(ip("10.1.1.1"))), Some(ip("10.1.1.1")));
    }

    #[test]
    fn closures_are_resolvers() {
        let fixed = |_: &Headers, _: Option<IpAddr>| Some(ip("127.0.0.1"));
        assert_eq!(fixed.resolve(&Headers::new(), None), Some(ip("127.0.0.1")));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ProxyConfig = serde_json::from_str(
            r#"{ "trust_x_forwarded_for": true, "trusted_proxies": ["10.0.0.1"] }"#,
        )
        .unwrap();

        assert!(config.trust_x_forwarded_for);
        assert!(!config.trust_x_real_ip);
        assert_eq!(config.trusted_proxies, vec![ip("10.0.0.1")]);

        let resolver = ForwardedIpResolver::new(config.clone());
        assert_eq!(resolver.config(), &config);
    }
}
