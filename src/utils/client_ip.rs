//! Proxy-aware client IP resolution.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Resolves the real client IP for a request.
///
/// When `behind_proxy` is true the service trusts its reverse proxy and reads
/// the client address from `X-Forwarded-For` (last entry, the one appended by
/// the trusted hop) falling back to `X-Real-IP`. Otherwise, and whenever the
/// headers are absent or unparseable, the socket peer address is used.
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> IpAddr {
    if behind_proxy {
        if let Some(ip) = forwarded_for(headers).or_else(|| real_ip(headers)) {
            return ip;
        }
    }

    peer.ip()
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .and_then(|v| v.trim().parse().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Converts a client IP to the 32-bit integer stored with each link.
///
/// IPv6 addresses that wrap an IPv4 address are unwrapped; other IPv6
/// addresses do not fit the column and map to 0.
pub fn ip_to_u32(ip: IpAddr) -> u32 {
    match ip {
        IpAddr::V4(v4) => u32::from(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(u32::from).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn peer() -> SocketAddr {
        "10.0.0.1:40000".parse().unwrap()
    }

    #[test]
    fn test_direct_connection_uses_peer() {
        let headers = HeaderMap::new();
        assert_eq!(
            resolve_client_ip(&headers, peer(), false),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
    }

    #[test]
    fn test_headers_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4".parse().unwrap());

        assert_eq!(
            resolve_client_ip(&headers, peer(), false),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
    }

    #[test]
    fn test_forwarded_for_last_entry_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "9.9.9.9, 1.2.3.4".parse().unwrap());

        assert_eq!(
            resolve_client_ip(&headers, peer(), true),
            IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "5.6.7.8".parse().unwrap());

        assert_eq!(
            resolve_client_ip(&headers, peer(), true),
            IpAddr::V4(Ipv4Addr::new(5, 6, 7, 8))
        );
    }

    #[test]
    fn test_garbage_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "not-an-ip".parse().unwrap());

        assert_eq!(
            resolve_client_ip(&headers, peer(), true),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
    }

    #[test]
    fn test_ip_to_u32_v4() {
        assert_eq!(ip_to_u32("127.0.0.1".parse().unwrap()), 0x7f00_0001);
        assert_eq!(ip_to_u32("0.0.0.0".parse().unwrap()), 0);
        assert_eq!(ip_to_u32("255.255.255.255".parse().unwrap()), u32::MAX);
    }

    #[test]
    fn test_ip_to_u32_v6_mapped() {
        assert_eq!(ip_to_u32("::ffff:127.0.0.1".parse().unwrap()), 0x7f00_0001);
    }

    #[test]
    fn test_ip_to_u32_plain_v6_is_zero() {
        assert_eq!(ip_to_u32("2001:db8::1".parse().unwrap()), 0);
    }
}
