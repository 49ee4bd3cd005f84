//! Client address resolution behind reverse proxies.
//!
//! Sources are checked in order and the first usable one wins:
//! 1. `X-Forwarded-For` (leftmost valid IP, across all header values)
//! 2. `X-Real-IP` (used by nginx and friends)
//! 3. Host part of the connection's `host:port` remote address
//! 4. The raw remote address, unparsed
//!
//! Malformed input never fails the lookup; it just falls through to the next
//! source. The last step may return an address with a port attached.

use std::net::IpAddr;

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Resolve the client address from request headers and the connection's
/// remote address.
pub fn resolve_client_ip(headers: &HeaderMap, remote_addr: &str) -> String {
    if let Some(ip) = forwarded_for(headers) {
        return ip;
    }

    if let Some(ip) = real_ip(headers) {
        return ip;
    }

    if let Some(host) = split_host_port(remote_addr) {
        if is_ip(host) {
            return host.to_string();
        }
    }

    remote_addr.to_string()
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .find(|token| is_ip(token))
        .map(str::to_string)
}

fn real_ip(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(X_REAL_IP)?.to_str().ok()?.trim();
    is_ip(value).then(|| value.to_string())
}

fn is_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

/// Split `host:port` or `[host]:port`, returning the host.
///
/// A bare IPv6 address without brackets has too many colons to split and is
/// rejected, like an address with no port at all.
fn split_host_port(addr: &str) -> Option<&str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        tail.strip_prefix(':')?;
        return Some(host);
    }

    let (host, _port) = addr.rsplit_once(':')?;
    if host.contains(':') {
        return None;
    }
    Some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_takes_first_ip() {
        let h = headers(&[("x-forwarded-for", "8.8.8.8, 9.9.9.9")]);
        assert_eq!(resolve_client_ip(&h, ""), "8.8.8.8");
    }

    #[test]
    fn test_forwarded_for_skips_invalid_tokens() {
        let h = headers(&[("x-forwarded-for", "not-an-ip, 9.9.9.9")]);
        assert_eq!(resolve_client_ip(&h, "1.1.1.1:80"), "9.9.9.9");
    }

    #[test]
    fn test_forwarded_for_spans_multiple_values() {
        let h = headers(&[
            ("x-forwarded-for", "unknown"),
            ("x-forwarded-for", " 2001:db8::1 ,10.0.0.1"),
        ]);
        assert_eq!(resolve_client_ip(&h, ""), "2001:db8::1");
    }

    #[test]
    fn test_real_ip_when_forwarded_for_absent() {
        let h = headers(&[("x-real-ip", " 7.7.7.7 ")]);
        assert_eq!(resolve_client_ip(&h, "1.1.1.1:80"), "7.7.7.7");
    }

    #[test]
    fn test_real_ip_used_when_forwarded_for_is_all_garbage() {
        let h = headers(&[("x-forwarded-for", "a, b, c"), ("x-real-ip", "7.7.7.7")]);
        assert_eq!(resolve_client_ip(&h, ""), "7.7.7.7");
    }

    #[test]
    fn test_invalid_real_ip_falls_through() {
        let h = headers(&[("x-real-ip", "localhost")]);
        assert_eq!(resolve_client_ip(&h, "6.6.6.6:1234"), "6.6.6.6");
    }

    #[test]
    fn test_remote_addr_host_part() {
        let h = HeaderMap::new();
        assert_eq!(resolve_client_ip(&h, "6.6.6.6:1234"), "6.6.6.6");
        assert_eq!(resolve_client_ip(&h, "[::1]:8080"), "::1");
    }

    #[test]
    fn test_raw_remote_addr_fallback() {
        let h = HeaderMap::new();
        assert_eq!(resolve_client_ip(&h, "example.com:443"), "example.com:443");
        assert_eq!(resolve_client_ip(&h, "::1"), "::1");
        assert_eq!(resolve_client_ip(&h, "garbage"), "garbage");
        assert_eq!(resolve_client_ip(&h, ""), "");
    }
}
