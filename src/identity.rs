use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};
use std::net::SocketAddr;

/// Cookie carrying the soft client identity. Not a security boundary:
/// every client behind one network address hashes to the same value.
pub const USER_ID_COOKIE: &str = "user_id";

const COOKIE_MAX_AGE_SECS: u64 = 86_400;

/// Result of resolving the client identity for a request.
pub struct Identity {
    pub user_id: String,
    /// `Set-Cookie` value to attach to the response when the request
    /// carried no identity cookie.
    pub set_cookie: Option<String>,
}

/// Returns the existing identity cookie unchanged, or derives a fresh one
/// from the client address and asks the caller to set it.
pub fn resolve(headers: &HeaderMap, client_addr: &str) -> Identity {
    if let Some(existing) = cookie_value(headers, USER_ID_COOKIE) {
        return Identity {
            user_id: existing,
            set_cookie: None,
        };
    }

    let user_id = derive_user_id(client_addr);
    let set_cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly",
        USER_ID_COOKIE, user_id, COOKIE_MAX_AGE_SECS
    );
    Identity {
        user_id,
        set_cookie: Some(set_cookie),
    }
}

/// Hex digest of the client address. One-way on purpose; collisions across
/// clients sharing an address are accepted.
pub fn derive_user_id(client_addr: &str) -> String {
    hex::encode(Sha256::digest(client_addr.as_bytes()))
}

/// Looks up a cookie by name across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Client network address, respecting the common reverse-proxy forwarding
/// headers before falling back to the socket peer.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn derive_is_a_64_char_hex_digest() {
        let id = derive_user_id("10.0.0.1");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable across calls for the same address.
        assert_eq!(id, derive_user_id("10.0.0.1"));
        assert_ne!(id, derive_user_id("10.0.0.2"));
    }

    #[test]
    fn existing_cookie_is_returned_unchanged() {
        let headers = headers_with_cookie("user_id=abc123; other=x");
        let identity = resolve(&headers, "10.0.0.1");
        assert_eq!(identity.user_id, "abc123");
        assert!(identity.set_cookie.is_none());
    }

    #[test]
    fn missing_cookie_issues_http_only_24h_cookie() {
        let identity = resolve(&HeaderMap::new(), "10.0.0.1");
        assert_eq!(identity.user_id, derive_user_id("10.0.0.1"));
        let cookie = identity.set_cookie.unwrap();
        assert!(cookie.starts_with("user_id="));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn forwarded_header_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        let peer = "192.168.1.1:1234".parse().ok();
        assert_eq!(client_address(&headers, peer), "203.0.113.7");
    }

    #[test]
    fn real_ip_header_is_second_choice() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_address(&headers, None), "203.0.113.9");
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let peer = "192.168.1.1:1234".parse().ok();
        assert_eq!(client_address(&HeaderMap::new(), peer), "192.168.1.1");
        assert_eq!(client_address(&HeaderMap::new(), None), "unknown");
    }
}
