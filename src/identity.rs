// SPDX-FileCopyrightText: 2026 Education Policy Blog contributors
// SPDX-License-Identifier: Apache-2.0

//! Client identity extraction.
//!
//! Rate-limit state is partitioned by client IP. Behind a proxy the
//! socket address is the proxy's, so forwarding headers take precedence:
//! `x-forwarded-for` (first hop in the chain), then `x-real-ip`, then
//! the transport-layer remote address. When none of those yield a value
//! the request is attributed to a shared fallback identity rather than
//! failing the check.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Identity used when no header or socket address is available.
pub const FALLBACK_IDENTITY: &str = "unknown";

/// Extract the rate-limit identity for a request.
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            // Take the first IP in the chain
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(value) = real_ip.to_str() {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => FALLBACK_IDENTITY.to_string(),
    }
}
