//! Security headers middleware.
//!
//! Adds restrictive headers to every response. The CSP is locked down except
//! for what the page needs: its nonce-tagged bootstrap scripts, the three.js
//! modules from the CDN, and compiling the wasm bundle.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::csp::CspNonce;

/// Origin the three.js modules are loaded from.
pub const SCRIPT_CDN: &str = "https://cdn.jsdelivr.net";

/// Origin of the sample catalog's product images.
pub const IMAGE_CDN: &str = "https://via.placeholder.com";

/// Build the CSP for a response.
///
/// Without a nonce, inline scripts are not allowed at all.
#[must_use]
pub fn content_security_policy(nonce: Option<&str>) -> String {
    let nonce = nonce
        .filter(|n| !n.is_empty())
        .map(|n| format!(" 'nonce-{n}'"))
        .unwrap_or_default();
    format!(
        "default-src 'none'; \
         script-src 'self'{nonce} 'wasm-unsafe-eval' {SCRIPT_CDN}; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' data: blob: {IMAGE_CDN}; \
         connect-src 'self' {SCRIPT_CDN}; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Content-Security-Policy` (see [`content_security_policy`])
/// - `Permissions-Policy` denying sensors, media capture and payment
/// - `Cache-Control: no-store, max-age=0` unless the response set its own
/// - `Cross-Origin-Opener-Policy: same-origin`
/// - `Cross-Origin-Resource-Policy: same-origin`
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let csp = content_security_policy(
        request
            .extensions()
            .get::<CspNonce>()
            .map(CspNonce::value),
    );

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!(error = %e, "could not encode CSP header"),
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=(), \
             xr-spatial-tracking=()",
        ),
    );

    // Static files carry their own caching policy.
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_with_nonce() {
        let csp = content_security_policy(Some("abc123=="));
        assert!(csp.contains("script-src 'self' 'nonce-abc123==' 'wasm-unsafe-eval' https://cdn.jsdelivr.net;"));
        assert!(csp.contains("img-src 'self' data: blob: https://via.placeholder.com;"));
        assert!(csp.starts_with("default-src 'none';"));
    }

    #[test]
    fn test_csp_without_nonce_allows_no_inline_script() {
        for nonce in [None, Some("")] {
            let csp = content_security_policy(nonce);
            assert!(!csp.contains("nonce-"));
            assert!(!csp.contains("unsafe-inline"));
        }
    }
}
