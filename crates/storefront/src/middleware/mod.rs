//! HTTP middleware stack for the page host.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Panic catcher (500 via `AppError`)
//! 4. Request ID (recorded in the request span)
//! 5. CSP nonce (per-request nonce for inline scripts)
//! 6. Security headers (CSP with the nonce, framing, sniffing)

pub mod csp;
pub mod request_id;
pub mod security_headers;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
