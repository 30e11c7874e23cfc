//! HTTP middleware stack for the onboarding API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. Panic catcher (JSON 500 instead of a dropped connection)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. CORS
//! 6. Security headers
//! 7. Body size limit

pub mod panic;
pub mod request_id;
pub mod security_headers;

pub use panic::panic_response;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
