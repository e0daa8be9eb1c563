//! Cache policy for per-user API responses.
//!
//! Recipe, tag and profile bodies depend on the session cookie, so shared
//! caches must not store them and clients must revalidate.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Directive sent with every owner-scoped response.
pub const OWNER_SCOPED_CACHE_POLICY: &str = "private, no-cache, must-revalidate";

/// Header pair for handlers returning the caller's own data.
pub fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, OWNER_SCOPED_CACHE_POLICY)
}
