use crate::{Hash, HeaderField};

/// The normalized description of one certified HTTP exchange, produced by
/// [Endpoint::build](crate::Endpoint::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    /// The percent-decoded URL path, without host, query string or trailing
    /// slash. The root path is the empty string.
    pub url: String,

    /// SHA-256 of the response body.
    pub body_hash: Hash,

    /// The HTTP request method. Treated opaquely; callers conventionally
    /// supply uppercase verbs.
    pub method: String,

    /// Certified query parameters, in the order the caller supplied them.
    /// Empty when request certification is disabled.
    pub query_params: Vec<HeaderField>,

    /// Certified request headers, in the order the caller supplied them.
    /// Empty when request certification is disabled.
    pub request_headers: Vec<HeaderField>,

    /// The HTTP response status code.
    pub status: u16,

    /// Certified response headers, in the order the caller supplied them.
    /// Empty when certification is disabled.
    pub response_headers: Vec<HeaderField>,

    /// Excludes the whole exchange from certification. Implies
    /// [no_request_certification](EndpointRecord::no_request_certification).
    pub no_certification: bool,

    /// Excludes the request from certification, certifying the response only.
    pub no_request_certification: bool,

    /// Terminates the expression path with the fallback wildcard, so the
    /// exchange responds for any descendant URL without a more specific entry.
    pub is_fallback_path: bool,
}
