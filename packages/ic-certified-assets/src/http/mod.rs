//! The HTTP module contains types for representing HTTP requests and responses in Rust.
//! These types are Candid-encodable and are used by canisters that implement the
//! HTTP interface required by the HTTP Gateway Protocol.

mod header_field;
mod http_request;
mod http_response;

pub use header_field::*;
pub use http_request::*;
pub use http_response::*;

pub(crate) use http_request::{parse_path, parse_query_pairs};

/// The name of the `IC-Certificate` header, carrying the certificate and witness
/// that an HTTP gateway uses to verify a response.
pub const CERTIFICATE_HEADER_NAME: &str = "IC-Certificate";

/// The name of the `IC-CertificateExpression` header, carrying the CEL expression
/// that declares which parts of a request and response pair are certified.
pub const CERTIFICATE_EXPRESSION_HEADER_NAME: &str = "IC-CertificateExpression";
