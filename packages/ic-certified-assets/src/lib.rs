/*!
# Certified Assets

Certified assets is an implementation of the server side of the
[ICP](https://internetcomputer.org/)
[HTTP gateway protocol](https://internetcomputer.org/docs/references/http-gateway-protocol-spec)'s
response verification sub-protocol. It lets a [canister](https://internetcomputer.org/how-it-works/canister-lifecycle/)
that serves HTTP produce responses that HTTP gateways can verify
cryptographically, so clients do not have to trust the individual replica that
produced the response.

The crate maintains a certification tree whose leaves bind URL paths to
request and response hashes, installs the tree's root hash as the canister's
certified data, and, for each incoming request, produces the witness,
certification expression and header values the gateway needs. Both
[Response Verification v2](https://internetcomputer.org/docs/references/http-gateway-protocol-spec/#response-verification)
and the legacy v1 scheme are supported; the scheme is selected by the
`certificate_version` field of the incoming request.

Certification happens in two steps:

1. [Describing endpoints](#describing-endpoints).
2. [Serving certified responses](#serving-certified-responses).

## Describing endpoints

An [Endpoint] is a fluent description of one HTTP exchange: the URL, the
response body (or its hash), and optionally the method, status code, and the
request headers, query parameters and response headers to certify.

```no_run
use ic_certified_assets::{CertifiedAssets, Endpoint};

let mut assets = CertifiedAssets::new();

// A fully certified exchange.
assets.certify(
    Endpoint::new("/hello", Some(b"Hello World!"))
        .response_header("Content-Type", "text/plain"),
)?;

// Response-only certification, the request is not certified.
assets.certify(
    Endpoint::new("/time", None)
        .body(b"12:00")
        .no_request_certification(),
)?;

// A fallback served for every URL under "/" without a more specific
// endpoint, excluded from certification entirely.
assets.certify(
    Endpoint::new("/", Some(b"Not found"))
        .status(404)
        .is_fallback_path()
        .no_certification(),
)?;
# Ok::<(), ic_certified_assets::CertificationError>(())
```

Every mutation pushes the new tree root to the certified data register
through the host interface, keeping the
[root hash](CertifiedAssets::root_hash) and the platform's certificate in
sync.

## Serving certified responses

At request time, [get_certified_response](CertifiedAssets::get_certified_response)
matches the incoming request and the response the canister is about to return
against the certified endpoints, and appends the `IC-Certificate` and
`IC-CertificateExpression` headers:

```no_run
use ic_certified_assets::{CertifiedAssets, HttpRequest, HttpResponse};

fn http_request(assets: &CertifiedAssets, request: HttpRequest) -> HttpResponse {
    let response = HttpResponse {
        status_code: 200,
        headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        body: b"Hello World!".to_vec(),
        upgrade: None,
    };

    assets
        .get_certified_response(&request, &response, None)
        .unwrap()
}
```

The platform only issues certificates within query calls, so certification
must happen in an update call (or in `init`/`post_upgrade`) before the
response is served from a query call. [get_certificate](CertifiedAssets::get_certificate)
fails with [CertificationError::NoRootCertificate] otherwise.
*/

#![deny(missing_docs, missing_debug_implementations, rustdoc::all, clippy::all)]

pub mod cel;
pub use cel::{create_cel_expr, CertificateExpression};
pub mod endpoint;
pub use endpoint::*;
pub mod error;
pub use error::*;
pub mod hash;
pub use hash::*;
pub mod host;
pub use host::*;
pub mod http;
pub use http::*;
pub mod store;
pub use store::*;
pub mod tree;
pub use tree::*;

mod assets;
pub use assets::*;

mod index;
mod utils;

// https://github.com/la10736/rstest/tree/master/rstest_reuse#cavelets
#[cfg(test)]
#[allow(clippy::single_component_path_imports)]
use rstest_reuse;
