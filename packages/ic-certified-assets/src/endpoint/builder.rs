use crate::http::parse_path;
use crate::{CertificationResult, EndpointRecord, Hash, HeaderField};
use ic_representation_independent_hash::hash;
use sha2::{Digest, Sha256};

/// A fluent builder describing one HTTP exchange to certify.
///
/// Unspecified fields default to a `GET` request returning status `200` with
/// an empty body and no certified headers or query parameters.
///
/// # Examples
///
/// ```
/// use ic_certified_assets::Endpoint;
///
/// let record = Endpoint::new("/hello", Some(b"Hello World!"))
///     .response_header("Content-Type", "text/plain")
///     .build()
///     .unwrap();
///
/// assert_eq!(record.url, "/hello");
/// assert_eq!(record.status, 200);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: String,
    body_hash: Hash,
    method: String,
    status: u16,
    query_params: Vec<HeaderField>,
    request_headers: Vec<HeaderField>,
    response_headers: Vec<HeaderField>,
    no_certification: bool,
    no_request_certification: bool,
    is_fallback_path: bool,
}

impl Endpoint {
    /// Creates a builder for the given URL. `body` is the response body to
    /// certify, if it is available up front.
    pub fn new(url: impl Into<String>, body: Option<&[u8]>) -> Endpoint {
        Endpoint {
            url: url.into(),
            body_hash: hash(body.unwrap_or_default()),
            method: "GET".to_string(),
            status: 200,
            query_params: vec![],
            request_headers: vec![],
            response_headers: vec![],
            no_certification: false,
            no_request_certification: false,
            is_fallback_path: false,
        }
    }

    /// Sets the response body, recomputing its hash.
    pub fn body(mut self, body: &[u8]) -> Endpoint {
        self.body_hash = hash(body);
        self
    }

    /// Overrides the response body hash with an externally computed one.
    /// Useful when the caller stores only the hash of a large body.
    pub fn hash(mut self, hash: Hash) -> Endpoint {
        self.body_hash = hash;
        self
    }

    /// Sets the response body from consecutive chunks, streaming them through
    /// a single hashing context.
    pub fn chunks<C: AsRef<[u8]>>(mut self, chunks: impl IntoIterator<Item = C>) -> Endpoint {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk.as_ref());
        }
        self.body_hash = hasher.finalize().into();
        self
    }

    /// Sets the request method.
    pub fn method(mut self, method: impl Into<String>) -> Endpoint {
        self.method = method.into();
        self
    }

    /// Sets the response status code.
    pub fn status(mut self, status: u16) -> Endpoint {
        self.status = status;
        self
    }

    /// Adds a single certified request header.
    pub fn request_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Endpoint {
        self.request_headers.push((name.into(), value.into()));
        self
    }

    /// Adds a batch of certified request headers.
    pub fn request_headers(mut self, headers: impl IntoIterator<Item = HeaderField>) -> Endpoint {
        self.request_headers.extend(headers);
        self
    }

    /// Adds a single certified query parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Endpoint {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Adds a batch of certified query parameters.
    pub fn query_params(mut self, params: impl IntoIterator<Item = HeaderField>) -> Endpoint {
        self.query_params.extend(params);
        self
    }

    /// Adds a single certified response header.
    pub fn response_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Endpoint {
        self.response_headers.push((name.into(), value.into()));
        self
    }

    /// Adds a batch of certified response headers.
    pub fn response_headers(mut self, headers: impl IntoIterator<Item = HeaderField>) -> Endpoint {
        self.response_headers.extend(headers);
        self
    }

    /// Marks the endpoint as a fallback, responding for any descendant URL
    /// without a more specific certified endpoint.
    #[allow(clippy::wrong_self_convention)]
    pub fn is_fallback_path(mut self) -> Endpoint {
        self.is_fallback_path = true;
        self
    }

    /// Excludes the request from certification, certifying the response only.
    pub fn no_request_certification(mut self) -> Endpoint {
        self.no_request_certification = true;
        self
    }

    /// Excludes the exchange from certification entirely.
    pub fn no_certification(mut self) -> Endpoint {
        self.no_certification = true;
        self
    }

    /// Freezes the builder into an [EndpointRecord], reducing the URL to a
    /// percent-decoded path and zeroing out the fields that the certification
    /// flags exclude.
    pub fn build(self) -> CertificationResult<EndpointRecord> {
        let url = parse_path(&self.url)?;
        let no_request_certification = self.no_request_certification || self.no_certification;

        Ok(EndpointRecord {
            url,
            body_hash: self.body_hash,
            method: self.method,
            query_params: if no_request_certification {
                vec![]
            } else {
                self.query_params
            },
            request_headers: if no_request_certification {
                vec![]
            } else {
                self.request_headers
            },
            status: self.status,
            response_headers: if self.no_certification {
                vec![]
            } else {
                self.response_headers
            },
            no_certification: self.no_certification,
            no_request_certification,
            is_fallback_path: self.is_fallback_path,
        })
    }
}
