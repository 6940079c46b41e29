use crate::{CertificationError, CertificationResult, HeaderField};
use candid::{CandidType, Deserialize};
use http::Uri;

/// A Candid-encodable representation of an HTTP request.
/// This struct is used by canisters that implement the HTTP interface required by the HTTP Gateway Protocol.
#[derive(Clone, Debug, CandidType, Deserialize, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP request method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// HTTP request headers.
    pub headers: Vec<HeaderField>,
    /// Request body as an array of bytes.
    pub body: Vec<u8>,
    /// The highest certificate version supported by the calling HTTP gateway.
    pub certificate_version: Option<u16>,
}

impl HttpRequest {
    /// Returns the percent-decoded path of the request URL, without domain, query
    /// parameters or fragments. A single trailing slash is stripped, so the root
    /// path decodes to the empty string.
    pub fn get_path(&self) -> CertificationResult<String> {
        parse_path(&self.url)
    }

    /// Returns the path of the request URL as it appears on the wire, without
    /// percent-decoding. Legacy v1 certification keys the tree by this form.
    pub fn get_raw_path(&self) -> CertificationResult<String> {
        parse_raw_path(&self.url)
    }

    /// Returns the query string of the request URL, if any.
    pub fn get_query(&self) -> CertificationResult<Option<String>> {
        self.url
            .parse::<Uri>()
            .map(|uri| uri.query().map(str::to_owned))
            .map_err(|_| CertificationError::MalformedUrl(self.url.clone()))
    }
}

pub(crate) fn parse_path(url: &str) -> CertificationResult<String> {
    let path = parse_raw_path(url)?;
    let decoded_path = urlencoding::decode(&path).map(|path| path.into_owned())?;
    Ok(decoded_path)
}

pub(crate) fn parse_raw_path(url: &str) -> CertificationResult<String> {
    let uri = url
        .parse::<Uri>()
        .map_err(|_| CertificationError::MalformedUrl(url.to_string()))?;

    let path = uri.path();
    Ok(path.strip_suffix('/').unwrap_or(path).to_string())
}

pub(crate) fn parse_query_pairs(query: &str) -> Vec<HeaderField> {
    query
        .split('&')
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            let (name, value) = fragment.split_once('=').unwrap_or((fragment, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}
