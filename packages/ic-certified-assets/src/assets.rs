//! The assets module contains the certification engine that maintains the
//! certification tree and metadata directory, and the response binder that
//! produces certificate headers for incoming requests.

use crate::cel::CertificateExpression;
use crate::http::{parse_path, parse_query_pairs};
use crate::index::Metadata;
use crate::tree::{assets_tree_path, encode_witness, TreePath};
use crate::{
    request_hash, response_hash, CertificationError, CertificationResult, CertifiedDataHost,
    Endpoint, EndpointRecord, Hash, HeaderField, HttpRequest, HttpResponse, IcHost, StableStore,
    CERTIFICATE_EXPRESSION_HEADER_NAME, CERTIFICATE_HEADER_NAME,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ic_certification::HashTree;
use ic_representation_independent_hash::hash;
use log::debug;

/// The certificate and encoded witness returned by
/// [get_certified_tree](CertifiedAssets::get_certified_tree).
#[derive(Debug, Clone)]
pub struct CertifiedTree {
    /// The platform-signed certificate over the certification tree's root.
    pub certificate: Vec<u8>,

    /// The CBOR-encoded witness revealing the requested tree paths.
    pub tree: Vec<u8>,
}

/// Certifies the HTTP endpoints served by a canister and binds certificates
/// to outgoing responses.
///
/// Endpoints are described with the [Endpoint] builder and registered with
/// [certify](CertifiedAssets::certify). At request time,
/// [get_certified_response](CertifiedAssets::get_certified_response) (or
/// [get_certificate](CertifiedAssets::get_certificate)) matches the incoming
/// request against the certified endpoints and produces the `IC-Certificate`
/// and `IC-CertificateExpression` headers an HTTP gateway needs to verify the
/// response.
///
/// After every mutation the certification tree's root hash is installed as
/// the canister's certified data, so the certificate returned by the platform
/// trails mutations by one message round: certify in update calls, serve from
/// query calls.
///
/// # Examples
///
/// ```no_run
/// use ic_certified_assets::{CertifiedAssets, Endpoint, HttpRequest, HttpResponse};
///
/// let mut assets = CertifiedAssets::new();
///
/// assets
///     .certify(
///         Endpoint::new("/hello", Some(b"Hello World!"))
///             .response_header("Content-Type", "text/plain"),
///     )
///     .unwrap();
///
/// let request = HttpRequest {
///     method: "GET".to_string(),
///     url: "/hello".to_string(),
///     headers: vec![],
///     body: vec![],
///     certificate_version: Some(2),
/// };
/// let response = HttpResponse {
///     status_code: 200,
///     headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
///     body: b"Hello World!".to_vec(),
///     upgrade: None,
/// };
///
/// let certified_response = assets
///     .get_certified_response(&request, &response, None)
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct CertifiedAssets<Host: CertifiedDataHost = IcHost> {
    store: StableStore,
    host: Host,
}

impl CertifiedAssets<IcHost> {
    /// Creates an instance with an empty store, backed by the Internet
    /// Computer system API.
    pub fn new() -> Self {
        Self::with_host(StableStore::default(), IcHost)
    }

    /// Creates an instance over an existing store, backed by the Internet
    /// Computer system API.
    pub fn with_store(store: StableStore) -> Self {
        Self::with_host(store, IcHost)
    }
}

impl Default for CertifiedAssets<IcHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Host: CertifiedDataHost> CertifiedAssets<Host> {
    /// Creates an instance over the given store, reaching the certified data
    /// register through the given host interface.
    pub fn with_host(store: StableStore, host: Host) -> Self {
        Self { store, host }
    }

    /// Returns the current root hash of the certification tree.
    ///
    /// The engine keeps the certified data register in sync on every
    /// mutation; this accessor exists for canisters that re-install the root
    /// themselves, for example in `post_upgrade`.
    pub fn root_hash(&self) -> Hash {
        self.store.tree.root_hash()
    }

    /// Certifies the described endpoint, inserting it into the certification
    /// tree and the metadata directory, and refreshing the certified data
    /// register.
    ///
    /// Certifying the same endpoint twice keeps both entries in the
    /// directory; the tree paths coincide, so the root hash is unaffected by
    /// the duplicate.
    pub fn certify(&mut self, endpoint: Endpoint) -> CertificationResult {
        let record = endpoint.build()?;
        debug!("certifying endpoint {} {}", record.method, record.url);

        self.store
            .tree
            .put(&assets_tree_path(&record.url), record.body_hash.to_vec());

        let expression = CertificateExpression::compile(&record);

        let request_hash_bytes = if record.no_certification || record.no_request_certification {
            vec![]
        } else {
            request_hash(&record).to_vec()
        };
        let response_hash_bytes = if record.no_certification {
            vec![]
        } else {
            response_hash(&record, &expression.text).to_vec()
        };
        if record.no_certification {
            assert!(
                request_hash_bytes.is_empty() && response_hash_bytes.is_empty(),
                "uncertified endpoint produced a request or response hash, this is a bug, please report it"
            );
        }

        let mut full_expr_path: TreePath = expression
            .path
            .iter()
            .map(|segment| segment.as_bytes().to_vec())
            .collect();
        full_expr_path.push(expression.hash.to_vec());
        full_expr_path.push(request_hash_bytes);
        full_expr_path.push(response_hash_bytes);

        self.store.tree.put(&full_expr_path, vec![]);
        self.refresh_certified_data();

        self.store.metadata.insert(Metadata {
            endpoint: record,
            expression_text: expression.text,
            encoded_expr_path: expression.encoded_path,
            full_expr_path,
        });

        Ok(())
    }

    /// Removes the certified endpoint that fully matches the described one,
    /// deleting its tree paths and its directory entry, and refreshing the
    /// certified data register. Removing an endpoint that was never certified
    /// only drops the URL's legacy v1 leaf.
    pub fn remove(&mut self, endpoint: Endpoint) -> CertificationResult {
        let record = endpoint.build()?;
        debug!("removing endpoint {} {}", record.method, record.url);

        self.store.tree.delete(&assets_tree_path(&record.url));
        if let Some(metadata) = self.store.metadata.remove_record(&record) {
            self.store.tree.delete(&metadata.full_expr_path);
        }
        self.refresh_certified_data();

        Ok(())
    }

    /// Removes every certified endpoint under the given URL and refreshes the
    /// certified data register.
    pub fn remove_all(&mut self, url: &str) -> CertificationResult {
        let url = parse_path(url)?;
        debug!("removing all endpoints for {url}");

        self.store.tree.delete(&assets_tree_path(&url));
        for metadata in self.store.metadata.remove_url(&url) {
            self.store.tree.delete(&metadata.full_expr_path);
        }
        self.refresh_certified_data();

        Ok(())
    }

    /// Drops every certified endpoint and refreshes the certified data
    /// register.
    pub fn clear(&mut self) {
        self.store.tree.clear();
        self.store.metadata.clear();
        self.refresh_certified_data();
    }

    /// Enumerates every certified endpoint record. Entries certified for the
    /// same URL appear in insertion order; there is no ordering guarantee
    /// across URLs.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointRecord> {
        self.store.metadata.iter().map(|metadata| &metadata.endpoint)
    }

    /// Returns the response headers that certify the given request and
    /// response pair: `IC-Certificate` and, for v2 requests,
    /// `IC-CertificateExpression`.
    ///
    /// An optional response body hash may be provided if it is known
    /// beforehand, sparing the cost of hashing the body again.
    pub fn get_certificate(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        response_body_hash: Option<Hash>,
    ) -> CertificationResult<Vec<HeaderField>> {
        match request.certificate_version {
            Some(2) => self.v2_certificate_headers(request, response, response_body_hash),
            _ => self.v1_certificate_headers(request),
        }
    }

    /// Returns a copy of the given response with the certificate headers
    /// appended. See [get_certificate](CertifiedAssets::get_certificate).
    pub fn get_certified_response(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        response_body_hash: Option<Hash>,
    ) -> CertificationResult<HttpResponse> {
        let headers = self.get_certificate(request, response, response_body_hash)?;

        let mut certified_response = response.clone();
        certified_response.headers.extend(headers);
        Ok(certified_response)
    }

    /// Returns the platform certificate together with a witness revealing the
    /// legacy v1 leaf and every expression path under each of the given URLs,
    /// or under every certified URL if none are given.
    pub fn get_certified_tree(&self, urls: Option<&[&str]>) -> CertificationResult<CertifiedTree> {
        let certificate = self.data_certificate()?;

        let witness = match urls {
            Some(urls) => self.reveal_urls(urls.iter().copied()),
            None => self.reveal_urls(self.store.metadata.urls()),
        };

        Ok(CertifiedTree {
            certificate,
            tree: encode_witness(&witness),
        })
    }

    fn v1_certificate_headers(
        &self,
        request: &HttpRequest,
    ) -> CertificationResult<Vec<HeaderField>> {
        // v1 keys the tree by the raw path, so URLs certified with
        // percent-encoded bytes are only reachable through v2.
        let path = request.get_raw_path()?;
        if !self.store.tree.contains_path(&assets_tree_path(&path)) {
            debug!("no v1 leaf for {path}");
            return Err(CertificationError::NoMetadata);
        }

        let certified_tree = self.get_certified_tree(Some(&[path.as_str()]))?;

        Ok(vec![(
            CERTIFICATE_HEADER_NAME.to_string(),
            format!(
                "certificate=:{}:, tree=:{}:",
                BASE64.encode(&certified_tree.certificate),
                BASE64.encode(&certified_tree.tree)
            ),
        )])
    }

    fn v2_certificate_headers(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        response_body_hash: Option<Hash>,
    ) -> CertificationResult<Vec<HeaderField>> {
        let record = record_for(request, response, response_body_hash)?;
        let metadata = self
            .store
            .metadata
            .find(&record)
            .ok_or(CertificationError::NoMetadata)?;

        let certificate = self.data_certificate()?;
        let witness = self.store.tree.reveal(&metadata.full_expr_path);

        Ok(vec![
            (
                CERTIFICATE_HEADER_NAME.to_string(),
                format!(
                    "certificate=:{}:, tree=:{}:, version=2, expr_path=:{}:",
                    BASE64.encode(&certificate),
                    BASE64.encode(encode_witness(&witness)),
                    BASE64.encode(&metadata.encoded_expr_path)
                ),
            ),
            (
                CERTIFICATE_EXPRESSION_HEADER_NAME.to_string(),
                metadata.expression_text.clone(),
            ),
        ])
    }

    fn reveal_urls<'a>(&self, urls: impl IntoIterator<Item = &'a str>) -> HashTree {
        let mut paths: Vec<TreePath> = vec![];
        for url in urls {
            paths.push(assets_tree_path(url));
            paths.extend(
                self.store
                    .metadata
                    .for_url(url)
                    .map(|metadata| metadata.full_expr_path.clone()),
            );
        }

        self.store.tree.reveals(paths.iter())
    }

    fn data_certificate(&self) -> CertificationResult<Vec<u8>> {
        self.host
            .data_certificate()
            .ok_or(CertificationError::NoRootCertificate)
    }

    fn refresh_certified_data(&self) {
        self.host.set_certified_data(&self.store.tree.root_hash());
    }
}

/// Reconstructs the tentative endpoint record an incoming exchange would have
/// been certified under.
fn record_for(
    request: &HttpRequest,
    response: &HttpResponse,
    response_body_hash: Option<Hash>,
) -> CertificationResult<EndpointRecord> {
    let url = request.get_path()?;
    let query_params = request
        .get_query()?
        .map(|query| parse_query_pairs(&query))
        .unwrap_or_default();

    Ok(EndpointRecord {
        url,
        body_hash: response_body_hash.unwrap_or_else(|| hash(&response.body)),
        method: request.method.clone(),
        query_params,
        request_headers: request.headers.clone(),
        status: response.status_code,
        response_headers: response.headers.clone(),
        no_certification: false,
        no_request_certification: false,
        is_fallback_path: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct FakeHost {
        certified_data: Rc<RefCell<Option<Hash>>>,
        certificate: Option<Vec<u8>>,
    }

    impl FakeHost {
        fn with_certificate(certificate: &[u8]) -> Self {
            FakeHost {
                certified_data: Rc::default(),
                certificate: Some(certificate.to_vec()),
            }
        }
    }

    impl CertifiedDataHost for FakeHost {
        fn set_certified_data(&self, digest: &Hash) {
            *self.certified_data.borrow_mut() = Some(*digest);
        }

        fn data_certificate(&self) -> Option<Vec<u8>> {
            self.certificate.clone()
        }
    }

    fn assets() -> CertifiedAssets<FakeHost> {
        CertifiedAssets::with_host(
            StableStore::default(),
            FakeHost::with_certificate(b"certificate"),
        )
    }

    fn v2_request(url: &str) -> HttpRequest {
        HttpRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: vec![],
            body: vec![],
            certificate_version: Some(2),
        }
    }

    fn response(body: &[u8]) -> HttpResponse {
        HttpResponse {
            status_code: 200,
            headers: vec![],
            body: body.to_vec(),
            upgrade: None,
        }
    }

    #[test]
    fn every_mutator_syncs_the_certified_data_register() {
        let host = FakeHost::with_certificate(b"certificate");
        let mut assets = CertifiedAssets::with_host(StableStore::default(), host.clone());

        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assert_eq!(*host.certified_data.borrow(), Some(assets.root_hash()));

        assets
            .remove(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assert_eq!(*host.certified_data.borrow(), Some(assets.root_hash()));

        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets.remove_all("/hello").unwrap();
        assert_eq!(*host.certified_data.borrow(), Some(assets.root_hash()));

        assets.clear();
        assert_eq!(*host.certified_data.borrow(), Some(assets.root_hash()));
    }

    #[test]
    fn duplicate_certification_keeps_the_root_and_both_entries() {
        let mut assets = assets();
        let endpoint = Endpoint::new("/hello", Some(b"hello".as_slice()));

        assets.certify(endpoint.clone()).unwrap();
        let root_after_one = assets.root_hash();
        assets.certify(endpoint).unwrap();

        assert_eq!(assets.root_hash(), root_after_one);
        assert_eq!(assets.endpoints().count(), 2);
    }

    #[test]
    fn remove_all_restores_the_empty_tree() {
        let mut assets = assets();
        let empty_root = assets.root_hash();

        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets.remove_all("/hello").unwrap();

        assert_eq!(assets.root_hash(), empty_root);
        assert_eq!(assets.endpoints().count(), 0);
    }

    #[test]
    fn remove_scrubs_the_directory_entry() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        assets
            .remove(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        assert_eq!(assets.endpoints().count(), 0);
        assert_matches!(
            assets.get_certificate(&v2_request("/hello"), &response(b"hello"), None),
            Err(CertificationError::NoMetadata)
        );
    }

    #[test]
    fn clear_drops_everything() {
        let mut assets = assets();
        let empty_root = assets.root_hash();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets
            .certify(Endpoint::new("/world", Some(b"world".as_slice())))
            .unwrap();

        assets.clear();

        assert_eq!(assets.root_hash(), empty_root);
        assert_eq!(assets.endpoints().count(), 0);
    }

    #[test]
    fn v2_certificate_carries_expression_and_expr_path() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        let headers = assets
            .get_certificate(&v2_request("/hello"), &response(b"hello"), None)
            .unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].0, CERTIFICATE_HEADER_NAME);
        assert!(headers[0].1.starts_with("certificate=:"));
        assert!(headers[0].1.contains(", version=2, expr_path=:"));
        assert_eq!(headers[1].0, CERTIFICATE_EXPRESSION_HEADER_NAME);
        assert!(headers[1].1.starts_with("default_certification("));
    }

    #[test]
    fn v1_certificate_is_a_single_header() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        let mut request = v2_request("/hello");
        request.certificate_version = None;
        let headers = assets
            .get_certificate(&request, &response(b"hello"), None)
            .unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].0, CERTIFICATE_HEADER_NAME);
        assert!(!headers[0].1.contains("version=2"));
    }

    #[test]
    fn v1_certificate_fails_after_removal() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets.remove_all("/hello").unwrap();

        let mut request = v2_request("/hello");
        request.certificate_version = None;

        assert_matches!(
            assets.get_certificate(&request, &response(b"hello"), None),
            Err(CertificationError::NoMetadata)
        );
    }

    #[test]
    fn missing_certificate_is_reported() {
        let mut assets =
            CertifiedAssets::with_host(StableStore::default(), FakeHost::default());
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        assert_matches!(
            assets.get_certificate(&v2_request("/hello"), &response(b"hello"), None),
            Err(CertificationError::NoRootCertificate)
        );
        assert_matches!(
            assets.get_certified_tree(None),
            Err(CertificationError::NoRootCertificate)
        );
    }

    #[test]
    fn body_hash_override_matches_without_body() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();

        let body_hash = hash(b"hello");
        let headers =
            assets.get_certificate(&v2_request("/hello"), &response(b""), Some(body_hash));

        assert!(headers.is_ok());
    }

    #[test]
    fn certified_tree_covers_all_urls() {
        let mut assets = assets();
        assets
            .certify(Endpoint::new("/hello", Some(b"hello".as_slice())))
            .unwrap();
        assets
            .certify(Endpoint::new("/world", Some(b"world".as_slice())))
            .unwrap();

        let certified_tree = assets.get_certified_tree(None).unwrap();

        assert_eq!(certified_tree.certificate, b"certificate");
        // self-describing CBOR tag
        assert_eq!(&certified_tree.tree[..3], &[0xd9, 0xd9, 0xf7]);
    }
}
