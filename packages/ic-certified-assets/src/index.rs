//! In-memory directory of certified endpoints, keyed by URL and then by the
//! unique HTTP hash distinguishing the three certification modes.

use crate::hash::unique_http_hash_parts;
use crate::tree::TreePath;
use crate::{unique_http_hash, EndpointRecord, Hash, HeaderField};
use std::collections::HashMap;

/// Everything the store keeps per certified exchange.
#[derive(Debug, Clone)]
pub(crate) struct Metadata {
    pub(crate) endpoint: EndpointRecord,
    pub(crate) expression_text: String,
    pub(crate) encoded_expr_path: Vec<u8>,
    pub(crate) full_expr_path: TreePath,
}

/// A two-level directory `url -> unique_http_hash -> list of Metadata`.
///
/// The inner lists preserve insertion order, and duplicates are permitted: a
/// caller may certify multiple response bodies for the same URL, method and
/// status.
#[derive(Debug, Default)]
pub(crate) struct MetadataIndex {
    entries: HashMap<String, HashMap<Hash, Vec<Metadata>>>,
}

impl MetadataIndex {
    pub(crate) fn insert(&mut self, metadata: Metadata) {
        let key = unique_http_hash(&metadata.endpoint);
        self.entries
            .entry(metadata.endpoint.url.clone())
            .or_default()
            .entry(key)
            .or_default()
            .push(metadata);
    }

    /// Removes every entry stored under the given URL, returning them.
    pub(crate) fn remove_url(&mut self, url: &str) -> Vec<Metadata> {
        self.entries
            .remove(url)
            .map(|by_hash| by_hash.into_values().flatten().collect())
            .unwrap_or_default()
    }

    /// Removes the first entry whose endpoint record fully matches the given
    /// record, pruning inner maps left empty.
    pub(crate) fn remove_record(&mut self, record: &EndpointRecord) -> Option<Metadata> {
        let by_hash = self.entries.get_mut(&record.url)?;
        let key = unique_http_hash(record);
        let list = by_hash.get_mut(&key)?;
        let position = list.iter().position(|metadata| &metadata.endpoint == record)?;

        let metadata = list.remove(position);
        if list.is_empty() {
            by_hash.remove(&key);
        }
        if by_hash.is_empty() {
            self.entries.remove(&record.url);
        }

        Some(metadata)
    }

    /// Finds the certified endpoint matching an incoming exchange,
    /// reconstructed as `record`.
    ///
    /// The three per-URL keys are tried in increasing certification strength:
    /// body only (uncertified entries), body and status (response-only
    /// entries), then body, status and method (fully certified entries). The
    /// first key with candidates wins, and within those candidates the first
    /// entry whose certified headers and query parameters are all present on
    /// the incoming exchange is returned. The incoming request and response
    /// may carry additional headers without invalidating the match.
    pub(crate) fn find(&self, record: &EndpointRecord) -> Option<&Metadata> {
        let by_hash = self.entries.get(&record.url)?;

        let keys = [
            unique_http_hash_parts(&record.body_hash, None, None),
            unique_http_hash_parts(&record.body_hash, Some(record.status), None),
            unique_http_hash_parts(&record.body_hash, Some(record.status), Some(&record.method)),
        ];
        let candidates = keys
            .iter()
            .find_map(|key| by_hash.get(key).filter(|list| !list.is_empty()))?;

        candidates.iter().find(|metadata| {
            is_subset(&metadata.endpoint.request_headers, &record.request_headers)
                && is_subset(&metadata.endpoint.response_headers, &record.response_headers)
                && is_subset(&metadata.endpoint.query_params, &record.query_params)
        })
    }

    pub(crate) fn for_url<'a>(&'a self, url: &str) -> impl Iterator<Item = &'a Metadata> {
        self.entries
            .get(url)
            .into_iter()
            .flat_map(|by_hash| by_hash.values().flatten())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Metadata> {
        self.entries
            .values()
            .flat_map(|by_hash| by_hash.values().flatten())
    }

    pub(crate) fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_subset(certified: &[HeaderField], incoming: &[HeaderField]) -> bool {
    certified.iter().all(|pair| incoming.contains(pair))
}
