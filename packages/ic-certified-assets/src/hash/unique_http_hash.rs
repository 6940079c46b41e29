use super::Hash;
use crate::EndpointRecord;
use ic_representation_independent_hash::{representation_independent_hash, Value};

const BODY_PSEUDO_HEADER_NAME: &str = ":ic-cert-body";
const METHOD_PSEUDO_HEADER_NAME: &str = ":ic-cert-method";
const STATUS_PSEUDO_HEADER_NAME: &str = ":ic-cert-status";

/// Calculates the hash distinguishing an [EndpointRecord] from other records
/// certified for the same URL.
///
/// The response body always contributes. The status code contributes unless
/// certification is disabled, and the method additionally contributes when the
/// request is certified, so each of the three certification modes produces its
/// own key.
pub fn unique_http_hash(record: &EndpointRecord) -> Hash {
    let status = (!record.no_certification).then_some(record.status);
    let method = (!record.no_certification && !record.no_request_certification)
        .then_some(record.method.as_str());

    unique_http_hash_parts(&record.body_hash, status, method)
}

pub(crate) fn unique_http_hash_parts(
    body_hash: &Hash,
    status: Option<u16>,
    method: Option<&str>,
) -> Hash {
    let mut entries = vec![(
        BODY_PSEUDO_HEADER_NAME.to_string(),
        Value::Bytes(body_hash.to_vec()),
    )];

    if let Some(method) = method {
        entries.push((
            METHOD_PSEUDO_HEADER_NAME.to_string(),
            Value::String(method.to_string()),
        ));
    }
    if let Some(status) = status {
        entries.push((
            STATUS_PSEUDO_HEADER_NAME.to_string(),
            Value::Number(status.into()),
        ));
    }

    representation_independent_hash(&entries)
}
