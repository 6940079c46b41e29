use super::Hash;
use crate::EndpointRecord;
use ic_representation_independent_hash::{hash, representation_independent_hash, Value};

const METHOD_PSEUDO_HEADER_NAME: &str = ":ic-cert-method";
const QUERY_PSEUDO_HEADER_NAME: &str = ":ic-cert-query";

/// Calculates the
/// [Representation Independent Hash](https://internetcomputer.org/docs/current/references/ic-interface-spec/#hash-of-map)
/// of the request side of an [EndpointRecord].
///
/// Only meaningful for records that certify the request; the certification
/// engine substitutes an empty blob when request certification is disabled.
pub fn request_hash(record: &EndpointRecord) -> Hash {
    let mut entries: Vec<(String, Value)> = record
        .request_headers
        .iter()
        .filter(|(_, header_value)| !header_value.is_empty())
        .map(|(header_name, header_value)| {
            (
                header_name.to_ascii_lowercase(),
                Value::String(header_value.clone()),
            )
        })
        .collect();

    entries.push((
        METHOD_PSEUDO_HEADER_NAME.into(),
        Value::String(record.method.clone()),
    ));

    let concatenated_query = record
        .query_params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    entries.push((
        QUERY_PSEUDO_HEADER_NAME.into(),
        Value::Bytes(hash(concatenated_query.as_bytes()).to_vec()),
    ));

    // The request body is not certified, this library targets GET, HEAD and
    // OPTIONS endpoints whose bodies are empty.
    let request_body_hash = hash(&[]);

    let concatenated_hashes = [representation_independent_hash(&entries), request_body_hash].concat();
    hash(concatenated_hashes.as_slice())
}
