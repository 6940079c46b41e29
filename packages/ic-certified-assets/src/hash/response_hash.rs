use super::Hash;
use crate::{EndpointRecord, CERTIFICATE_EXPRESSION_HEADER_NAME, CERTIFICATE_HEADER_NAME};
use ic_representation_independent_hash::{hash, representation_independent_hash, Value};

const STATUS_PSEUDO_HEADER_NAME: &str = ":ic-cert-status";

/// Calculates the
/// [Representation Independent Hash](https://internetcomputer.org/docs/current/references/ic-interface-spec/#hash-of-map)
/// of the response side of an [EndpointRecord], bound to the given certification
/// expression string.
///
/// Only meaningful for records that certify the response; the certification
/// engine substitutes an empty blob when certification is disabled.
pub fn response_hash(record: &EndpointRecord, expression_text: &str) -> Hash {
    let mut entries: Vec<(String, Value)> = record
        .response_headers
        .iter()
        .filter(|(header_name, header_value)| {
            !header_value.is_empty() && !header_name.eq_ignore_ascii_case(CERTIFICATE_HEADER_NAME)
        })
        .map(|(header_name, header_value)| {
            (
                header_name.to_ascii_lowercase(),
                Value::String(header_value.clone()),
            )
        })
        .collect();

    entries.push((
        CERTIFICATE_EXPRESSION_HEADER_NAME.to_ascii_lowercase(),
        Value::String(expression_text.to_string()),
    ));
    entries.push((
        STATUS_PSEUDO_HEADER_NAME.into(),
        Value::Number(record.status.into()),
    ));

    let concatenated_hashes =
        [representation_independent_hash(&entries), record.body_hash].concat();
    hash(concatenated_hashes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endpoint;

    const EXPRESSION: &str =
        "default_certification(ValidationArgs{ no_certification: Empty{} })";

    #[test]
    fn response_hash_matches_manual_derivation() {
        let record = Endpoint::new("/hello", Some(b"hello"))
            .response_header("Content-Type", "text/plain")
            .build()
            .unwrap();

        let expected_entries = vec![
            (
                "content-type".to_string(),
                Value::String("text/plain".to_string()),
            ),
            (
                "ic-certificateexpression".to_string(),
                Value::String(EXPRESSION.to_string()),
            ),
            (":ic-cert-status".to_string(), Value::Number(200)),
        ];
        let expected = hash(
            [
                representation_independent_hash(&expected_entries),
                hash(b"hello"),
            ]
            .concat()
            .as_slice(),
        );

        assert_eq!(response_hash(&record, EXPRESSION), expected);
    }

    #[test]
    fn response_hash_excludes_certificate_header() {
        let record = Endpoint::new("/hello", Some(b"hello"))
            .response_header("Content-Type", "text/plain")
            .build()
            .unwrap();
        let record_with_certificate = Endpoint::new("/hello", Some(b"hello"))
            .response_header("Content-Type", "text/plain")
            .response_header("IC-Certificate", "certificate=:abc:, tree=:def:")
            .build()
            .unwrap();

        assert_eq!(
            response_hash(&record, EXPRESSION),
            response_hash(&record_with_certificate, EXPRESSION)
        );
    }

    #[test]
    fn response_hash_skips_empty_value_headers() {
        let record = Endpoint::new("/hello", None).build().unwrap();
        let record_with_empty_header = Endpoint::new("/hello", None)
            .response_header("X-Empty", "")
            .build()
            .unwrap();

        assert_eq!(
            response_hash(&record, EXPRESSION),
            response_hash(&record_with_empty_header, EXPRESSION)
        );
    }

    #[test]
    fn response_hash_certifies_status_and_expression() {
        let record = Endpoint::new("/hello", None).build().unwrap();
        let not_found_record = Endpoint::new("/hello", None).status(404).build().unwrap();

        assert_ne!(
            response_hash(&record, EXPRESSION),
            response_hash(&not_found_record, EXPRESSION)
        );
        assert_ne!(
            response_hash(&record, EXPRESSION),
            response_hash(&record, "another expression")
        );
    }
}
