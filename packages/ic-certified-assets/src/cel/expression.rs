use super::create_cel_expr;
use crate::tree::{EXACT_PATH_TERMINATOR, EXPR_PATH_PREFIX, WILDCARD_PATH_TERMINATOR};
use crate::utils::cbor_encode;
use crate::{EndpointRecord, Hash};
use ic_representation_independent_hash::hash;

/// A compiled certification expression for one [EndpointRecord].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateExpression {
    /// The whitespace-normalized expression string, shipped in the
    /// `IC-CertificateExpression` response header.
    pub text: String,

    /// The expression path segments locating the expression in the
    /// certification tree, `"http_expr"` prefix and wildcard terminator
    /// included.
    pub path: Vec<String>,

    /// Self-describing CBOR encoding of the expression path, shipped in the
    /// `expr_path` field of the `IC-Certificate` response header.
    pub encoded_path: Vec<u8>,

    /// SHA-256 of the UTF-8 bytes of the expression string.
    pub hash: Hash,
}

impl CertificateExpression {
    /// Compiles the certification expression for the given record.
    pub fn compile(record: &EndpointRecord) -> CertificateExpression {
        let text = create_cel_expr(record);
        let path = expr_path(record);
        let encoded_path = cbor_encode(&path);
        let expr_hash = hash(text.as_bytes());

        CertificateExpression {
            text,
            path,
            encoded_path,
            hash: expr_hash,
        }
    }
}

fn expr_path(record: &EndpointRecord) -> Vec<String> {
    let mut path = vec![EXPR_PATH_PREFIX.to_string()];

    if record.url.is_empty() {
        path.push(String::new());
    } else {
        path.extend(record.url.split('/').map(String::from));
    }

    let terminator = if record.is_fallback_path {
        WILDCARD_PATH_TERMINATOR
    } else {
        EXACT_PATH_TERMINATOR
    };
    path.push(terminator.to_string());

    path
}
