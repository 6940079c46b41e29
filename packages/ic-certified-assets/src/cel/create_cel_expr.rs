use crate::{EndpointRecord, HeaderField};

/// Creates the `String` representation of the CEL expression certifying the
/// given [EndpointRecord].
///
/// Runs of spaces and newlines are collapsed to single spaces before the
/// expression is hashed, and the exact same bytes are shipped in the
/// `IC-CertificateExpression` response header.
pub fn create_cel_expr(record: &EndpointRecord) -> String {
    let cel_expr = if record.no_certification {
        create_skip_cel_expr()
    } else if record.no_request_certification {
        create_response_only_cel_expr(&record.response_headers)
    } else {
        create_full_cel_expr(
            &record.request_headers,
            &record.query_params,
            &record.response_headers,
        )
    };

    normalize_whitespace(&cel_expr)
}

fn create_skip_cel_expr() -> String {
    r#"default_certification(ValidationArgs{
        no_certification: Empty{}
    })"#
    .to_string()
}

fn create_response_only_cel_expr(response_headers: &[HeaderField]) -> String {
    let headers = header_names(response_headers);

    format!(
        r#"default_certification(ValidationArgs{{
            certification: Certification{{
                no_request_certification: Empty{{}},
                response_certification: ResponseCertification{{
                    certified_response_headers: ResponseHeaderList{{
                        headers: {headers:?}
                    }}
                }}
            }}
        }})"#
    )
}

fn create_full_cel_expr(
    request_headers: &[HeaderField],
    query_params: &[HeaderField],
    response_headers: &[HeaderField],
) -> String {
    let certified_request_headers = header_names(request_headers);
    let certified_query_parameters = header_names(query_params);
    let headers = header_names(response_headers);

    format!(
        r#"default_certification(ValidationArgs{{
            certification: Certification{{
                request_certification: RequestCertification{{
                    certified_request_headers: {certified_request_headers:?},
                    certified_query_parameters: {certified_query_parameters:?}
                }},
                response_certification: ResponseCertification{{
                    certified_response_headers: ResponseHeaderList{{
                        headers: {headers:?}
                    }}
                }}
            }}
        }})"#
    )
}

fn header_names(headers: &[HeaderField]) -> Vec<&str> {
    headers.iter().map(|(name, _)| name.as_str()).collect()
}

pub(crate) fn normalize_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if c == ' ' || c == '\n' {
            pending_space = !normalized.is_empty();
        } else {
            if pending_space {
                normalized.push(' ');
                pending_space = false;
            }
            normalized.push(c);
        }
    }

    normalized
}
