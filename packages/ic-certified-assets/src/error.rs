//! The error module contains types for common errors that may be thrown
//! by other modules in this crate.

/// Certification result type.
pub type CertificationResult<T = ()> = Result<T, CertificationError>;

/// Certification error type.
#[derive(thiserror::Error, Debug)]
pub enum CertificationError {
    /// The URL was malformed and could not be parsed correctly.
    #[error(r#"Failed to parse url: "{0}""#)]
    MalformedUrl(String),

    /// Error converting UTF-8 string.
    #[error(r#"Error converting UTF8 string bytes: "{0}""#)]
    Utf8ConversionError(#[from] std::string::FromUtf8Error),

    /// The platform did not return a certificate over the certified data register.
    /// Certificates are only issued for query calls, so the most likely cause is
    /// that the calling method was invoked as an update call.
    #[error("No root certificate was found. Make sure this method is only called from a query call, certificates are not available within update calls")]
    NoRootCertificate,

    /// No certified endpoint was compatible with the incoming request and response pair.
    #[error("no metadata found for this url")]
    NoMetadata,
}
