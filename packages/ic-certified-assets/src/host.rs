//! The host module contains the interface through which this crate reaches
//! the canister's certified data register.

use crate::Hash;

/// The host platform interface for the certified data register.
///
/// Mutating operations install the certification tree's root hash through
/// [set_certified_data](CertifiedDataHost::set_certified_data), and the
/// response binder retrieves the platform-signed certificate through
/// [data_certificate](CertifiedDataHost::data_certificate). The interface is
/// a trait so the library can be exercised outside a canister.
pub trait CertifiedDataHost {
    /// Installs the given digest as the canister's certified data.
    fn set_certified_data(&self, digest: &Hash);

    /// Returns the platform-signed certificate over the certified data
    /// register. Certificates are only issued within query calls; `None` is
    /// returned otherwise.
    fn data_certificate(&self) -> Option<Vec<u8>>;
}

/// A [CertifiedDataHost] backed by the Internet Computer system API.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcHost;

impl CertifiedDataHost for IcHost {
    fn set_certified_data(&self, digest: &Hash) {
        ic_cdk::api::set_certified_data(digest);
    }

    fn data_certificate(&self) -> Option<Vec<u8>> {
        ic_cdk::api::data_certificate()
    }
}
