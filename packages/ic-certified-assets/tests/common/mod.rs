use ic_certified_assets::{CertifiedAssets, CertifiedDataHost, Hash, StableStore};
use std::cell::RefCell;
use std::rc::Rc;

/// An in-memory stand-in for the certified data register, letting the
/// scenarios observe what the engine installs and control whether a
/// certificate is available.
#[derive(Debug, Clone, Default)]
pub struct TestHost {
    state: Rc<RefCell<TestHostState>>,
}

#[derive(Debug, Default)]
struct TestHostState {
    certified_data: Option<Hash>,
    certificate: Option<Vec<u8>>,
}

impl TestHost {
    pub fn with_certificate(certificate: &[u8]) -> Self {
        let host = TestHost::default();
        host.state.borrow_mut().certificate = Some(certificate.to_vec());
        host
    }

    pub fn certified_data(&self) -> Option<Hash> {
        self.state.borrow().certified_data
    }
}

impl CertifiedDataHost for TestHost {
    fn set_certified_data(&self, digest: &Hash) {
        self.state.borrow_mut().certified_data = Some(*digest);
    }

    fn data_certificate(&self) -> Option<Vec<u8>> {
        self.state.borrow().certificate.clone()
    }
}

pub const CERTIFICATE: &[u8] = b"certificate bytes";

pub fn certified_assets() -> (CertifiedAssets<TestHost>, TestHost) {
    let host = TestHost::with_certificate(CERTIFICATE);
    let assets = CertifiedAssets::with_host(StableStore::default(), host.clone());

    (assets, host)
}
