//! Utility functions used internally by this crate.

use serde::Serialize;

/// Encodes the given value as self-describing CBOR.
///
/// Encoding an internally constructed value can only fail on a bug in this
/// crate, so failures abort.
pub(crate) fn cbor_encode(value: &impl Serialize) -> Vec<u8> {
    let mut serializer = serde_cbor::Serializer::new(Vec::new());
    serializer
        .self_describe()
        .expect("Failed to self describe CBOR");
    value
        .serialize(&mut serializer)
        .expect("Failed to serialize value");
    serializer.into_inner()
}
