use crate::error::CryptoError;
use log::debug;
use serde::Serialize;

/// Copy `bytes` into a fixed-size array, failing with [`CryptoError::InvalidLength`] if the length is wrong.
pub fn to_array<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], CryptoError> {
    bytes.try_into().map_err(|_| {
        debug!("Rejected {field}: expected {N} bytes, got {}", bytes.len());
        CryptoError::exact_length(field, N, bytes.len())
    })
}

/// Serialize a byte slice as a lowercase hex string.
pub fn to_hex<S>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    hex::encode(bytes).serialize(s)
}
