use hex::FromHexError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The length an input was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRequirement {
    Exactly(usize),
    AtLeast(usize),
}

impl Display for LengthRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthRequirement::Exactly(n) => write!(f, "exactly {n}"),
            LengthRequirement::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Failures of the encryption scheme, the point algebra and the signature adapter.
///
/// On success every operation produces the same bytes whether or not the caller inspects the error class, so
/// matching on the variant is optional.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength { field: &'static str, expected: LengthRequirement, actual: usize },
    #[error("Invalid point on curve: {0}")]
    InvalidPoint(&'static str),
    #[error("Ciphertext failed authentication")]
    AuthenticationFailed,
    #[error("Private key does not match the public key it carries")]
    InvalidSigningKey,
    #[error("Could not deserialize from hex: {0}")]
    Hex(#[from] FromHexError),
}

impl CryptoError {
    pub fn exact_length(field: &'static str, expected: usize, actual: usize) -> Self {
        CryptoError::InvalidLength { field, expected: LengthRequirement::Exactly(expected), actual }
    }

    pub fn min_length(field: &'static str, expected: usize, actual: usize) -> Self {
        CryptoError::InvalidLength { field, expected: LengthRequirement::AtLeast(expected), actual }
    }

    pub fn is_length_error(&self) -> bool {
        matches!(self, CryptoError::InvalidLength { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_messages() {
        let err = CryptoError::exact_length("public key", 32, 31);
        assert_eq!(err.to_string(), "Invalid length for public key: expected exactly 32 bytes, got 31");
        assert!(err.is_length_error());
        let err = CryptoError::min_length("ciphertext", 64, 10);
        assert_eq!(err.to_string(), "Invalid length for ciphertext: expected at least 64 bytes, got 10");
        assert!(!CryptoError::AuthenticationFailed.is_length_error());
    }
}
