//! The authentication tag: `SHA3-256(shared_secret || message)`.

use crate::cryptography::ecdh::SharedSecret;
use crate::cryptography::TAG_SIZE;
use crate::error::CryptoError;
use crate::helpers::to_array;
use sha3::digest::Output;
use sha3::{Digest, Sha3_256};
use std::fmt::Debug;
use subtle::{Choice, ConstantTimeEq};

/// Hash `data` in one shot with any digest.
pub fn hash_bytes<D: Digest>(data: impl AsRef<[u8]>) -> Output<D> {
    let mut hasher = D::new();
    hasher.update(data);
    hasher.finalize()
}

/// A 32-byte tag binding the shared secret to the plaintext. Equality is constant-time.
#[derive(Clone, Copy)]
pub struct AuthTag([u8; TAG_SIZE]);

impl AuthTag {
    pub fn compute(secret: &SharedSecret, message: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(secret.as_bytes());
        hasher.update(message);
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(to_array::<TAG_SIZE>("tag", bytes)?))
    }

    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }
}

impl ConstantTimeEq for AuthTag {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for AuthTag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AuthTag {}

impl Debug for AuthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthTag({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cryptography::clamp::ClampedScalar;
    use crate::cryptography::ecdh::diffie_hellman;

    fn shared_secret() -> SharedSecret {
        let recipient = ClampedScalar::from_seed_array(&[1u8; 32]);
        let ephemeral = ClampedScalar::from_seed_array(&[2u8; 32]);
        diffie_hellman(&recipient.public_point(), &ephemeral)
    }

    #[test]
    fn tag_is_hash_of_secret_and_message() {
        let secret = shared_secret();
        let tag = AuthTag::compute(&secret, b"test");
        let expected = hash_bytes::<Sha3_256>([secret.as_bytes().as_slice(), b"test".as_slice()].concat());
        assert_eq!(tag.as_bytes().as_slice(), expected.as_slice());
    }

    #[test]
    fn tags_differ_by_message() {
        let secret = shared_secret();
        assert_eq!(AuthTag::compute(&secret, b"test"), AuthTag::compute(&secret, b"test"));
        assert_ne!(AuthTag::compute(&secret, b"test"), AuthTag::compute(&secret, b"Test"));
        assert_ne!(AuthTag::compute(&secret, b""), AuthTag::compute(&secret, b"\0"));
    }

    #[test]
    fn empty_input_hash() {
        assert_eq!(
            hex::encode(hash_bytes::<Sha3_256>(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn from_bytes_checks_length() {
        let tag = AuthTag::from_bytes(&[9u8; 32]).unwrap();
        assert_eq!(tag.as_bytes(), &[9u8; 32]);
        assert!(AuthTag::from_bytes(&[9u8; 31]).is_err());
    }
}
