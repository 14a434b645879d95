//! Seed-to-scalar clamping.
//!
//! A 32-byte seed is hashed with SHA-512 and the low half of the digest is clamped: bits 0-2 cleared, bit 255
//! cleared and bit 254 set. The result is a multiple of the cofactor with a fixed bit length, which is exactly the
//! secret scalar Ed25519 derives from the same seed.

use crate::cryptography::curve::CurvePoint;
use crate::cryptography::SCALAR_SIZE;
use crate::error::CryptoError;
use crate::helpers::to_array;
use sha2::{Digest, Sha512};
use std::fmt::Debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Clear the low three bits and the top bit of `bytes`, and set bit 254.
pub fn clamp_bits(mut bytes: [u8; SCALAR_SIZE]) -> [u8; SCALAR_SIZE] {
    bytes[0] &= 0xF8;
    bytes[31] &= 0x7F;
    bytes[31] |= 0x40;
    bytes
}

/// A secret exponent derived from a seed. It is the only scalar type the Diffie-Hellman step accepts.
///
/// The bytes are zeroized on drop.
#[derive(Clone)]
pub struct ClampedScalar([u8; SCALAR_SIZE]);

impl ClampedScalar {
    /// Derive the clamped scalar from a seed that must be exactly 32 bytes long.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        let seed = Zeroizing::new(to_array::<SCALAR_SIZE>("seed", seed)?);
        Ok(Self::from_seed_array(&seed))
    }

    pub fn from_seed_array(seed: &[u8; SCALAR_SIZE]) -> Self {
        let mut wide = Zeroizing::new([0u8; 64]);
        wide.copy_from_slice(&Sha512::digest(seed));
        let mut low = [0u8; SCALAR_SIZE];
        low.copy_from_slice(&wide[..SCALAR_SIZE]);
        Self(clamp_bits(low))
    }

    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.0
    }

    /// The public point `scalar * B`.
    pub fn public_point(&self) -> CurvePoint {
        CurvePoint::base_mul(&self.0)
    }
}

impl Debug for ClampedScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClampedScalar([REDACTED])")
    }
}

impl Zeroize for ClampedScalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for ClampedScalar {}

impl Drop for ClampedScalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}
