//! Diffie-Hellman over Edwards25519.
//!
//! Both parties compute the same point: `r * (d * B) == d * (r * B)`. The encoded point is used directly as keying
//! material, it is never hashed to a scalar.

use crate::cryptography::clamp::ClampedScalar;
use crate::cryptography::curve::CurvePoint;
use crate::cryptography::POINT_SIZE;
use std::fmt::Debug;
use zeroize::Zeroizing;

/// The encoded shared point. Lives for a single encrypt or decrypt call and is zeroized on drop.
pub struct SharedSecret(Zeroizing<[u8; POINT_SIZE]>);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; POINT_SIZE] {
        &self.0
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}

/// Multiply the peer's public point by our clamped secret.
pub fn diffie_hellman(peer_public: &CurvePoint, secret: &ClampedScalar) -> SharedSecret {
    let shared_point = peer_public.mul_bytes(secret.as_bytes());
    SharedSecret(Zeroizing::new(shared_point.to_bytes()))
}
