//! Cryptographic primitives
//!
//! This module holds the anonymous encryption scheme and the Edwards25519 point algebra it is built on.
//!
//! The pieces are layered leaf-first: [`clamp`] turns seeds into exponents, [`curve`] wraps the group arithmetic
//! behind a validated point type, [`ecdh`] combines the two into a shared secret, [`auth`] and [`keystream`] derive
//! the tag and the XOR pad from that secret, and [`ecies`] assembles everything into `encrypt`/`decrypt`.
//! [`signature`] is an independent, length-checking adapter over Ed25519.

pub mod auth;
pub mod clamp;
pub mod curve;
pub mod ecdh;
pub mod ecies;
pub mod keystream;
pub mod signature;

/// Size of a compressed Edwards25519 point.
pub const POINT_SIZE: usize = 32;
/// Size of a scalar, clamped or not.
pub const SCALAR_SIZE: usize = 32;
/// Size of a private key: the 32-byte seed followed by the 32-byte public key.
pub const PRIVATE_KEY_SIZE: usize = 64;
/// Size of the authentication tag (SHA3-256 output).
pub const TAG_SIZE: usize = 32;
/// Size of the ciphertext header: ephemeral point followed by the tag.
pub const HEADER_SIZE: usize = POINT_SIZE + TAG_SIZE;
/// Size of an Ed25519 signature.
pub const SIGNATURE_SIZE: usize = 64;
/// PBKDF2 iteration count for the keystream. Part of the wire format.
pub const KDF_ITERATIONS: u32 = 4096;
