//! Anonymous encryption to Ed25519 public keys, plus the Edwards25519 point utilities it is built from.
//!
//! The byte-level functions re-exported here take and return plain byte slices with fixed-length contracts and
//! are wire-compatible with other implementations of the same scheme. The typed API in [`keys`] and
//! [`cryptography`] does the same work on validated values.

pub mod cryptography;
pub mod error;
pub mod helpers;
pub mod keys;

pub use cryptography::curve::{add, is_on_curve, scalar_base_mult, scalar_mult, sub, CurvePoint};
pub use cryptography::ecies::{decrypt, encrypt, encrypt_with_rng, Ciphertext};
pub use cryptography::signature::{sign, verify};
pub use error::{CryptoError, LengthRequirement};
pub use keys::{Keypair, PrivateKey, PublicKey};
