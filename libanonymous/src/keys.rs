//! Key types.
//!
//! Keys are supplied by the caller; [`Keypair::generate`] only delegates to Ed25519 key generation so that tests
//! and the command-line tool have something to work with. There is no storage or rotation here.

use crate::cryptography::clamp::ClampedScalar;
use crate::cryptography::curve::CurvePoint;
use crate::cryptography::ecies::{open, seal, Ciphertext};
use crate::cryptography::signature::{sign, verify};
use crate::cryptography::{POINT_SIZE, PRIVATE_KEY_SIZE, SCALAR_SIZE, SIGNATURE_SIZE};
use crate::error::CryptoError;
use crate::helpers::to_array;
use ed25519_dalek::SigningKey;
use rand_core::{CryptoRng, OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use zeroize::Zeroizing;

/// A recipient or verifier key: a validated Edwards25519 point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let point = CurvePoint::decode("public key", bytes)?;
        Ok(Self { point })
    }

    /// Tries to deserialize a hex string into a `PublicKey`. The hex string must represent a valid compressed point
    /// on the curve.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        if hex.len() != 2 * POINT_SIZE {
            return Err(CryptoError::exact_length("public key", POINT_SIZE, hex.len() / 2));
        }
        let mut bytes = [0u8; POINT_SIZE];
        hex::decode_to_slice(hex.as_bytes(), &mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
        self.point.to_bytes()
    }

    pub fn as_hex(&self) -> String {
        self.point.as_hex()
    }

    pub fn as_point(&self) -> &CurvePoint {
        &self.point
    }

    /// Encrypt `message` to this key. See [`crate::cryptography::ecies`].
    pub fn encrypt(&self, message: &[u8]) -> Vec<u8> {
        self.encrypt_with_rng(message, &mut OsRng)
    }

    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(&self, message: &[u8], rng: &mut R) -> Vec<u8> {
        seal(&self.point, message, rng).to_bytes()
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify(&self.to_bytes(), message, signature)
    }
}

impl From<CurvePoint> for PublicKey {
    fn from(point: CurvePoint) -> Self {
        Self { point }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CryptoError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        PublicKey::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// A 64-byte private key: the 32-byte seed followed by the public key.
///
/// Cloning is safe because the bytes are zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; PRIVATE_KEY_SIZE]>);

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(Zeroizing::new(to_array::<PRIVATE_KEY_SIZE>("private key", bytes)?)))
    }

    /// Expand a seed into a full private key, deriving the public half with Ed25519.
    pub fn from_seed(seed: &[u8; SCALAR_SIZE]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self(Zeroizing::new(signing_key.to_keypair_bytes()))
    }

    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        if hex.len() != 2 * PRIVATE_KEY_SIZE {
            return Err(CryptoError::exact_length("private key", PRIVATE_KEY_SIZE, hex.len() / 2));
        }
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        hex::decode_to_slice(hex.as_bytes(), &mut *bytes)?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(*self.0))
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.0
    }

    pub fn seed(&self) -> &[u8] {
        &self.0[..SCALAR_SIZE]
    }

    /// The public key stored in the second half. Fails if those bytes are not a curve point.
    pub fn public_key(&self) -> Result<PublicKey, CryptoError> {
        PublicKey::from_bytes(&self.0[SCALAR_SIZE..])
    }

    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], CryptoError> {
        sign(self.as_bytes(), message)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let ciphertext = Ciphertext::from_bytes(ciphertext)?;
        let secret = ClampedScalar::from_seed(self.seed())?;
        open(&secret, &ciphertext)
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

/// A private key together with its public key.
#[derive(Clone, Debug)]
pub struct Keypair {
    private: PrivateKey,
    public: PublicKey,
}

impl Keypair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::from(SigningKey::generate(rng))
    }

    pub fn from_seed(seed: &[u8; SCALAR_SIZE]) -> Self {
        Self::from(SigningKey::from_bytes(seed))
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl From<SigningKey> for Keypair {
    fn from(signing_key: SigningKey) -> Self {
        let public = PublicKey::from(CurvePoint::from(signing_key.verifying_key().to_edwards()));
        let private = PrivateKey(Zeroizing::new(signing_key.to_keypair_bytes()));
        Self { private, public }
    }
}
