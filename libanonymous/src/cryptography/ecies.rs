//! Anonymous public-key encryption.
//!
//! A sender needs nothing but the recipient's 32-byte public key. Each call draws a fresh ephemeral key pair
//! `(R, r)` and computes:
//!
//! ```text
//! z    = r * Pub                                    (shared point)
//! tag  = SHA3-256(z || m)
//! ks   = PBKDF2-HMAC-SHA3-256(z, salt = R, 4096, |m|)
//! c    = R || tag || (m XOR ks)
//! ```
//!
//! The recipient recomputes `z = d * R` from its clamped seed `d`, strips the keystream and checks the tag.
//!
//! # Decrypt-then-verify
//!
//! The tag is computed over the plaintext, so decryption has to recover the candidate plaintext before it can be
//! authenticated. The candidate lives in a zeroizing buffer inside [`open`] and is only handed to the caller once
//! the tag matches, but the unauthenticated bytes do exist in process memory for the length of the call. The tag
//! comparison is constant-time.

use crate::cryptography::auth::AuthTag;
use crate::cryptography::clamp::ClampedScalar;
use crate::cryptography::curve::CurvePoint;
use crate::cryptography::ecdh::diffie_hellman;
use crate::cryptography::keystream::apply_keystream;
use crate::cryptography::{HEADER_SIZE, POINT_SIZE, PRIVATE_KEY_SIZE, SCALAR_SIZE};
use crate::error::CryptoError;
use log::{debug, trace, warn};
use rand_core::{CryptoRng, OsRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// A parsed ciphertext: `R || tag || body`.
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// The ephemeral point exactly as it appeared on the wire. It doubles as the keystream salt.
    ephemeral_bytes: [u8; POINT_SIZE],
    ephemeral: CurvePoint,
    tag: AuthTag,
    body: Vec<u8>,
}

impl Ciphertext {
    /// Split a ciphertext into its parts. Fails if it is shorter than the 64-byte header or if `R` is not a curve
    /// point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < HEADER_SIZE {
            debug!("Rejected ciphertext: {} bytes is shorter than the header", bytes.len());
            return Err(CryptoError::min_length("ciphertext", HEADER_SIZE, bytes.len()));
        }
        let (header, body) = bytes.split_at(HEADER_SIZE);
        let (ephemeral_bytes, tag) = header.split_at(POINT_SIZE);
        let ephemeral = CurvePoint::decode("ephemeral point", ephemeral_bytes)?;
        let mut raw = [0u8; POINT_SIZE];
        raw.copy_from_slice(ephemeral_bytes);
        Ok(Self { ephemeral_bytes: raw, ephemeral, tag: AuthTag::from_bytes(tag)?, body: body.to_vec() })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.ephemeral_bytes);
        bytes.extend_from_slice(self.tag.as_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    pub fn ephemeral_point(&self) -> &CurvePoint {
        &self.ephemeral
    }

    pub fn tag(&self) -> &AuthTag {
        &self.tag
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Total encoded length, always `64 + body.len()`.
    pub fn len(&self) -> usize {
        HEADER_SIZE + self.body.len()
    }

    /// A ciphertext is never empty: the header is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("ephemeral", &hex::encode(self.ephemeral_bytes))
            .field("tag", &self.tag)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// One-shot key pair for a single [`seal`] call. Dropping it zeroizes the scalar.
struct EphemeralKeyPair {
    point: CurvePoint,
    secret: ClampedScalar,
}

impl EphemeralKeyPair {
    fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut seed = Zeroizing::new([0u8; SCALAR_SIZE]);
        rng.fill_bytes(&mut *seed);
        let secret = ClampedScalar::from_seed_array(&seed);
        Self { point: secret.public_point(), secret }
    }
}

/// Encrypt `message` to an already-validated recipient point.
pub fn seal<R: RngCore + CryptoRng>(recipient: &CurvePoint, message: &[u8], rng: &mut R) -> Ciphertext {
    let ephemeral = EphemeralKeyPair::generate(rng);
    let ephemeral_bytes = ephemeral.point.to_bytes();
    let shared = diffie_hellman(recipient, &ephemeral.secret);
    let tag = AuthTag::compute(&shared, message);
    let mut body = message.to_vec();
    apply_keystream(&shared, &ephemeral_bytes, &mut body);
    Ciphertext { ephemeral_bytes, ephemeral: ephemeral.point, tag, body }
}

/// Decrypt and authenticate a parsed ciphertext with the recipient's clamped secret.
pub fn open(secret: &ClampedScalar, ciphertext: &Ciphertext) -> Result<Vec<u8>, CryptoError> {
    let shared = diffie_hellman(&ciphertext.ephemeral, secret);
    let mut message = Zeroizing::new(ciphertext.body.clone());
    apply_keystream(&shared, &ciphertext.ephemeral_bytes, &mut message);
    let expected = AuthTag::compute(&shared, &message);
    if !bool::from(expected.ct_eq(&ciphertext.tag)) {
        warn!("Ciphertext with ephemeral point {} failed authentication", hex::encode(ciphertext.ephemeral_bytes));
        return Err(CryptoError::AuthenticationFailed);
    }
    Ok(std::mem::take(&mut *message))
}

/// Encrypt `message` to the 32-byte `public_key` using the operating system's random source.
///
/// The output is always `64 + message.len()` bytes long, and two calls with the same inputs give different
/// ciphertexts.
pub fn encrypt(public_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    encrypt_with_rng(public_key, message, &mut OsRng)
}

/// As [`encrypt`], drawing the ephemeral seed from `rng`.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    public_key: &[u8],
    message: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, CryptoError> {
    trace!("Encrypting {} bytes", message.len());
    let recipient = CurvePoint::decode("public key", public_key)?;
    Ok(seal(&recipient, message, rng).to_bytes())
}

/// Decrypt `ciphertext` with the 64-byte `private_key`. Only the seed (the first 32 bytes) is used.
///
/// Fails with [`CryptoError::AuthenticationFailed`] if the ciphertext was not produced for this key or was
/// modified in transit; no plaintext is returned in that case.
pub fn decrypt(private_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    trace!("Decrypting {} bytes", ciphertext.len());
    if private_key.len() != PRIVATE_KEY_SIZE {
        debug!("Rejected private key: expected {PRIVATE_KEY_SIZE} bytes, got {}", private_key.len());
        return Err(CryptoError::exact_length("private key", PRIVATE_KEY_SIZE, private_key.len()));
    }
    let secret = ClampedScalar::from_seed(&private_key[..SCALAR_SIZE])?;
    let ciphertext = Ciphertext::from_bytes(ciphertext)?;
    open(&secret, &ciphertext)
}
