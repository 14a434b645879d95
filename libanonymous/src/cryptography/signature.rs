//! Length-checking adapter over Ed25519 signatures.

use crate::cryptography::{POINT_SIZE, PRIVATE_KEY_SIZE, SIGNATURE_SIZE};
use crate::error::CryptoError;
use crate::helpers::to_array;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use log::debug;
use zeroize::Zeroizing;

/// Sign `message` with a 64-byte private key (seed followed by public key).
pub fn sign(private_key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], CryptoError> {
    let keypair_bytes = Zeroizing::new(to_array::<PRIVATE_KEY_SIZE>("private key", private_key)?);
    let signing_key = SigningKey::from_keypair_bytes(&keypair_bytes).map_err(|e| {
        debug!("Rejected private key: {e}");
        CryptoError::InvalidSigningKey
    })?;
    Ok(signing_key.sign(message).to_bytes())
}

/// Verify `signature` over `message` against a 32-byte public key. Any malformed input yields `false`.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(key_bytes) = to_array::<POINT_SIZE>("public key", public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        debug!("Rejected public key: not a valid Ed25519 key");
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        debug!("Rejected signature: expected {SIGNATURE_SIZE} bytes, got {}", signature.len());
        return false;
    };
    verifying_key.verify(message, &signature).is_ok()
}
