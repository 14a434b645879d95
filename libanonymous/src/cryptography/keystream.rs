//! The XOR pad: PBKDF2-HMAC-SHA3-256 with the shared secret as password and the ephemeral point encoding as salt.

use crate::cryptography::ecdh::SharedSecret;
use crate::cryptography::KDF_ITERATIONS;
use pbkdf2::pbkdf2_hmac;
use sha3::Sha3_256;
use zeroize::Zeroizing;

/// Derive `len` bytes of keystream. The output is zeroized on drop.
pub fn keystream(secret: &SharedSecret, salt: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut stream = Zeroizing::new(vec![0u8; len]);
    if len > 0 {
        pbkdf2_hmac::<Sha3_256>(secret.as_bytes(), salt, KDF_ITERATIONS, &mut stream);
    }
    stream
}

/// XOR `data` in place with a keystream of the same length. Applying it twice restores the input.
pub fn apply_keystream(secret: &SharedSecret, salt: &[u8], data: &mut [u8]) {
    let stream = keystream(secret, salt, data.len());
    data.iter_mut().zip(stream.iter()).for_each(|(byte, key)| *byte ^= key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cryptography::clamp::ClampedScalar;
    use crate::cryptography::ecdh::diffie_hellman;

    fn shared_secret(seed: u8) -> SharedSecret {
        let recipient = ClampedScalar::from_seed_array(&[seed; 32]);
        let ephemeral = ClampedScalar::from_seed_array(&[seed.wrapping_add(1); 32]);
        diffie_hellman(&recipient.public_point(), &ephemeral)
    }

    #[test]
    fn keystream_lengths() {
        let secret = shared_secret(1);
        assert!(keystream(&secret, b"salt", 0).is_empty());
        assert_eq!(keystream(&secret, b"salt", 1).len(), 1);
        assert_eq!(keystream(&secret, b"salt", 100).len(), 100);
    }

    #[test]
    fn keystream_is_a_prefix_of_longer_output() {
        let secret = shared_secret(1);
        let short = keystream(&secret, b"salt", 20);
        let long = keystream(&secret, b"salt", 70);
        assert_eq!(&short[..], &long[..20]);
    }

    #[test]
    fn keystream_depends_on_secret_and_salt() {
        let a = keystream(&shared_secret(1), b"salt", 32);
        let b = keystream(&shared_secret(5), b"salt", 32);
        let c = keystream(&shared_secret(1), b"pepper", 32);
        assert_ne!(*a, *b);
        assert_ne!(*a, *c);
    }

    #[test]
    fn apply_twice_is_identity() {
        let secret = shared_secret(3);
        let mut data = b"attack at dawn".to_vec();
        apply_keystream(&secret, b"salt", &mut data);
        assert_ne!(data, b"attack at dawn");
        apply_keystream(&secret, b"salt", &mut data);
        assert_eq!(data, b"attack at dawn");
    }
}
