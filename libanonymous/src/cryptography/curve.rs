//! Edwards25519 point algebra over 32-byte compressed encodings.
//!
//! [`CurvePoint`] can only be built by decoding and checking bytes (or by multiplying the base point), so the
//! arithmetic never runs on unchecked input. The free functions [`add`], [`sub`], [`scalar_mult`],
//! [`scalar_base_mult`] and [`is_on_curve`] are the byte-in/byte-out surface used by callers doing key blinding or
//! multi-party work.
//!
//! Scalars are 32-byte little-endian integers and are **not** clamped here. Multiplication against an arbitrary
//! point is exact integer multiplication, so a point carrying a small-order component is treated the same way the
//! Ed25519 reference code treats it.

use crate::cryptography::{POINT_SIZE, SCALAR_SIZE};
use crate::error::CryptoError;
use crate::helpers::to_array;
use curve25519_dalek::constants::{ED25519_BASEPOINT_POINT, ED25519_BASEPOINT_TABLE};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::Scalar;
use log::debug;
use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};
use zeroize::Zeroizing;

/// A point that decoded successfully from its compressed form and therefore satisfies the curve equation.
///
/// Note: EdwardsPoint is `Copy`, so this is `Copy` too.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    point: EdwardsPoint,
}

impl CurvePoint {
    /// Decode a 32-byte compressed point. Fails on the wrong length or if the bytes are not the encoding of a point
    /// on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::decode("point", bytes)
    }

    /// As [`CurvePoint::from_bytes`], with `field` naming the input in the error.
    pub fn decode(field: &'static str, bytes: &[u8]) -> Result<Self, CryptoError> {
        let compressed = CompressedEdwardsY(to_array::<POINT_SIZE>(field, bytes)?);
        match compressed.decompress() {
            Some(point) => Ok(Self { point }),
            None => {
                debug!("Rejected {field}: {} does not decode to a curve point", hex::encode(compressed.as_bytes()));
                Err(CryptoError::InvalidPoint(field))
            }
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        if hex.len() != 2 * POINT_SIZE {
            return Err(CryptoError::exact_length("point", POINT_SIZE, hex.len() / 2));
        }
        let mut bytes = [0u8; POINT_SIZE];
        hex::decode_to_slice(hex.as_bytes(), &mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// The fixed generator of the group.
    pub fn basepoint() -> Self {
        Self { point: ED25519_BASEPOINT_POINT }
    }

    /// `scalar * B`. The base point has prime order, so reducing the scalar modulo the group order first does not
    /// change the result.
    pub fn base_mul(scalar: &[u8; SCALAR_SIZE]) -> Self {
        let scalar = Zeroizing::new(Scalar::from_bytes_mod_order(*scalar));
        Self { point: &*scalar * ED25519_BASEPOINT_TABLE }
    }

    /// `scalar * self`, where `scalar` is read as an unreduced little-endian 256-bit integer.
    pub fn mul_bytes(&self, scalar: &[u8; SCALAR_SIZE]) -> Self {
        // scalar = 8 * high + low. 8P is in the prime-order subgroup, so only `high` may be reduced.
        let mut high = Zeroizing::new([0u8; SCALAR_SIZE]);
        for i in 0..SCALAR_SIZE {
            let next = scalar.get(i + 1).copied().unwrap_or(0);
            high[i] = (scalar[i] >> 3) | (next << 5);
        }
        let high = Zeroizing::new(Scalar::from_bytes_mod_order(*high));
        let low = Zeroizing::new(Scalar::from(scalar[0] & 0x07));
        let point = self.point.mul_by_cofactor() * &*high + self.point * &*low;
        Self { point }
    }

    pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
        self.point.compress().to_bytes()
    }

    pub fn as_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn as_point(&self) -> EdwardsPoint {
        self.point
    }

    /// True if the point lies in the prime-order subgroup (it has no small-order component).
    pub fn is_torsion_free(&self) -> bool {
        self.point.is_torsion_free()
    }
}

impl From<EdwardsPoint> for CurvePoint {
    fn from(point: EdwardsPoint) -> Self {
        Self { point }
    }
}

impl Add for CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: Self) -> Self::Output {
        Self { point: self.point + rhs.point }
    }
}

impl Sub for CurvePoint {
    type Output = CurvePoint;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { point: self.point - rhs.point }
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> Self::Output {
        Self { point: -self.point }
    }
}

impl Debug for CurvePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CurvePoint({})", self.as_hex())
    }
}

impl Display for CurvePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

/// `p1 + p2`. Both inputs must be 32-byte encodings of curve points.
pub fn add(p1: &[u8], p2: &[u8]) -> Result<[u8; POINT_SIZE], CryptoError> {
    let p1 = CurvePoint::decode("p1", p1)?;
    let p2 = CurvePoint::decode("p2", p2)?;
    Ok((p1 + p2).to_bytes())
}

/// `p1 - p2`. Both inputs must be 32-byte encodings of curve points.
pub fn sub(p1: &[u8], p2: &[u8]) -> Result<[u8; POINT_SIZE], CryptoError> {
    let p1 = CurvePoint::decode("p1", p1)?;
    let p2 = CurvePoint::decode("p2", p2)?;
    Ok((p1 - p2).to_bytes())
}

/// `scalar * point`. The scalar must be exactly 32 bytes and is used as given; callers clamp it first if they need
/// to.
pub fn scalar_mult(point: &[u8], scalar: &[u8]) -> Result<[u8; POINT_SIZE], CryptoError> {
    let scalar = Zeroizing::new(to_array::<SCALAR_SIZE>("scalar", scalar)?);
    let point = CurvePoint::decode("point", point)?;
    Ok(point.mul_bytes(&scalar).to_bytes())
}

/// `scalar * B` for the fixed base point `B`.
pub fn scalar_base_mult(scalar: &[u8]) -> Result<[u8; POINT_SIZE], CryptoError> {
    let scalar = Zeroizing::new(to_array::<SCALAR_SIZE>("scalar", scalar)?);
    Ok(CurvePoint::base_mul(&scalar).to_bytes())
}

/// True if `point` is 32 bytes long and decodes to a point satisfying the curve equation.
pub fn is_on_curve(point: &[u8]) -> bool {
    CurvePoint::from_bytes(point).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cryptography::clamp::ClampedScalar;
    use rand_core::{OsRng, RngCore};

    const BASEPOINT: &str = "5866666666666666666666666666666666666666666666666666666666666666";
    const TWO_B: &str = "c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022";
    const THREE_B: &str = "d4b4f5784868c3020403246717ec169ff79e26608ea126a1ab69ee77d1b16712";
    const PUB1: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const PUB2: &str = "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";
    // PUB1 plus the point of order 4 whose encoding is all zeroes.
    const PUB1_PLUS_TORSION: &str = "40c7570f4dd54835b9131184410ed4a0cc93e7d9ad053cbc6d07a62426999582";

    fn point(hex: &str) -> Vec<u8> {
        hex::decode(hex).unwrap()
    }

    fn random_point() -> CurvePoint {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        ClampedScalar::from_seed_array(&seed).public_point()
    }

    #[test]
    fn known_sums() {
        let b = point(BASEPOINT);
        assert_eq!(hex::encode(add(&b, &b).unwrap()), TWO_B);
        assert_eq!(hex::encode(add(&point(TWO_B), &b).unwrap()), THREE_B);
        assert_eq!(hex::encode(sub(&point(THREE_B), &b).unwrap()), TWO_B);
        assert_eq!(
            hex::encode(add(&point(PUB1), &point(PUB2)).unwrap()),
            "02bd074b02982457a69117dd23c26815da2f5a713d34e4da80e375c7b51a6962"
        );
        assert_eq!(
            hex::encode(sub(&point(PUB1), &point(PUB2)).unwrap()),
            "0b7781db7255f002dffd1dd8fdc93656abf61f3e655352d84d832623a1bdf480"
        );
    }

    #[test]
    fn sub_undoes_add() {
        for _ in 0..10 {
            let p = random_point().to_bytes();
            let q = random_point().to_bytes();
            let sum = add(&p, &q).unwrap();
            assert_eq!(sub(&sum, &q).unwrap(), p);
        }
    }

    #[test]
    fn known_products() {
        let k: Vec<u8> = (0u8..32).collect();
        assert_eq!(
            hex::encode(scalar_base_mult(&k).unwrap()),
            "ca4a448c3fc4d04945da9fdf920976c05e9bbe3d8cebb1858ea44d587c5e63c3"
        );
        assert_eq!(
            hex::encode(scalar_mult(&point(PUB1), &k).unwrap()),
            "ff083fc0b99fcceaacec0be2caca28faeedd84df40534fd29bf3f80e46227c4c"
        );
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(hex::encode(scalar_base_mult(&one).unwrap()), BASEPOINT);
    }

    #[test]
    fn scalar_mult_is_exact_on_small_order_components() {
        let q = point(PUB1_PLUS_TORSION);
        assert_eq!(add(&point(PUB1), &[0u8; 32]).unwrap().to_vec(), q);
        assert!(!CurvePoint::from_bytes(&q).unwrap().is_torsion_free());
        assert!(CurvePoint::from_bytes(&point(PUB1)).unwrap().is_torsion_free());
        // A clamped scalar is a multiple of the cofactor, so the order-4 component vanishes.
        let clamped = hex::decode("307c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de94f").unwrap();
        let expected = "8a3df3f27dafc36029be30ab7c105326f1e422fa3bb943c1bcce69d9096f62bb";
        assert_eq!(hex::encode(scalar_mult(&q, &clamped).unwrap()), expected);
        assert_eq!(hex::encode(scalar_mult(&point(PUB1), &clamped).unwrap()), expected);
        // An unclamped scalar keeps it, and is not reduced modulo the group order first.
        let k = hex::decode("050102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f").unwrap();
        assert_eq!(
            hex::encode(scalar_mult(&q, &k).unwrap()),
            "0cdca5c718f178ced34d7d1655a8c99878393aaabd6eede9b9c3e081e4a89ebd"
        );
    }

    #[test]
    fn base_mult_matches_mult_by_base_point() {
        let b = CurvePoint::basepoint().to_bytes();
        for _ in 0..10 {
            let mut k = [0u8; 32];
            OsRng.fill_bytes(&mut k);
            assert_eq!(scalar_base_mult(&k).unwrap(), scalar_mult(&b, &k).unwrap());
        }
        assert_eq!(scalar_base_mult(&[0xFF; 32]).unwrap(), scalar_mult(&b, &[0xFF; 32]).unwrap());
    }

    #[test]
    fn on_curve_checks() {
        assert!(is_on_curve(&point(BASEPOINT)));
        assert!(is_on_curve(&point(PUB1)));
        for _ in 0..10 {
            assert!(is_on_curve(&random_point().to_bytes()));
        }
        assert!(!is_on_curve(&point(&PUB1[..62])));
        assert!(!is_on_curve(&[]));
        // Flipping the last nibble of PUB1 yields a y coordinate with no matching x.
        assert!(!is_on_curve(&point("4dd896d542721742aff8671ba42aff0c4c846bea79065cf39a191bbeb11ea635")));
        // Roughly half of all 32-byte strings are not valid encodings.
        let rejected = (0..128)
            .filter(|_| {
                let mut bytes = [0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                !is_on_curve(&bytes)
            })
            .count();
        assert!(rejected > 0);
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        let b = point(BASEPOINT);
        assert!(matches!(add(&b[..31], &b), Err(CryptoError::InvalidLength { field: "p1", .. })));
        assert!(matches!(sub(&b, &[0u8; 33]), Err(CryptoError::InvalidLength { field: "p2", .. })));
        assert!(matches!(scalar_mult(&b, &[1u8; 31]), Err(CryptoError::InvalidLength { field: "scalar", .. })));
        assert!(matches!(scalar_mult(&b[..31], &[1u8; 32]), Err(CryptoError::InvalidLength { field: "point", .. })));
        assert!(scalar_base_mult(&[1u8; 31]).is_err());
        assert!(scalar_base_mult(&[]).is_err());
    }

    #[test]
    fn invalid_points_are_rejected() {
        let bad = point("4dd896d542721742aff8671ba42aff0c4c846bea79065cf39a191bbeb11ea635");
        let b = point(BASEPOINT);
        assert!(matches!(add(&bad, &b), Err(CryptoError::InvalidPoint("p1"))));
        assert!(matches!(sub(&b, &bad), Err(CryptoError::InvalidPoint("p2"))));
        assert!(matches!(scalar_mult(&bad, &[1u8; 32]), Err(CryptoError::InvalidPoint("point"))));
    }

    #[test]
    fn hex_round_trip() {
        let p = CurvePoint::from_hex(PUB2).unwrap();
        assert_eq!(p.as_hex(), PUB2);
        assert_eq!(format!("{p}"), PUB2);
        assert!(matches!(CurvePoint::from_hex(&PUB2[..60]), Err(CryptoError::InvalidLength { .. })));
        assert!(matches!(CurvePoint::from_hex(&PUB2.replace('3', "x")), Err(CryptoError::Hex(_))));
    }
}
