/*
    Elliptic curve boundary.

    Derivation only ever needs a handful of group operations, so they are
    collected behind the `Curve` trait. Keys cross this boundary as their
    fixed-size big-endian (scalars) and compressed (points) encodings.
    `Secp256k1Curve` is the implementation used throughout the crate and
    delegates to libsecp256k1 through the `secp256k1` crate.
*/

use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey, SECP256K1};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("scalar is zero or not below the curve order")]
    InvalidScalar,

    #[error("bytes do not encode a point on the curve")]
    InvalidPoint,

    #[error("scalar addition produced zero")]
    ZeroResult,

    #[error("point addition produced the point at infinity")]
    InfinityResult,
}

/// Group operations on a prime order curve used by the derivation engine.
pub trait Curve {
    /**
        Multiplies the generator by `scalar` and returns the compressed point.
        Fails unless 0 < scalar < n.
    */
    fn scalar_multiply_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], CurveError>;

    /**
        Returns (tweak + scalar) mod n.
        Fails if the tweak is not below n, the scalar is not a valid private key,
        or the sum is zero.
    */
    fn add_scalars(&self, tweak: &[u8; 32], scalar: &[u8; 32]) -> Result<[u8; 32], CurveError>;

    /**
        Returns tweak·G + point.
        Fails if the tweak is not below n, the point is invalid, or the sum is
        the point at infinity.
    */
    fn add_generator_multiple(&self, tweak: &[u8; 32], point: &[u8; 33]) -> Result<[u8; 33], CurveError>;

    /// Checks that `point` is a compressed encoding of a point on the curve.
    fn validate_point(&self, point: &[u8; 33]) -> Result<(), CurveError>;

    fn is_valid_scalar(&self, scalar: &[u8; 32]) -> bool {
        self.scalar_multiply_generator(scalar).is_ok()
    }
}

fn context() -> &'static Secp256k1<All> {
    SECP256K1
}

/// secp256k1 backed by the global libsecp256k1 context.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Curve;

impl Curve for Secp256k1Curve {
    fn scalar_multiply_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], CurveError> {
        let sk = SecretKey::from_slice(scalar).map_err(|_| CurveError::InvalidScalar)?;
        Ok(PublicKey::from_secret_key(context(), &sk).serialize())
    }

    fn add_scalars(&self, tweak: &[u8; 32], scalar: &[u8; 32]) -> Result<[u8; 32], CurveError> {
        let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| CurveError::InvalidScalar)?;
        let sk = SecretKey::from_slice(scalar).map_err(|_| CurveError::InvalidScalar)?;
        let sum = sk.add_tweak(&tweak).map_err(|_| CurveError::ZeroResult)?;
        Ok(sum.secret_bytes())
    }

    fn add_generator_multiple(&self, tweak: &[u8; 32], point: &[u8; 33]) -> Result<[u8; 33], CurveError> {
        let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| CurveError::InvalidScalar)?;
        let pk = PublicKey::from_slice(point).map_err(|_| CurveError::InvalidPoint)?;
        let sum = pk
            .add_exp_tweak(context(), &tweak)
            .map_err(|_| CurveError::InfinityResult)?;
        Ok(sum.serialize())
    }

    fn validate_point(&self, point: &[u8; 33]) -> Result<(), CurveError> {
        PublicKey::from_slice(point)
            .map(|_| ())
            .map_err(|_| CurveError::InvalidPoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //secp256k1 group order n
    const CURVE_ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
        0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
        0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
    ];

    fn one() -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    }

    fn order_minus_one() -> [u8; 32] {
        let mut k = CURVE_ORDER;
        k[31] -= 1;
        k
    }

    #[test]
    fn generator_point() {
        let g = Secp256k1Curve.scalar_multiply_generator(&one()).unwrap();
        assert_eq!(
            hex::encode(g),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn scalar_range() {
        let curve = Secp256k1Curve;
        assert!(!curve.is_valid_scalar(&[0u8; 32]));
        assert!(!curve.is_valid_scalar(&CURVE_ORDER));
        assert!(!curve.is_valid_scalar(&[0xFF; 32]));
        assert!(curve.is_valid_scalar(&one()));
        assert!(curve.is_valid_scalar(&order_minus_one()));
    }

    #[test]
    fn scalar_addition_wraps_modulo_order() {
        let curve = Secp256k1Curve;
        let mut two = [0u8; 32];
        two[31] = 2;

        //(n - 1) + 2 = 1 mod n
        assert_eq!(curve.add_scalars(&two, &order_minus_one()), Ok(one()));
        //(n - 1) + 1 = 0 mod n
        assert_eq!(curve.add_scalars(&one(), &order_minus_one()), Err(CurveError::ZeroResult));
        //tweak of n is out of range
        assert_eq!(curve.add_scalars(&CURVE_ORDER, &one()), Err(CurveError::InvalidScalar));
    }

    #[test]
    fn point_tweak_matches_scalar_addition() {
        let curve = Secp256k1Curve;
        let mut k = [0u8; 32];
        k[31] = 7;
        let mut t = [0u8; 32];
        t[31] = 35;

        let point = curve.scalar_multiply_generator(&k).unwrap();
        let tweaked = curve.add_generator_multiple(&t, &point).unwrap();
        let expected = curve.scalar_multiply_generator(&curve.add_scalars(&t, &k).unwrap()).unwrap();
        assert_eq!(tweaked, expected);
    }

    #[test]
    fn point_tweak_to_infinity() {
        let curve = Secp256k1Curve;
        //(n - 1)·G + G is the point at infinity
        let g = curve.scalar_multiply_generator(&one()).unwrap();
        assert_eq!(
            curve.add_generator_multiple(&order_minus_one(), &g),
            Err(CurveError::InfinityResult)
        );
    }

    #[test]
    fn rejects_off_curve_points() {
        let curve = Secp256k1Curve;
        let mut bad = [0u8; 33];
        bad[0] = 0x02;
        bad[32] = 0x07;
        assert_eq!(curve.validate_point(&bad), Err(CurveError::InvalidPoint));

        let mut bad_prefix = curve.scalar_multiply_generator(&one()).unwrap();
        bad_prefix[0] = 0x04;
        assert_eq!(curve.validate_point(&bad_prefix), Err(CurveError::InvalidPoint));
    }
}
