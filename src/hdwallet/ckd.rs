/*
    This module implements master key generation and child key
    derivation from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use tracing::{debug, trace, warn};
use zeroize::Zeroize;

use crate::{
    curve::Curve,
    encoding::Profile,
    hash::hmac_sha512,
    hdwallet::{DerivationPath, ExtendedKey, HDWError},
    key::{KeyData, PrivKey, PubKey},
};

/// Index of the first hardened child, 2^31.
pub const HARDENED_KEY_ZERO_INDEX: u32 = 0x8000_0000;

const MASTER_KEY_HMAC_KEY: &[u8] = b"Bitcoin seed";

pub fn is_hardened(index: u32) -> bool {
    index >= HARDENED_KEY_ZERO_INDEX
}

//Split the HMAC output into I_L and I_R
fn split(i: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    (left, right)
}

/**
    Creates the master extended private key of a seed.

    I = HMAC-SHA512(key = "Bitcoin seed", data = seed). The left half is the
    master private key and the right half the master chain code.
*/
pub fn master<C: Curve>(curve: &C, seed: &[u8], profile: Profile) -> Result<ExtendedKey, HDWError> {
    let (il, ir) = split(hmac_sha512(MASTER_KEY_HMAC_KEY, seed));
    let key = PrivKey::from_bytes(curve, il).map_err(|_| HDWError::InvalidSeed)?;

    let master = ExtendedKey::construct(KeyData::Private(key), ir, 0, [0x00; 4], 0, profile);
    debug!(fingerprint = %hex::encode(master.fingerprint()), %profile, "created master key");

    Ok(master)
}

/**
    Derives the child of `parent` at `index`.

    Indices at or above 2^31 are hardened and need a private parent.
    If the index yields an invalid key (I_L >= n, a zero private key or the
    point at infinity) the index is skipped: `InvalidDerivationIndex` is
    returned and the caller moves on to `index + 1`.
*/
pub fn derive_child<C: Curve>(curve: &C, parent: &ExtendedKey, index: u32) -> Result<ExtendedKey, HDWError> {
    let depth = parent.depth().checked_add(1).ok_or(HDWError::MaxDepthExceeded)?;
    let parent_pub = parent.public_key();

    //Hardened: 0x00 || ser256(k_par) || ser32(i)
    //Normal:   serP(K_par) || ser32(i)
    let mut data: Vec<u8> = Vec::with_capacity(37);
    if is_hardened(index) {
        match parent.key_data() {
            KeyData::Private(k) => {
                data.push(0x00);
                data.extend_from_slice(&k.as_bytes());
            },
            KeyData::Public(_) => return Err(HDWError::HardenedOnPublicParent(index)),
        }
    } else {
        data.extend_from_slice(&parent_pub.as_bytes());
    }
    data.extend_from_slice(&index.to_be_bytes());

    let (il, child_chaincode) = split(hmac_sha512(&parent.chain_code(), &data));
    data.zeroize();

    let key = match parent.key_data() {
        KeyData::Private(k) => curve
            .add_scalars(&il, &k.as_bytes())
            .and_then(|sum| PrivKey::from_bytes(curve, sum))
            .map(KeyData::Private),
        KeyData::Public(k) => curve
            .add_generator_multiple(&il, &k.as_bytes())
            .and_then(|point| PubKey::from_bytes(curve, point))
            .map(KeyData::Public),
    }
    .map_err(|e| {
        warn!(index, depth, error = %e, "child index yields invalid key material");
        HDWError::InvalidDerivationIndex(index)
    })?;

    trace!(index, depth, private = key.is_private(), "derived child key");

    Ok(ExtendedKey::construct(
        key,
        child_chaincode,
        depth,
        parent_pub.fingerprint(),
        index,
        parent.profile(),
    ))
}

/// Derives the key at `path` below `key`, one level at a time.
pub fn derive_path<C: Curve>(curve: &C, key: &ExtendedKey, path: &DerivationPath) -> Result<ExtendedKey, HDWError> {
    path.children()
        .iter()
        .try_fold(key.clone(), |current, child| derive_child(curve, &current, child.index()?))
}

/**
    Returns the public extended key of `key`.
    Neutering a key that is already public returns an equal copy.
*/
pub fn neuter(key: &ExtendedKey) -> ExtendedKey {
    match key.key_data() {
        KeyData::Private(k) => key.with_key(KeyData::Public(PubKey::from_priv_key(k))),
        KeyData::Public(_) => key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::{CurveError, Secp256k1Curve},
        encoding::{Network, Purpose},
        entropy,
        hash::hash160,
    };

    const SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn master_key() -> ExtendedKey {
        master(&Secp256k1Curve, &hex::decode(SEED).unwrap(), Profile::MAINNET).unwrap()
    }

    /// Delegates to secp256k1 but treats every tweak as out of range.
    struct RejectingCurve;

    impl Curve for RejectingCurve {
        fn scalar_multiply_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], CurveError> {
            Secp256k1Curve.scalar_multiply_generator(scalar)
        }

        fn add_scalars(&self, _tweak: &[u8; 32], _scalar: &[u8; 32]) -> Result<[u8; 32], CurveError> {
            Err(CurveError::InvalidScalar)
        }

        fn add_generator_multiple(&self, _tweak: &[u8; 32], _point: &[u8; 33]) -> Result<[u8; 33], CurveError> {
            Err(CurveError::InfinityResult)
        }

        fn validate_point(&self, point: &[u8; 33]) -> Result<(), CurveError> {
            Secp256k1Curve.validate_point(point)
        }
    }

    /// Rejects every scalar, so no seed yields a master key.
    struct NoScalarCurve;

    impl Curve for NoScalarCurve {
        fn scalar_multiply_generator(&self, _scalar: &[u8; 32]) -> Result<[u8; 33], CurveError> {
            Err(CurveError::InvalidScalar)
        }

        fn add_scalars(&self, tweak: &[u8; 32], scalar: &[u8; 32]) -> Result<[u8; 32], CurveError> {
            Secp256k1Curve.add_scalars(tweak, scalar)
        }

        fn add_generator_multiple(&self, tweak: &[u8; 32], point: &[u8; 33]) -> Result<[u8; 33], CurveError> {
            Secp256k1Curve.add_generator_multiple(tweak, point)
        }

        fn validate_point(&self, point: &[u8; 33]) -> Result<(), CurveError> {
            Secp256k1Curve.validate_point(point)
        }
    }

    #[test]
    fn master_key_metadata() {
        let m = master_key();
        assert_eq!(m.depth(), 0);
        assert_eq!(m.parent_fingerprint(), [0u8; 4]);
        assert_eq!(m.child_index(), 0);
        assert!(m.is_private());
        assert_eq!(
            hex::encode(m.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(
            hex::encode(m.private_key_bytes().unwrap()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
    }

    #[test]
    fn out_of_range_master_scalar_is_rejected() {
        let err = master(&NoScalarCurve, &hex::decode(SEED).unwrap(), Profile::MAINNET).unwrap_err();
        assert_eq!(err, HDWError::InvalidSeed);
    }

    #[test]
    fn invalid_child_is_surfaced_not_retried() {
        let m = master_key();
        assert_eq!(derive_child(&RejectingCurve, &m, 7).unwrap_err(), HDWError::InvalidDerivationIndex(7));

        let hardened = HARDENED_KEY_ZERO_INDEX + 3;
        assert_eq!(
            derive_child(&RejectingCurve, &m, hardened).unwrap_err(),
            HDWError::InvalidDerivationIndex(hardened)
        );

        let public = neuter(&m);
        assert_eq!(derive_child(&RejectingCurve, &public, 9).unwrap_err(), HDWError::InvalidDerivationIndex(9));
    }

    #[test]
    fn neutering_commutes_with_normal_derivation() -> Result<(), HDWError> {
        for _ in 0..4 {
            let seed = entropy::generate_seed(32)?;
            let parent = master(&Secp256k1Curve, &seed, Profile::MAINNET)?;
            for index in [0, 1, 2, 1000, HARDENED_KEY_ZERO_INDEX - 1] {
                let private_then_neuter = neuter(&derive_child(&Secp256k1Curve, &parent, index)?);
                let neuter_then_public = derive_child(&Secp256k1Curve, &neuter(&parent), index)?;
                assert_eq!(private_then_neuter, neuter_then_public);
            }
        }
        Ok(())
    }

    #[test]
    fn hardened_on_public_parent_always_fails() {
        let public = neuter(&master_key());
        for index in [
            HARDENED_KEY_ZERO_INDEX,
            HARDENED_KEY_ZERO_INDEX + 1,
            HARDENED_KEY_ZERO_INDEX + 44,
            HARDENED_KEY_ZERO_INDEX + 0x1234_5678,
            u32::MAX,
        ] {
            assert_eq!(
                derive_child(&Secp256k1Curve, &public, index).unwrap_err(),
                HDWError::HardenedOnPublicParent(index)
            );
        }
    }

    #[test]
    fn depth_and_fingerprint_follow_parent() -> Result<(), HDWError> {
        let mut parent = master_key();
        for index in [0, HARDENED_KEY_ZERO_INDEX + 1, 2, HARDENED_KEY_ZERO_INDEX, 5] {
            let child = derive_child(&Secp256k1Curve, &parent, index)?;
            assert_eq!(child.depth(), parent.depth() + 1);
            assert_eq!(child.parent_fingerprint()[..], hash160(parent.public_key_bytes())[..4]);
            assert_eq!(child.child_index(), index);
            assert_eq!(child.profile(), parent.profile());
            parent = child;
        }
        Ok(())
    }

    #[test]
    fn derivation_leaves_parent_untouched() -> Result<(), HDWError> {
        let parent = master_key();
        let snapshot = parent.clone();
        derive_child(&Secp256k1Curve, &parent, 0)?;
        derive_child(&Secp256k1Curve, &parent, HARDENED_KEY_ZERO_INDEX)?;
        let _ = neuter(&parent);
        assert_eq!(parent, snapshot);
        Ok(())
    }

    #[test]
    fn cannot_derive_past_max_depth() {
        let m = master_key();
        let deep = m.with_depth(u8::MAX);
        assert_eq!(derive_child(&Secp256k1Curve, &deep, 0).unwrap_err(), HDWError::MaxDepthExceeded);

        let almost = m.with_depth(u8::MAX - 1);
        assert_eq!(derive_child(&Secp256k1Curve, &almost, 0).map(|k| k.depth()), Ok(u8::MAX));
    }

    #[test]
    fn neuter_is_idempotent() {
        let once = neuter(&master_key());
        let twice = neuter(&once);
        assert_eq!(once, twice);
        assert!(!twice.is_private());
        assert_eq!(twice.private_key_bytes(), None);
    }

    #[test]
    fn profile_is_inherited() -> Result<(), HDWError> {
        let profile = Profile::new(Network::Testnet, Purpose::Bip84);
        let m = master(&Secp256k1Curve, &hex::decode(SEED).unwrap(), profile)?;
        let child = derive_child(&Secp256k1Curve, &neuter(&m), 3)?;
        assert_eq!(child.profile(), profile);
        Ok(())
    }

    #[test]
    fn siblings_derive_independently_across_threads() -> Result<(), HDWError> {
        let parent = master_key();
        let sequential = (0..16u32)
            .map(|i| derive_child(&Secp256k1Curve, &parent, i))
            .collect::<Result<Vec<_>, _>>()?;

        let parallel = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16u32)
                .map(|i| {
                    let parent = &parent;
                    s.spawn(move || derive_child(&Secp256k1Curve, parent, i))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("derivation thread panicked"))
                .collect::<Result<Vec<_>, _>>()
        })?;

        assert_eq!(sequential, parallel);
        Ok(())
    }
}
