/*
    Random seed generation for master keys.
*/

use rand::{rngs::OsRng, RngCore};

use crate::hdwallet::HDWError;

pub const MIN_SEED_LEN: usize = 16;
pub const MAX_SEED_LEN: usize = 64;
/// 256 bits, as recommended by BIP32.
pub const RECOMMENDED_SEED_LEN: usize = 32;

/**
    Generates `len` random bytes from the operating system RNG
    to use as a master key seed. `len` must be within 16..=64.
*/
pub fn generate_seed(len: usize) -> Result<Vec<u8>, HDWError> {
    if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&len) {
        return Err(HDWError::InvalidSeedLength(len));
    }

    let mut seed: Vec<u8> = vec![0; len];
    OsRng.fill_bytes(&mut seed);
    Ok(seed)
}
