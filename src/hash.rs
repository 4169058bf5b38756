/*
    Hash module includes the hash functions used for
    key derivation, fingerprinting and checksums.
*/

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/**
    HMAC-SHA512 of `data` keyed with `key`.
*/
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    Sha256::digest(input).into()
}

/// SHA256(SHA256(input)), used for Base58Check checksums.
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/*
    Takes in an byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    Ripemd160::digest(input).into()
}

/// RIPEMD160(SHA256(input)). The first four bytes of the HASH160 of a
/// compressed public key form its fingerprint.
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}
