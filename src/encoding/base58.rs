/*
    Base58Check: Base58 over the payload followed by the first
    four bytes of SHA256d(payload).
*/

use crate::{
    hash,
    hdwallet::EncodingError,
};

pub const CHECKSUM_LEN: usize = 4;

/// First four bytes of SHA256(SHA256(payload)).
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let h = hash::sha256d(payload);
    [h[0], h[1], h[2], h[3]]
}

/// Appends the checksum to the payload.
pub fn with_checksum(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&checksum(payload));
    bytes
}

/// Returns the Base58Check encoded value of the payload.
pub fn check_encode(payload: &[u8]) -> String {
    encode(&with_checksum(payload))
}

/// Encodes bytes in base58 without a checksum.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes a base58 string. Does NOT strip or verify the checksum.
pub fn decode(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(bs58::decode(encoded).into_vec()?)
}

/**
    Splits `payload || checksum` and verifies the checksum.
    Returns the payload on success.
*/
pub fn verify_checksum(bytes: &[u8]) -> Result<&[u8], EncodingError> {
    if bytes.len() < CHECKSUM_LEN {
        return Err(EncodingError::BadLength { expected: CHECKSUM_LEN, found: bytes.len() });
    }

    let (payload, extracted) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum(payload)[..] != *extracted {
        return Err(EncodingError::BadChecksum);
    }
    Ok(payload)
}

/// Decodes a Base58Check string and returns the payload with the checksum removed.
pub fn check_decode(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    let bytes = decode(encoded)?;
    Ok(verify_checksum(&bytes)?.to_vec())
}
