/*
    Extended key serialization.

    Layout (78 bytes, big-endian):
        version(4) || depth(1) || parent fingerprint(4) || child index(4) ||
        chain code(32) || key data(33)

    Private key data is 0x00 || k, public key data is the compressed point.
    The text form is the Base58Check encoding of the 78 bytes.
*/

use zeroize::Zeroize;

use crate::{
    curve::Curve,
    encoding::{base58, VersionTable},
    hdwallet::{EncodingError, ExtendedKey, HDWError},
    key::{KeyData, PrivKey, PubKey},
};

pub const XKEY_LEN: usize = 78;
pub const CHECKED_XKEY_LEN: usize = XKEY_LEN + base58::CHECKSUM_LEN;

fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

/// Serializes `key` with the version bytes its profile maps to in `table`.
pub fn encode(key: &ExtendedKey, table: &VersionTable) -> Result<[u8; XKEY_LEN], HDWError> {
    let version = table.version(key.profile(), key.is_private())?;

    let mut payload = [0u8; XKEY_LEN];
    payload[0..4].copy_from_slice(&version.to_be_bytes());
    payload[4] = key.depth();
    payload[5..9].copy_from_slice(&key.parent_fingerprint());
    payload[9..13].copy_from_slice(&key.child_index().to_be_bytes());
    payload[13..45].copy_from_slice(&key.chain_code());
    match key.key_data() {
        KeyData::Private(k) => {
            payload[45] = 0x00;
            payload[46..78].copy_from_slice(&k.as_bytes());
        },
        KeyData::Public(k) => payload[45..78].copy_from_slice(&k.as_bytes()),
    }

    Ok(payload)
}

/// The 78 byte payload followed by its 4 byte checksum.
pub fn encode_checked(key: &ExtendedKey, table: &VersionTable) -> Result<[u8; CHECKED_XKEY_LEN], HDWError> {
    let mut payload = encode(key, table)?;
    let mut checked = [0u8; CHECKED_XKEY_LEN];
    checked[..XKEY_LEN].copy_from_slice(&payload);
    checked[XKEY_LEN..].copy_from_slice(&base58::checksum(&payload));
    payload.zeroize();
    Ok(checked)
}

pub fn encode_base58(key: &ExtendedKey, table: &VersionTable) -> Result<String, HDWError> {
    let mut checked = encode_checked(key, table)?;
    let encoded = base58::encode(&checked);
    checked.zeroize();
    Ok(encoded)
}

/**
    Parses a 78 byte extended key payload.

    The version must be listed in `table`, the key data must match the
    private/public side of the version and hold a valid scalar or point, and a
    depth 0 key must have no parent fingerprint or child index.
*/
pub fn decode<C: Curve>(curve: &C, bytes: &[u8], table: &VersionTable) -> Result<ExtendedKey, HDWError> {
    if bytes.len() != XKEY_LEN {
        return Err(EncodingError::BadLength { expected: XKEY_LEN, found: bytes.len() }.into());
    }

    let version = u32::from_be_bytes(array(&bytes[0..4]));
    let (profile, private) = table.lookup(version)?;

    let depth: u8 = bytes[4];
    let fingerprint: [u8; 4] = array(&bytes[5..9]);
    let index = u32::from_be_bytes(array(&bytes[9..13]));
    let chaincode: [u8; 32] = array(&bytes[13..45]);
    if depth == 0 && (fingerprint != [0u8; 4] || index != 0) {
        return Err(EncodingError::ZeroDepthWithParent.into());
    }

    let key_data = &bytes[45..78];
    let key = match (private, key_data[0]) {
        (true, 0x00) => KeyData::Private(
            PrivKey::from_slice(curve, &key_data[1..]).map_err(|_| EncodingError::BadPrivateKey)?,
        ),
        (false, 0x02 | 0x03) => KeyData::Public(
            PubKey::from_slice(curve, key_data).map_err(|_| EncodingError::BadPublicKey)?,
        ),
        (true, 0x02 | 0x03) | (false, 0x00) => return Err(EncodingError::KeyTypeMismatch.into()),
        (_, prefix) => return Err(EncodingError::BadKeyPrefix(prefix).into()),
    };

    Ok(ExtendedKey::construct(key, chaincode, depth, fingerprint, index, profile))
}

/// Parses the 82 byte form, verifying the trailing checksum first.
pub fn decode_checked<C: Curve>(curve: &C, bytes: &[u8], table: &VersionTable) -> Result<ExtendedKey, HDWError> {
    if bytes.len() != CHECKED_XKEY_LEN {
        return Err(EncodingError::BadLength { expected: CHECKED_XKEY_LEN, found: bytes.len() }.into());
    }
    let payload = base58::verify_checksum(bytes)?;
    decode(curve, payload, table)
}

/// Parses a Base58Check extended key such as "xprv[...]" or "zpub[...]".
pub fn decode_base58<C: Curve>(curve: &C, encoded: &str, table: &VersionTable) -> Result<ExtendedKey, HDWError> {
    let mut bytes = base58::decode(encoded)?;
    let key = decode_checked(curve, &bytes, table);
    bytes.zeroize();
    key
}
