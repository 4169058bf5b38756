/*
    This module implements extended keys that are
    used in BIP32 hierarchical deterministic wallets.

    An extended key is a private or public key paired with a 32 byte
    chain code, plus the metadata needed to serialize it: depth,
    parent fingerprint, child index and the network profile that
    selects its version bytes.

    Extended keys are immutable. Deriving, neutering or re-tagging a
    key always returns a new value.
*/

use std::{fmt, str::FromStr};

use crate::{
    curve::Secp256k1Curve,
    encoding::{Profile, VersionTable},
    hdwallet::{ckd, serialize, DerivationPath, HDWError},
    key::{KeyData, PubKey},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyData,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    profile: Profile,
}

impl ExtendedKey {
    pub(crate) fn construct(
        key: KeyData,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_index: u32,
        profile: Profile,
    ) -> Self {
        Self { key, chain_code, depth, parent_fingerprint, child_index, profile }
    }

    /// Same key metadata with different key data.
    pub(crate) fn with_key(&self, key: KeyData) -> Self {
        Self { key, ..self.clone() }
    }

    #[cfg(test)]
    pub(crate) fn with_depth(&self, depth: u8) -> Self {
        Self { depth, ..self.clone() }
    }

    /**
        Creates the master extended private key of a seed.

        The seed should be 16 to 64 bytes of entropy, such as the output of
        `entropy::generate_seed` or a BIP39 seed.
    */
    pub fn master(seed: &[u8], profile: Profile) -> Result<Self, HDWError> {
        ckd::master(&Secp256k1Curve, seed, profile)
    }

    /// Creates the master key of a hex encoded seed.
    pub fn master_from_hex(seed: &str, profile: Profile) -> Result<Self, HDWError> {
        let bytes = hex::decode(seed).map_err(|e| HDWError::InvalidSeedHex(e.to_string()))?;
        Self::master(&bytes, profile)
    }

    /**
        Derives the child at the raw 32 bit `index`.
        Indices from 2^31 upwards are hardened.
    */
    pub fn child(&self, index: u32) -> Result<Self, HDWError> {
        ckd::derive_child(&Secp256k1Curve, self, index)
    }

    /// Derive the key at the given path below this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, HDWError> {
        ckd::derive_path(&Secp256k1Curve, self, path)
    }

    /// The public extended key with the same chain code and metadata.
    pub fn neuter(&self) -> Self {
        ckd::neuter(self)
    }

    /**
        Re-tags the key with another profile, for example to export a
        BIP32 key as a zpub. The key material is unchanged.
    */
    pub fn with_profile(&self, profile: Profile) -> Self {
        Self { profile, ..self.clone() }
    }

    pub fn key_data(&self) -> &KeyData {
        &self.key
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn is_private(&self) -> bool {
        self.key.is_private()
    }

    pub fn public_key(&self) -> PubKey {
        self.key.public_key()
    }

    /// Compressed public key, computed from the private key when needed.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key().as_bytes()
    }

    /// The 32 byte private key, or `None` for public keys.
    pub fn private_key_bytes(&self) -> Option<[u8; 32]> {
        match &self.key {
            KeyData::Private(k) => Some(k.as_bytes()),
            KeyData::Public(_) => None,
        }
    }

    /// HASH160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key().hash160()
    }

    pub fn fingerprint(&self) -> [u8; 4] {
        self.public_key().fingerprint()
    }

    pub fn to_bytes(&self, table: &VersionTable) -> Result<[u8; serialize::XKEY_LEN], HDWError> {
        serialize::encode(self, table)
    }

    pub fn to_checked_bytes(&self, table: &VersionTable) -> Result<[u8; serialize::CHECKED_XKEY_LEN], HDWError> {
        serialize::encode_checked(self, table)
    }

    /// Serialize the extended key with the version bytes `table` lists for its profile.
    pub fn to_base58(&self, table: &VersionTable) -> Result<String, HDWError> {
        serialize::encode_base58(self, table)
    }

    pub fn from_bytes(bytes: &[u8], table: &VersionTable) -> Result<Self, HDWError> {
        serialize::decode(&Secp256k1Curve, bytes, table)
    }

    pub fn from_checked_bytes(bytes: &[u8], table: &VersionTable) -> Result<Self, HDWError> {
        serialize::decode_checked(&Secp256k1Curve, bytes, table)
    }

    /**
        Import an extended key from a Base58Check string.
        "xprv[...]", "zpub[...]", "tprv[...]" etc.
    */
    pub fn from_base58(encoded: &str, table: &VersionTable) -> Result<Self, HDWError> {
        serialize::decode_base58(&Secp256k1Curve, encoded, table)
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self.to_base58(&VersionTable::standard()).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for ExtendedKey {
    type Err = HDWError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s, &VersionTable::standard())
    }
}
