/*
    Version bytes for serialized extended keys.

    Which four bytes lead an extended key depends on the network, on the
    purpose (BIP32/44 legacy, BIP49 nested segwit, BIP84 native segwit) and
    on whether the key is private or public. The mapping is held in a
    `VersionTable` that is handed to the codec explicitly.
*/

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::hdwallet::HDWError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// SLIP-44 coin type used in the second level of BIP44 style paths.
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Bip32,
    Bip44,
    Bip49,
    Bip84,
}

impl Purpose {
    /**
        Purpose level used in account paths.
        Plain BIP32 keys have no purpose level of their own and use the BIP44 layout.
    */
    pub fn number(&self) -> u32 {
        match self {
            Purpose::Bip32 | Purpose::Bip44 => 44,
            Purpose::Bip49 => 49,
            Purpose::Bip84 => 84,
        }
    }
}

/// Selects the version bytes an extended key is serialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    pub network: Network,
    pub purpose: Purpose,
}

impl Profile {
    pub const MAINNET: Profile = Profile::new(Network::Mainnet, Purpose::Bip32);
    pub const TESTNET: Profile = Profile::new(Network::Testnet, Purpose::Bip32);

    pub const fn new(network: Network, purpose: Purpose) -> Self {
        Self { network, purpose }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::MAINNET
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.network, self.purpose)
    }
}

/// Private and public version bytes of one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub network: Network,
    pub purpose: Purpose,
    pub private: u32,
    pub public: u32,
}

impl VersionEntry {
    pub const fn new(network: Network, purpose: Purpose, private: u32, public: u32) -> Self {
        Self { network, purpose, private, public }
    }

    pub fn profile(&self) -> Profile {
        Profile::new(self.network, self.purpose)
    }
}

const STANDARD_VERSIONS: [VersionEntry; 8] = [
    //BIP-32 / BIP-44, legacy P2PKH
    VersionEntry::new(Network::Mainnet, Purpose::Bip32, 0x0488ADE4, 0x0488B21E), //xprv, xpub
    VersionEntry::new(Network::Mainnet, Purpose::Bip44, 0x0488ADE4, 0x0488B21E),
    VersionEntry::new(Network::Testnet, Purpose::Bip32, 0x04358394, 0x043587CF), //tprv, tpub
    VersionEntry::new(Network::Testnet, Purpose::Bip44, 0x04358394, 0x043587CF),
    //BIP-49, P2SH nested P2WPKH
    VersionEntry::new(Network::Mainnet, Purpose::Bip49, 0x049D7878, 0x049D7CB2), //yprv, ypub
    VersionEntry::new(Network::Testnet, Purpose::Bip49, 0x044A4E28, 0x044A5262), //uprv, upub
    //BIP-84, P2WPKH
    VersionEntry::new(Network::Mainnet, Purpose::Bip84, 0x04B2430C, 0x04B24746), //zprv, zpub
    VersionEntry::new(Network::Testnet, Purpose::Bip84, 0x045F18BC, 0x045F1CF6), //vprv, vpub
];

/**
    Maps (network, purpose) profiles to version bytes and back.

    Several profiles may share version bytes (BIP32 and BIP44 both use
    xprv/xpub); decoding resolves a shared version to the first entry listing it.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VersionEntry>", into = "Vec<VersionEntry>")]
pub struct VersionTable {
    entries: Vec<VersionEntry>,
}

impl VersionTable {
    /// The BIP32/44/49/84 prefixes for mainnet and testnet.
    pub fn standard() -> Self {
        Self { entries: STANDARD_VERSIONS.to_vec() }
    }

    /**
        Builds a table from custom entries.
        Each profile may appear once, and no version may be used for private
        keys in one entry and public keys in another.
    */
    pub fn new(entries: Vec<VersionEntry>) -> Result<Self, HDWError> {
        let mut profiles = HashSet::new();
        let mut private = HashSet::new();
        let mut public = HashSet::new();
        for e in &entries {
            if !profiles.insert(e.profile()) {
                return Err(HDWError::BadVersionTable(format!("duplicate profile {}", e.profile())));
            }
            private.insert(e.private);
            public.insert(e.public);
        }

        if let Some(v) = private.intersection(&public).next() {
            return Err(HDWError::BadVersionTable(format!(
                "version {:#010x} used for both private and public keys",
                v
            )));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Version bytes for a key of the given profile and kind.
    pub fn version(&self, profile: Profile, private: bool) -> Result<u32, HDWError> {
        self.entries
            .iter()
            .find(|e| e.profile() == profile)
            .map(|e| if private { e.private } else { e.public })
            .ok_or_else(|| HDWError::UnknownNetworkProfile(profile.to_string()))
    }

    /// Resolves version bytes to a profile and whether they mark a private key.
    pub fn lookup(&self, version: u32) -> Result<(Profile, bool), HDWError> {
        self.entries
            .iter()
            .find_map(|e| {
                if e.private == version {
                    Some((e.profile(), true))
                } else if e.public == version {
                    Some((e.profile(), false))
                } else {
                    None
                }
            })
            .ok_or_else(|| HDWError::UnknownNetworkProfile(format!("version {:#010x}", version)))
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<VersionEntry>> for VersionTable {
    type Error = HDWError;

    fn try_from(entries: Vec<VersionEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<VersionTable> for Vec<VersionEntry> {
    fn from(table: VersionTable) -> Self {
        table.entries
    }
}
