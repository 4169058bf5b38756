use thiserror::Error;

/// Errors returned by key derivation, path parsing and the extended key codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HDWError {
    #[error("seed produces an invalid master key")]
    InvalidSeed,

    #[error("seed is not valid hex: {0}")]
    InvalidSeedHex(String),

    #[error("seed length {0} is outside 16..=64 bytes")]
    InvalidSeedLength(usize),

    #[error("index {0} produces an invalid child key, retry with the next index")]
    InvalidDerivationIndex(u32),

    #[error("cannot derive hardened child {0} from a public key")]
    HardenedOnPublicParent(u32),

    #[error("cannot derive below depth 255")]
    MaxDepthExceeded,

    #[error("invalid key encoding: {0}")]
    InvalidEncoding(#[from] EncodingError),

    #[error("unknown network profile: {0}")]
    UnknownNetworkProfile(String),

    #[error("bad derivation path: {0}")]
    BadPath(String),

    #[error("child index {0} must be below 2^31")]
    IndexTooLarge(u32),

    #[error("bad version table: {0}")]
    BadVersionTable(String),
}

/// Reasons an extended key payload fails to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("expected {expected} bytes, found {found}")]
    BadLength { expected: usize, found: usize },

    #[error("checksum mismatch")]
    BadChecksum,

    #[error("key data does not match the private/public version")]
    KeyTypeMismatch,

    #[error("key data prefix {0:#04x} is not 0x00, 0x02 or 0x03")]
    BadKeyPrefix(u8),

    #[error("private key is zero or not below the curve order")]
    BadPrivateKey,

    #[error("public key is not a point on the curve")]
    BadPublicKey,

    #[error("master key has a non-zero parent fingerprint or child index")]
    ZeroDepthWithParent,
}
