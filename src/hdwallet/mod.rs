/*
    This module implements hierarchical deterministic keys
    under the BIP 32 standard, with the BIP 44, 49 and 84
    serialization prefixes.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

pub mod ckd;
pub mod error;
pub mod extended_keys;
pub mod path;
pub mod serialize;

pub use ckd::HARDENED_KEY_ZERO_INDEX;
pub use error::{EncodingError, HDWError};
pub use extended_keys::ExtendedKey;
pub use path::{ChildOptions, DerivationPath};
