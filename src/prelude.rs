/*
    This module contains the default imports for the library.

    Import the library using:
        use btc_hdkeys::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{
    curve::{Curve, Secp256k1Curve},
    encoding::{Network, Profile, Purpose, VersionEntry, VersionTable},
    entropy::generate_seed,
    hdwallet::{
        ChildOptions, DerivationPath, EncodingError, ExtendedKey, HDWError, HARDENED_KEY_ZERO_INDEX,
    },
    key::{KeyData, PrivKey, PubKey},
};
