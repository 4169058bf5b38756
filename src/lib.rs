/*
    Library to derive hierarchical deterministic Bitcoin keys.

    Covers BIP32 master key generation, private and public child key
    derivation, neutering, and the Base58Check extended key format with
    the BIP32, BIP44, BIP49 and BIP84 version bytes for mainnet and testnet.

    References:
        - BIP32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
            derivation rules and test vectors

        - SLIP-0132 (https://github.com/satoshilabs/slips/blob/master/slip-0132.md)
            registered version bytes for ypub/zpub style keys

        - The Rust-Bitcoin repository (https://github.com/rust-bitcoin/rust-bitcoin)
            for providing clear reference code to work against, especially with bip32.
*/

//Outward facing modules
pub mod curve;
pub mod encoding;
pub mod entropy;
pub mod hdwallet;
pub mod key;
pub mod prelude;

//Modules for internal use
mod hash;
