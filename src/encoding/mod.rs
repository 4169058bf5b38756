/*
    Module that bundles together the encodings used for extended keys
*/

pub mod base58;
pub mod version_prefix;

pub use version_prefix::{Network, Profile, Purpose, VersionEntry, VersionTable};
