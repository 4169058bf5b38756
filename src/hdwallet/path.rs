/*
    This module helps with parsing derivation paths passed in as strings
    into lists of ChildOptions that can be used to derive a child key.
*/

use std::{fmt, str::FromStr};

use crate::{
    encoding::Profile,
    hdwallet::{ckd::HARDENED_KEY_ZERO_INDEX, HDWError},
};

/// One level of a derivation path. The wrapped number is the displayed index, below 2^31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32),
}

impl ChildOptions {
    /// The raw 32 bit child index, with the hardened offset applied.
    pub fn index(&self) -> Result<u32, HDWError> {
        match *self {
            ChildOptions::Normal(x) if x < HARDENED_KEY_ZERO_INDEX => Ok(x),
            ChildOptions::Hardened(x) if x < HARDENED_KEY_ZERO_INDEX => Ok(x + HARDENED_KEY_ZERO_INDEX),
            ChildOptions::Normal(x) | ChildOptions::Hardened(x) => Err(HDWError::IndexTooLarge(x)),
        }
    }

    pub fn from_index(index: u32) -> Self {
        if index >= HARDENED_KEY_ZERO_INDEX {
            ChildOptions::Hardened(index - HARDENED_KEY_ZERO_INDEX)
        } else {
            ChildOptions::Normal(index)
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

impl fmt::Display for ChildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildOptions::Normal(x) => write!(f, "{}", x),
            ChildOptions::Hardened(x) => write!(f, "{}'", x),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    children: Vec<ChildOptions>,
}

impl DerivationPath {
    pub fn new(children: Vec<ChildOptions>) -> Result<Self, HDWError> {
        for child in &children {
            child.index()?;
        }
        Ok(Self { children })
    }

    /// The path `m`.
    pub fn empty() -> Self {
        Self::default()
    }

    /**
        The account level path m/purpose'/coin_type'/account' for a profile,
        as laid out by BIP44, BIP49 and BIP84.
    */
    pub fn account(profile: Profile, account: u32) -> Result<Self, HDWError> {
        Self::new(vec![
            ChildOptions::Hardened(profile.purpose.number()),
            ChildOptions::Hardened(profile.network.coin_type()),
            ChildOptions::Hardened(account),
        ])
    }

    pub fn children(&self) -> &[ChildOptions] {
        &self.children
    }

    /// Returns a new path one level below this one.
    pub fn child(&self, child: ChildOptions) -> Result<Self, HDWError> {
        child.index()?;
        let mut children = self.children.clone();
        children.push(child);
        Ok(Self { children })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromStr for DerivationPath {
    type Err = HDWError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut parts = path.split('/');
        if parts.next() != Some("m") {
            return Err(HDWError::BadPath(path.to_string()));
        }

        let mut children: Vec<ChildOptions> = vec![];
        for part in parts {
            //A trailing ', h or H marks a hardened child
            let (digits, hardened) = match part.strip_suffix(&['\'', 'h', 'H'][..]) {
                Some(stripped) => (stripped, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(HDWError::BadPath(path.to_string()));
            }

            let x: u32 = digits.parse().map_err(|_| HDWError::BadPath(path.to_string()))?;
            let option = if hardened { ChildOptions::Hardened(x) } else { ChildOptions::Normal(x) };
            option.index()?;
            children.push(option);
        }

        Ok(Self { children })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}
