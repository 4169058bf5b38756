/*
    Key types carried by extended keys.

    Both types can only be built through constructors that validate the
    bytes against a `Curve`, so holding a `PrivKey` or `PubKey` means
    holding a usable key.
*/

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    curve::{Curve, CurveError},
    hash,
};

/**
    A private scalar 0 < k < n together with its public point k·G.
    The secret bytes are wiped when the key is dropped.
*/
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivKey {
    secret: [u8; 32],
    #[zeroize(skip)]
    public: PubKey,
}

impl PrivKey {
    /// Use a predefined big-endian scalar as a private key.
    pub fn from_bytes<C: Curve>(curve: &C, secret: [u8; 32]) -> Result<Self, CurveError> {
        let public = PubKey(curve.scalar_multiply_generator(&secret)?);
        Ok(Self { secret, public })
    }

    pub fn from_slice<C: Curve>(curve: &C, bytes: &[u8]) -> Result<Self, CurveError> {
        let secret: [u8; 32] = bytes.try_into().map_err(|_| CurveError::InvalidScalar)?;
        Self::from_bytes(curve, secret)
    }

    /// Serializes the private key into its 32 byte big-endian form.
    pub fn as_bytes(&self) -> [u8; 32] {
        self.secret
    }

    pub fn public_key(&self) -> &PubKey {
        &self.public
    }
}

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivKey")
            .field("secret", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// A compressed secp256k1 point, `0x02`/`0x03` prefix followed by the x coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKey([u8; 33]);

impl PubKey {
    /**
        Use a predefined compressed point as a public key.
        Fails if the bytes are not a point on the curve.
    */
    pub fn from_bytes<C: Curve>(curve: &C, point: [u8; 33]) -> Result<Self, CurveError> {
        curve.validate_point(&point)?;
        Ok(Self(point))
    }

    pub fn from_slice<C: Curve>(curve: &C, bytes: &[u8]) -> Result<Self, CurveError> {
        let point: [u8; 33] = bytes.try_into().map_err(|_| CurveError::InvalidPoint)?;
        Self::from_bytes(curve, point)
    }

    /// Finds the public key k·G of a private key.
    pub fn from_priv_key(k: &PrivKey) -> Self {
        k.public
    }

    /// Returns the compressed public key as a byte array.
    pub fn as_bytes(&self) -> [u8; 33] {
        self.0
    }

    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.0)
    }

    /// First four bytes of the HASH160 of the compressed key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let h = self.hash160();
        [h[0], h[1], h[2], h[3]]
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The key half of an extended key. An extended key is either private or public, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyData {
    Private(PrivKey),
    Public(PubKey),
}

impl KeyData {
    pub fn public_key(&self) -> PubKey {
        match self {
            KeyData::Private(k) => PubKey::from_priv_key(k),
            KeyData::Public(k) => *k,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, KeyData::Private(_))
    }
}
