use std::{
    fmt::{Debug, Display, LowerHex},
    ops::Deref,
    str::FromStr,
};

use hex::FromHexError;
use sha1::{Digest as _, Sha1};
use tap::Tap;

/// Length in bytes of an object id.
pub const DIGEST_LEN: usize = 20;

/// The SHA-1 of an object's canonical serialization. This is the object's only identity.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Hash the input bytes and return the resulting digest.
    pub fn new(bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        let fin = hasher.finalize();

        let mut out = [0; DIGEST_LEN];
        out.copy_from_slice(&fin);
        Self(out)
    }

    /// Build a digest from a raw 20-byte slice, as found inside a tree entry.
    ///
    /// Returns `None` if `bytes` is not exactly [`DIGEST_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    /// Format the digest as a lowercase hex string.
    ///
    /// Identical to `format!("{:x}", self)`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The first 7 hex characters, for display.
    pub fn short(&self) -> String {
        self.to_hex().tap_mut(|x| x.truncate(7))
    }

    /// The two path components of a loose object: the fan-out directory (first two hex
    /// characters) and the file name (remaining 38).
    pub fn loose_components(&self) -> (String, String) {
        let mut hex = self.to_hex();
        let rest = hex.split_off(2);
        (hex, rest)
    }
}

impl Deref for Digest {
    type Target = [u8; DIGEST_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl LowerHex for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_LEN * 2 {
            return Err(FromHexError::InvalidStringLength);
        }
        let mut out = [0; DIGEST_LEN];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Digest(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1() {
        const HASH_INPUT: &[u8] = b"Hello, World!";

        // `printf 'Hello, World!' | sha1sum` => 0a0a9f2a6772942557ab5355d76af442f8f65e01
        const HASH_OUTPUT: [u8; 20] = [
            0x0a, 0x0a, 0x9f, 0x2a, 0x67, 0x72, 0x94, 0x25, 0x57, 0xab, 0x53, 0x55, 0xd7, 0x6a,
            0xf4, 0x42, 0xf8, 0xf6, 0x5e, 0x01,
        ];

        let actual = Digest::new(HASH_INPUT);
        assert_eq!(actual.0, HASH_OUTPUT);
        assert_eq!(actual, Digest::new(HASH_INPUT));
    }

    #[test]
    fn test_from_str() {
        let valid = [
            "0a0a9f2a6772942557ab5355d76af442f8f65e01",
            "0A0A9F2A6772942557AB5355D76AF442F8F65E01",
            "0a0a9f2a6772942557ab5355D76AF442F8F65E01",
        ];

        for string in valid {
            let digest = Digest::from_str(string).unwrap();
            assert_eq!(digest.to_hex(), "0a0a9f2a6772942557ab5355d76af442f8f65e01");
        }

        let invalid = [
            "hello world",
            "0j0a9f2a6772942557ab5355d76af442f8f65e01",
            "🦀",
            "0a0a9f2a6772942557ab5355d76af442f8f65e01 ",
            " 0a0a9f2a6772942557ab5355d76af442f8f65e01",
            "0a0a9f2a6772942557ab5355d76af442f8f65e01\n",
            "0a0a9f2a6772942557ab5355d76af442f8f65e01\0",
            "0a0a9f2a6772942\x0057ab5355d76af442f8f65e01",
            "0a0a9f2a",
            "",
        ];

        for string in invalid {
            let _ = Digest::from_str(string).unwrap_err();
        }
    }

    #[test]
    fn test_loose_components() {
        let digest = Digest::from_str("ce013625030ba8dba906f756967f9e9ca394464a").unwrap();
        let (dir, file) = digest.loose_components();
        assert_eq!(dir, "ce");
        assert_eq!(file, "013625030ba8dba906f756967f9e9ca394464a");
    }

    #[test]
    fn test_short() {
        let digest = Digest::from_str("ce013625030ba8dba906f756967f9e9ca394464a").unwrap();
        assert_eq!(digest.short(), "ce01362");
        assert!(digest.to_hex().starts_with(&digest.short()));
    }
}
