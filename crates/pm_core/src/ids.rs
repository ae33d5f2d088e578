//! crates/pm_core/src/ids.rs
//! Party identifier token. Deterministic, ASCII-only, strict shape; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const TOKEN_MAX_LEN: usize = 64;

/// Token for PartyId: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    let len = bs.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

macro_rules! token_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid_token(s) { Ok($name(s.to_owned())) } else { Err(CoreError::InvalidId(s.to_owned())) }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                if is_valid_token(&value) { Ok($name(value)) } else { Err(CoreError::InvalidId(value)) }
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String { id.0 }
        }
    }
}

token_newtype!(
    /// Party token, unique within a legislature: ^[A-Za-z0-9_.:-]{1,64}$
    PartyId
);

impl PartyId {
    /// `p<k>`; always a valid token.
    pub fn numbered(k: u64) -> Self {
        PartyId(format!("p{k}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        for ok in ["A", "p1", "p1700000000000", "_", ".", ":", "-", "A_b:9.Z"] {
            assert!(is_valid_token(ok));
            let id: PartyId = ok.parse().unwrap();
            assert_eq!(id.as_str(), ok);
        }
        let too_long = "x".repeat(65);
        for bad in ["", " ", "é", "a b", too_long.as_str()] {
            assert!(!is_valid_token(bad));
            assert!(bad.parse::<PartyId>().is_err());
        }
    }

    #[test]
    fn numbered_ids_are_valid() {
        for k in [0u64, 1, 7, u64::MAX] {
            let id = PartyId::numbered(k);
            assert!(is_valid_token(id.as_str()));
        }
        assert_eq!(PartyId::numbered(3).as_str(), "p3");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a: PartyId = "p10".parse().unwrap();
        let b: PartyId = "p2".parse().unwrap();
        assert!(a < b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_validates_on_deserialize() {
        let id: PartyId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
        assert!(serde_json::from_str::<PartyId>("\"has space\"").is_err());
    }
}
