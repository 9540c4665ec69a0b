//! Flag keys as the single source of truth for flag names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Function keys pressed by the operator to mark experiment phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    F1,
    F3,
    F4,
    F6,
    F7,
    F8,
}

impl Flag {
    /// All recognised flags, in key order.
    pub const ALL: [Self; 6] = [Self::F1, Self::F3, Self::F4, Self::F6, Self::F7, Self::F8];

    /// Short display name (e.g. `"F1"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
        }
    }

    /// Maps a raw key token from the keystroke logger (e.g. `"Key.f1"`).
    ///
    /// Returns `None` for keys outside the allow-list.
    #[must_use]
    pub fn from_key_token(token: &str) -> Option<Self> {
        match token {
            "Key.f1" => Some(Self::F1),
            "Key.f3" => Some(Self::F3),
            "Key.f4" => Some(Self::F4),
            "Key.f6" => Some(Self::F6),
            "Key.f7" => Some(Self::F7),
            "Key.f8" => Some(Self::F8),
            _ => None,
        }
    }

    /// Whether `prev -> next` is a press/release pair of one logical action.
    ///
    /// Only `F3 -> F4` and `F7 -> F8` qualify.
    #[must_use]
    pub const fn is_key_repeat(prev: Self, next: Self) -> bool {
        matches!((prev, next), (Self::F3, Self::F4) | (Self::F7, Self::F8))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F1" => Ok(Self::F1),
            "F3" => Ok(Self::F3),
            "F4" => Ok(Self::F4),
            "F6" => Ok(Self::F6),
            "F7" => Ok(Self::F7),
            "F8" => Ok(Self::F8),
            _ => Err(UnknownFlag(s.to_string())),
        }
    }
}

impl Serialize for Flag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown flag names.
#[derive(Debug, Clone)]
pub struct UnknownFlag(String);

impl fmt::Display for UnknownFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown flag: {}", self.0)
    }
}

impl std::error::Error for UnknownFlag {}
