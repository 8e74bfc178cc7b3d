//! Character identifier type
//!
//! Every displayable record in a document (shapes, morph shapes, bitmaps,
//! sprites) is addressed by a 16-bit character id. The newtype keeps ids from
//! being mixed up with indices and ratios, which are also small integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use morphex::domain::ids::CharacterId;
/// use std::str::FromStr;
///
/// let id = CharacterId::from_str("42").unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(u16);

impl CharacterId {
    /// Creates a new CharacterId
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub const fn get(self) -> u16 {
        self.0
    }

    /// File name of the artifact exported for this character
    pub fn file_name(self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CharacterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|e| format!("Invalid character id '{s}': {e}"))
    }
}

impl From<u16> for CharacterId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// Parses a comma-separated list of character ids (`"3, 7,9"`)
pub fn parse_id_list(input: &str) -> Result<Vec<CharacterId>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(CharacterId::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_id_from_str() {
        assert_eq!(CharacterId::from_str("7").unwrap(), CharacterId::new(7));
        assert_eq!(CharacterId::from_str(" 65535 ").unwrap().get(), 65535);
        assert!(CharacterId::from_str("-1").is_err());
        assert!(CharacterId::from_str("65536").is_err());
        assert!(CharacterId::from_str("abc").is_err());
    }

    #[test]
    fn test_character_id_file_name() {
        assert_eq!(CharacterId::new(5).file_name("svg"), "5.svg");
        assert_eq!(CharacterId::new(12).file_name("html"), "12.html");
    }

    #[test]
    fn test_character_id_serde_transparent() {
        let id = CharacterId::new(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: CharacterId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_parse_id_list() {
        let ids = parse_id_list("3, 7,9").unwrap();
        assert_eq!(
            ids,
            vec![CharacterId::new(3), CharacterId::new(7), CharacterId::new(9)]
        );
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list("3,x").is_err());
    }
}
