use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Values the backend (or server-rendered markup) uses to say "no more pages".
const EMPTY_MARKERS: [&str; 4] = ["", "none", "null", "undefined"];

/// Opaque cursor for the next page of a channel's videos.
///
/// An empty token means there is nothing left to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageToken(String);

impl PageToken {
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => {
                let folded = value.trim().to_lowercase();
                if EMPTY_MARKERS.contains(&folded.as_str()) {
                    PageToken::default()
                } else {
                    PageToken(value.to_string())
                }
            }
            None => PageToken::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PageToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(PageToken::normalize(raw.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_markers_normalize_to_empty() {
        for raw in ["", "none", "None", "NULL", "null", "undefined", "  ", " None "] {
            assert!(PageToken::normalize(Some(raw)).is_empty(), "{raw:?} should be empty");
        }
        assert!(PageToken::normalize(None).is_empty());
    }

    #[test]
    fn test_real_tokens_are_preserved() {
        let token = PageToken::normalize(Some("CDIQAA"));
        assert_eq!(token.as_str(), "CDIQAA");

        // Only the marker check trims; the token itself is kept verbatim.
        let token = PageToken::normalize(Some(" EAEaBlBUOkNESQ "));
        assert_eq!(token.as_str(), " EAEaBlBUOkNESQ ");

        let token = PageToken::normalize(Some("nonempty"));
        assert_eq!(token.to_string(), "nonempty");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let token: PageToken = serde_json::from_str("\"None\"").unwrap();
        assert!(token.is_empty());

        let token: PageToken = serde_json::from_str("null").unwrap();
        assert!(token.is_empty());

        let token: PageToken = serde_json::from_str("\"CAUQAA\"").unwrap();
        assert_eq!(token.as_str(), "CAUQAA");
    }
}
