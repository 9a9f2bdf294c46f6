use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stage section, taken from the section's `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(String);

impl StageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Position of a card in document order.
///
/// Cards carry no stable identifier in the markup, so the index the binding
/// layer assigned at load time is the identity for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_id_displays_raw_identifier() {
        let id = StageId::from("stage-foundations");
        assert_eq!(id.to_string(), "stage-foundations");
        assert_eq!(id.as_str(), "stage-foundations");
    }

    #[test]
    fn card_id_serializes_as_plain_index() {
        let json = serde_json::to_string(&CardId(7)).expect("serialize card id");
        assert_eq!(json, "7");
        assert_eq!(CardId(7).to_string(), "card#7");
    }
}
