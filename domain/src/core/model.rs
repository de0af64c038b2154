//! Model value object representing a text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models known to the consultation backend (Value Object)
///
/// Specialists and the coordinator may run on different models; anything
/// not listed here is carried through as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    ClaudeSonnet4,
    ClaudeSonnet45,
    ClaudeOpus45,
    ClaudeHaiku45,
    Custom(String),
}

impl Model {
    /// Get the API identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet4 => "claude-sonnet-4-20250514",
            Model::ClaudeSonnet45 => "claude-sonnet-4-5",
            Model::ClaudeOpus45 => "claude-opus-4-5",
            Model::ClaudeHaiku45 => "claude-haiku-4-5",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        match self {
            Model::Custom(s) => s.starts_with("claude"),
            _ => true,
        }
    }
}

impl Default for Model {
    /// Returns the default consultation model (Claude Sonnet 4)
    fn default() -> Self {
        Model::ClaudeSonnet4
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-sonnet-4-20250514" | "claude-sonnet-4" => Model::ClaudeSonnet4,
            "claude-sonnet-4-5" | "claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "claude-opus-4-5" | "claude-opus-4.5" => Model::ClaudeOpus45,
            "claude-haiku-4-5" | "claude-haiku-4.5" => Model::ClaudeHaiku45,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
