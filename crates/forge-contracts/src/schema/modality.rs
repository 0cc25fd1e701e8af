use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Video,
    Audio,
}

impl Modality {
    /// Display order used by every listing.
    pub const ALL: [Modality; 4] = [
        Modality::Text,
        Modality::Image,
        Modality::Video,
        Modality::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Video => "video",
            Modality::Audio => "audio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Modality::Text => "Text",
            Modality::Image => "Image",
            Modality::Video => "Video",
            Modality::Audio => "Audio",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Modality::Text => "LLM",
            Modality::Image => "Generation",
            Modality::Video => "Creation",
            Modality::Audio => "Synthesis",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = ForgeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Modality::ALL
            .into_iter()
            .find(|modality| modality.as_str() == normalized)
            .ok_or_else(|| ForgeError::UnknownModality(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Modality;
    use crate::error::ForgeError;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Video ".parse::<Modality>(), Ok(Modality::Video));
    }

    #[test]
    fn parse_rejects_unregistered_key() {
        assert_eq!(
            "music".parse::<Modality>(),
            Err(ForgeError::UnknownModality("music".to_string()))
        );
    }

    #[test]
    fn serializes_lowercase() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Modality::Audio)?, "\"audio\"");
        let parsed: Modality = serde_json::from_str("\"image\"")?;
        assert_eq!(parsed, Modality::Image);
        Ok(())
    }
}
