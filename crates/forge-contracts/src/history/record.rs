use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::schema::{FieldValueSet, Modality};

/// A saved composition. Older payloads may lack `favorite` or `values`
/// (written as `inputs` by earlier front ends); both default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub modality: Modality,
    pub model: String,
    #[serde(default, alias = "inputs")]
    pub values: FieldValueSet,
    pub prompt: String,
    #[serde(default, alias = "timestamp")]
    pub created_at: String,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryRecord {
    pub fn fingerprint(&self) -> String {
        fingerprint(self.modality, &self.model, &self.prompt)
    }
}

/// What the form controller hands over when saving a composition.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub modality: Modality,
    pub model: String,
    pub values: FieldValueSet,
    pub prompt: String,
}

impl HistoryEntry {
    pub fn fingerprint(&self) -> String {
        fingerprint(self.modality, &self.model, &self.prompt)
    }
}

fn fingerprint(modality: Modality, model: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(modality.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(model.as_bytes());
    hasher.update([0u8]);
    hasher.update(prompt.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{HistoryEntry, HistoryRecord};
    use crate::schema::{FieldValue, FieldValueSet, Modality};

    #[test]
    fn legacy_payload_defaults_missing_fields() -> anyhow::Result<()> {
        let record: HistoryRecord = serde_json::from_value(json!({
            "id": "1700000000000",
            "modality": "image",
            "model": "dalle",
            "inputs": {"subject": "a cat"},
            "prompt": "a cat. Optimized for: DALL·E.",
            "timestamp": "2024-01-01T00:00:00Z"
        }))?;
        assert!(!record.favorite);
        assert_eq!(record.values["subject"], FieldValue::from("a cat"));
        assert_eq!(record.created_at, "2024-01-01T00:00:00Z");
        Ok(())
    }

    #[test]
    fn fingerprint_ignores_values_and_identity() {
        let entry = HistoryEntry {
            modality: Modality::Text,
            model: "claude".to_string(),
            values: FieldValueSet::new(),
            prompt: "Write a poem.".to_string(),
        };
        let record = HistoryRecord {
            id: "abc".to_string(),
            modality: Modality::Text,
            model: "claude".to_string(),
            values: [("goal".to_string(), FieldValue::from("Write a poem"))]
                .into_iter()
                .collect(),
            prompt: "Write a poem.".to_string(),
            created_at: String::new(),
            favorite: true,
        };
        assert_eq!(entry.fingerprint(), record.fingerprint());
        assert_eq!(entry.fingerprint().len(), 64);

        let other_model = HistoryEntry {
            model: "gemini".to_string(),
            ..entry.clone()
        };
        assert_ne!(entry.fingerprint(), other_model.fingerprint());
    }
}
