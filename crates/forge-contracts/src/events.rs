use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clock::now_utc_iso;
use crate::schema::Modality;

/// One form action worth recording. Serialized with its snake_case name
/// under `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        modality: Modality,
        model: String,
        history_records: usize,
        history_degraded: bool,
    },
    ModalitySelected {
        modality: Modality,
        model: String,
    },
    ModelSelected {
        modality: Modality,
        model: String,
    },
    TemplateApplied {
        modality: Modality,
        template: String,
    },
    ValidationFailed {
        modality: Modality,
        model: String,
        missing: Vec<String>,
        error: String,
    },
    PromptComposed {
        modality: Modality,
        model: String,
        prompt: String,
    },
    HistorySaved {
        id: String,
        favorite: bool,
    },
    HistoryReused {
        id: String,
        modality: Modality,
        model: String,
    },
    FavoriteToggled {
        id: String,
        favorite: bool,
    },
    HistoryRemoved {
        id: String,
    },
    HistoryCleared {
        removed: usize,
    },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::SessionStarted { .. } => "session_started",
            SessionEvent::ModalitySelected { .. } => "modality_selected",
            SessionEvent::ModelSelected { .. } => "model_selected",
            SessionEvent::TemplateApplied { .. } => "template_applied",
            SessionEvent::ValidationFailed { .. } => "validation_failed",
            SessionEvent::PromptComposed { .. } => "prompt_composed",
            SessionEvent::HistorySaved { .. } => "history_saved",
            SessionEvent::HistoryReused { .. } => "history_reused",
            SessionEvent::FavoriteToggled { .. } => "favorite_toggled",
            SessionEvent::HistoryRemoved { .. } => "history_removed",
            SessionEvent::HistoryCleared { .. } => "history_cleared",
        }
    }
}

/// JSONL audit trail of one form session. Each line starts with `type`,
/// `session_id` and `ts`, followed by the event's own fields.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
    session_id: String,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_id: session_id.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Appends one line and returns the object written.
    pub fn append(&self, event: &SessionEvent) -> anyhow::Result<Value> {
        let mut line = Map::new();
        line.insert("type".to_string(), Value::String(event.kind().to_string()));
        line.insert(
            "session_id".to_string(),
            Value::String(self.session_id.clone()),
        );
        line.insert("ts".to_string(), Value::String(now_utc_iso()));
        if let Value::Object(fields) = serde_json::to_value(event)? {
            for (key, value) in fields {
                if key != "type" {
                    line.insert(key, value);
                }
            }
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let row = Value::Object(line);
        writeln!(file, "{}", serde_json::to_string(&row)?)?;
        tracing::debug!(event = event.kind(), "session event recorded");
        Ok(row)
    }
}
