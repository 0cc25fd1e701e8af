mod config;

pub use config::{ConfigOverrides, ForgeConfig, EVENTS_ENV, HISTORY_CAP_ENV, HOME_ENV};

use anyhow::Result;
use forge_contracts::compose::compose;
use forge_contracts::events::{SessionEvent, SessionLog};
use forge_contracts::history::{HistoryEntry, HistoryRecord, HistoryStore};
use forge_contracts::schema::{
    FieldDefinition, FieldValueSet, Modality, ModalitySchema, SchemaRegistry,
};
use forge_contracts::validation::{enforce_limits, sanitize, validate};
use forge_contracts::ForgeError;
use uuid::Uuid;

/// The last prompt produced by [`ForgeEngine::generate`] or restored from
/// history.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub modality: Modality,
    pub model: String,
    pub values: FieldValueSet,
    pub prompt: String,
}

impl From<&HistoryRecord> for Composition {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            modality: record.modality,
            model: record.model.clone(),
            values: record.values.clone(),
            prompt: record.prompt.clone(),
        }
    }
}

/// Form state for one session: the selected modality and model, the values
/// entered so far and the last composed prompt, backed by the prompt history.
pub struct ForgeEngine {
    registry: &'static SchemaRegistry,
    history: HistoryStore,
    events: Option<SessionLog>,
    session_id: String,
    modality: Modality,
    model: String,
    values: FieldValueSet,
    last: Option<Composition>,
}

impl ForgeEngine {
    pub fn new(config: &ForgeConfig) -> Result<Self> {
        let history = if config.ephemeral {
            HistoryStore::in_memory(config.history_cap)
        } else {
            HistoryStore::open_file(config.storage_path(), config.history_cap)
        };
        let session_id = Uuid::new_v4().to_string();
        let events = config
            .events_path
            .as_ref()
            .map(|path| SessionLog::new(path, session_id.clone()));

        let registry = SchemaRegistry::global();
        let modality = Modality::Text;
        let model = default_model_id(registry.schema(modality)?);

        let engine = Self {
            registry,
            history,
            events,
            session_id,
            modality,
            model,
            values: FieldValueSet::new(),
            last: None,
        };
        engine.emit(SessionEvent::SessionStarted {
            modality: engine.modality,
            model: engine.model.clone(),
            history_records: engine.history.list().len(),
            history_degraded: engine.history.is_degraded(),
        });
        tracing::debug!(
            session_id = %engine.session_id,
            records = engine.history.list().len(),
            "form session started"
        );
        Ok(engine)
    }

    pub fn registry(&self) -> &'static SchemaRegistry {
        self.registry
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn values(&self) -> &FieldValueSet {
        &self.values
    }

    pub fn last(&self) -> Option<&Composition> {
        self.last.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn schema(&self) -> Result<&'static ModalitySchema, ForgeError> {
        self.registry.schema(self.modality)
    }

    /// Switches modality. Entered values and the last prompt are discarded and
    /// the modality's first model becomes selected.
    pub fn select_modality(&mut self, name: &str) -> Result<Modality, ForgeError> {
        let modality: Modality = name.parse()?;
        let schema = self.registry.schema(modality)?;
        self.modality = modality;
        self.model = default_model_id(schema);
        self.values.clear();
        self.last = None;
        self.emit(SessionEvent::ModalitySelected {
            modality,
            model: self.model.clone(),
        });
        Ok(modality)
    }

    pub fn select_model(&mut self, id: &str) -> Result<(), ForgeError> {
        let id = id.trim();
        let model = self.registry.model(self.modality, id)?;
        self.model = model.id.clone();
        self.emit(SessionEvent::ModelSelected {
            modality: self.modality,
            model: self.model.clone(),
        });
        Ok(())
    }

    /// Overlays a template's values; fields it does not mention keep theirs.
    pub fn apply_template(&mut self, key: &str) -> Result<(), ForgeError> {
        let key = key.trim();
        let template = self.registry.template(self.modality, key)?;
        template.apply(&mut self.values);
        self.emit(SessionEvent::TemplateApplied {
            modality: self.modality,
            template: template.key.clone(),
        });
        Ok(())
    }

    /// Sets a field from raw user input. A blank input clears the field.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), ForgeError> {
        let field = self.field(name)?;
        let value = field.value_from_input(raw);
        if value.is_blank() {
            self.values.shift_remove(&field.name);
        } else {
            self.values.insert(field.name.clone(), value);
        }
        Ok(())
    }

    pub fn clear_field(&mut self, name: &str) -> Result<bool, ForgeError> {
        let field = self.field(name)?;
        Ok(self.values.shift_remove(&field.name).is_some())
    }

    /// Clears entered values and the last prompt; the selection stays.
    pub fn reset(&mut self) {
        self.values.clear();
        self.last = None;
    }

    pub fn missing_fields(&self) -> Result<Vec<String>, ForgeError> {
        Ok(validate(self.schema()?, &self.model, &sanitize(&self.values)))
    }

    /// Checks and composes the current form. On success the result becomes
    /// the candidate for [`ForgeEngine::save_last`]; a failure drops the
    /// previous candidate.
    pub fn generate(&mut self) -> Result<Composition, ForgeError> {
        let schema = self.schema()?;
        if let Err(err) = enforce_limits(&self.values) {
            self.last = None;
            self.emit_validation_failed(&err);
            return Err(err);
        }
        let values = sanitize(&self.values);
        let missing = validate(schema, &self.model, &values);
        if !missing.is_empty() {
            let err = ForgeError::ValidationFailed { missing };
            self.last = None;
            self.emit_validation_failed(&err);
            return Err(err);
        }

        let prompt = compose(schema, &self.model, &values);
        let composition = Composition {
            modality: self.modality,
            model: self.model.clone(),
            values,
            prompt,
        };
        self.last = Some(composition.clone());
        self.emit(SessionEvent::PromptComposed {
            modality: composition.modality,
            model: composition.model.clone(),
            prompt: composition.prompt.clone(),
        });
        Ok(composition)
    }

    pub fn save_last(&mut self) -> Result<HistoryRecord, ForgeError> {
        let last = self.last.clone().ok_or(ForgeError::NothingToSave)?;
        let record = self.history.add(HistoryEntry {
            modality: last.modality,
            model: last.model,
            values: last.values,
            prompt: last.prompt,
        });
        self.emit(SessionEvent::HistorySaved {
            id: record.id.clone(),
            favorite: record.favorite,
        });
        Ok(record)
    }

    /// Restores a saved record into the form: its modality, model and values,
    /// with its prompt as the last result. A record whose model is not listed
    /// for its modality is rejected and the form is left untouched.
    pub fn reuse(&mut self, id: &str) -> Result<HistoryRecord, ForgeError> {
        let record = self
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::UnknownRecord(id.to_string()))?;
        self.registry.model(record.modality, &record.model)?;
        self.modality = record.modality;
        self.model = record.model.clone();
        self.values = record.values.clone();
        self.last = Some(Composition::from(&record));
        self.emit(SessionEvent::HistoryReused {
            id: record.id.clone(),
            modality: record.modality,
            model: record.model.clone(),
        });
        Ok(record)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, ForgeError> {
        let favorite = self
            .history
            .toggle_favorite(id)
            .ok_or_else(|| ForgeError::UnknownRecord(id.to_string()))?;
        self.emit(SessionEvent::FavoriteToggled {
            id: id.to_string(),
            favorite,
        });
        Ok(favorite)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), ForgeError> {
        if !self.history.remove(id) {
            return Err(ForgeError::UnknownRecord(id.to_string()));
        }
        self.emit(SessionEvent::HistoryRemoved { id: id.to_string() });
        Ok(())
    }

    pub fn clear_history(&mut self) {
        let removed = self.history.list().len();
        self.history.clear();
        self.emit(SessionEvent::HistoryCleared { removed });
    }

    pub fn diff(&self, from_id: &str, to_id: &str) -> Result<Vec<String>, ForgeError> {
        self.history.diff(from_id, to_id)
    }

    fn field(
        &self,
        name: &str,
    ) -> Result<&'static FieldDefinition, ForgeError> {
        let name = name.trim();
        self.schema()?
            .field(name)
            .ok_or_else(|| ForgeError::UnknownField {
                modality: self.modality.to_string(),
                field: name.to_string(),
            })
    }

    fn emit_validation_failed(&self, err: &ForgeError) {
        let missing = match err {
            ForgeError::ValidationFailed { missing } => missing.clone(),
            _ => Vec::new(),
        };
        self.emit(SessionEvent::ValidationFailed {
            modality: self.modality,
            model: self.model.clone(),
            missing,
            error: err.to_string(),
        });
    }

    /// Event log failures never interrupt the form.
    fn emit(&self, event: SessionEvent) {
        let Some(events) = self.events.as_ref() else {
            return;
        };
        if let Err(err) = events.append(&event) {
            tracing::warn!(
                error = %err,
                event = event.kind(),
                path = %events.path().display(),
                "failed to write session event"
            );
        }
    }
}

fn default_model_id(schema: &ModalitySchema) -> String {
    schema
        .default_model()
        .map(|model| model.id.clone())
        .unwrap_or_default()
}
