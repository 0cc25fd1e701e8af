use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("Unknown modality '{0}'. Must be one of: text, image, video, audio")]
    UnknownModality(String),

    #[error("Invalid model '{model}' for modality '{modality}'.")]
    UnknownModel { modality: String, model: String },

    #[error("Unknown template '{template}' for modality '{modality}'.")]
    UnknownTemplate { modality: String, template: String },

    #[error("Unknown field '{field}' for modality '{modality}'.")]
    UnknownField { modality: String, field: String },

    #[error("Missing required fields: {}", missing.join(", "))]
    ValidationFailed { missing: Vec<String> },

    #[error("Field '{field}' exceeds maximum length of {max}")]
    FieldTooLong { field: String, max: usize },

    #[error("No history record with id '{0}'.")]
    UnknownRecord(String),

    #[error("Nothing to save; generate a prompt first.")]
    NothingToSave,
}
