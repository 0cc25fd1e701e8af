//! Prompt composition core: the modality schema tables, required-field
//! validation, prompt rendering and the persisted history of saved prompts.

pub mod chat;
pub mod clock;
pub mod compose;
pub mod error;
pub mod events;
pub mod history;
pub mod schema;
pub mod storage;
pub mod validation;

pub use error::ForgeError;
