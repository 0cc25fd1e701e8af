mod defaults;
mod fields;
mod modality;
mod registry;

pub use fields::{FieldDefinition, FieldKind, FieldValue, FieldValueSet};
pub use modality::Modality;
pub use registry::{ModalitySchema, ModelDescriptor, RequiredFieldRule, SchemaRegistry, Template};
