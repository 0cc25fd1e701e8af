use std::collections::HashSet;
use std::sync::OnceLock;

use indexmap::IndexMap;

use super::defaults::builtin_schemas;
use super::fields::{FieldDefinition, FieldValueSet};
use super::modality::Modality;
use crate::error::ForgeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFieldRule {
    pub common: Vec<String>,
    pub models: IndexMap<String, Vec<String>>,
}

impl RequiredFieldRule {
    /// Common names first, then the model's extras, without repeats. An
    /// unknown model contributes nothing.
    pub fn required_for(&self, model: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let extra = self.models.get(model).map(Vec::as_slice).unwrap_or(&[]);
        for name in self.common.iter().chain(extra) {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub key: String,
    pub name: String,
    pub values: FieldValueSet,
}

impl Template {
    /// Overwrites only the fields this template specifies.
    pub fn apply(&self, values: &mut FieldValueSet) {
        for (name, value) in &self.values {
            values.insert(name.clone(), value.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalitySchema {
    pub modality: Modality,
    pub models: Vec<ModelDescriptor>,
    pub fields: Vec<FieldDefinition>,
    pub required: RequiredFieldRule,
    pub templates: IndexMap<String, Template>,
}

impl ModalitySchema {
    pub fn model(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|model| model.id == id)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn template(&self, key: &str) -> Option<&Template> {
        self.templates.get(key)
    }

    pub fn default_model(&self) -> Option<&ModelDescriptor> {
        self.models.first()
    }

    fn check_integrity(&self) -> Result<(), String> {
        let modality = self.modality;
        if self.fields.is_empty() {
            return Err(format!("{modality}: no fields defined"));
        }
        if self.models.is_empty() {
            return Err(format!("{modality}: no models defined"));
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(format!("{modality}: duplicate field '{}'", field.name));
            }
        }
        let mut model_ids = HashSet::new();
        for model in &self.models {
            if !model_ids.insert(model.id.as_str()) {
                return Err(format!("{modality}: duplicate model '{}'", model.id));
            }
        }

        for name in &self.required.common {
            if !names.contains(name.as_str()) {
                return Err(format!("{modality}: required field '{name}' is not defined"));
            }
        }
        for (model, extra) in &self.required.models {
            if !model_ids.contains(model.as_str()) {
                return Err(format!("{modality}: required rule for unknown model '{model}'"));
            }
            for name in extra {
                if !names.contains(name.as_str()) {
                    return Err(format!(
                        "{modality}: model '{model}' requires undefined field '{name}'"
                    ));
                }
            }
        }

        for (key, template) in &self.templates {
            for name in template.values.keys() {
                if !names.contains(name.as_str()) {
                    return Err(format!(
                        "{modality}: template '{key}' sets undefined field '{name}'"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Immutable modality -> {models, fields, required rules, templates} tables.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<Modality, ModalitySchema>,
}

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    pub fn new(schemas: Vec<ModalitySchema>) -> Self {
        Self {
            schemas: schemas
                .into_iter()
                .map(|schema| (schema.modality, schema))
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_schemas())
    }

    /// Process-wide registry, built on first use and read-only afterwards.
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL.get_or_init(|| {
            let registry = Self::builtin();
            if let Err(reason) = registry.check_integrity() {
                tracing::error!(%reason, "builtin schema tables are inconsistent");
            }
            tracing::debug!(
                modalities = registry.schemas.len(),
                "schema registry initialized"
            );
            registry
        })
    }

    pub fn list_modalities(&self) -> Vec<Modality> {
        Modality::ALL
            .into_iter()
            .filter(|modality| self.schemas.contains_key(modality))
            .collect()
    }

    pub fn schema(&self, modality: Modality) -> Result<&ModalitySchema, ForgeError> {
        self.schemas
            .get(&modality)
            .ok_or_else(|| ForgeError::UnknownModality(modality.to_string()))
    }

    pub fn models_for(&self, modality: Modality) -> Result<&[ModelDescriptor], ForgeError> {
        Ok(self.schema(modality)?.models.as_slice())
    }

    pub fn fields_for(&self, modality: Modality) -> Result<&[FieldDefinition], ForgeError> {
        Ok(self.schema(modality)?.fields.as_slice())
    }

    pub fn templates_for(
        &self,
        modality: Modality,
    ) -> Result<&IndexMap<String, Template>, ForgeError> {
        Ok(&self.schema(modality)?.templates)
    }

    pub fn model(&self, modality: Modality, id: &str) -> Result<&ModelDescriptor, ForgeError> {
        self.schema(modality)?
            .model(id)
            .ok_or_else(|| ForgeError::UnknownModel {
                modality: modality.to_string(),
                model: id.to_string(),
            })
    }

    pub fn template(&self, modality: Modality, key: &str) -> Result<&Template, ForgeError> {
        self.schema(modality)?
            .template(key)
            .ok_or_else(|| ForgeError::UnknownTemplate {
                modality: modality.to_string(),
                template: key.to_string(),
            })
    }

    pub fn check_integrity(&self) -> Result<(), String> {
        for schema in self.schemas.values() {
            schema.check_integrity()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{ModalitySchema, RequiredFieldRule, SchemaRegistry};
    use crate::error::ForgeError;
    use crate::schema::{FieldValue, FieldValueSet, Modality};

    #[test]
    fn builtin_tables_are_consistent() {
        assert_eq!(SchemaRegistry::builtin().check_integrity(), Ok(()));
    }

    #[test]
    fn modalities_listed_in_fixed_order() {
        let registry = SchemaRegistry::global();
        assert_eq!(registry.list_modalities(), Modality::ALL.to_vec());
        assert_eq!(registry.list_modalities(), registry.list_modalities());
    }

    #[test]
    fn fields_keep_display_order() -> anyhow::Result<()> {
        let names: Vec<&str> = SchemaRegistry::global()
            .fields_for(Modality::Image)?
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "subject",
                "style",
                "environment",
                "lighting",
                "camera",
                "mood",
                "aspect_ratio"
            ]
        );
        Ok(())
    }

    #[test]
    fn every_modality_has_models_fields_and_templates() -> anyhow::Result<()> {
        let registry = SchemaRegistry::global();
        for modality in registry.list_modalities() {
            assert_eq!(registry.models_for(modality)?.len(), 5);
            assert!(!registry.fields_for(modality)?.is_empty());
            assert!(!registry.templates_for(modality)?.is_empty());
        }
        Ok(())
    }

    #[test]
    fn missing_modality_is_rejected() {
        let registry = SchemaRegistry::new(Vec::new());
        assert_eq!(
            registry.models_for(Modality::Audio).err(),
            Some(ForgeError::UnknownModality("audio".to_string()))
        );
        assert!(registry.list_modalities().is_empty());
    }

    #[test]
    fn unknown_model_and_template_are_rejected() {
        let registry = SchemaRegistry::global();
        assert_eq!(
            registry.model(Modality::Video, "dalle").err(),
            Some(ForgeError::UnknownModel {
                modality: "video".to_string(),
                model: "dalle".to_string(),
            })
        );
        assert!(matches!(
            registry.template(Modality::Image, "blog"),
            Err(ForgeError::UnknownTemplate { .. })
        ));
        assert_eq!(
            registry.model(Modality::Video, "runway").map(|model| model.label.as_str()),
            Ok("Runway Gen-2 / Gen-3")
        );
    }

    #[test]
    fn required_rule_merges_model_extras() {
        let mut models = IndexMap::new();
        models.insert("runway".to_string(), vec!["camera_motion".to_string()]);
        models.insert("pika".to_string(), Vec::new());
        let rule = RequiredFieldRule {
            common: vec!["scene".to_string(), "action".to_string()],
            models,
        };
        assert_eq!(rule.required_for("runway"), vec!["scene", "action", "camera_motion"]);
        assert_eq!(rule.required_for("pika"), vec!["scene", "action"]);
        assert_eq!(rule.required_for("unlisted"), vec!["scene", "action"]);
    }

    #[test]
    fn template_apply_overwrites_only_its_fields() -> anyhow::Result<()> {
        let template = SchemaRegistry::global().template(Modality::Image, "portrait")?;
        let mut values = FieldValueSet::new();
        values.insert("subject".to_string(), FieldValue::from("a dog"));
        values.insert("aspect_ratio".to_string(), FieldValue::from("4:5"));
        template.apply(&mut values);
        assert_eq!(values["subject"], FieldValue::from("a person"));
        assert_eq!(values["aspect_ratio"], FieldValue::from("4:5"));
        assert_eq!(values["camera"], FieldValue::from("85mm f/1.8"));
        Ok(())
    }

    #[test]
    fn integrity_check_reports_dangling_required_field() -> anyhow::Result<()> {
        let mut schema: ModalitySchema = SchemaRegistry::builtin().schema(Modality::Text)?.clone();
        schema.required.common.push("budget".to_string());
        let registry = SchemaRegistry::new(vec![schema]);
        assert_eq!(
            registry.check_integrity(),
            Err("text: required field 'budget' is not defined".to_string())
        );
        Ok(())
    }
}
