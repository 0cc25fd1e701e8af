use crate::error::ForgeError;
use crate::schema::{FieldValue, FieldValueSet, ModalitySchema};

pub const MAX_TEXT_LENGTH: usize = 2000;

/// Names of required fields that are absent, blank, or (for numeric fields)
/// unparsable or out of bounds. Order follows the required-field rule: common
/// names first, then the model's extras. An empty result means the set can be
/// composed.
pub fn validate(schema: &ModalitySchema, model: &str, values: &FieldValueSet) -> Vec<String> {
    schema
        .required
        .required_for(model)
        .into_iter()
        .filter(|name| {
            let Some(value) = values.get(*name) else {
                return true;
            };
            match schema.field(name) {
                Some(field) => !field.accepts(value),
                None => value.is_blank(),
            }
        })
        .map(str::to_string)
        .collect()
}

pub fn enforce_limits(values: &FieldValueSet) -> Result<(), ForgeError> {
    for (name, value) in values {
        if let FieldValue::Text(text) = value {
            if text.chars().count() > MAX_TEXT_LENGTH {
                return Err(ForgeError::FieldTooLong {
                    field: name.clone(),
                    max: MAX_TEXT_LENGTH,
                });
            }
        }
    }
    Ok(())
}

/// Strips control characters (newline and tab survive) and surrounding
/// whitespace from every text value.
pub fn sanitize(values: &FieldValueSet) -> FieldValueSet {
    values
        .iter()
        .map(|(name, value)| {
            let cleaned = match value {
                FieldValue::Text(text) => FieldValue::Text(
                    text.chars()
                        .filter(|ch| !ch.is_control() || *ch == '\n' || *ch == '\t')
                        .collect::<String>()
                        .trim()
                        .to_string(),
                ),
                FieldValue::Number(number) => FieldValue::Number(*number),
            };
            (name.clone(), cleaned)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{enforce_limits, sanitize, validate, MAX_TEXT_LENGTH};
    use crate::error::ForgeError;
    use crate::schema::{FieldValue, FieldValueSet, Modality, SchemaRegistry};

    fn values(pairs: &[(&str, FieldValue)]) -> FieldValueSet {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn empty_set_reports_every_required_field() -> anyhow::Result<()> {
        let registry = SchemaRegistry::global();
        for modality in registry.list_modalities() {
            let schema = registry.schema(modality)?;
            for model in &schema.models {
                let expected: Vec<String> = schema
                    .required
                    .required_for(&model.id)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                assert_eq!(validate(schema, &model.id, &FieldValueSet::new()), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn runway_additionally_requires_camera_motion() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Video)?;
        let filled = values(&[
            ("scene", FieldValue::from("a harbor at dawn")),
            ("action", FieldValue::from("boats leaving port")),
            ("duration_seconds", FieldValue::Number(5.0)),
        ]);
        assert!(validate(schema, "sora", &filled).is_empty());
        assert_eq!(validate(schema, "runway", &filled), vec!["camera_motion"]);
        Ok(())
    }

    #[test]
    fn unknown_model_only_checks_common_fields() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Video)?;
        assert_eq!(
            validate(schema, "not-a-model", &FieldValueSet::new()),
            vec!["scene", "action", "duration_seconds"]
        );
        Ok(())
    }

    #[test]
    fn blank_and_out_of_range_values_count_as_missing() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Video)?;
        let filled = values(&[
            ("scene", FieldValue::from("   ")),
            ("action", FieldValue::from("running")),
            ("duration_seconds", FieldValue::Number(90.0)),
        ]);
        assert_eq!(validate(schema, "pika", &filled), vec!["scene", "duration_seconds"]);

        let textual = values(&[
            ("scene", FieldValue::from("a field")),
            ("action", FieldValue::from("running")),
            ("duration_seconds", FieldValue::from("12")),
        ]);
        assert!(validate(schema, "pika", &textual).is_empty());
        Ok(())
    }

    #[test]
    fn every_template_satisfies_its_common_required_fields() -> anyhow::Result<()> {
        let registry = SchemaRegistry::global();
        let blog = registry.template(Modality::Text, "blog")?;
        let mut filled = FieldValueSet::new();
        blog.apply(&mut filled);
        assert!(validate(registry.schema(Modality::Text)?, "gpt-4", &filled).is_empty());

        for modality in registry.list_modalities() {
            let schema = registry.schema(modality)?;
            let model = &schema.models[0].id;
            for template in schema.templates.values() {
                let mut filled = FieldValueSet::new();
                template.apply(&mut filled);
                assert!(
                    validate(schema, model, &filled).is_empty(),
                    "{modality}/{} left required fields empty",
                    template.key
                );
            }
        }
        Ok(())
    }

    #[test]
    fn limits_reject_overlong_text() {
        let ok = values(&[("subject", FieldValue::from("x".repeat(MAX_TEXT_LENGTH)))]);
        assert_eq!(enforce_limits(&ok), Ok(()));

        let long = values(&[
            ("goal", FieldValue::from("fine")),
            ("subject", FieldValue::from("x".repeat(MAX_TEXT_LENGTH + 1))),
        ]);
        assert_eq!(
            enforce_limits(&long),
            Err(ForgeError::FieldTooLong {
                field: "subject".to_string(),
                max: MAX_TEXT_LENGTH,
            })
        );
    }

    #[test]
    fn sanitize_strips_control_characters_and_trims() {
        let raw = values(&[
            ("subject", FieldValue::from("  a cat\u{0007} on\ta mat\n ")),
            ("duration_seconds", FieldValue::Number(4.0)),
        ]);
        let cleaned = sanitize(&raw);
        assert_eq!(cleaned["subject"], FieldValue::from("a cat on\ta mat"));
        assert_eq!(cleaned["duration_seconds"], FieldValue::Number(4.0));
    }
}
