use crate::schema::{FieldValueSet, Modality, ModalitySchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    Comma,
    Period,
}

struct Phrasing {
    joiner: Joiner,
    /// Field name -> clause, `{}` marks where the value goes.
    clauses: &'static [(&'static str, &'static str)],
}

fn phrasing(modality: Modality) -> Phrasing {
    match modality {
        Modality::Text => Phrasing {
            joiner: Joiner::Period,
            clauses: &[
                ("goal", "{}"),
                ("subject", "Subject: {}"),
                ("task_type", "Task type: {}"),
                ("tone", "Use a {} tone"),
                ("format", "Format the output as {}"),
                ("length", "Length: {}"),
                ("context", "Context: {}"),
                ("style", "Write in a {} style"),
            ],
        },
        Modality::Image => Phrasing {
            joiner: Joiner::Comma,
            clauses: &[
                ("subject", "{}"),
                ("style", "in the style of {}"),
                ("environment", "set in {}"),
                ("lighting", "with {} lighting"),
                ("camera", "shot with {}"),
                ("mood", "{} mood"),
                ("aspect_ratio", "aspect ratio {}"),
            ],
        },
        Modality::Video => Phrasing {
            joiner: Joiner::Period,
            clauses: &[
                ("scene", "Scene: {}"),
                ("action", "Action: {}"),
                ("duration_seconds", "Duration: {} seconds"),
                ("camera_motion", "Camera motion: {}"),
                ("lighting", "Lighting: {}"),
                ("style", "Visual style: {}"),
            ],
        },
        Modality::Audio => Phrasing {
            joiner: Joiner::Period,
            clauses: &[
                ("subject", "Script: \"{}\""),
                ("accent", "Accent/language: {}"),
                ("emotion", "Emotion: {}"),
                ("pace", "Pace: {}"),
                ("voice_gender", "Voice: {}"),
                ("age_range", "Age range: {}"),
                ("use_case", "Use case: {}"),
            ],
        },
    }
}

/// Clause template registered for a field, if any.
pub fn clause_for(modality: Modality, field: &str) -> Option<&'static str> {
    phrasing(modality)
        .clauses
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, clause)| *clause)
}

/// Renders a field set into a prompt.
///
/// Fields are visited in the schema's display order. Absent or blank values
/// and names with no clause are skipped, so this never fails; callers are
/// expected to run [`crate::validation::validate`] first. The model's label
/// (or its raw id when the schema does not list it) is appended last.
pub fn compose(schema: &ModalitySchema, model: &str, values: &FieldValueSet) -> String {
    let phrasing = phrasing(schema.modality);

    let mut clauses: Vec<String> = Vec::new();
    for field in &schema.fields {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        if value.is_blank() {
            continue;
        }
        let Some(template) = clause_for(schema.modality, &field.name) else {
            continue;
        };
        let text = collapse_whitespace(&value.as_text());
        let clause = tidy_clause(&template.replacen("{}", &text, 1), phrasing.joiner);
        if !clause.is_empty() {
            clauses.push(clause);
        }
    }

    let mut prompt = String::new();
    for clause in &clauses {
        if !prompt.is_empty() {
            match phrasing.joiner {
                Joiner::Comma => push_list_break(&mut prompt),
                Joiner::Period => push_sentence_break(&mut prompt),
            }
        }
        prompt.push_str(clause);
    }

    let label = schema
        .model(model)
        .map(|descriptor| descriptor.label.as_str())
        .unwrap_or_else(|| model.trim());
    if !label.is_empty() {
        if !prompt.is_empty() {
            push_sentence_break(&mut prompt);
        }
        prompt.push_str("Optimized for: ");
        prompt.push_str(label);
        prompt.push('.');
    }
    prompt
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn tidy_clause(clause: &str, joiner: Joiner) -> String {
    let trimmed = match joiner {
        Joiner::Comma => clause.trim_end_matches([',', ';', '.', ' ']),
        Joiner::Period => clause.trim_end_matches([',', ';', ' ']),
    };
    trimmed.trim_start().to_string()
}

/// A clause already closed by `!` or `?` takes no comma after it.
fn push_list_break(prompt: &mut String) {
    if prompt.ends_with(['!', '?']) {
        prompt.push(' ');
    } else {
        prompt.push_str(", ");
    }
}

fn push_sentence_break(prompt: &mut String) {
    if prompt.ends_with(['.', '!', '?']) {
        prompt.push(' ');
    } else {
        prompt.push_str(". ");
    }
}

#[cfg(test)]
mod tests {
    use super::{clause_for, compose};
    use crate::schema::{FieldValue, FieldValueSet, Modality, SchemaRegistry};

    fn values(pairs: &[(&str, FieldValue)]) -> FieldValueSet {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn every_field_has_a_clause() -> anyhow::Result<()> {
        let registry = SchemaRegistry::global();
        for modality in registry.list_modalities() {
            for field in registry.fields_for(modality)? {
                assert!(
                    clause_for(modality, &field.name).is_some(),
                    "{modality}.{} has no clause",
                    field.name
                );
            }
        }
        Ok(())
    }

    #[test]
    fn image_prompt_omits_absent_optional_fields() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Image)?;
        let prompt = compose(
            schema,
            "dalle",
            &values(&[
                ("subject", FieldValue::from("a cat")),
                ("style", FieldValue::from("anime")),
            ]),
        );
        assert_eq!(prompt, "a cat, in the style of anime. Optimized for: DALL·E.");
        for absent in ["lighting", "shot with", "mood", "set in", "aspect ratio"] {
            assert!(!prompt.contains(absent), "unexpected clause {absent}");
        }
        assert!(!prompt.contains("undefined"));
        Ok(())
    }

    #[test]
    fn blank_values_and_unmapped_names_are_skipped() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Image)?;
        let prompt = compose(
            schema,
            "midjourney",
            &values(&[
                ("subject", FieldValue::from("a lighthouse")),
                ("style", FieldValue::from("oil painting")),
                ("lighting", FieldValue::from("   ")),
                ("seed", FieldValue::from("42")),
            ]),
        );
        assert_eq!(
            prompt,
            "a lighthouse, in the style of oil painting. Optimized for: Midjourney."
        );
        Ok(())
    }

    #[test]
    fn clauses_follow_field_order_not_input_order() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Image)?;
        let prompt = compose(
            schema,
            "imagen",
            &values(&[
                ("mood", FieldValue::from("peaceful")),
                ("lighting", FieldValue::from("golden hour")),
                ("style", FieldValue::from("photorealistic")),
                ("subject", FieldValue::from("a fox")),
            ]),
        );
        assert_eq!(
            prompt,
            "a fox, in the style of photorealistic, with golden hour lighting, peaceful mood. \
             Optimized for: Google Imagen."
        );
        Ok(())
    }

    #[test]
    fn compose_is_deterministic_and_model_sensitive() -> anyhow::Result<()> {
        let registry = SchemaRegistry::global();
        let schema = registry.schema(Modality::Video)?;
        let mut filled = FieldValueSet::new();
        registry.template(Modality::Video, "drone")?.apply(&mut filled);

        let first = compose(schema, "sora", &filled);
        assert_eq!(first, compose(schema, "sora", &filled));
        assert_ne!(first, compose(schema, "veo", &filled));
        assert!(first.contains("Duration: 15 seconds"));
        assert!(first.ends_with("Optimized for: OpenAI Sora."));
        Ok(())
    }

    #[test]
    fn text_prompt_collapses_whitespace_and_avoids_double_periods() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Text)?;
        let prompt = compose(
            schema,
            "claude",
            &values(&[
                ("goal", FieldValue::from("Write a poem.")),
                ("subject", FieldValue::from("autumn   leaves\n falling")),
                ("tone", FieldValue::from("wistful")),
            ]),
        );
        assert_eq!(
            prompt,
            "Write a poem. Subject: autumn leaves falling. Use a wistful tone. \
             Optimized for: Anthropic Claude."
        );
        assert!(!prompt.contains("  "));
        assert!(!prompt.contains(".."));
        Ok(())
    }

    #[test]
    fn comma_list_does_not_follow_exclamation_or_question() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Image)?;
        let prompt = compose(
            schema,
            "dalle",
            &values(&[
                ("subject", FieldValue::from("Wow!")),
                ("style", FieldValue::from("pop art?")),
                ("mood", FieldValue::from("joyful")),
            ]),
        );
        assert_eq!(
            prompt,
            "Wow! in the style of pop art? joyful mood. Optimized for: DALL·E."
        );
        assert!(!prompt.contains("!,"));
        assert!(!prompt.contains("?,"));
        Ok(())
    }

    #[test]
    fn unknown_model_is_annotated_by_id() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Audio)?;
        let prompt = compose(
            schema,
            "custom-voice",
            &values(&[("subject", FieldValue::from("Hello there!"))]),
        );
        assert_eq!(prompt, "Script: \"Hello there!\". Optimized for: custom-voice.");
        Ok(())
    }

    #[test]
    fn empty_values_still_render_the_annotation() -> anyhow::Result<()> {
        let schema = SchemaRegistry::global().schema(Modality::Text)?;
        assert_eq!(
            compose(schema, "gpt-4", &FieldValueSet::new()),
            "Optimized for: GPT-4 / GPT-4.1 / GPT-4o."
        );
        Ok(())
    }
}
