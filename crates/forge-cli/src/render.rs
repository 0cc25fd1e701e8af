use forge_contracts::history::{HistoryRecord, HistoryStats};
use forge_contracts::schema::{FieldKind, ModalitySchema, SchemaRegistry};
use forge_engine::ForgeEngine;

const PROMPT_PREVIEW_CHARS: usize = 72;

pub(crate) fn print_modalities(registry: &SchemaRegistry) {
    for modality in registry.list_modalities() {
        println!(
            "{:<6} {} ({})",
            modality.as_str(),
            modality.display_name(),
            modality.subtitle()
        );
    }
}

pub(crate) fn print_models(schema: &ModalitySchema, selected: Option<&str>) {
    for model in &schema.models {
        let marker = if selected == Some(model.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<24} {} - {}",
            model.id, model.label, model.description
        );
    }
}

pub(crate) fn print_fields(schema: &ModalitySchema) {
    for field in &schema.fields {
        let required = if field.required { "*" } else { " " };
        let kind = match &field.kind {
            FieldKind::Select { options } => format!("{} [{}]", field.kind.tag(), options.join("|")),
            FieldKind::Number { min, max } => format!("{} [{min}-{max}]", field.kind.tag()),
            other => other.tag().to_string(),
        };
        println!(
            "{required} {:<18} {:<20} {:<18} {}",
            field.name, field.label, kind, field.placeholder
        );
    }
}

pub(crate) fn print_templates(schema: &ModalitySchema) {
    for template in schema.templates.values() {
        println!("{:<14} {}", template.key, template.name);
    }
}

pub(crate) fn print_form(engine: &ForgeEngine) {
    let modality = engine.modality();
    println!(
        "{} ({}) - model {}",
        modality.display_name(),
        modality.subtitle(),
        engine.model()
    );
    let Ok(schema) = engine.schema() else {
        return;
    };
    for field in &schema.fields {
        let required = if field.required { "*" } else { " " };
        match engine.values().get(&field.name) {
            Some(value) => println!("{required} {:<18} {value}", field.name),
            None => println!("{required} {:<18} <{}>", field.name, field.placeholder),
        }
    }
}

pub(crate) fn print_history(records: &[&HistoryRecord], stats: HistoryStats) {
    println!("{} saved, {} favorite", stats.total, stats.favorites);
    for record in records {
        let star = if record.favorite { "★" } else { " " };
        println!(
            "{star} {}  {}/{}  {}",
            record.id,
            record.modality,
            record.model,
            record.created_at
        );
        println!("    {}", preview(&record.prompt));
    }
}

fn preview(prompt: &str) -> String {
    let flat = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PROMPT_PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PROMPT_PREVIEW_CHARS - 3).collect();
    cut.push_str("...");
    cut
}
