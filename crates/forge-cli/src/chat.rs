use std::io::{self, ErrorKind, Write};

use anyhow::Result;
use forge_contracts::chat::{parse_intent, Intent, CHAT_HELP_COMMANDS};
use forge_engine::ForgeEngine;

use crate::render;

pub(crate) fn run_chat(mut engine: ForgeEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    println!("Prompt Forge started. Type /help for commands.");
    if engine.history().is_degraded() {
        println!("History storage is unavailable; saves will last for this session only.");
    }
    render::print_form(&engine);

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        let read = match stdin.read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if read == 0 {
            break;
        }

        let input = line.trim_end_matches(['\n', '\r']);
        let intent = parse_intent(input);
        if intent.action == "noop" {
            continue;
        }
        if intent.action == "quit" {
            break;
        }
        handle_intent(&mut engine, &intent);
    }
    Ok(())
}

/// Form errors are reported and the session carries on.
fn handle_intent(engine: &mut ForgeEngine, intent: &Intent) {
    match intent.action.as_str() {
        "help" => println!("Commands: {}", CHAT_HELP_COMMANDS.join(" ")),
        "select_modality" => match engine.select_modality(arg(intent, "modality")) {
            Ok(modality) => {
                println!(
                    "Modality set to {} (model {})",
                    modality.display_name(),
                    engine.model()
                );
            }
            Err(err) => println!("{err}"),
        },
        "select_model" => match engine.select_model(arg(intent, "model")) {
            Ok(()) => println!("Model set to {}", engine.model()),
            Err(err) => println!("{err}"),
        },
        "apply_template" => match engine.apply_template(arg(intent, "template")) {
            Ok(()) => render::print_form(engine),
            Err(err) => println!("{err}"),
        },
        "set_field" => {
            let field = arg(intent, "field");
            if field.is_empty() {
                println!("/set requires a field name");
                return;
            }
            match engine.set_field(field, arg(intent, "value")) {
                Ok(()) => println!("{field} updated"),
                Err(err) => println!("{err}"),
            }
        }
        "clear_field" => match engine.clear_field(arg(intent, "field")) {
            Ok(true) => println!("{} cleared", arg(intent, "field")),
            Ok(false) => println!("{} was already empty", arg(intent, "field")),
            Err(err) => println!("{err}"),
        },
        "show_form" => render::print_form(engine),
        "list_fields" => {
            if let Ok(schema) = engine.schema() {
                render::print_fields(schema);
            }
        }
        "list_models" => {
            if let Ok(schema) = engine.schema() {
                render::print_models(schema, Some(engine.model()));
            }
        }
        "list_templates" => {
            if let Ok(schema) = engine.schema() {
                render::print_templates(schema);
            }
        }
        "validate" => match engine.missing_fields() {
            Ok(missing) if missing.is_empty() => println!("All required fields are filled"),
            Ok(missing) => println!("Missing required fields: {}", missing.join(", ")),
            Err(err) => println!("{err}"),
        },
        "generate" => match engine.generate() {
            Ok(composition) => println!("{}", composition.prompt),
            Err(err) => println!("{err}"),
        },
        "save" => match engine.save_last() {
            Ok(record) => println!("Saved as {}", record.id),
            Err(err) => println!("{err}"),
        },
        "list_history" => {
            let records: Vec<_> = engine.history().list().iter().collect();
            render::print_history(&records, engine.history().stats());
        }
        "toggle_favorite" => match engine.toggle_favorite(arg(intent, "id")) {
            Ok(true) => println!("Added to favorites"),
            Ok(false) => println!("Removed from favorites"),
            Err(err) => println!("{err}"),
        },
        "remove_record" => match engine.remove(arg(intent, "id")) {
            Ok(()) => println!("Removed {}", arg(intent, "id")),
            Err(err) => println!("{err}"),
        },
        "reuse_record" => match engine.reuse(arg(intent, "id")) {
            Ok(record) => {
                render::print_form(engine);
                println!("{}", record.prompt);
            }
            Err(err) => println!("{err}"),
        },
        "diff_records" => match engine.diff(arg(intent, "from"), arg(intent, "to")) {
            Ok(lines) if lines.is_empty() => println!("Prompts are identical"),
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => println!("{err}"),
        },
        "clear_history" => {
            engine.clear_history();
            println!("History cleared");
        }
        "reset_form" => {
            engine.reset();
            println!("Form cleared");
        }
        _ => match intent.arg("command") {
            Some(command) if !command.is_empty() => println!("Unknown command: /{command}"),
            _ => println!("Use /set <field> <value> or name=value. Type /help for commands."),
        },
    }
}

fn arg<'a>(intent: &'a Intent, key: &str) -> &'a str {
    intent.arg(key).map(str::trim).unwrap_or_default()
}
