mod chat;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use forge_contracts::schema::{Modality, SchemaRegistry};
use forge_engine::{ConfigOverrides, ForgeConfig, ForgeEngine};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "PROMPT_FORGE_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "prompt-forge",
    version,
    about = "Compose model-ready prompts from structured fields"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Data directory holding storage.json.
    #[arg(long, global = true)]
    home: Option<PathBuf>,
    #[arg(long, global = true)]
    history_cap: Option<usize>,
    /// Append session events to this JSONL file.
    #[arg(long, global = true)]
    events: Option<PathBuf>,
    /// Keep history in memory only.
    #[arg(long, global = true)]
    ephemeral: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List modalities in display order.
    Modalities,
    Models(ModalityArgs),
    Fields(ModalityArgs),
    Templates(ModalityArgs),
    Generate(GenerateArgs),
    #[command(subcommand)]
    History(HistoryCommand),
    /// Interactive slash-command session.
    Chat,
}

#[derive(Debug, Parser)]
struct ModalityArgs {
    modality: String,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    #[arg(long)]
    modality: String,
    /// Defaults to the modality's first model.
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    template: Option<String>,
    /// Field assignment as name=value; repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
    #[arg(long)]
    save: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    List {
        #[arg(long)]
        favorites: bool,
        #[arg(long)]
        json: bool,
    },
    Show {
        id: String,
    },
    Favorite {
        id: String,
    },
    Remove {
        id: String,
    },
    Clear,
    Diff {
        from: String,
        to: String,
    },
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("prompt-forge error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let config = ForgeConfig::resolve(ConfigOverrides {
        home: cli.global.home.clone(),
        history_cap: cli.global.history_cap,
        events: cli.global.events.clone(),
        ephemeral: cli.global.ephemeral,
    });
    tracing::debug!(?config, "resolved configuration");

    let registry = SchemaRegistry::global();
    match cli.command {
        Command::Modalities => {
            render::print_modalities(registry);
            Ok(0)
        }
        Command::Models(args) => {
            let modality: Modality = args.modality.parse()?;
            render::print_models(registry.schema(modality)?, None);
            Ok(0)
        }
        Command::Fields(args) => {
            let modality: Modality = args.modality.parse()?;
            render::print_fields(registry.schema(modality)?);
            Ok(0)
        }
        Command::Templates(args) => {
            let modality: Modality = args.modality.parse()?;
            render::print_templates(registry.schema(modality)?);
            Ok(0)
        }
        Command::Generate(args) => run_generate(&config, args),
        Command::History(command) => run_history(&config, command),
        Command::Chat => {
            chat::run_chat(ForgeEngine::new(&config)?)?;
            Ok(0)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(tracing_subscriber::EnvFilter::new)
        .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| default_filter.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_generate(config: &ForgeConfig, args: GenerateArgs) -> Result<i32> {
    let mut engine = ForgeEngine::new(config)?;
    engine.select_modality(&args.modality)?;
    if let Some(model) = args.model.as_deref() {
        engine.select_model(model)?;
    }
    if let Some(template) = args.template.as_deref() {
        engine.apply_template(template)?;
    }
    for assignment in &args.set {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("--set expects NAME=VALUE, got '{assignment}'");
        };
        engine.set_field(name, value)?;
    }

    let composition = engine.generate()?;
    let saved = if args.save {
        Some(engine.save_last()?)
    } else {
        None
    };

    if args.json {
        let payload = json!({
            "modality": composition.modality,
            "model": composition.model,
            "values": composition.values,
            "prompt": composition.prompt,
            "saved_id": saved.as_ref().map(|record| record.id.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", composition.prompt);
        if let Some(record) = saved.as_ref() {
            eprintln!("Saved as {}", record.id);
        }
    }
    if saved.is_some() {
        warn_if_unpersisted(&engine);
    }
    Ok(0)
}

fn run_history(config: &ForgeConfig, command: HistoryCommand) -> Result<i32> {
    let mut engine = ForgeEngine::new(config)?;
    match command {
        HistoryCommand::List { favorites, json } => {
            let records: Vec<_> = if favorites {
                engine.history().favorites().collect()
            } else {
                engine.history().list().iter().collect()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                render::print_history(&records, engine.history().stats());
            }
        }
        HistoryCommand::Show { id } => {
            let record = engine
                .history()
                .get(&id)
                .with_context(|| format!("no history record with id '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        HistoryCommand::Favorite { id } => {
            let favorite = engine.toggle_favorite(&id)?;
            println!(
                "{id} {}",
                if favorite { "favorited" } else { "unfavorited" }
            );
        }
        HistoryCommand::Remove { id } => {
            engine.remove(&id)?;
            println!("Removed {id}");
        }
        HistoryCommand::Clear => {
            engine.clear_history();
            println!("History cleared");
        }
        HistoryCommand::Diff { from, to } => {
            for line in engine.diff(&from, &to)? {
                println!("{line}");
            }
        }
    }
    warn_if_unpersisted(&engine);
    Ok(0)
}

fn warn_if_unpersisted(engine: &ForgeEngine) {
    if let Some(warning) = persistence_warning(engine) {
        eprintln!("{warning}");
    }
}

fn persistence_warning(engine: &ForgeEngine) -> Option<&'static str> {
    engine
        .history()
        .is_degraded()
        .then_some("warning: history storage unavailable; changes were not persisted")
}
