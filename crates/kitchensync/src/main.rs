//! `ksync` - CLI for kitchensync
//!
//! This binary provides the command-line interface for managing a user's
//! recipe records against the configured remote store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use clap::Parser;

use kitchensync::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ProfileCommand,
    RemoveCommand, ShowCommand,
};
use kitchensync::recipe::{Category, Recipe};
use kitchensync::store::{HttpStore, MemoryStore, RecipeStore};
use kitchensync::{init_logging, Config, RecipeDraft, RecipeSync};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await,
        Command::Add(add_cmd) => handle_add(&config, &add_cmd).await,
        Command::Remove(remove_cmd) => handle_remove(&config, &remove_cmd).await,
        Command::Show(show_cmd) => handle_show(&config, &show_cmd).await,
        Command::Profile(profile_cmd) => handle_profile(&config, &profile_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Builds the sync engine from configuration.
///
/// A configured remote base URL selects the HTTP store; otherwise records
/// live in process memory for the duration of the invocation.
fn build_sync(config: &Config) -> anyhow::Result<RecipeSync> {
    let store: Arc<dyn RecipeStore> = match &config.remote.base_url {
        Some(base_url) => Arc::new(HttpStore::new(
            base_url,
            config.remote.api_key.clone(),
            config.timeout(),
        )?),
        None => {
            tracing::info!("no remote configured, records are kept in process memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let owner = config.session_user().map(|user| user.user_id);
    Ok(RecipeSync::new(store, owner))
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let sync = build_sync(config)?;
    sync.refresh().await?;

    let mut records = sync.view().records;
    if let Some(category) = cmd.category {
        let category = Category::from(category);
        records.retain(|record| record.category == category);
    }
    if let Some(limit) = cmd.limit {
        records.truncate(limit);
    }

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => print_table(&records),
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No records.");
            }
            for record in &records {
                println!("{}  {}", record.id, record.name);
            }
        }
    }
    Ok(())
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let sync = build_sync(config)?;

    let category = cmd
        .category
        .map_or(config.recipes.default_category, Category::from);
    let draft = RecipeDraft::new(
        cmd.name.clone(),
        category,
        cmd.ingredients.clone(),
        cmd.steps.clone(),
    );
    let record = sync.create(draft).await?;
    println!("Added \"{}\" ({})", record.name, record.id);
    Ok(())
}

async fn handle_remove(config: &Config, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let sync = build_sync(config)?;

    // The engine starts empty, so pull the remote collection before removing.
    sync.refresh().await?;
    sync.delete(cmd.id).await?;
    println!("Removed {}", cmd.id);
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let sync = build_sync(config)?;
    sync.refresh().await?;

    let view = sync.view();
    let record = view
        .records
        .iter()
        .find(|record| record.id == cmd.id)
        .ok_or_else(|| kitchensync::Error::not_found(cmd.id))?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_record(record);
    }
    Ok(())
}

fn handle_profile(config: &Config, cmd: &ProfileCommand) -> anyhow::Result<()> {
    let Some(user) = config.session_user() else {
        if cmd.json {
            println!("{}", serde_json::json!({ "signed_in": false }));
        } else {
            println!("No session is configured.");
            println!("Set [session] user_id in the configuration file to sign in.");
        }
        return Ok(());
    };

    if cmd.json {
        let profile = serde_json::json!({
            "signed_in": true,
            "user_id": user.user_id.as_str(),
            "email": user.email,
            "display_name": user.display_name(),
        });
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Signed-in Profile");
        println!("-----------------");
        println!("User id:       {}", user.user_id);
        println!("Email:         {}", user.email);
        println!("Display name:  {}", user.display_name());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[remote]");
                println!(
                    "  Base URL:         {}",
                    config
                        .remote
                        .base_url
                        .as_deref()
                        .unwrap_or("(not set; records stay in memory)")
                );
                println!(
                    "  API key:          {}",
                    if config.remote.api_key.is_some() {
                        "(set)"
                    } else {
                        "(not set)"
                    }
                );
                println!("  Timeout (secs):   {}", config.remote.timeout_secs);
                println!();
                println!("[session]");
                println!(
                    "  User id:          {}",
                    config.session.user_id.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "  Email:            {}",
                    config.session.email.as_deref().unwrap_or("(not set)")
                );
                println!();
                println!("[recipes]");
                println!("  Default category: {}", config.recipes.default_category);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_table(records: &[Recipe]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    println!(
        "{:<36}  {:<16}  {:<9}  NAME",
        "ID", "CREATED", "CATEGORY"
    );
    for record in records {
        println!(
            "{:<36}  {:<16}  {:<9}  {}",
            record.id.to_string(),
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            record.category.to_string(),
            record.name
        );
    }
}

fn print_record(record: &Recipe) {
    println!("Name:      {}", record.name);
    println!("Id:        {}", record.id);
    println!("Owner:     {}", record.owner_id);
    println!("Category:  {}", record.category);
    println!("Created:   {}", record.created_at.format("%Y-%m-%d %H:%M"));
    println!("Ingredients:");
    for ingredient in &record.ingredients {
        println!("  - {ingredient}");
    }
    println!("Steps:");
    for (index, step) in record.steps.iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
}
