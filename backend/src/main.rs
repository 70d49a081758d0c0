//! Repeated content CLI
//!
//! Converts the blocks of one slot to a repetition policy and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use repeated_content::application::{BlockRepository, PageContentsContainer, SlotConverterFactory};
use repeated_content::config::ContentConfig;
use repeated_content::infrastructure::SqliteStore;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repeated-content")]
#[command(about = "Convert the repeated contents of a template slot", long_about = None)]
struct Args {
    /// JSON configuration file
    config: PathBuf,

    /// Template the slot belongs to
    template: String,

    /// Slot to convert
    slot: String,

    /// Page the reference contents are read from
    page_id: String,

    /// Language the reference contents are read from
    language_id: String,

    /// Target policy (none, site, language, page, page_and_language);
    /// defaults to the policy configured for the slot
    policy: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ContentConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let template = config
        .template(&args.template)?
        .with_context(|| format!("Template {} is not configured", args.template))?;
    let slot = template
        .get(&args.slot)
        .with_context(|| format!("Template {} has no slot {}", args.template, args.slot))?;

    let store = match &config.database_path {
        Some(path) => SqliteStore::new_with_path(path, config.root())
            .with_context(|| format!("Failed to open database {}", path.display()))?,
        None => {
            tracing::warn!("no database configured, using an empty in-memory store");
            SqliteStore::new_in_memory(config.root())?
        }
    };

    let mut container = PageContentsContainer::new(&store);
    container
        .set_page_id(&args.page_id)?
        .set_language_id(&args.language_id)?;
    container.refresh()?;

    let factory = SlotConverterFactory::new(&store, &store, &store).with_root(config.root());
    let converter = match &args.policy {
        Some(policy) => factory.create_for(slot, policy, &container)?,
        None => factory.create(slot, &container)?,
    };

    let outcome = converter.convert()?;
    let blocks = BlockRepository::retrieve_contents_by_slot_name(&store, slot.name())?;

    tracing::info!(
        page = ?container.page_id(),
        language = ?container.language_id(),
        outcome = ?outcome,
        "conversion finished"
    );

    let report = json!({
        "template": args.template,
        "slot": slot.name(),
        "policy": converter.target(),
        "converted": outcome.as_option(),
        "blocks": blocks,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
