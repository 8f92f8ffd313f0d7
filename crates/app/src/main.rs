use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trove_core::{
    filter_items, load_directories, paginate, selector, Item, ItemFilter, LoadReport,
    ReloadSupervisor, Vocabularies, DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL, FILTER_ALL,
    ITEMS_PER_PAGE,
};

#[derive(Parser)]
#[command(name = "trove", version, about = "Browse aggregated trove item snapshots.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input directory with trove JSON files (repeat or comma-separate)
    #[arg(long = "dir", env = "TROVE_DIRS", value_delimiter = ',', required = true)]
    dirs: Vec<PathBuf>,

    /// Seconds between checks for changed snapshot files
    #[arg(
        long,
        env = "TROVE_RELOAD_INTERVAL_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    reload_interval_secs: u64,

    /// Enable debug logging
    #[arg(short, long, env = "TROVE_VERBOSE")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the snapshots and keep them live, reloading whenever files change.
    Watch,
    /// Filter the aggregated items and print one page of results.
    Search(SearchArgs),
    /// Print the filter vocabularies derived from the current snapshots.
    Vocab,
}

#[derive(Args)]
struct SearchArgs {
    /// Item type, or All
    #[arg(long, default_value = FILTER_ALL)]
    item_type: String,
    /// Item sub-type, or All
    #[arg(long, default_value = FILTER_ALL)]
    item_sub_type: String,
    /// Owning character or account bank, or All
    #[arg(long, default_value = FILTER_ALL)]
    character: String,
    /// Equip slot, or All
    #[arg(long, default_value = FILTER_ALL)]
    equips_to: String,
    /// Case-insensitive text matched against names, descriptions, effects and clickies
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, default_value_t = DEFAULT_MIN_LEVEL, value_parser = clap::value_parser!(i32).range(0..))]
    min_level: i32,
    #[arg(long, default_value_t = DEFAULT_MAX_LEVEL, value_parser = clap::value_parser!(i32).range(0..))]
    max_level: i32,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = ITEMS_PER_PAGE)]
    per_page: usize,
    /// Print the result page as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl SearchArgs {
    fn filter(&self) -> ItemFilter {
        ItemFilter {
            item_type: selector(&self.item_type),
            item_sub_type: selector(&self.item_sub_type),
            character_name: selector(&self.character),
            equips_to: selector(&self.equips_to),
            text: self.query.clone(),
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        directories = cli.dirs.len(),
        "trove boot"
    );

    match cli.command {
        Command::Watch => {
            let supervisor = Arc::new(
                ReloadSupervisor::load(cli.dirs).context("initial load of snapshot directories")?,
            );
            let snapshot = supervisor.current_snapshot();
            info!(
                items = snapshot.len(),
                item_types = snapshot.vocabularies().item_types.len(),
                characters = snapshot.vocabularies().character_names.len(),
                loaded_at = %snapshot.loaded_at().to_rfc3339(),
                "serving snapshot"
            );
            drop(snapshot);

            let period = Duration::from_secs(cli.reload_interval_secs);
            let shutdown = async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    warn!(error = %error, "failed to listen for shutdown signal");
                }
                info!("shutdown signal received");
            };

            supervisor.run(period, shutdown).await;
        }
        Command::Search(args) => {
            let report = load_directories(&cli.dirs).context("load snapshot directories")?;
            log_skipped(&report);

            let matched = filter_items(&report.items, &args.filter());
            let page = paginate(&matched, args.page, args.per_page);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                println!(
                    "page {}/{} ({} matching items)",
                    page.page, page.total_pages, page.total_count
                );
                for item in &page.items {
                    print_item(item);
                }
            }
        }
        Command::Vocab => {
            let report = load_directories(&cli.dirs).context("load snapshot directories")?;
            log_skipped(&report);

            let vocabularies = Vocabularies::from_items(&report.items);
            println!("{}", serde_json::to_string_pretty(&vocabularies)?);
        }
    }

    Ok(())
}

fn log_skipped(report: &LoadReport) {
    if report.skipped_files.is_empty() && report.skipped_directories.is_empty() {
        return;
    }

    warn!(
        "skipped_files={} skipped_directories={}",
        report.skipped_files.len(),
        report.skipped_directories.len()
    );
}

fn print_item(item: &Item) {
    println!(
        "[{}] {} type={}/{} level={} equips={}",
        item.character_name,
        item.name,
        item.item_type,
        item.item_sub_type,
        item.minimum_level,
        item.equips_to.join(",")
    );
    if !item.container.is_empty() || !item.tab_name.is_empty() {
        println!(
            "  location={} tab={} ({}) row={} column={} quantity={}",
            item.container, item.tab, item.tab_name, item.row, item.column, item.quantity
        );
    }
    if let Some(clicky) = &item.clicky {
        println!("  clicky={} (caster level {})", clicky.spell_name, clicky.caster_level);
    }
    for effect in &item.effects {
        println!("  effect={}", effect.name);
    }
}
