//! Clinic Table - browse a JSON record set with sorting, filtering and paging.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use clinic_table as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::models::{Record, SortDirection, SortState, load_records};
use app::ui::{render_pager, render_table};

/// Browse a JSON record set with sorting, filtering and paging.
#[derive(Parser)]
#[command(name = "clinic-table")]
struct Cli {
    /// JSON file holding an array of record objects
    #[arg(long)]
    data: PathBuf,

    /// Use table.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Config file path (overrides --dev)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Column filter as key=value, may be repeated
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Page to show (clamped into range)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (overrides config)
    #[arg(long)]
    page_size: Option<usize>,
}

fn parse_filter(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{arg}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("table.toml")
        }
        (None, false) => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, using default patient layout");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => bail!("Config invalid: {e}"),
    };

    let records = load_records(&cli.data).with_context(|| format!("loading {}", cli.data.display()))?;
    tracing::info!("Loaded {} records", records.len());

    let mut screen = config.build_screen::<Record>()?.with_data(records);

    if let Some(page_size) = cli.page_size {
        screen.set_page_size(page_size)?;
    }

    match (&cli.sort, cli.desc) {
        (Some(field), desc) => {
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            screen.set_sort(SortState::by(field.as_str(), direction))?;
        }
        (None, true) => {
            let mut sort = screen.sort_state().clone();
            sort.direction = SortDirection::Desc;
            screen.set_sort(sort)?;
        }
        (None, false) => {}
    }

    for (key, value) in &cli.filters {
        screen.on_filter_change(key, value)?;
    }

    screen.on_page_change(cli.page);

    let snapshot = screen.snapshot();
    println!(
        "{}",
        render_table(&snapshot, screen.columns(), screen.sort_state(), &config.table.empty_message)
    );
    if let Some(pager) = render_pager(&snapshot.window) {
        println!("{pager}");
    }

    Ok(())
}
