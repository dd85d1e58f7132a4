//! KVK portal CLI - inspect table data and route navigation offline.
//!
//! # Usage
//!
//! ```bash
//! # Search, sort and page a JSON data file
//! kvk table districts.json --search ar --sort name --page 2
//!
//! # Show breadcrumbs, tabs and back target for a path
//! kvk nav /forms/about-kvk/vehicles/12
//!
//! # List the route table
//! kvk routes
//! ```

mod input;
mod output;
mod paths;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use kvk_lib::config::KvkConfig;
use kvk_lib::store::AppContext;
use log::debug;
use log::info;
use log::warn;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

/// KVK portal command-line tools.
#[derive(Parser)]
#[command(name = "kvk", version, about)]
struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log directory (default: $KVK_LOG_DIR, then the platform cache directory)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, sort and paginate a JSON table file
    Table {
        /// File holding `{"columns": [...], "rows": [...]}` or a bare row array
        file: PathBuf,

        /// Case-insensitive search across all fields
        #[arg(short, long)]
        search: Option<String>,

        /// Toggle sorting on a column; repeat to flip direction
        #[arg(long)]
        sort: Vec<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (default: from config)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show breadcrumbs, sibling tabs and back target for a path
    Nav {
        /// Route path, e.g. /forms/about-kvk/vehicles
        path: String,

        /// Back target used when the route declares no parent
        #[arg(long)]
        fallback: Option<String>,
    },
    /// List the active route table
    Routes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref(), cli.verbose);

    let config_path = cli.config.clone().or_else(paths::default_config_file);
    let config = match &config_path {
        Some(path) if cli.config.is_some() => KvkConfig::load(path)?,
        Some(path) => KvkConfig::load_or_default(path)?,
        None => {
            warn!("no config directory available; using defaults");
            KvkConfig::default()
        }
    };
    debug!("loaded config from {:?}", config_path);

    let config_dir = config_path.as_deref().and_then(|p| p.parent());
    let ctx = AppContext::bootstrap(config, config_dir).context("failed to initialize")?;

    match cli.command {
        Command::Table {
            file,
            search,
            sort,
            page,
            page_size,
        } => {
            let data = input::load_table(&file)?;
            info!("loaded {} rows from {}", data.rows.len(), file.display());

            let mut table = ctx.table_engine(data.rows, data.columns);
            if let Some(size) = page_size {
                table.set_page_size(size);
            }
            if let Some(query) = search {
                table.set_search_query(query);
            }
            for key in &sort {
                if !table.toggle_sort(key) {
                    warn!("column {:?} is not sortable", key);
                }
            }
            table.set_page(page);

            let view = table.view();
            if cli.json {
                println!("{}", output::table_json(&view));
            } else {
                println!("{}", output::table_human(&view, table.columns(), table.sort()));
            }
        }
        Command::Nav { path, fallback } => {
            let nav = ctx.navigator();
            let route = nav.resolve(&path);
            let crumbs = nav.breadcrumbs_for(&path);
            let tabs = nav.siblings_of(&path);
            let back = nav.back_target_of(&path, fallback.as_deref());

            if cli.json {
                let out = output::JsonNav {
                    route,
                    breadcrumbs: &crumbs,
                    tabs: tabs.iter().map(|t| t.path.as_str()).collect(),
                    back: &back,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let current = route.map(|r| r.path.as_str()).unwrap_or_default();
                println!("{}", output::nav_human(route, &crumbs, &tabs, &back, current));
            }
        }
        Command::Routes => {
            let routes = ctx.navigator().routes();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(routes)?);
            } else {
                println!("{}", output::routes_human(routes));
            }
        }
    }

    Ok(())
}

/// Logs to `kvk.log` in the log directory, plus stderr with `--verbose`.
fn init_logging(log_dir: Option<&Path>, verbose: bool) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    let dir = paths::log_dir(log_dir, std::env::var_os(paths::LOG_DIR_ENV));
    if let Some(file) = dir.and_then(|dir| paths::open_log(&dir).ok()) {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
}
