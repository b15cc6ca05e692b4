//! `dashlayout` - inspect, pack and sync dashboard layouts from the terminal.

use clap::{Parser, Subcommand};
use dashboard_layout::config::{default, xdg, Config, ConfigError, ConfigLoader};
use dashboard_layout::layout::{grid_height, normalize_str, pack_model, LayoutModel, PlacedItem};
use dashboard_layout::store::{
    HttpRemote, LayoutCache, LayoutStore, MemoryRemote, RemoteLayout, RemoteOutcome, SaveOutcome,
};
use dashboard_layout::widgets::{DashboardData, WidgetRegistry};
use dashboard_layout::{logging, preview};
use layout_client::LayoutClient;
use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

type CliResult = Result<(), Box<dyn Error>>;

/// Dashboard layout engine
#[derive(Parser)]
#[command(name = "dashlayout")]
#[command(version, about = "Inspect, pack and sync dashboard widget layouts")]
struct Cli {
    /// Configuration file (defaults to the XDG config path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the widget catalog
    Widgets,

    /// Pack a layout onto a grid and print the placements
    Pack {
        /// Grid column count
        #[arg(long)]
        columns: u16,
        /// Stored layout JSON ("-" for stdin); defaults to the default layout
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Print placements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Heal a stored layout and print the result
    Normalize {
        /// Stored layout JSON ("-" for stdin)
        file: PathBuf,
    },

    /// Draw a packed layout for a viewport width
    Preview {
        /// Viewport width in pixels, used to pick the breakpoint
        #[arg(long)]
        width: u32,
        /// Stored layout JSON ("-" for stdin); defaults to the default layout
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Terminal cells per grid column
        #[arg(long, default_value_t = 6)]
        cell_width: u16,
        /// Terminal rows per grid row
        #[arg(long, default_value_t = 3)]
        cell_height: u16,
    },

    /// Operate on the current user's saved layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the cached layout
    Show,
    /// Restore the default layout and save it
    Reset,
    /// Fetch the remote layout into the cache, seeding the remote if empty
    Sync,
    /// Remove the cached layout (logout)
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file, keeping a backup
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
    /// Parse and validate the configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        logging::init(Default::default());
        return match run_config(action, cli.config.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Config error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.level);
    let registry = WidgetRegistry::builtin();

    let result = match cli.command {
        Commands::Widgets => {
            run_widgets(&registry);
            Ok(())
        }
        Commands::Pack {
            columns,
            layout,
            json,
        } => run_pack(&registry, columns, layout.as_deref(), json),
        Commands::Normalize { file } => run_normalize(&registry, &file),
        Commands::Preview {
            width,
            layout,
            cell_width,
            cell_height,
        } => run_preview(
            &config,
            &registry,
            width,
            layout.as_deref(),
            cell_width,
            cell_height,
        ),
        Commands::Layout { action } => run_layout(&config, registry, action),
        Commands::Config { .. } => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_config(action: &ConfigAction, path: Option<&Path>) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init { force } => {
            let written = match path {
                Some(path) => default::create_default_config_at(path, *force)?,
                None => default::create_default_config(*force)?,
            };
            println!("Created configuration at {}", written.display());
        }
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(path)?;
            println!("Configuration is valid");
            println!("{config:#?}");
        }
    }
    Ok(())
}

/// Reads a stored layout from `path` ("-" is stdin) and heals it. Without a
/// path, returns the default layout.
fn read_layout(path: Option<&Path>, registry: &WidgetRegistry) -> Result<LayoutModel, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(registry.default_layout());
    };
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?
    };
    Ok(normalize_str(&raw, registry))
}

fn run_widgets(registry: &WidgetRegistry) {
    println!("{:<18} {:<18} {:<6} REMOVABLE", "ID", "TITLE", "SIZE");
    for def in registry.enumerate() {
        println!(
            "{:<18} {:<18} {:<6} {}",
            def.id,
            def.title,
            def.default_preset,
            if def.removable { "yes" } else { "no" }
        );
    }
}

fn print_placements(items: &[PlacedItem]) {
    println!("{:<18} {:>3} {:>3} {:>3} {:>3}", "ID", "X", "Y", "W", "H");
    for item in items {
        println!(
            "{:<18} {:>3} {:>3} {:>3} {:>3}",
            item.id, item.x, item.y, item.w, item.h
        );
    }
}

fn run_pack(registry: &WidgetRegistry, columns: u16, layout: Option<&Path>, json: bool) -> CliResult {
    let model = read_layout(layout, registry)?;
    let items = pack_model(&model, columns, registry);
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print_placements(&items);
        println!("{} rows", grid_height(&items));
    }
    Ok(())
}

fn run_normalize(registry: &WidgetRegistry, file: &Path) -> CliResult {
    let model = read_layout(Some(file), registry)?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}

fn run_preview(
    config: &Config,
    registry: &WidgetRegistry,
    width: u32,
    layout: Option<&Path>,
    cell_width: u16,
    cell_height: u16,
) -> CliResult {
    let model = read_layout(layout, registry)?;
    let table = config.breakpoint_table()?;
    let bp = table.select(width);
    let items = pack_model(&model, bp.columns, registry);

    let data = DashboardData::default();
    let buffer = preview::render_grid(&items, registry, &data.context(), cell_width, cell_height);

    println!("{} ({} columns)", bp.name, bp.columns);
    let area = buffer.area;
    for row in 0..area.height {
        let line: String = (0..area.width)
            .map(|col| buffer.cell((col, row)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn run_layout(config: &Config, registry: WidgetRegistry, action: LayoutAction) -> CliResult {
    let user = config.sync.resolved_user();
    let cache = LayoutCache::for_user(&xdg::layout_cache_dir(), &user);
    let debounce = config.sync.debounce()?;
    let registry = Arc::new(registry);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if config.sync.is_offline() {
        tracing::debug!(%user, "No sync endpoint configured, using local cache only");
        let store = LayoutStore::new(registry, cache, MemoryRemote::new(), debounce);
        runtime.block_on(layout_action(&store, action, false))
    } else {
        let client = LayoutClient::new(&config.sync.endpoint, &user, config.sync.token())?;
        tracing::debug!(url = client.url(), "Syncing layout");
        let store = LayoutStore::new(registry, cache, HttpRemote::new(client), debounce);
        runtime.block_on(layout_action(&store, action, true))
    }
}

async fn layout_action<R: RemoteLayout>(
    store: &LayoutStore<R>,
    action: LayoutAction,
    online: bool,
) -> CliResult {
    match action {
        LayoutAction::Show => {
            store.load_local();
            println!("{}", serde_json::to_string_pretty(&store.model())?);
        }
        LayoutAction::Reset => {
            store.load_local();
            store.replace(store.registry().default_layout());
            if online {
                report_save(store.save_now().await);
            }
            println!("Layout reset to default");
        }
        LayoutAction::Sync => {
            if !online {
                return Err("no sync endpoint configured (set [sync] endpoint)".into());
            }
            match store.load().await {
                RemoteOutcome::Applied => println!("Applied remote layout"),
                RemoteOutcome::Empty => {
                    println!("No remote layout yet, uploading local layout");
                    report_save(store.save_now().await);
                }
                RemoteOutcome::Discarded => println!("Remote layout discarded"),
                RemoteOutcome::Failed => {}
            }
        }
        LayoutAction::Clear => {
            store.clear_cache()?;
            println!("Removed {}", store.cache().path().display());
        }
    }
    store.teardown();

    match store.warning() {
        Some(warning) => Err(warning.to_string().into()),
        None => Ok(()),
    }
}

fn report_save(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => println!("Saved layout to remote"),
        SaveOutcome::Skipped => println!("Remote layout already up to date"),
        SaveOutcome::Failed => {}
    }
}
