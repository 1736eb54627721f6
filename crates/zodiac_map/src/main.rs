mod config;
mod error;
mod export;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use std::path::PathBuf;
use zodiac_engine::{
    DirStore, DragPayload, EventOutcome, MapView, PlacementStore, Point, RenderOptions, Slot,
    UiEvent, ZodiacError, export_png, resolve, save_svg,
};

#[derive(Parser)]
#[command(author, version, about = "Reversed lunar zodiac placement map", long_about = None)]
struct Args {
    /// Configuration file path (overrides ZODIAC_MAP_CONFIG)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Roster data directory (overrides ZODIAC_MAP_DATA_DIR)
    #[arg(short = 'd', long = "data")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a person in the unplaced roster
    Add { name: String, sign: String },
    /// Edit an unplaced person
    Edit {
        id: String,
        name: String,
        sign: String,
    },
    /// Delete an unplaced person
    Delete { id: String },
    /// Drop an unplaced person onto the map
    Place { id: String, x: f64, y: f64 },
    /// Take a person off the map
    Remove { id: String },
    /// Show both rosters
    List,
    /// Show the sector nearest to a point
    Resolve { x: f64, y: f64 },
    /// Write the map as SVG
    Render {
        #[arg(short, long)]
        select: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the map as PNG
    Export {
        #[arg(short, long)]
        select: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the placed people as CSV
    Table {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("Error: {e:#}");

        // Provide a hint when the change was applied but not stored
        if e
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ZodiacError>())
            .any(ZodiacError::is_persistence)
        {
            error!("Hint: check that the data directory is readable and writable.");
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = config::Settings::from_env()?;
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    if let Some(path) = args.config {
        settings.config_path = Some(path);
    }
    debug!("Settings: {settings:?}");

    let config = settings.load_config()?;
    let store_dir = DirStore::new(&settings.data_dir);
    let mut store = PlacementStore::open(store_dir, config.geometry())
        .with_context(|| format!("Failed to open rosters in {}", settings.data_dir.display()))?;
    let render_options = RenderOptions::from_config(&config);

    match args.command {
        Command::Add { name, sign } => {
            report(store.apply(UiEvent::Add { name, sign })?);
        }
        Command::Edit { id, name, sign } => {
            report(store.apply(UiEvent::EditUnplaced { id, name, sign })?);
        }
        Command::Delete { id } => {
            report(store.apply(UiEvent::DeleteUnplaced { id })?);
        }
        Command::Place { id, x, y } => {
            let payload = match store.find(&id) {
                Some((_, person)) => DragPayload::capture(person),
                None => {
                    return Err(ZodiacError::NotFound {
                        id,
                        slot: Slot::Unplaced,
                    }
                    .into());
                }
            };
            let point = Point::new(x, y);
            report(store.apply(UiEvent::Drop { payload, point })?);
        }
        Command::Remove { id } => {
            report(store.apply(UiEvent::RemoveFromMap { id })?);
        }
        Command::List => {
            println!("Unplaced ({}):", store.unplaced().len());
            for p in store.unplaced() {
                println!("  {}  {:<16} {}", p.id, p.name, p.sign);
            }
            println!("Placed ({}):", store.placed().len());
            for p in store.placed() {
                let (x, y) = p.position.map(|pos| (pos.x, pos.y)).unwrap_or_default();
                let nearest = p
                    .placed_opposite_sign
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                println!(
                    "  {}  {:<16} {:<12} -> {:<12} ({:.1}, {:.1})",
                    p.id, p.name, p.sign, nearest, x, y
                );
            }
        }
        Command::Resolve { x, y } => {
            let sign = resolve(store.geometry(), Point::new(x, y));
            let info = sign.info();
            println!("{} {} ({})", info.symbol, sign, info.name);
        }
        Command::Render { select, output } => {
            store.apply(UiEvent::SelectSign(select))?;
            let path = output.unwrap_or_else(|| config.export.output_dir.join("zodiac_map.svg"));
            save_svg(&MapView::from_store(&store), &render_options, &path)?;
        }
        Command::Export { select, output } => {
            store.apply(UiEvent::SelectSign(select))?;
            let path = output.unwrap_or_else(|| config.export.output_dir.join("horoscope.png"));
            export_png(&MapView::from_store(&store), &render_options, &path)?;
        }
        Command::Table { output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
            let path = export::export_placed_table(store.placed(), Some(&dir))?;
            info!("Placed table saved to: {}", path.display());
        }
    }

    Ok(())
}

fn report(outcome: EventOutcome) {
    match outcome {
        EventOutcome::Added(p) => {
            info!("Added {} ({})", p.name, p.sign);
            println!("{}", p.id);
        }
        EventOutcome::Updated(p) => info!("Updated {} -> {} ({})", p.id, p.name, p.sign),
        EventOutcome::Deleted(p) => info!("Deleted {} ({})", p.name, p.id),
        EventOutcome::Placed(p) => {
            let nearest = p
                .placed_opposite_sign
                .map(|s| s.to_string())
                .unwrap_or_default();
            info!("Placed {} near {}", p.name, nearest);
        }
        EventOutcome::Removed(p) => info!("Removed {} from the map", p.name),
        EventOutcome::Selected(sign) => debug!("Selected {sign:?}"),
    }
}
