use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use claim_outline::export::SegmentExport;
use claim_outline::synth::{self, SynthParams};
use claim_outline::{
    area_around, build_area_edges, build_selection_edges, selection_from_world_corners,
    BoundarySegment, FullClassifier, GridCoordinate, GridWindow, LandSnapshot, OutlineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "claim_outline")]
#[command(about = "Trace region borders of claimed land as line segments")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    /// Outline geometry file (JSON); standard geometry if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write segments to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Outline all borders inside a rectangle of cells
    Area {
        /// Land snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        min_x: i32,

        #[arg(long, allow_hyphen_values = true)]
        max_x: i32,

        #[arg(long, allow_hyphen_values = true)]
        min_z: i32,

        #[arg(long, allow_hyphen_values = true)]
        max_z: i32,
    },

    /// Outline all borders within a radius of a position
    Around {
        /// Land snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        z: f64,

        /// Radius in cells
        #[arg(short, long, default_value = "4")]
        radius: u32,

        /// Treat x/z as a world position rather than a cell
        #[arg(long)]
        world: bool,
    },

    /// Outline a set of cells against everything around it
    Selection {
        /// Cell list (JSON array of {"x", "z"})
        #[arg(long, conflicts_with = "corners")]
        coords: Option<PathBuf>,

        /// World-space rectangle corners: X1 Z1 X2 Z2
        #[arg(long, num_args = 4, allow_hyphen_values = true, value_names = ["X1", "Z1", "X2", "Z2"])]
        corners: Option<Vec<f64>>,
    },

    /// Write a synthetic land snapshot
    Synth {
        /// Random seed (uses random seed if not specified)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of owners
        #[arg(long, default_value = "6")]
        owners: usize,

        /// Width of the generated area in cells
        #[arg(short = 'W', long, default_value = "64")]
        width: u32,

        /// Depth of the generated area in cells
        #[arg(short = 'D', long, default_value = "64")]
        depth: u32,

        /// Chance that a cell is reported as unloaded
        #[arg(long, default_value = "0.0")]
        unloaded: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => OutlineConfig::load(path)?,
        None => OutlineConfig::default(),
    };

    match cli.command {
        Commands::Area {
            snapshot,
            min_x,
            max_x,
            min_z,
            max_z,
        } => {
            let area = GridWindow::new(min_x, max_x, min_z, max_z)?;
            let snapshot = LandSnapshot::load(&snapshot)?;
            let segments = build_area_edges(&FullClassifier::new(&snapshot), &area, &config)?;
            write_segments(segments, config, Some(area), cli.output)?;
        }

        Commands::Around {
            snapshot,
            x,
            z,
            radius,
            world,
        } => {
            let center = if world {
                GridCoordinate::from_world(x, z, config.cell_size)
            } else {
                GridCoordinate::new(x.floor() as i32, z.floor() as i32)
            };
            let area = area_around(center, radius)?;
            let snapshot = LandSnapshot::load(&snapshot)?;
            info!("outlining {} cells around {}", area.cell_count(), center);
            let segments = build_area_edges(&FullClassifier::new(&snapshot), &area, &config)?;
            write_segments(segments, config, Some(area), cli.output)?;
        }

        Commands::Selection { coords, corners } => {
            let cells: HashSet<GridCoordinate> = match (coords, corners) {
                (Some(path), _) => {
                    let list: Vec<GridCoordinate> = serde_json::from_str(&fs::read_to_string(path)?)?;
                    list.into_iter().collect()
                }
                (None, Some(c)) => {
                    selection_from_world_corners((c[0], c[1]), (c[2], c[3]), config.cell_size)?
                }
                (None, None) => {
                    return Err("selection needs --coords or --corners".into());
                }
            };
            let area = GridWindow::bounding(&cells).map(|b| b.padded(1)).transpose()?;
            let segments = build_selection_edges(&cells, &config)?;
            write_segments(segments, config, area, cli.output)?;
        }

        Commands::Synth {
            seed,
            owners,
            width,
            depth,
            unloaded,
        } => {
            let seed = seed.unwrap_or_else(|| rand::random());
            let width = i32::try_from(width.max(1))?;
            let depth = i32::try_from(depth.max(1))?;
            let (half_w, half_d) = (width / 2, depth / 2);
            let params = SynthParams {
                window: GridWindow::new(
                    -half_w,
                    width - half_w - 1,
                    -half_d,
                    depth - half_d - 1,
                )?,
                owners,
                unloaded_chance: unloaded,
                ..SynthParams::default()
            };

            info!("generating land with seed {} over {}", seed, params.window);
            let doc = synth::generate_land(&params, seed);
            let json = serde_json::to_string_pretty(&doc)?;
            match cli.output {
                Some(path) => fs::write(&path, json)?,
                None => println!("{}", json),
            }
            info!("{} owners, {} claims", doc.owners.len(), doc.claims.len());
        }
    }

    Ok(())
}

fn write_segments(
    segments: Vec<BoundarySegment>,
    config: OutlineConfig,
    area: Option<GridWindow>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let export = SegmentExport::new(segments, config, area);
    match output {
        Some(path) => {
            export.save(&path)?;
            info!("wrote {} segments to {}", export.summary.total, path.display());
        }
        None => {
            export.write_to(io::stdout().lock())?;
            println!();
        }
    }
    Ok(())
}
