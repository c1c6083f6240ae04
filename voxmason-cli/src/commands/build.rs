//! Shape building command.
//!
//! Builds one shape into an in-memory grid sized by the `[grid]` section of
//! the config, using the `[engine]` and `[limits]` settings, and reports the
//! placement result.

use clap::{Args, Subcommand};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;
use voxmason::builder::{PatternBuilder, ShapeSpec};
use voxmason::config::ConfigFile;
use voxmason::coord::{Position, RegionKey};
use voxmason::engine::{BatchProcessor, PlacementResult};
use voxmason::grid::MemoryGrid;
use voxmason::log::TracingLogger;

use crate::error::CliError;

/// Arguments for the build command.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Value written into every cell of the shape
    #[arg(long, default_value = "stone")]
    pub block: String,

    /// Apply batches on several workers at once
    #[arg(long)]
    pub parallel: bool,

    #[command(subcommand)]
    pub shape: ShapeCommand,
}

/// Shapes the build command can place.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ShapeCommand {
    /// Solid ball or shell around a centre cell
    #[command(allow_negative_numbers = true)]
    Sphere {
        x: i32,
        y: i32,
        z: i32,
        radius: i32,
        /// Only the outer shell
        #[arg(long)]
        hollow: bool,
    },

    /// Horizontal disc or ring around a centre cell
    #[command(allow_negative_numbers = true)]
    Circle {
        x: i32,
        y: i32,
        z: i32,
        radius: i32,
        /// Only the ring
        #[arg(long)]
        outline: bool,
    },

    /// Vertical wall along a line between two columns
    #[command(allow_negative_numbers = true)]
    Wall {
        from_x: i32,
        from_z: i32,
        to_x: i32,
        to_z: i32,
        height: i32,
        /// Lowest layer of the wall; defaults to the ground at the start column
        #[arg(long)]
        base_y: Option<i32>,
    },

    /// Solid box between two corners
    #[command(allow_negative_numbers = true, alias = "box")]
    Fill {
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
    },

    /// Hollow stepped pyramid standing on a base cell
    #[command(allow_negative_numbers = true)]
    Pyramid { x: i32, y: i32, z: i32, size: i32 },
}

impl ShapeCommand {
    /// Translate command-line arguments into a shape.
    pub fn to_shape(&self) -> ShapeSpec {
        match *self {
            ShapeCommand::Sphere {
                x,
                y,
                z,
                radius,
                hollow,
            } => ShapeSpec::sphere(Position::new(x, y, z), radius, hollow),
            ShapeCommand::Circle {
                x,
                y,
                z,
                radius,
                outline,
            } => ShapeSpec::circle(Position::new(x, y, z), radius, !outline),
            ShapeCommand::Wall {
                from_x,
                from_z,
                to_x,
                to_z,
                height,
                base_y: Some(base_y),
            } => ShapeSpec::wall_at(from_x, from_z, to_x, to_z, base_y, height),
            ShapeCommand::Wall {
                from_x,
                from_z,
                to_x,
                to_z,
                height,
                base_y: None,
            } => ShapeSpec::wall(from_x, from_z, to_x, to_z, height),
            ShapeCommand::Fill {
                x1,
                y1,
                z1,
                x2,
                y2,
                z2,
            } => ShapeSpec::cuboid(Position::new(x1, y1, z1), Position::new(x2, y2, z2)),
            ShapeCommand::Pyramid { x, y, z, size } => {
                ShapeSpec::pyramid(Position::new(x, y, z), size)
            }
        }
    }
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub result: PlacementResult,
    pub occupied_cells: usize,
    pub region_notifications: usize,
}

/// Build `args.shape` into a fresh grid configured from `config`.
pub async fn execute(args: &BuildArgs, config: &ConfigFile) -> Result<BuildReport, CliError> {
    let grid = Arc::new(MemoryGrid::<String>::with_height_bounds(
        config.grid.min_y,
        config.grid.max_y,
    ));

    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let sink = move |regions: &HashSet<RegionKey>| {
        counter.fetch_add(regions.len(), Ordering::Relaxed);
    };

    let processor = BatchProcessor::<String>::new(grid.clone())
        .with_config(config.engine_config())
        .with_sink(Arc::new(sink))
        .with_logger(Arc::new(TracingLogger));
    let builder = PatternBuilder::from_processor(processor)
        .with_validator(Arc::new(config.shape_limits()))
        .with_ground_lookup(grid.clone());

    let shape = args.shape.to_shape();
    info!(shape = %shape, block = %args.block, parallel = args.parallel, "Building shape");

    let result = if args.parallel {
        builder.build_parallel(&shape, args.block.clone()).await?
    } else {
        builder.build(&shape, args.block.clone()).await?
    };

    Ok(BuildReport {
        result,
        occupied_cells: grid.len(),
        region_notifications: notifications.load(Ordering::Relaxed),
    })
}

/// Run the build command and print the outcome.
pub async fn run(args: BuildArgs, config: &ConfigFile) -> Result<(), CliError> {
    let shape = args.shape.to_shape();
    println!("Building {}", shape);
    println!("  Estimated cells: {}", shape.estimated_cells());

    let report = execute(&args, config).await?;

    println!();
    println!("{}", report.result);
    println!("  Occupied cells:       {}", report.occupied_cells);
    println!("  Regions notified:     {}", report.region_notifications);
    println!("  Termination:          {}", report.result.termination);

    Ok(())
}
