//! Integration tests for shape building.
//!
//! These tests build shapes end to end against the in-memory grid:
//! - Generated cell counts for each shape
//! - Locality ordering of applied writes
//! - Validation before any write
//! - Ground probing for walls
//! - Configuration flowing into the builder

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use voxmason::builder::{PatternBuilder, ShapeLimits, ShapeSpec};
use voxmason::config::ConfigFile;
use voxmason::coord::{locality_key, Position};
use voxmason::engine::{
    BatchProcessor, CellWriteError, CellWriter, EngineConfig, EngineError, PlacementResult,
};
use voxmason::grid::MemoryGrid;

fn grid_builder() -> (Arc<MemoryGrid<&'static str>>, PatternBuilder<&'static str>) {
    let grid = Arc::new(MemoryGrid::<&'static str>::new());
    let builder = PatternBuilder::<&'static str>::new(grid.clone()).with_ground_lookup(grid.clone());
    (grid, builder)
}

#[tokio::test]
async fn test_shape_cell_counts() {
    let cases = [
        (ShapeSpec::circle(Position::new(0, 64, 0), 5, true), 81),
        (ShapeSpec::sphere(Position::new(0, 64, 0), 2, false), 33),
        (ShapeSpec::sphere(Position::new(0, 64, 0), 2, true), 32),
        (ShapeSpec::pyramid(Position::new(0, 64, 0), 2), 24),
        (
            ShapeSpec::cuboid(Position::new(-2, 60, -2), Position::new(2, 61, 2)),
            50,
        ),
        (ShapeSpec::wall_at(0, 0, 4, 2, 64, 3), 15),
    ];

    for (shape, expected) in cases {
        let (grid, builder) = grid_builder();
        let result = builder.build(&shape, "stone").await.unwrap();
        assert_eq!(result.succeeded, expected, "{}", shape);
        assert_eq!(grid.len(), expected, "{}", shape);
        assert!(result.is_success());
    }
}

#[tokio::test]
async fn test_outline_circle_duplicates_are_placed() {
    let (grid, builder) = grid_builder();
    let result = builder
        .build(&ShapeSpec::circle(Position::new(0, 64, 0), 5, false), "glass")
        .await
        .unwrap();

    assert_eq!(result.total_requested, 32);
    assert_eq!(result.succeeded, 32);
    assert_eq!(grid.len(), 28);
}

#[tokio::test]
async fn test_writes_arrive_sorted_by_locality() {
    let order: Arc<Mutex<Vec<Position>>> = Arc::default();
    let recorded = Arc::clone(&order);
    let writer: Arc<dyn CellWriter<u8>> =
        Arc::new(move |p: Position, _: &u8| -> Result<bool, CellWriteError> {
            recorded.lock().push(p);
            Ok(true)
        });
    let builder = PatternBuilder::new(writer);

    builder
        .build(&ShapeSpec::sphere(Position::new(7, 64, -9), 12, true), 1)
        .await
        .unwrap();

    let order = order.lock();
    let keys: Vec<_> = order.iter().map(|p| locality_key(p, 4)).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_place_positions_sorts_caller_list() {
    let order: Arc<Mutex<Vec<Position>>> = Arc::default();
    let recorded = Arc::clone(&order);
    let writer: Arc<dyn CellWriter<u8>> =
        Arc::new(move |p: Position, _: &u8| -> Result<bool, CellWriteError> {
            recorded.lock().push(p);
            Ok(true)
        });
    let builder = PatternBuilder::new(writer);

    let positions = vec![
        Position::new(40, 1, 0),
        Position::new(0, 5, 0),
        Position::new(1, 1, 0),
        Position::new(0, 1, 0),
    ];
    builder.place_positions(positions, 0).await.unwrap();

    assert_eq!(
        *order.lock(),
        vec![
            Position::new(0, 1, 0),
            Position::new(1, 1, 0),
            Position::new(0, 5, 0),
            Position::new(40, 1, 0),
        ]
    );
}

#[tokio::test]
async fn test_validation_happens_before_any_write() {
    let (grid, builder) = grid_builder();

    let oversized = [
        ShapeSpec::sphere(Position::default(), 51, false),
        ShapeSpec::wall(0, 0, 10, 10, 51),
        ShapeSpec::cuboid(Position::new(0, 0, 0), Position::new(10, 20, 10)),
        ShapeSpec::pyramid(Position::default(), 16),
        ShapeSpec::circle(Position::default(), -1, true),
    ];
    for shape in &oversized {
        let err = builder.build(shape, "stone").await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)), "{}", shape);
    }
    assert!(grid.is_empty());
}

#[tokio::test]
async fn test_wall_stands_on_existing_ground() {
    let (grid, builder) = grid_builder();

    builder
        .build(
            &ShapeSpec::cuboid(Position::new(0, 60, 0), Position::new(5, 69, 0)),
            "dirt",
        )
        .await
        .unwrap();
    builder
        .build(&ShapeSpec::wall(0, 0, 5, 0, 4), "brick")
        .await
        .unwrap();

    for x in 0..=5 {
        for y in 70..74 {
            assert_eq!(grid.get(&Position::new(x, y, 0)), Some("brick"));
        }
        assert_eq!(grid.get(&Position::new(x, 74, 0)), None);
    }
}

#[tokio::test]
async fn test_wall_on_empty_column_uses_sea_level() {
    let (grid, builder) = grid_builder();
    builder
        .build(&ShapeSpec::wall(100, 100, 103, 100, 2), "brick")
        .await
        .unwrap();

    assert_eq!(grid.get(&Position::new(100, 64, 100)), Some("brick"));
    assert_eq!(grid.get(&Position::new(100, 65, 100)), Some("brick"));
    assert_eq!(grid.len(), 8);
}

#[tokio::test]
async fn test_bounded_grid_reports_failures() {
    let grid = Arc::new(MemoryGrid::<&'static str>::with_height_bounds(0, 66));
    let builder = PatternBuilder::<&'static str>::new(grid.clone());

    let result = builder
        .build(&ShapeSpec::sphere(Position::new(0, 64, 0), 3, false), "stone")
        .await
        .unwrap();

    assert!(result.failed > 0);
    assert_eq!(result.succeeded + result.failed, result.total_requested);
    assert_eq!(grid.len(), result.succeeded);
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_builder_from_config() {
    let mut config = ConfigFile::default();
    config.engine.batch_size = 16;
    config.engine.run_timeout_ms = 10_000;
    config.limits.max_radius = 4;

    let grid = Arc::new(MemoryGrid::<u8>::new());
    let processor = BatchProcessor::<u8>::new(grid.clone()).with_config(config.engine_config());
    let builder = PatternBuilder::from_processor(processor)
        .with_validator(Arc::new(ShapeLimits::from(&config.limits)));

    assert_eq!(builder.processor().config().batch_size, 16);
    assert_eq!(
        builder.processor().config().run_timeout,
        Duration::from_secs(10)
    );
    assert!(builder
        .build(&ShapeSpec::circle(Position::default(), 5, true), 1)
        .await
        .is_err());
    assert!(builder
        .build(&ShapeSpec::circle(Position::default(), 4, true), 1)
        .await
        .is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_build_matches_sequential() {
    let shape = ShapeSpec::sphere(Position::new(0, 64, 0), 20, false);

    let sequential = Arc::new(MemoryGrid::<u8>::new());
    PatternBuilder::<u8>::new(sequential.clone())
        .build(&shape, 1)
        .await
        .unwrap();

    let parallel = Arc::new(MemoryGrid::<u8>::new());
    let processor = BatchProcessor::<u8>::new(parallel.clone())
        .with_config(EngineConfig::default().with_batch_size(256));
    let result = PatternBuilder::from_processor(processor)
        .build_parallel(&shape, 1)
        .await
        .unwrap();

    assert_eq!(result.succeeded, sequential.len());
    assert_eq!(parallel.len(), sequential.len());
}

#[tokio::test]
async fn test_empty_build_returns_zero_result() {
    let (_, builder) = grid_builder();
    let result = builder.place_positions(Vec::new(), "air").await.unwrap();
    assert_eq!(result, PlacementResult::empty());
    assert_eq!(result.duration_ms(), 0);
}
