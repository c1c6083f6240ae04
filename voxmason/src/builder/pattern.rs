//! The pattern builder: validate, generate, sort, enqueue, place.

use super::{resolve_ground, GroundLookup, ShapeLimits, ShapeSpec, ShapeValidator, ValidationError};
use crate::coord::{sort_for_locality, Position};
use crate::engine::{BatchProcessor, CellWriter, EngineError, PlacementResult};
use crate::log_info;
use crate::queue::MutationQueue;
use std::sync::Arc;

/// Builds shapes through a [`BatchProcessor`].
///
/// Every build validates the shape, generates its positions, sorts them so
/// writes to the same region are adjacent, enqueues them into a fresh queue
/// and runs that queue under the processor's configured timeout.
pub struct PatternBuilder<V> {
    processor: BatchProcessor<V>,
    validator: Arc<dyn ShapeValidator>,
    ground: Option<Arc<dyn GroundLookup>>,
}

impl<V> Clone for PatternBuilder<V> {
    fn clone(&self) -> Self {
        Self {
            processor: self.processor.clone(),
            validator: Arc::clone(&self.validator),
            ground: self.ground.clone(),
        }
    }
}

#[derive(Clone, Copy)]
enum Placement {
    Sequential,
    Parallel,
}

impl<V: Clone + Send + Sync + 'static> PatternBuilder<V> {
    /// Builder over a default processor writing through `writer`.
    pub fn new(writer: Arc<dyn CellWriter<V>>) -> Self {
        Self::from_processor(BatchProcessor::new(writer))
    }

    /// Builder over a preconfigured processor.
    pub fn from_processor(processor: BatchProcessor<V>) -> Self {
        Self {
            processor,
            validator: Arc::new(ShapeLimits::default()),
            ground: None,
        }
    }

    /// Replace the shape validator.
    pub fn with_validator(mut self, validator: Arc<dyn ShapeValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Lookup used to place walls that have no explicit base.
    pub fn with_ground_lookup(mut self, lookup: Arc<dyn GroundLookup>) -> Self {
        self.ground = Some(lookup);
        self
    }

    /// The underlying processor.
    pub fn processor(&self) -> &BatchProcessor<V> {
        &self.processor
    }

    /// Validate and generate `shape`, returning positions in placement order.
    pub fn plan(&self, shape: &ShapeSpec) -> Result<Vec<Position>, ValidationError> {
        self.validator.validate(shape)?;

        let ground_y = match shape.ground_column() {
            Some((x, z)) => resolve_ground(self.ground.as_deref(), x, z),
            None => 0,
        };
        let mut positions = shape.generate(ground_y);
        sort_for_locality(&mut positions, self.processor.config().region_shift);
        Ok(positions)
    }

    /// Build `shape` out of `value` on the single-threaded loop.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] if the shape is rejected; nothing is
    /// written in that case.
    pub async fn build(&self, shape: &ShapeSpec, value: V) -> Result<PlacementResult, EngineError> {
        let positions = self.plan(shape)?;
        log_info!(
            self.processor.logger(),
            "Building {}: {} cells",
            shape,
            positions.len()
        );
        self.place(positions, value, Placement::Sequential).await
    }

    /// Build `shape` with batches applied concurrently.
    pub async fn build_parallel(
        &self,
        shape: &ShapeSpec,
        value: V,
    ) -> Result<PlacementResult, EngineError> {
        let positions = self.plan(shape)?;
        log_info!(
            self.processor.logger(),
            "Building {} in parallel: {} cells",
            shape,
            positions.len()
        );
        self.place(positions, value, Placement::Parallel).await
    }

    /// Place an arbitrary list of positions, sorted for locality first.
    ///
    /// No shape validation is applied.
    pub async fn place_positions(
        &self,
        mut positions: Vec<Position>,
        value: V,
    ) -> Result<PlacementResult, EngineError> {
        sort_for_locality(&mut positions, self.processor.config().region_shift);
        self.place(positions, value, Placement::Sequential).await
    }

    async fn place(
        &self,
        positions: Vec<Position>,
        value: V,
        placement: Placement,
    ) -> Result<PlacementResult, EngineError> {
        if positions.is_empty() {
            return Ok(PlacementResult::empty());
        }

        let queue = MutationQueue::with_capacity(positions.len());
        queue.enqueue_positions(positions, &value);
        let queue = Arc::new(queue);
        let timeout = self.processor.config().run_timeout;

        match placement {
            Placement::Sequential => self.processor.place_all(queue, timeout).await,
            Placement::Parallel => self.processor.place_parallel(queue, timeout).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::locality_cmp;
    use crate::engine::{CellWriteError, EngineConfig, RunTermination};
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<Position>>>;

    fn recording(log: Log) -> Arc<dyn CellWriter<char>> {
        Arc::new(move |p: Position, _: &char| -> Result<bool, CellWriteError> {
            log.lock().push(p);
            Ok(true)
        })
    }

    #[tokio::test]
    async fn test_build_writes_in_locality_order() {
        let log: Log = Arc::default();
        let builder = PatternBuilder::new(recording(Arc::clone(&log)));
        let shape = ShapeSpec::circle(Position::new(0, 64, 0), 20, true);

        let result = builder.build(&shape, '#').await.unwrap();

        let written = log.lock();
        assert_eq!(result.succeeded, written.len());
        assert!(written
            .windows(2)
            .all(|w| locality_cmp(&w[0], &w[1], 4).is_le()));
    }

    #[tokio::test]
    async fn test_rejected_shape_writes_nothing() {
        let log: Log = Arc::default();
        let builder = PatternBuilder::new(recording(Arc::clone(&log)));

        let err = builder
            .build(&ShapeSpec::sphere(Position::default(), 60, false), '#')
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Validation(_)));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_empty_positions_return_zero_result() {
        let builder = PatternBuilder::new(recording(Arc::default()));
        let result = builder.place_positions(Vec::new(), '#').await.unwrap();
        assert_eq!(result, PlacementResult::empty());
    }

    #[tokio::test]
    async fn test_wall_ground_resolution() {
        let log: Log = Arc::default();
        let lookup = |x: i32, z: i32| if (x, z) == (3, 3) { Some(80) } else { None };
        let builder =
            PatternBuilder::new(recording(Arc::clone(&log))).with_ground_lookup(Arc::new(lookup));

        builder.build(&ShapeSpec::wall(3, 3, 6, 3, 2), '#').await.unwrap();
        assert_eq!(log.lock().iter().map(|p| p.y).min(), Some(80));

        log.lock().clear();
        builder.build(&ShapeSpec::wall(0, 0, 1, 0, 1), '#').await.unwrap();
        assert!(log.lock().iter().all(|p| p.y == 64));

        log.lock().clear();
        builder
            .build(&ShapeSpec::wall_at(3, 3, 6, 3, 5, 1), '#')
            .await
            .unwrap();
        assert!(log.lock().iter().all(|p| p.y == 5));
    }

    #[tokio::test]
    async fn test_build_uses_configured_timeout() {
        let processor = BatchProcessor::new(recording(Arc::default()))
            .with_config(EngineConfig::default().with_run_timeout(std::time::Duration::ZERO));
        let builder = PatternBuilder::from_processor(processor);

        let result = builder
            .build(&ShapeSpec::pyramid(Position::default(), 3), '#')
            .await
            .unwrap();
        assert_eq!(result.termination, RunTermination::TimedOut);
        assert_eq!(result.failed, 48);
    }

    #[test]
    fn test_custom_validator() {
        struct Never;
        impl ShapeValidator for Never {
            fn validate(&self, shape: &ShapeSpec) -> Result<(), ValidationError> {
                Err(ValidationError::TooManyCells {
                    shape: shape.name(),
                    cells: shape.estimated_cells(),
                    max: 0,
                })
            }
        }
        let builder = PatternBuilder::new(recording(Arc::default())).with_validator(Arc::new(Never));
        assert!(builder
            .plan(&ShapeSpec::cuboid(Position::default(), Position::default()))
            .is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_build_parallel_places_every_cell() {
        let log: Log = Arc::default();
        let processor = BatchProcessor::new(recording(Arc::clone(&log)))
            .with_config(EngineConfig::default().with_batch_size(64));
        let builder = PatternBuilder::from_processor(processor);
        let shape = ShapeSpec::cuboid(Position::new(-10, 0, -10), Position::new(10, 5, 10));

        let result = builder.build_parallel(&shape, '#').await.unwrap();

        assert_eq!(result.succeeded, 21 * 6 * 21);
        let mut written = log.lock().clone();
        written.sort();
        written.dedup();
        assert_eq!(written.len(), 21 * 6 * 21);
    }
}
