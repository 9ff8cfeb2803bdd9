//! Bounded executor pool for latency-bearing pipeline stages

use std::cmp;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use bestprice_types::{PipelineError, PipelineResult};

use crate::handle::Handle;

/// Hard cap on pool capacity. Bounds worst-case resource usage when the
/// source count is config- or attacker-controlled.
pub const MAX_WORKERS: usize = 100;

/// Bounded executor for the blocking-equivalent stages of a chain
/// (fetch, discount resolution).
///
/// Explicitly constructed and passed where needed, never a process
/// global, so tests can substitute a serial pool. Submission never
/// blocks: excess work queues until capacity frees up. Work runs as
/// runtime tasks, so an unconsumed handle cannot hold the process open.
#[derive(Debug, Clone)]
pub struct ExecutorPool {
	permits: Arc<Semaphore>,
	capacity: usize,
}

impl ExecutorPool {
	/// Pool sized to `min(source_count, MAX_WORKERS)`.
	pub fn sized_for(source_count: usize) -> Self {
		Self::with_capacity(cmp::min(source_count, MAX_WORKERS))
	}

	pub fn with_capacity(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			permits: Arc::new(Semaphore::new(capacity)),
			capacity,
		}
	}

	/// Single-slot pool: stages run one at a time. Deterministic
	/// scheduling for tests.
	pub fn serial() -> Self {
		Self::with_capacity(1)
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Submit one unit of work. Returns immediately with a live handle;
	/// the work itself starts once a pool slot is available.
	pub fn submit<T, F>(&self, work: F) -> Handle<T>
	where
		T: Send + 'static,
		F: Future<Output = PipelineResult<T>> + Send + 'static,
	{
		let permits = Arc::clone(&self.permits);
		let task = tokio::spawn(async move {
			let _permit = permits
				.acquire_owned()
				.await
				.map_err(|err| PipelineError::Internal {
					reason: err.to_string(),
				})?;
			work.await
		});
		Handle::from_task(task)
	}
}
