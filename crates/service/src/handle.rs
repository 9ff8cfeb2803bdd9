//! Task handles and their composition
//!
//! A [`Handle`] is a reference to one unit of asynchronous work and its
//! eventual outcome. Failures are captured as values inside the handle,
//! never thrown across task boundaries, and only surface at an explicit
//! observation point ([`join_all`], [`first_of`], or a completion
//! callback). Composition creates new handles; a parent's terminal
//! value is never mutated.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::task::JoinHandle;

use bestprice_types::{PipelineError, PipelineResult};

/// One pending or terminal unit of asynchronous work.
pub struct Handle<T> {
	fut: BoxFuture<'static, PipelineResult<T>>,
}

impl<T: Send + 'static> Handle<T> {
	/// A handle that is already terminal.
	pub fn ready(outcome: PipelineResult<T>) -> Self {
		Self {
			fut: futures::future::ready(outcome).boxed(),
		}
	}

	/// Wrap an arbitrary future. The work is lazy until the handle is
	/// observed or [`spawn`](Handle::spawn)ed; pool submissions are live
	/// from the start.
	pub fn from_future<F>(fut: F) -> Self
	where
		F: Future<Output = PipelineResult<T>> + Send + 'static,
	{
		Self { fut: fut.boxed() }
	}

	/// Adopt an already-spawned runtime task.
	pub(crate) fn from_task(task: JoinHandle<PipelineResult<T>>) -> Self {
		Self {
			fut: async move {
				match task.await {
					Ok(outcome) => outcome,
					Err(err) => Err(PipelineError::Internal {
						reason: err.to_string(),
					}),
				}
			}
			.boxed(),
		}
	}

	/// Detach the composed chain onto the runtime so it runs to its
	/// terminal state whether or not the returned handle is observed.
	pub fn spawn(self) -> Self {
		Self::from_task(tokio::spawn(self.fut))
	}

	/// Transform the success value with a lightweight continuation.
	///
	/// Runs on whichever task completed the parent, not as a fresh pool
	/// submission. Skipped on failure; the error propagates unchanged.
	pub fn map<U, F>(self, f: F) -> Handle<U>
	where
		U: Send + 'static,
		F: FnOnce(T) -> U + Send + 'static,
	{
		Handle {
			fut: async move { self.fut.await.map(f) }.boxed(),
		}
	}

	/// Like [`map`](Handle::map), for fallible continuations.
	pub fn try_map<U, F>(self, f: F) -> Handle<U>
	where
		U: Send + 'static,
		F: FnOnce(T) -> PipelineResult<U> + Send + 'static,
	{
		Handle {
			fut: async move { self.fut.await.and_then(f) }.boxed(),
		}
	}

	/// Chain a continuation that is itself asynchronous.
	///
	/// The returned handle completes with the inner handle's eventual
	/// value rather than nesting handles. Distinct from
	/// [`map`](Handle::map) so synchronous transforms and asynchronous
	/// chaining stay unambiguous at call sites.
	pub fn and_then<U, F>(self, f: F) -> Handle<U>
	where
		U: Send + 'static,
		F: FnOnce(T) -> Handle<U> + Send + 'static,
	{
		Handle {
			fut: async move {
				match self.fut.await {
					Ok(value) => f(value).fut.await,
					Err(err) => Err(err),
				}
			}
			.boxed(),
		}
	}

	/// Merge two independent handles once both have completed.
	///
	/// Both branches are expected to be running already; the combiner
	/// only runs after both succeed. The first failure wins. When both
	/// fail concurrently, which error surfaces is a race.
	pub fn zip_with<U, V, F>(self, other: Handle<U>, f: F) -> Handle<V>
	where
		U: Send + 'static,
		V: Send + 'static,
		F: FnOnce(T, U) -> V + Send + 'static,
	{
		Handle {
			fut: async move {
				let (a, b) = futures::future::try_join(self.fut, other.fut).await?;
				Ok(f(a, b))
			}
			.boxed(),
		}
	}
}

impl<T> Future for Handle<T> {
	type Output = PipelineResult<T>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		self.get_mut().fut.poll_unpin(cx)
	}
}

/// Await every handle and return the values in the order the handles
/// were given (source-registration order), regardless of completion
/// order. Out-of-order completions are buffered into an index-tagged
/// slot vector and reassembled.
///
/// If any chain failed, the whole call fails with an aggregate error
/// carrying one attributed error per failed chain, ordered by
/// registration index.
pub async fn join_all<T>(handles: Vec<Handle<T>>) -> PipelineResult<Vec<T>>
where
	T: Send + 'static,
{
	let total = handles.len();
	let mut pending: FuturesUnordered<_> = handles
		.into_iter()
		.enumerate()
		.map(|(index, handle)| async move { (index, handle.await) })
		.collect();

	let mut slots: Vec<Option<T>> = Vec::with_capacity(total);
	slots.resize_with(total, || None);
	let mut failures: Vec<(usize, PipelineError)> = Vec::new();

	while let Some((index, outcome)) = pending.next().await {
		match outcome {
			Ok(value) => slots[index] = Some(value),
			Err(err) => failures.push((index, err)),
		}
	}

	if !failures.is_empty() {
		failures.sort_by_key(|(index, _)| *index);
		return Err(PipelineError::Aggregate {
			total,
			errors: failures.into_iter().map(|(_, err)| err).collect(),
		});
	}

	Ok(slots
		.into_iter()
		.map(|slot| slot.expect("completion filled every slot"))
		.collect())
}

/// Like [`join_all`], but never fails: each failed chain's slot is
/// filled with the default value instead, at its registration position.
pub async fn join_all_or<T>(handles: Vec<Handle<T>>, default: T) -> Vec<T>
where
	T: Clone + Send + 'static,
{
	let total = handles.len();
	let mut pending: FuturesUnordered<_> = handles
		.into_iter()
		.enumerate()
		.map(|(index, handle)| async move { (index, handle.await) })
		.collect();

	let mut slots: Vec<Option<T>> = Vec::with_capacity(total);
	slots.resize_with(total, || None);

	while let Some((index, outcome)) = pending.next().await {
		if let Ok(value) = outcome {
			slots[index] = Some(value);
		}
	}

	slots
		.into_iter()
		.map(|slot| slot.unwrap_or_else(|| default.clone()))
		.collect()
}

/// Fire the consumer with each handle's outcome as it completes, in
/// completion order (inherently racy across runs). Successes and
/// failures are delivered through the same callback, tagged by the
/// `Result`. Resolves once every consumer invocation has fired.
pub async fn on_each_completion<T, F>(handles: Vec<Handle<T>>, mut consumer: F)
where
	T: Send + 'static,
	F: FnMut(PipelineResult<T>),
{
	let mut pending: FuturesUnordered<Handle<T>> = handles.into_iter().collect();
	while let Some(outcome) = pending.next().await {
		consumer(outcome);
	}
}

/// Resolve with the first handle to reach a terminal state.
///
/// The remaining handles are dropped unobserved; their underlying
/// chains keep running to completion in the background (no
/// cancellation), and their later results are discarded.
pub async fn first_of<T>(handles: Vec<Handle<T>>) -> PipelineResult<T>
where
	T: Send + 'static,
{
	if handles.is_empty() {
		return Err(PipelineError::NoSources);
	}

	let (outcome, _index, _rest) = futures::future::select_all(handles).await;
	outcome
}
