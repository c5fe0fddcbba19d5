//! Cooperative cancellation
//!
//! A [`Disposable`] is a shared, monotonic cancellation flag. The consumer
//! sets it; a producer that cares polls it between emissions. Setting the
//! flag never interrupts work already running or queued on a scheduler.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use crate::observer::Observer;

/// Handle to cancel an active subscription.
///
/// All clones share the same flag, so one clone can live inside the observer
/// while another is handed to whoever decides to cancel, possibly on another
/// thread.
#[derive(Clone, Debug, Default)]
pub struct Disposable(Arc<AtomicBool>);

impl Disposable {
  pub fn new() -> Self { Self::default() }

  /// Cancels the subscription. Disposing twice is a no-op.
  #[inline]
  pub fn dispose(&self) { self.0.store(true, Ordering::Release); }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// Read-only view over the [`Disposable`] flags that tell whether the
/// consumer behind an observer is gone.
///
/// A producer polls it through
/// [`Subscriber::is_disposed`](crate::observer::Subscriber::is_disposed).
/// Reading it never takes a lock, so a poll does not wait for a handler that
/// is running downstream.
#[derive(Clone, Debug)]
pub struct DisposeWatch(Arc<[Disposable]>);

impl Default for DisposeWatch {
  fn default() -> Self { Self::never() }
}

impl DisposeWatch {
  /// A watch that never reports disposal.
  pub fn never() -> Self { DisposeWatch(Arc::from(Vec::new())) }

  /// Returns a watch that also reports disposal once `flag` is disposed.
  pub fn with(&self, flag: Disposable) -> Self {
    let mut flags = self.0.to_vec();
    flags.push(flag);
    DisposeWatch(flags.into())
  }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.0.iter().any(Disposable::is_disposed) }
}

impl From<Disposable> for DisposeWatch {
  fn from(flag: Disposable) -> Self { DisposeWatch(Arc::from(vec![flag])) }
}

/// An observer with built-in disposal.
///
/// Once disposed it stops handing `next` values to the wrapped observer.
/// Terminal signals still go through. Disposal does not stop the producer on
/// its own; a source sees it only through
/// [`Observer::is_disposed`], and only if it asks.
///
/// ```
/// use rxlite::prelude::*;
/// use std::sync::{atomic::{AtomicUsize, Ordering}, Arc};
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let c_seen = seen.clone();
/// let disposable = Disposable::new();
/// let handle = disposable.clone();
///
/// let source: Observable<i32> = observable::from_iter(0..100);
/// source.subscribe(DisposableObserver::with_disposable(
///   FnMutObserver(move |v| {
///     c_seen.fetch_add(1, Ordering::SeqCst);
///     if v == 3 {
///       handle.dispose();
///     }
///   }),
///   disposable,
/// ));
///
/// assert_eq!(seen.load(Ordering::SeqCst), 4);
/// ```
pub struct DisposableObserver<O> {
  observer: O,
  disposable: Disposable,
}

impl<O> DisposableObserver<O> {
  pub fn new(observer: O) -> Self { Self::with_disposable(observer, Disposable::new()) }

  pub fn with_disposable(observer: O, disposable: Disposable) -> Self {
    DisposableObserver { observer, disposable }
  }

  /// A handle sharing this observer's flag.
  pub fn disposable(&self) -> Disposable { self.disposable.clone() }

  #[inline]
  pub fn dispose(&self) { self.disposable.dispose() }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.disposable.is_disposed() }

  #[inline]
  pub fn is_active(&self) -> bool { !self.is_disposed() }
}

impl<Item, Err, O> Observer<Item, Err> for DisposableObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.is_active() {
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  fn dispose_watch(&self) -> DisposeWatch {
    self.observer.dispose_watch().with(self.disposable.clone())
  }
}
