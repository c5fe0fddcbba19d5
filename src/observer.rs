//! Observer trait and the subscriber handle
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).
//!
//! A [`Subscriber`] is what a subscription procedure actually talks to: a
//! shared handle around one boxed observer that serializes delivery and makes
//! sure at most one terminal signal gets through.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::subscription::{Disposable, DisposeWatch};

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable. No more signals follow.
  fn error(&mut self, err: Err);

  /// Handle completion of the observable. No more signals follow.
  fn complete(&mut self);

  /// Checks if the consumer behind this observer has been disposed.
  ///
  /// A source can poll it between emissions and stop producing early.
  /// Nothing forces a source to ask.
  fn is_disposed(&self) -> bool { self.dispose_watch().is_disposed() }

  /// The flags behind [`is_disposed`](Observer::is_disposed).
  ///
  /// A [`Subscriber`] takes the watch once, when it is created, and answers
  /// `is_disposed` from it without locking the observer. Wrapping observers
  /// return their downstream's watch; observers with their own notion of
  /// disposal add their flag to it. The default never reports disposal.
  fn dispose_watch(&self) -> DisposeWatch { DisposeWatch::never() }
}

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { (**self).dispose_watch() }
}

/// Boxed observer that can be moved to another thread.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err> + Send>;

// ============================================================================
// Subscriber
// ============================================================================

/// The emitter handle handed to a subscription procedure.
///
/// Cloning a `Subscriber` yields another handle to the same observer, which
/// is how operators share one downstream between several producers (the
/// inner streams of `flat_map`, the tasks of `observe_on`). Signals from
/// different handles never run concurrently against the observer.
///
/// After `error` or `complete` the observer is released and every later
/// signal is dropped.
pub struct Subscriber<Item, Err> {
  observer: Arc<Mutex<Option<BoxedObserver<Item, Err>>>>,
  closed: Disposable,
  watch: DisposeWatch,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber {
      observer: self.observer.clone(),
      closed: self.closed.clone(),
      watch: self.watch.clone(),
    }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  /// Wraps `observer`, taking its dispose watch once.
  pub fn new<O>(observer: O) -> Self
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let closed = Disposable::new();
    let watch = observer.dispose_watch().with(closed.clone());
    Subscriber { observer: Arc::new(Mutex::new(Some(Box::new(observer)))), closed, watch }
  }

  /// Delivers a value. Delivery is serialized: the lock is held for as long
  /// as the observer's `next` runs.
  pub fn next(&self, value: Item) {
    if let Some(observer) = self.observer.lock().as_mut() {
      observer.next(value);
    }
  }

  /// Delivers the error and closes this handle.
  pub fn error(&self, err: Err) {
    if let Some(mut observer) = self.take_observer() {
      observer.error(err);
    }
  }

  /// Delivers completion and closes this handle.
  pub fn complete(&self) {
    if let Some(mut observer) = self.take_observer() {
      observer.complete();
    }
  }

  // The handler runs after the lock is released, the observer is ours now.
  fn take_observer(&self) -> Option<BoxedObserver<Item, Err>> {
    let mut observer = self.observer.lock();
    self.closed.dispose();
    observer.take()
  }

  /// Returns `true` once a terminal signal went through this handle.
  pub fn is_closed(&self) -> bool { self.closed.is_disposed() }

  /// Returns `true` if the downstream consumer was disposed, or if this
  /// handle is already closed and nobody is listening any more.
  ///
  /// Never waits on the delivery lock, so a producer can poll it while a
  /// slow handler is still running.
  pub fn is_disposed(&self) -> bool { self.watch.is_disposed() }

  /// The watch a producer or an upstream stage polls.
  pub fn dispose_watch(&self) -> DisposeWatch { self.watch.clone() }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }

  #[inline]
  fn is_disposed(&self) -> bool { Subscriber::is_disposed(self) }

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { Subscriber::dispose_watch(self) }
}

// ============================================================================
// Tests
// ============================================================================
