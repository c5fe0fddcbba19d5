//! The producer side of a pipeline
//!
//! An [`Observable`] is an immutable wrapper around a subscription procedure.
//! Subscribing runs the procedure against a fresh [`Subscriber`]; every
//! subscription runs it again, independently of the others. Operators (see
//! [`crate::ops`]) never mutate an observable, they return a new one that
//! subscribes to its upstream with a wrapping observer.

use std::sync::Arc;

use crate::{
  error::RxError,
  observer::{Observer, Subscriber},
};

mod from_iter;
mod observable_all;
mod observable_next;
mod of;

pub use from_iter::from_iter;
pub use observable_all::ObserverAll;
pub use observable_next::FnMutObserver;
pub use of::{empty, of, throw_err};

type OnSubscribe<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Result<(), Err> + Send + Sync;

/// A cold, push-based stream of `Item`s that may fail with `Err`.
///
/// Cloning is cheap and shares the procedure, not any subscription state.
pub struct Observable<Item, Err = RxError> {
  on_subscribe: Arc<OnSubscribe<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { on_subscribe: self.on_subscribe.clone() } }
}

/// Creates an observable from a subscription procedure.
///
/// Same as [`Observable::create`].
pub fn create<Item, Err, F>(on_subscribe: F) -> Observable<Item, Err>
where
  F: Fn(Subscriber<Item, Err>) -> Result<(), Err> + Send + Sync + 'static,
{
  Observable::create(on_subscribe)
}

impl<Item, Err> Observable<Item, Err> {
  /// Creates an observable that runs `on_subscribe` for every subscription.
  ///
  /// Returning `Err` from the procedure is how a producer fails: the error
  /// is delivered to the subscriber as a single `error` signal. If the
  /// procedure already emitted a terminal signal the returned error is
  /// dropped.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// let source: Observable<&str> = Observable::create(|s| {
  ///   s.next("Hello");
  ///   s.next("World");
  ///   s.complete();
  ///   Ok(())
  /// });
  /// source.subscribe_next(|v| println!("{v}"));
  /// ```
  pub fn create<F>(on_subscribe: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Result<(), Err> + Send + Sync + 'static,
  {
    Observable { on_subscribe: Arc::new(on_subscribe) }
  }

  /// Subscribes `observer` and runs the subscription procedure on the
  /// calling thread, unless a `subscribe_on` stage moves it elsewhere.
  pub fn subscribe<O>(&self, observer: O)
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    self.actual_subscribe(Subscriber::new(observer))
  }

  /// Runs the procedure against an existing subscriber. This is the single
  /// place where a failing procedure is turned into an `error` signal.
  pub(crate) fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) {
    if let Err(err) = (self.on_subscribe)(subscriber.clone()) {
      subscriber.error(err);
    }
  }
}
