use std::sync::Arc;

use crate::{
  observable::Observable,
  observer::{Observer, Subscriber},
  subscription::DisposeWatch,
};

impl<Item, Err> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  /// Projects each source value to an observable and flattens every inner
  /// observable into the output.
  ///
  /// Each inner observable is subscribed as soon as its source value
  /// arrives. Inner values and inner errors go straight downstream; inner
  /// completions are ignored. The combined stream completes when the
  /// *source* completes, whether or not the inner streams have finished.
  ///
  /// Values from one inner stream keep their order. Values from different
  /// inner streams may interleave in any order when the inner streams run on
  /// other threads.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// let source: Observable<i32> = observable::from_iter(1..=2);
  /// source
  ///   .flat_map(|i| observable::from_iter(vec![i * 10, i * 10 + 1]))
  ///   .subscribe_next(|v| println!("{v}"));
  /// ```
  pub fn flat_map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Observable<B, Err> + Send + Sync + 'static,
  {
    self.flat_map_with_err(move |v| Ok(f(v)))
  }

  /// Like [`flat_map`](Observable::flat_map), but the projection may fail.
  /// A failed projection is delivered as the stream's `error`; no further
  /// source value is projected afterwards.
  pub fn flat_map_with_err<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Result<Observable<B, Err>, Err> + Send + Sync + 'static,
  {
    let source = self;
    let project = Arc::new(f);
    Observable::create(move |subscriber| {
      source.actual_subscribe(Subscriber::new(FlatMapObserver {
        observer: subscriber,
        project: project.clone(),
        stopped: false,
      }));
      Ok(())
    })
  }
}

/// Observer of the source values.
pub struct FlatMapObserver<O, F> {
  observer: O,
  project: Arc<F>,
  stopped: bool,
}

impl<Item, B, Err, F> Observer<Item, Err> for FlatMapObserver<Subscriber<B, Err>, F>
where
  B: 'static,
  Err: 'static,
  F: Fn(Item) -> Result<Observable<B, Err>, Err>,
{
  fn next(&mut self, value: Item) {
    if self.stopped {
      return;
    }
    match (self.project)(value) {
      Ok(inner) => {
        inner.actual_subscribe(Subscriber::new(InnerObserver(self.observer.clone())));
      }
      Err(err) => {
        self.stopped = true;
        self.observer.error(err);
      }
    }
  }

  fn error(&mut self, err: Err) {
    if !self.stopped {
      self.stopped = true;
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.stopped {
      self.stopped = true;
      self.observer.complete();
    }
  }

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { self.observer.dispose_watch() }
}

/// Observer of one inner stream. Shares the downstream with its siblings.
pub struct InnerObserver<O>(O);

impl<Item, Err> Observer<Item, Err> for InnerObserver<Subscriber<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(value) }

  #[inline]
  fn error(&mut self, err: Err) { self.0.error(err) }

  /// Only the source decides when the combined stream is complete.
  #[inline]
  fn complete(&mut self) {}

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { self.0.dispose_watch() }
}
