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
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// let source: Observable<i32> = observable::from_iter(1..3);
  /// source
  ///   .map(|i| format!("Mapped:{i}"))
  ///   .subscribe_next(|v| println!("{v}"));
  /// ```
  pub fn map<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> B + Send + Sync + 'static,
  {
    self.map_with_err(move |v| Ok(f(v)))
  }

  /// Like [`map`](Observable::map), but the closure may fail. The first
  /// failure is delivered as the stream's `error`; nothing is forwarded
  /// after it.
  pub fn map_with_err<B, F>(self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Result<B, Err> + Send + Sync + 'static,
  {
    let source = self;
    let map = Arc::new(f);
    Observable::create(move |subscriber| {
      source.actual_subscribe(Subscriber::new(MapObserver {
        observer: subscriber,
        map: map.clone(),
        stopped: false,
      }));
      Ok(())
    })
  }
}

pub struct MapObserver<O, M> {
  observer: O,
  map: Arc<M>,
  stopped: bool,
}

impl<Item, B, Err, M> Observer<Item, Err> for MapObserver<Subscriber<B, Err>, M>
where
  M: Fn(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.stopped {
      return;
    }
    match (self.map)(value) {
      Ok(v) => self.observer.next(v),
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
