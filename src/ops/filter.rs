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
  /// Emit only those items from an Observable that pass a predicate test
  ///
  /// ```
  /// use rxlite::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let coll = Arc::new(Mutex::new(vec![]));
  /// let coll_clone = coll.clone();
  ///
  /// let source: Observable<i32> = observable::from_iter(0..10);
  /// source
  ///   .filter(|v| *v % 2 == 0)
  ///   .subscribe_next(move |v| coll_clone.lock().unwrap().push(v));
  ///
  /// // only even numbers received.
  /// assert_eq!(*coll.lock().unwrap(), vec![0, 2, 4, 6, 8]);
  /// ```
  pub fn filter<F>(self, filter: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    self.filter_with_err(move |v| Ok(filter(v)))
  }

  /// Like [`filter`](Observable::filter), but the predicate may fail. A
  /// failure is delivered as the stream's `error`; nothing is forwarded
  /// after it.
  pub fn filter_with_err<F>(self, filter: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> Result<bool, Err> + Send + Sync + 'static,
  {
    let source = self;
    let filter = Arc::new(filter);
    Observable::create(move |subscriber| {
      source.actual_subscribe(Subscriber::new(FilterObserver {
        observer: subscriber,
        filter: filter.clone(),
        stopped: false,
      }));
      Ok(())
    })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  filter: Arc<F>,
  stopped: bool,
}

impl<Item, Err, F> Observer<Item, Err> for FilterObserver<Subscriber<Item, Err>, F>
where
  F: Fn(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    if self.stopped {
      return;
    }
    match (self.filter)(&value) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
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

#[cfg(test)]
mod test {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use parking_lot::Mutex;

  use crate::prelude::*;

  #[test]
  fn keeps_odd_values() {
    let log = Arc::new(Mutex::new(String::new()));
    let (c_log, c_log2) = (log.clone(), log.clone());
    let source: Observable<i32> = Observable::create(|s| {
      s.next(1);
      s.next(2);
      s.next(3);
      s.complete();
      Ok(())
    });

    source.filter(|i| i % 2 == 1).subscribe_all(
      move |v| c_log.lock().push_str(&v.to_string()),
      |_| panic!("Should not trigger error"),
      move || c_log2.lock().push('X'),
    );

    assert_eq!(*log.lock(), "13X");
  }

  #[test]
  fn runtime_error() {
    let errors = Arc::new(Mutex::new(vec![]));
    let hits = Arc::new(AtomicUsize::new(0));
    let (c_errors, c_hits) = (errors.clone(), hits.clone());

    let source: Observable<i32> = observable::from_iter(0..10);
    source
      .filter_with_err(|_| Err(RxError::msg("runtime error")))
      .subscribe_all(
        move |_| {
          c_hits.fetch_add(1, Ordering::SeqCst);
        },
        move |e| c_errors.lock().push(e.to_string()),
        || panic!("a failed filter must not complete"),
      );

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(*errors.lock(), vec!["runtime error".to_string()]);
  }

  #[test]
  fn pass_error() {
    let errors = Arc::new(AtomicUsize::new(0));
    let c_errors = errors.clone();
    let source: Observable<i32> = observable::throw_err(|| RxError::msg(""));
    source.filter(|_| true).subscribe_all(
      |_| {},
      move |_| {
        c_errors.fetch_add(1, Ordering::SeqCst);
      },
      || {},
    );
    assert_eq!(errors.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn reusable_pipeline() {
    let total = Arc::new(AtomicUsize::new(0));
    let source: Observable<usize> = observable::from_iter(0..10);
    let evens = source.filter(|v| v % 2 == 0);
    for _ in 0..2 {
      let c_total = total.clone();
      evens.clone().subscribe_next(move |v| {
        c_total.fetch_add(v, Ordering::SeqCst);
      });
    }
    assert_eq!(total.load(Ordering::SeqCst), 40);
  }
}
