use crate::{observable::Observable, scheduler::Scheduler};

impl<Item, Err> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  /// Moves the subscription work onto `scheduler`.
  ///
  /// Subscribing submits "subscribe to the upstream" as one task and returns
  /// right away; the producer, including any endless loop it runs, executes
  /// on the scheduler. An upstream failure is delivered from there too.
  pub fn subscribe_on<SD>(self, scheduler: SD) -> Observable<Item, Err>
  where
    SD: Scheduler + Send + Sync + 'static,
  {
    let source = self;
    Observable::create(move |subscriber| {
      let source = source.clone();
      scheduler.schedule(Box::new(move || source.actual_subscribe(subscriber)));
      Ok(())
    })
  }
}

#[cfg(test)]
mod test {
  use std::{
    sync::{mpsc, Arc},
    thread,
    time::Duration,
  };

  use parking_lot::Mutex;

  use crate::prelude::*;

  #[test]
  fn runs_on_another_thread() {
    let (tx, rx) = mpsc::channel();
    let observable: Observable<String> = Observable::create(move |s| {
      let name = thread::current().name().map(str::to_owned);
      let _ = tx.send(name);
      s.complete();
      Ok(())
    });

    observable
      .subscribe_on(IoScheduler::new())
      .subscribe_all(|_| {}, |_| panic!("unexpected error"), || {});

    let name = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap_or_default();
    assert!(name.starts_with("rx-io-"), "ran on {name}");
  }

  #[test]
  fn thread_pool() {
    let res = Arc::new(Mutex::new(vec![]));
    let threads = Arc::new(Mutex::new(vec![]));
    let (c_res, c_threads) = (res.clone(), threads.clone());

    let source: Observable<i32> = observable::from_iter(1..5);
    let (source, status) = source.subscribe_on(ComputationScheduler::new().unwrap()).complete_status();
    source.subscribe_next(move |v| {
      c_res.lock().push(v);
      c_threads.lock().push(thread::current().id());
    });

    CompleteStatus::wait_for_end(status);
    assert_eq!(*res.lock(), (1..5).collect::<Vec<_>>());
    assert_ne!(threads.lock()[0], thread::current().id());
  }

  #[test]
  fn subscribe_returns_before_the_producer_finishes() {
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let release_rx = Arc::new(Mutex::new(release_rx));
    let (done_tx, done_rx) = mpsc::channel();

    let blocking: Observable<i32> = Observable::create(move |s| {
      let _ = release_rx.lock().recv();
      s.next(1);
      s.complete();
      Ok(())
    });
    blocking.subscribe_on(IoScheduler::new()).subscribe_next(move |v| {
      let _ = done_tx.send(v);
    });

    // The caller got control back while the producer is still parked.
    assert!(done_rx.try_recv().is_err());
    release_tx.send(()).unwrap();
    assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
  }

  #[test]
  fn failure_is_delivered_on_the_scheduler() {
    let (tx, rx) = mpsc::channel();
    let failing: Observable<i32> = observable::throw_err(|| RxError::msg("scheduled failure"));
    failing.subscribe_on(SingleThreadScheduler::new().unwrap()).subscribe_all(
      |_| {},
      move |e| {
        let _ = tx.send((e.to_string(), thread::current().name().map(str::to_owned)));
      },
      || {},
    );
    let (msg, name) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(msg, "scheduled failure");
    assert_eq!(name.as_deref(), Some("rx-single"));
  }
}
