//! Walks through the three basics: combining streams with `flat_map`, a
//! failing producer, and disposing an infinite producer that runs on the I/O
//! scheduler while its values are observed on the single-thread scheduler.
//!
//! Run with `RUST_LOG=debug cargo run --example basic` to also see the
//! scheduler workers come and go.

use std::{thread, time::Duration};

use rxlite::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_thread_names(true)
    .init();

  info!("Example 1: flat_map");
  let source: Observable<i32> = Observable::create(|s| {
    for i in 1..=3 {
      s.next(i);
    }
    s.complete();
    Ok(())
  });
  source
    .flat_map(|i| {
      Observable::create(move |inner| {
        inner.next(format!("Item: {}", i * 10));
        inner.next(format!("Item: {}", i * 20));
        inner.complete();
        Ok(())
      })
    })
    .subscribe_all(
      |item| info!("[flat_map] {item}"),
      |err: RxError| error!("[flat_map] Error: {err}"),
      || info!("[flat_map] Completed"),
    );

  info!("Example 2: error handling");
  let failing: Observable<&str> = Observable::create(|s| {
    s.next("A");
    s.next("B");
    Err(RxError::msg("Simulated error"))
  });
  failing.subscribe_all(
    |item| info!("[error] Received: {item}"),
    |err| warn!("[error] Handled: {err}"),
    || info!("[error] This won't be printed"),
  );

  info!("Example 3: disposable");
  let infinite: Observable<u64> = Observable::create(|s| {
    let mut i = 0;
    while !s.is_disposed() {
      s.next(i);
      i += 1;
      thread::sleep(Duration::from_millis(100));
    }
    Ok(())
  });

  let disposable = Disposable::new();
  let handle = disposable.clone();
  infinite
    .subscribe_on(scheduler::io())
    .observe_on(scheduler::single())
    .subscribe(DisposableObserver::with_disposable(
      ObserverAll::new(
        move |item: u64| {
          info!("[infinite] {item}");
          if item >= 5 {
            handle.dispose();
            info!("[infinite] Disposed!");
          }
        },
        |err: RxError| error!("[infinite] Error: {err}"),
        || info!("[infinite] Completed"),
      ),
      disposable,
    ));

  thread::sleep(Duration::from_secs(2));
  info!("Done.");
}
