//! Schedulers
//!
//! A [`Scheduler`] is an opaque task-execution service with one operation:
//! accept a unit of work and run it later, somewhere else. Submitting never
//! blocks and never reports back; a task that fails is on its own.
//!
//! Three implementations ship with the crate:
//!
//! | Scheduler | Workers | Use for |
//! |-----------|---------|---------|
//! | [`ComputationScheduler`] | fixed, one per core by default | CPU-bound work |
//! | [`IoScheduler`] | grows on demand, idle workers retire | blocking I/O |
//! | [`SingleThreadScheduler`] | exactly one, strict FIFO | ordered delivery |
//!
//! Process-wide instances are available through [`computation()`], [`io()`] and
//! [`single()`].

use std::{
  any::Any,
  panic::{self, AssertUnwindSafe},
  sync::Arc,
};

use futures::executor::ThreadPool;
use once_cell::sync::Lazy;
use tracing::error;

mod computation;
mod io;
mod single_thread;

pub use computation::{ComputationScheduler, ComputationSchedulerBuilder};
pub use io::{IoScheduler, IoSchedulerBuilder};
pub use single_thread::{SingleThreadScheduler, SingleThreadSchedulerBuilder};

/// A unit of work submitted to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A Scheduler is an object to order task and schedule their execution.
pub trait Scheduler {
  /// Submits `task` for asynchronous execution and returns immediately.
  fn schedule(&self, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
  #[inline]
  fn schedule(&self, task: Task) { (**self).schedule(task) }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
  #[inline]
  fn schedule(&self, task: Task) { (**self).schedule(task) }
}

impl Scheduler for ThreadPool {
  fn schedule(&self, task: Task) { self.spawn_ok(async move { run_task(task) }); }
}

#[cfg(feature = "tokio-scheduler")]
impl Scheduler for tokio::runtime::Handle {
  /// Tasks go to the runtime's blocking pool, since a task may hold its
  /// thread for as long as its producer runs.
  fn schedule(&self, task: Task) { drop(self.spawn_blocking(move || run_task(task))); }
}

/// Runs a task on a worker, keeping the worker alive if the task panics.
pub(crate) fn run_task(task: Task) {
  if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
    error!(panic = panic_message(&*payload), "scheduled task panicked");
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(msg) = payload.downcast_ref::<&'static str>() {
    msg
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.as_str()
  } else {
    "<non-string panic payload>"
  }
}

static COMPUTATION: Lazy<ComputationScheduler> = Lazy::new(|| {
  ComputationScheduler::new().expect("failed to start the default computation scheduler")
});

static IO: Lazy<IoScheduler> = Lazy::new(IoScheduler::new);

static SINGLE: Lazy<SingleThreadScheduler> = Lazy::new(|| {
  SingleThreadScheduler::new().expect("failed to start the default single-thread scheduler")
});

/// The process-wide computation scheduler, started on first use.
pub fn computation() -> ComputationScheduler { COMPUTATION.clone() }

/// The process-wide I/O scheduler.
pub fn io() -> IoScheduler { IO.clone() }

/// The process-wide single-thread scheduler, started on first use.
pub fn single() -> SingleThreadScheduler { SINGLE.clone() }

#[cfg(test)]
mod test {
  use std::{
    sync::{mpsc, Arc},
    thread,
    time::Duration,
  };

  use super::*;

  #[test]
  fn futures_thread_pool_is_a_scheduler() {
    let pool = ThreadPool::new().unwrap();
    let (tx, rx) = mpsc::channel();
    pool.schedule(Box::new(move || {
      let _ = tx.send(thread::current().id());
    }));
    let id = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_ne!(id, thread::current().id());
  }

  #[test]
  fn shared_and_boxed_schedulers() {
    let (tx, rx) = mpsc::channel();
    let shared: Arc<dyn Scheduler + Send + Sync> = Arc::new(single());
    let boxed: Box<dyn Scheduler> = Box::new(io());
    let c_tx = tx.clone();
    shared.schedule(Box::new(move || c_tx.send(1).unwrap()));
    boxed.schedule(Box::new(move || tx.send(2).unwrap()));
    let mut got = vec![
      rx.recv_timeout(Duration::from_secs(5)).unwrap(),
      rx.recv_timeout(Duration::from_secs(5)).unwrap(),
    ];
    got.sort();
    assert_eq!(got, vec![1, 2]);
  }

  #[test]
  fn panicking_task_does_not_kill_the_worker() {
    let scheduler = SingleThreadScheduler::new().unwrap();
    let (tx, rx) = mpsc::channel();
    scheduler.schedule(Box::new(|| panic!("task failed")));
    scheduler.schedule(Box::new(move || tx.send("still alive").unwrap()));
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "still alive");
  }

  #[test]
  fn default_instances_are_shared() {
    let (tx, rx) = mpsc::channel();
    for _ in 0..2 {
      let tx = tx.clone();
      single().schedule(Box::new(move || tx.send(thread::current().id()).unwrap()));
    }
    let a = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let b = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(a, b);
    computation().schedule(Box::new(|| {}));
  }

  #[cfg(feature = "tokio-scheduler")]
  #[tokio::test(flavor = "multi_thread")]
  async fn tokio_handle_is_a_scheduler() {
    let (tx, rx) = mpsc::channel();
    tokio::runtime::Handle::current().schedule(Box::new(move || {
      tx.send(42).unwrap();
    }));
    let got = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(got, 42);
  }
}
