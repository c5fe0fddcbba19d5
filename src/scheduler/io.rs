use std::{
  io,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
  thread,
  time::Duration,
};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, error};

use super::{run_task, Scheduler, Task};

const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// An elastic pool for blocking, I/O-bound work.
///
/// A submitted task is handed to a worker that is waiting for work if there
/// is one, otherwise a new worker is started with it. Workers idle for
/// longer than the keep-alive retire. There is no upper bound on the number
/// of workers.
#[derive(Clone, Debug)]
pub struct IoScheduler {
  inner: Arc<IoPool>,
}

#[derive(Debug)]
struct IoPool {
  // Zero capacity: a send only succeeds into the hands of a parked worker.
  sender: Sender<Task>,
  receiver: Receiver<Task>,
  spawned: AtomicUsize,
  alive: Arc<AtomicUsize>,
  keep_alive: Duration,
  name_prefix: String,
}

impl Default for IoScheduler {
  fn default() -> Self { Self::new() }
}

impl IoScheduler {
  /// Creating the pool starts no thread, so unlike the other schedulers
  /// this cannot fail.
  pub fn new() -> Self { Self::builder().create() }

  pub fn builder() -> IoSchedulerBuilder { IoSchedulerBuilder::default() }

  /// Number of workers currently alive, busy or parked.
  pub fn worker_count(&self) -> usize { self.inner.alive.load(Ordering::Acquire) }

  fn spawn_worker(&self, first: Task) -> io::Result<()> {
    let pool = &self.inner;
    let id = pool.spawned.fetch_add(1, Ordering::Relaxed);
    let receiver = pool.receiver.clone();
    let alive = pool.alive.clone();
    let keep_alive = pool.keep_alive;
    alive.fetch_add(1, Ordering::AcqRel);
    let spawned = thread::Builder::new()
      .name(format!("{}{id}", pool.name_prefix))
      .spawn(move || {
        debug!(worker = id, "io worker started");
        run_task(first);
        loop {
          match receiver.recv_timeout(keep_alive) {
            Ok(task) => run_task(task),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
          }
        }
        alive.fetch_sub(1, Ordering::AcqRel);
        debug!(worker = id, "io worker retired");
      });
    if spawned.is_err() {
      pool.alive.fetch_sub(1, Ordering::AcqRel);
    }
    spawned.map(drop)
  }
}

impl Scheduler for IoScheduler {
  fn schedule(&self, task: Task) {
    let task = match self.inner.sender.try_send(task) {
      Ok(()) => return,
      Err(TrySendError::Full(task)) | Err(TrySendError::Disconnected(task)) => task,
    };
    if let Err(err) = self.spawn_worker(task) {
      error!(%err, "failed to start io worker, task dropped");
    }
  }
}

/// Configures an [`IoScheduler`].
#[derive(Clone, Debug)]
pub struct IoSchedulerBuilder {
  keep_alive: Duration,
  name_prefix: String,
}

impl Default for IoSchedulerBuilder {
  fn default() -> Self {
    IoSchedulerBuilder { keep_alive: DEFAULT_KEEP_ALIVE, name_prefix: "rx-io-".to_owned() }
  }
}

impl IoSchedulerBuilder {
  /// How long an idle worker waits for work before it retires.
  pub fn keep_alive(mut self, keep_alive: Duration) -> Self {
    self.keep_alive = keep_alive;
    self
  }

  /// Worker threads are named `{prefix}{index}`.
  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = prefix.into();
    self
  }

  pub fn create(self) -> IoScheduler {
    let (sender, receiver) = bounded(0);
    IoScheduler {
      inner: Arc::new(IoPool {
        sender,
        receiver,
        spawned: AtomicUsize::new(0),
        alive: Arc::new(AtomicUsize::new(0)),
        keep_alive: self.keep_alive,
        name_prefix: self.name_prefix,
      }),
    }
  }
}

#[cfg(test)]
mod test {
  use std::{
    sync::{mpsc, Barrier},
    time::Instant,
  };

  use super::*;

  #[test]
  fn grows_for_blocking_tasks() {
    let scheduler = IoScheduler::new();
    // Four tasks that all block until each of them runs: needs four workers.
    let barrier = Arc::new(Barrier::new(4));
    let (tx, rx) = mpsc::channel();
    for _ in 0..4 {
      let barrier = barrier.clone();
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || {
        barrier.wait();
        tx.send(()).unwrap();
      }));
    }
    for _ in 0..4 {
      rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    assert!(scheduler.inner.spawned.load(Ordering::SeqCst) >= 4);
  }

  #[test]
  fn reuses_parked_workers() {
    let scheduler = IoScheduler::new();
    let (tx, rx) = mpsc::channel();
    let mut threads = vec![];
    for _ in 0..3 {
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || tx.send(thread::current().id()).unwrap()));
      threads.push(rx.recv_timeout(Duration::from_secs(5)).unwrap());
      // Give the worker time to park on the queue again.
      thread::sleep(Duration::from_millis(50));
    }
    assert_eq!(scheduler.inner.spawned.load(Ordering::SeqCst), 1);
    assert!(threads.iter().all(|id| *id == threads[0]));
  }

  #[test]
  fn idle_workers_retire() {
    let scheduler = IoScheduler::builder()
      .keep_alive(Duration::from_millis(10))
      .name_prefix("short-lived-")
      .create();
    let (tx, rx) = mpsc::channel();
    scheduler.schedule(Box::new(move || tx.send(thread::current().name().map(str::to_owned)).unwrap()));
    let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(name.as_deref(), Some("short-lived-0"));

    let deadline = Instant::now() + Duration::from_secs(5);
    while scheduler.worker_count() != 0 {
      assert!(Instant::now() < deadline, "worker never retired");
      thread::sleep(Duration::from_millis(5));
    }

    // A later task still runs, on a fresh worker.
    let (tx, rx) = mpsc::channel();
    scheduler.schedule(Box::new(move || tx.send(thread::current().name().map(str::to_owned)).unwrap()));
    let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(name.as_deref(), Some("short-lived-1"));
  }
}
