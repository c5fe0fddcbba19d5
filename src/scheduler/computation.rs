use std::{io, thread};

use futures::executor::ThreadPool;
use tracing::debug;

use super::{run_task, Scheduler, Task};

/// A fixed-size pool for CPU-bound work.
///
/// Cloning shares the pool. Tasks submitted to it may run in parallel and in
/// any order.
#[derive(Clone, Debug)]
pub struct ComputationScheduler {
  pool: ThreadPool,
}

impl ComputationScheduler {
  /// A pool with one worker per available core.
  pub fn new() -> io::Result<Self> { Self::builder().create() }

  pub fn builder() -> ComputationSchedulerBuilder { ComputationSchedulerBuilder::default() }
}

impl Scheduler for ComputationScheduler {
  fn schedule(&self, task: Task) { self.pool.spawn_ok(async move { run_task(task) }); }
}

/// Configures a [`ComputationScheduler`].
#[derive(Clone, Debug)]
pub struct ComputationSchedulerBuilder {
  pool_size: usize,
  name_prefix: String,
}

impl Default for ComputationSchedulerBuilder {
  fn default() -> Self {
    ComputationSchedulerBuilder {
      pool_size: thread::available_parallelism().map_or(1, |n| n.get()),
      name_prefix: "rx-computation-".to_owned(),
    }
  }
}

impl ComputationSchedulerBuilder {
  /// Number of worker threads, at least one.
  pub fn pool_size(mut self, size: usize) -> Self {
    self.pool_size = size.max(1);
    self
  }

  /// Worker threads are named `{prefix}{index}`.
  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = prefix.into();
    self
  }

  pub fn create(self) -> io::Result<ComputationScheduler> {
    let name_prefix = self.name_prefix.clone();
    let pool = ThreadPool::builder()
      .pool_size(self.pool_size)
      .name_prefix(self.name_prefix)
      .after_start(move |index| debug!(worker = index, prefix = %name_prefix, "computation worker started"))
      .before_stop(|index| debug!(worker = index, "computation worker stopping"))
      .create()?;
    debug!(pool_size = self.pool_size, "computation scheduler created");
    Ok(ComputationScheduler { pool })
  }
}

#[cfg(test)]
mod test {
  use std::{
    collections::HashSet,
    sync::{mpsc, Arc, Barrier},
    time::Duration,
  };

  use super::*;

  #[test]
  fn runs_tasks_in_parallel() {
    let scheduler = ComputationScheduler::builder().pool_size(2).name_prefix("calc-").create().unwrap();
    // Both tasks must be running at the same time to pass the barrier.
    let barrier = Arc::new(Barrier::new(2));
    let (tx, rx) = mpsc::channel();
    for _ in 0..2 {
      let barrier = barrier.clone();
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || {
        barrier.wait();
        tx.send(thread::current().name().map(str::to_owned)).unwrap();
      }));
    }
    let names: HashSet<_> = (0..2)
      .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap_or_default())
      .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.starts_with("calc-")));
  }

  #[test]
  fn zero_pool_size_is_clamped() {
    let builder = ComputationScheduler::builder().pool_size(0);
    assert_eq!(builder.pool_size, 1);
  }
}
