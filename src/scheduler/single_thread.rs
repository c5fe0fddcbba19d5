use std::{io, thread};

use crossbeam_channel::{unbounded, Sender};
use tracing::{debug, warn};

use super::{run_task, Scheduler, Task};

/// Runs every task on one dedicated thread, strictly in submission order.
///
/// This is the scheduler to give `observe_on` when the order of delivered
/// signals matters. The worker exits once every clone of the scheduler has
/// been dropped and the queue is drained.
#[derive(Clone, Debug)]
pub struct SingleThreadScheduler {
  sender: Sender<Task>,
}

impl SingleThreadScheduler {
  pub fn new() -> io::Result<Self> { Self::builder().create() }

  pub fn builder() -> SingleThreadSchedulerBuilder { SingleThreadSchedulerBuilder::default() }
}

impl Scheduler for SingleThreadScheduler {
  fn schedule(&self, task: Task) {
    if self.sender.send(task).is_err() {
      warn!("single-thread worker is gone, task dropped");
    }
  }
}

/// Configures a [`SingleThreadScheduler`].
#[derive(Clone, Debug)]
pub struct SingleThreadSchedulerBuilder {
  name: String,
}

impl Default for SingleThreadSchedulerBuilder {
  fn default() -> Self { SingleThreadSchedulerBuilder { name: "rx-single".to_owned() } }
}

impl SingleThreadSchedulerBuilder {
  /// Name of the worker thread.
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn create(self) -> io::Result<SingleThreadScheduler> {
    let (sender, receiver) = unbounded::<Task>();
    let name = self.name;
    thread::Builder::new().name(name.clone()).spawn(move || {
      debug!(worker = %name, "single-thread worker started");
      for task in receiver {
        run_task(task);
      }
      debug!(worker = %name, "single-thread worker stopped");
    })?;
    Ok(SingleThreadScheduler { sender })
  }
}

#[cfg(test)]
mod test {
  use std::{sync::mpsc, time::Duration};

  use super::*;

  #[test]
  fn executes_in_same_thread() {
    let scheduler = SingleThreadScheduler::new().unwrap();
    let (tx, rx) = mpsc::channel();
    for _ in 0..2 {
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || tx.send(thread::current().id()).unwrap()));
    }
    let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, thread::current().id());
  }

  #[test]
  fn keeps_submission_order() {
    let scheduler = SingleThreadScheduler::builder().name("ordered").create().unwrap();
    let (tx, rx) = mpsc::channel();
    for i in 0..500 {
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || tx.send(i).unwrap()));
    }
    drop(tx);
    drop(scheduler);
    // The worker drains the queue before exiting, then the channel closes.
    let received: Vec<i32> = rx.iter().collect();
    assert_eq!(received, (0..500).collect::<Vec<_>>());
  }
}
