use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
  observable::Observable,
  observer::{Observer, Subscriber},
  scheduler::{Scheduler, Task},
  subscription::DisposeWatch,
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Send + 'static,
  Err: Send + 'static,
{
  /// Delivers every signal on `scheduler`.
  ///
  /// The upstream is subscribed on the calling thread and keeps producing
  /// wherever it already runs; each `next`, `error` and `complete` becomes
  /// its own task. Values keep their order only if the scheduler runs tasks
  /// in submission order, which [`SingleThreadScheduler`] does and the pools
  /// don't. On any scheduler the terminal signal is held back until every
  /// value submitted before it has been delivered, so no value is lost to an
  /// early `complete`.
  ///
  /// [`SingleThreadScheduler`]: crate::scheduler::SingleThreadScheduler
  pub fn observe_on<SD>(self, scheduler: SD) -> Observable<Item, Err>
  where
    SD: Scheduler + Send + Sync + 'static,
  {
    let source = self;
    let scheduler = Arc::new(scheduler);
    Observable::create(move |subscriber| {
      source.actual_subscribe(Subscriber::new(ObserveOnObserver {
        observer: subscriber,
        scheduler: scheduler.clone(),
        in_flight: Arc::new(Mutex::new(InFlight::default())),
      }));
      Ok(())
    })
  }
}

pub struct ObserveOnObserver<O, SD> {
  observer: O,
  scheduler: Arc<SD>,
  in_flight: Arc<Mutex<InFlight>>,
}

/// Values submitted but not yet delivered, and the terminal signal waiting
/// for them.
#[derive(Default)]
struct InFlight {
  values: usize,
  terminal: Option<Task>,
}

impl<O, SD> ObserveOnObserver<O, SD>
where
  SD: Scheduler,
{
  fn schedule_terminal(&self, terminal: Task) {
    let in_flight = self.in_flight.clone();
    self.scheduler.schedule(Box::new(move || {
      let mut state = in_flight.lock();
      if state.values == 0 {
        drop(state);
        terminal();
      } else {
        state.terminal = Some(terminal);
      }
    }));
  }
}

impl<Item, Err, SD> Observer<Item, Err> for ObserveOnObserver<Subscriber<Item, Err>, SD>
where
  Item: Send + 'static,
  Err: Send + 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    let observer = self.observer.clone();
    let in_flight = self.in_flight.clone();
    in_flight.lock().values += 1;
    self.scheduler.schedule(Box::new(move || {
      observer.next(value);
      let terminal = {
        let mut state = in_flight.lock();
        state.values -= 1;
        if state.values == 0 { state.terminal.take() } else { None }
      };
      if let Some(terminal) = terminal {
        terminal();
      }
    }));
  }

  fn error(&mut self, err: Err) {
    let observer = self.observer.clone();
    self.schedule_terminal(Box::new(move || observer.error(err)));
  }

  fn complete(&mut self) {
    let observer = self.observer.clone();
    self.schedule_terminal(Box::new(move || observer.complete()));
  }

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { self.observer.dispose_watch() }
}
