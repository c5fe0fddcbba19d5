use std::{
  future::Future,
  pin::Pin,
  sync::{
    atomic::{AtomicI8, Ordering},
    Arc,
  },
  task::{Context, Poll},
};

use futures::{executor::block_on, task::AtomicWaker};

use crate::{
  observable::Observable,
  observer::{Observer, Subscriber},
  subscription::DisposeWatch,
};

/// Shared record of how a stream ended, usable as a barrier for code that
/// has to wait for work running on a scheduler.
#[derive(Default)]
pub struct CompleteStatus {
  flag: AtomicI8,
  waker: AtomicWaker,
}

impl<Item, Err> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  /// Returns the observable together with a [`CompleteStatus`] that flips
  /// once a terminal signal has been handled downstream.
  ///
  /// Every subscription of the returned observable reports to the same
  /// status.
  pub fn complete_status(self) -> (Observable<Item, Err>, Arc<CompleteStatus>) {
    let status = Arc::new(CompleteStatus::default());
    let c_status = status.clone();
    let source = self;
    let observable = Observable::create(move |subscriber| {
      source.actual_subscribe(Subscriber::new(StatusObserver {
        observer: subscriber,
        status: c_status.clone(),
      }));
      Ok(())
    });
    (observable, status)
  }
}

pub struct StatusObserver<O> {
  observer: O,
  status: Arc<CompleteStatus>,
}

impl<Item, Err> Observer<Item, Err> for StatusObserver<Subscriber<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) {
    self.observer.error(err);
    self.status.finish(-1);
  }

  fn complete(&mut self) {
    self.observer.complete();
    self.status.finish(1);
  }

  #[inline]
  fn dispose_watch(&self) -> DisposeWatch { self.observer.dispose_watch() }
}

impl CompleteStatus {
  fn finish(&self, flag: i8) {
    self.flag.store(flag, Ordering::Release);
    self.waker.wake();
  }

  /// return true if the observable completed or emit an error.
  pub fn is_closed(&self) -> bool { self.flag.load(Ordering::Acquire) != 0 }

  /// return true if the observable completed.
  pub fn is_completed(&self) -> bool { self.flag.load(Ordering::Acquire) > 0 }

  /// return true if the observable emit an error.
  pub fn error_occur(&self) -> bool { self.flag.load(Ordering::Acquire) < 0 }

  /// Wait until the observable complete or an error occur.
  pub fn wait_for_end(this: Arc<Self>) { block_on(StatusFuture(this)); }
}

struct StatusFuture(Arc<CompleteStatus>);

impl Future for StatusFuture {
  type Output = ();

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    // Register first so a terminal signal racing with this poll still wakes us.
    self.0.waker.register(cx.waker());
    if self.0.is_closed() {
      Poll::Ready(())
    } else {
      Poll::Pending
    }
  }
}
