use crate::{
  observable::Observable,
  observer::Observer,
};

/// Closure adapter with a handler for each of the three signals.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  C: FnMut(),
  N: FnMut(Item),
  E: FnMut(Err),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(&mut self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn complete(&mut self) { (self.complete)(); }
}

impl<Item, Err> Observable<Item, Err> {
  /// Invokes an execution of the Observable and registers Observer handlers
  /// for notifications it will emit.
  ///
  /// * `error`: A handler for a terminal event resulting from an error.
  /// * `complete`: A handler for a terminal event resulting from successful
  ///   completion.
  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C)
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(Err) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe(ObserverAll::new(next, error, complete))
  }
}
