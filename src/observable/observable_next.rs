use crate::{
  observable::Observable,
  observer::Observer,
};

/// Closure adapter for the `next` handler alone.
///
/// `error` and `complete` are ignored. Works with any error type, so the
/// observable usually decides what `Err` is.
#[derive(Clone)]
pub struct FnMutObserver<N>(pub N);

impl<Item, Err, N> Observer<Item, Err> for FnMutObserver<N>
where
  N: FnMut(Item),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.0)(value); }
  #[inline(always)]
  fn error(&mut self, _err: Err) {}
  #[inline(always)]
  fn complete(&mut self) {}
}

impl<Item, Err> Observable<Item, Err> {
  /// Invokes an execution of the Observable and registers a handler for the
  /// values it will emit. Errors and completion are silently dropped.
  pub fn subscribe_next<N>(&self, next: N)
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe(FnMutObserver(next))
  }
}
