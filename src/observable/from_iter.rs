use crate::observable::Observable;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error. Stops
/// early, without completing, once the subscriber reports it was disposed.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// let numbers: Observable<i32> = observable::from_iter(vec![0, 1, 2, 3]);
/// numbers.subscribe_next(|v| println!("{v},"));
/// ```
pub fn from_iter<Iter, Err>(iter: Iter) -> Observable<Iter::Item, Err>
where
  Iter: IntoIterator + Clone + Send + Sync + 'static,
  Err: 'static,
{
  Observable::create(move |subscriber| {
    for v in iter.clone() {
      if subscriber.is_disposed() {
        return Ok(());
      }
      subscriber.next(v);
    }
    subscriber.complete();
    Ok(())
  })
}
