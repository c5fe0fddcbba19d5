use crate::observable::Observable;

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// let one: Observable<i32> = observable::of(123);
/// one.subscribe_next(|v| println!("{v},"));
/// ```
pub fn of<Item, Err>(v: Item) -> Observable<Item, Err>
where
  Item: Clone + Send + Sync + 'static,
  Err: 'static,
{
  Observable::create(move |subscriber| {
    subscriber.next(v.clone());
    subscriber.complete();
    Ok(())
  })
}

/// Creates an observable that completes without emitting anything.
pub fn empty<Item, Err>() -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  Observable::create(|subscriber| {
    subscriber.complete();
    Ok(())
  })
}

/// Creates an observable that emits nothing and fails right away with the
/// error built by `err`. The factory runs once per subscription.
pub fn throw_err<Item, Err, F>(err: F) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  F: Fn() -> Err + Send + Sync + 'static,
{
  Observable::create(move |_| Err(err()))
}
