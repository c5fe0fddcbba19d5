//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.
//! The default scheduler instances stay behind the `scheduler` path, as in
//! `scheduler::io()`.

// Error
pub use crate::error::RxError;
// Observable and its factories
pub use crate::observable::{self, FnMutObserver, Observable, ObserverAll};
// Observer trait and subscriber handle
pub use crate::observer::{BoxedObserver, Observer, Subscriber};
// Operators
pub use crate::ops::complete_status::CompleteStatus;
// Schedulers
pub use crate::scheduler::{
  self, ComputationScheduler, ComputationSchedulerBuilder, IoScheduler, IoSchedulerBuilder,
  Scheduler, SingleThreadScheduler, SingleThreadSchedulerBuilder, Task,
};
// Subscription
pub use crate::subscription::{Disposable, DisposableObserver, DisposeWatch};
