//! # rxlite: a minimal push-based reactive stream library
//!
//! An [`Observable`] is a cold stream: nothing runs until something subscribes,
//! and every subscription runs the producer again. Values are pushed through a
//! chain of operators to an [`Observer`], followed by at most one terminal
//! signal (`error` or `complete`).
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let source: Observable<i32> = observable::from_iter(0..10);
//! source
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe_next(|v| println!("Value: {v}"));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Immutable wrapper around a subscription procedure |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` signals |
//! | [`Scheduler`] | Runs tasks elsewhere; used by `subscribe_on` and `observe_on` |
//! | [`Disposable`] | Cooperative cancellation flag shared with the producer |
//!
//! ## Threading
//!
//! Without a scheduler the whole pipeline runs on the subscribing thread.
//! `subscribe_on` moves the producer onto a scheduler; `observe_on` moves
//! everything downstream of it. See [`scheduler`] for the shipped
//! implementations.
//!
//! ## Feature Flags
//!
//! - **`tokio-scheduler`**: implements [`Scheduler`] for
//!   `tokio::runtime::Handle`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Scheduler`]: scheduler::Scheduler
//! [`Disposable`]: subscription::Disposable

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
