//! Operators
//!
//! Every operator is an inherent method on [`Observable`](crate::Observable)
//! returning a new observable. Its subscription procedure subscribes to the
//! upstream with a wrapping observer built for that one subscription; the
//! wrapping observer owns a [`Subscriber`](crate::observer::Subscriber)
//! pointing downstream, never the other way around.
//!
//! Fallible closures come in a `_with_err` flavour returning `Result`. A
//! failing closure turns into one `error` downstream, after which the
//! wrapping observer forwards nothing more. The upstream is not told and may
//! keep producing; those signals are dropped at the failed stage.

pub mod complete_status;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod observe_on;
pub mod subscribe_on;
