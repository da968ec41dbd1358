//! Zero-cost combinator types for task composition.
//!
//! These are the concrete types returned by the methods on
//! [`TaskExt`](crate::task::TaskExt) and by the constructors. They don't
//! allocate on the heap and can be optimized by the compiler.
//!
//! Most users won't need to name these types directly.

mod alt;
mod ap;
mod bibind;
mod bimap;
mod bind;
mod delayed;
mod either;
mod fault;
mod filter;
mod from_future;
mod if_faulted;
mod if_fulfilled;
mod map;
mod ready;
mod recover;
mod spawned;
mod tap;

pub use alt::{Alt, AltWith};
pub use ap::Ap;
pub use bibind::BiBind;
pub use bimap::BiMap;
pub use bind::Bind;
pub use delayed::Delayed;
pub use fault::{Fault, FaultWith};
pub use filter::{Filter, FilterAsync, FilterElse, FilterWith};
pub use from_future::{FromFn, FromFuture};
pub use if_faulted::{IfFaulted, IfFaultedAsync};
pub use if_fulfilled::{IfFulfilled, IfFulfilledAsync};
pub use map::{Map, TryMap};
pub use ready::Ready;
pub use recover::Recover;
pub use spawned::Spawned;
pub use tap::{Tap, TapAsync};
