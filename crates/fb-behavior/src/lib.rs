//! `fb-behavior` — the behavior lifecycle and the scheduler that owns it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`hooks`]     | `HookSet` capability flags, `Hook` invocation enum           |
//! | [`script`]    | `Script` trait — user behavior logic                         |
//! | [`behavior`]  | `Behavior<S>`, `BehaviorRef`, `BehaviorBuilder` — lifecycle  |
//! | [`scheduler`] | `Scheduler` — owns the tick registry and the id generator    |
//! | [`noop`]      | `NoopScript` — placeholder that declares no hooks            |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                         |
//!
//! # Design notes
//!
//! A behavior is split in two.  The lifecycle half (id, weight, accumulated
//! time, enablement) is script-independent and reachable through the
//! type-erased [`BehaviorRef`].  The script half is user code implementing
//! [`Script`] and declaring which hooks exist.
//!
//! Registry membership is exactly "enabled and declares `UPDATE`".  The
//! lifecycle keeps it that way: enable inserts, disable and destroy remove.
//!
//! Everything is single-threaded (`Rc`, `Cell`, `RefCell`).  The registry is
//! only borrowed for the length of one registry operation, so hooks can
//! spawn, destroy, or re-weight any behavior, including their own.

pub mod behavior;
pub mod error;
pub mod hooks;
pub mod noop;
pub mod scheduler;
pub mod script;

#[cfg(test)]
mod tests;

pub use behavior::{Behavior, BehaviorBuilder, BehaviorRef, WeakBehaviorRef};
pub use error::{BehaviorError, BehaviorResult};
pub use hooks::{Hook, HookSet};
pub use noop::NoopScript;
pub use scheduler::Scheduler;
pub use script::Script;
