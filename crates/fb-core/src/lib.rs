//! `fb-core` — foundational types for the `framebeat` behavior scheduler.
//!
//! This crate is a dependency of every other `fb-*` crate.  It intentionally
//! has no `fb-*` dependencies and minimal external ones (`rand`, `uuid`, and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `BehaviorId`, `IdGenerator`, `generate()`                 |
//! | [`time`]   | `FrameTick`, `FrameClock`, `NOMINAL_FRAME_MS`             |
//! | [`config`] | `SchedulerConfig`, `ResortPolicy`                         |
//! | [`error`]  | `FbError`, `FbResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ResortPolicy, SchedulerConfig};
pub use error::{FbError, FbResult};
pub use ids::{BehaviorId, IdGenerator, generate};
pub use time::{FrameClock, FrameTick, NOMINAL_FRAME_MS};
