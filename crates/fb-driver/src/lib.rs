//! `fb-driver` — frame-tick driver for the framebeat scheduler.
//!
//! # Per-frame loop
//!
//! ```text
//! on each host FrameTick { elapsed_time_ms }:
//!   ① Snapshot — copy the registry order (strong handles)
//!   ② Visit    — for each handle in the snapshot:
//!                  accumulated_time += elapsed_time_ms
//!                  on_update(elapsed_time_ms)       (if declared)
//!   ③ Clock    — FrameClock::advance
//! ```
//!
//! Mutations made by hooks during ② land in the live registry and take
//! effect on the next frame.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fb_behavior::Scheduler;
//! use fb_driver::{ManualHost, TickDriver};
//!
//! let scheduler = Scheduler::new();
//! let mut host = ManualHost::new();
//! let driver = TickDriver::new(&scheduler).attach(&mut host);
//! scheduler.spawn(MyScript::default());
//! host.emit(64.0);
//! assert_eq!(driver.frames(), 1);
//! ```

pub mod driver;
pub mod error;
pub mod host;
pub mod observer;


pub use driver::{DriverHandle, TickDriver};
pub use error::{DriverError, DriverResult};
pub use host::{FrameHandler, FrameHost, ManualHost, PacedHost};
pub use observer::{DriverObserver, NoopObserver};
