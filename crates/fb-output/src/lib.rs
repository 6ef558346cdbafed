//! `fb-output` — trace writers for the framebeat scheduler.
//!
//! One row is recorded per behavior update: which frame it happened in,
//! which behavior ran, and its weight, accumulated time, and enablement
//! right after the update step.
//!
//! All backends implement [`TraceWriter`] and are driven by
//! [`TraceObserver`], which implements `fb_driver::DriverObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fb_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::create(Path::new("./trace.csv"))?;
//! let driver = TickDriver::with_observer(&scheduler, TraceObserver::new(writer))
//!     .attach(&mut host);
//! host.run_frames(100)?;
//! driver.finish();
//! driver.with_observer(|o| o.take_error()).map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::TraceRow;
pub use writer::TraceWriter;
