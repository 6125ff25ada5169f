//! # Pipelines
//!
//! Caller-side drivers that own cached schedules and noise draws and map
//! animation progress onto the schedulers.

pub mod round_trip;
