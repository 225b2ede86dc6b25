//! # Tercile Analytics Engine
//!
//! This crate splits a daily price history into three chronological thirds and
//! computes calendar-time analytics over each third independently.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   HTTP or configuration. It depends only on `core-types` (Layer 0).
//! - **Calendar Windows:** Rolling statistics are taken over a fixed span of
//!   elapsed days (`[d - 180, d]`), never over a fixed number of rows.
//! - **Stateless Calculation:** Every function takes its input by reference and
//!   returns a freshly built series. Nothing outlives a call.
//!
//! ## Public API
//!
//! - `partition`: Splits a `PriceSeries` into `Partitions` by calendar span.
//! - `quarterly_return`, `ma180`, `vol180`: The three window analytics.
//! - `AnalyticsEngine`: Runs one metric over all three thirds.
//! - `AnalyticsReport`: The per-third results handed to presentation layers.

// Declare the modules that constitute this crate.
pub mod calendar;
pub mod engine;
pub mod partition;
pub mod report;
pub mod rolling;
pub mod stats;
pub mod window;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use partition::partition;
pub use report::{AnalyticsReport, PartitionReport};
pub use window::{TRADING_DAYS_PER_YEAR, WINDOW_DAYS, ma180, quarterly_return, vol180};
