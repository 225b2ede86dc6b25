//! # Tercile Loader Crate
//!
//! This crate turns the raw daily price file into the typed, validated
//! `PriceSeries` the analytics crate works on.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file and format handling lives here. The analytics
//!   crate never sees a path or a CSV row.
//! - **Fail Before the Core:** Every problem with the source (missing file, bad
//!   row, duplicate date) is reported as a `LoaderError` before any analytics run.
//! - **No Caching:** Each load reads the source from scratch.
//!
//! ## Public API
//!
//! - `load_price_series`: Reads a CSV file into a `PriceSeries`.
//! - `parse_price_series`: The same, from any `io::Read`.
//! - `PriceSource` / `CsvFileSource`: The seam the web server loads through.
//! - `LoaderError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod csv_source;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use csv_source::{CsvFileSource, PriceSource, load_price_series, parse_price_series};
pub use error::LoaderError;
