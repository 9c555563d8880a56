//! # timcalc
//!
//! Prescaler (PSC) and auto-reload (ARR) search for hardware timers.
//!
//! Given a timer input clock and a target output frequency, finds the pair
//! of register values whose combined divisor `(psc + 1) * (arr + 1)` gets
//! closest to the target within a percentage error margin, relaxing the
//! margin pass by pass until something fits.
//!
//! This crate provides:
//! - Validated search configuration (`SearchConfig`)
//! - The search engine (`DividerSearch`, `search`, `search_with`)
//! - Prefilter verification (`check_prefilter`)
//! - Text and JSON result reports
//!
//! ```
//! use timcalc::{SearchConfig, search};
//!
//! let config = SearchConfig::new(84_000_000, 168).unwrap();
//! let result = search(&config).unwrap();
//! assert_eq!(result.candidate.divisor, 500_000);
//! ```

pub mod candidate;
pub mod compare;
pub mod config;
pub mod error;
pub mod prelude;
pub mod report;
pub mod search;

pub use candidate::{Candidate, validate_duty};
pub use compare::{PrefilterCheck, PrefilterVerdict, check_prefilter};
pub use config::{ScanMode, SearchConfig, SearchConfigBuilder};
pub use error::{Error, Result};
pub use report::{JsonReport, Report, ReportFormat, TextReport, relaxation_notice};
pub use search::{DividerSearch, NoopObserver, PassObserver, SearchResult, search, search_with};
