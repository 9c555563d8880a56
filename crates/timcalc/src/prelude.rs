//! Prelude module for convenient imports
//!
//! ```ignore
//! use timcalc::prelude::*;
//! ```

// Configuration
pub use crate::config::{ScanMode, SearchConfig, SearchConfigBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Search
pub use crate::candidate::Candidate;
pub use crate::search::{DividerSearch, PassObserver, SearchResult, search, search_with};

// Output
pub use crate::report::{JsonReport, Report, ReportFormat, TextReport};
