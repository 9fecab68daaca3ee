//! A type-safe library for classifying education legislation records.
//!
//! This library provides a keyword-based relevance filter, topical
//! categorization, and education-type classification for legislative bill
//! records, plus a reactive stream-based pipeline for processing record
//! feeds (JSON arrays, master lists, or NDJSON).

pub mod config;
pub mod error;
pub mod filter;
pub mod processor;
pub mod selectors;
pub mod taxonomy;
pub mod types;

pub use config::{Config, ConfigBuilder, SortOrder};
pub use error::{Error, Result};
pub use filter::{filter_education_bills, BillText, FilterAlias, FilterManager, FilterResult};
pub use processor::{classify_record, BillProcessor};
pub use taxonomy::{
    categorize_bill, category_info, default_taxonomy, education_type, is_education_bill,
    CategoryInfo, Taxonomy,
};
pub use types::{BillRecord, Category, ClassifiedBill, EducationType};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, SortOrder};
    pub use crate::error::{Error, Result};
    pub use crate::filter::{filter_education_bills, FilterAlias};
    pub use crate::processor::BillProcessor;
    pub use crate::taxonomy::{
        categorize_bill, category_info, education_type, is_education_bill, Taxonomy,
    };
    pub use crate::types::{BillRecord, Category, ClassifiedBill, EducationType};
    pub use futures::StreamExt;
}
