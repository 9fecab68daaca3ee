use crate::config::Config;
use crate::taxonomy::{self, Taxonomy};
use crate::types::{BillRecord, Category, EducationType};

/// Filter alias type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAlias {
    Default,
    None,
}

impl From<&str> for FilterAlias {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "default" => FilterAlias::Default,
            "none" => FilterAlias::None,
            _ => FilterAlias::Default, // Default fallback
        }
    }
}

/// Filter result indicating whether a record should be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

/// Minimal text surface a record must provide for classification. Callers
/// may pass richer record shapes as long as they expose these two fields.
pub trait BillText {
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

impl BillText for BillRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.classification_text()
    }
}

/// Filter manager that applies the relevance filter and any configured
/// category / education-type constraints
pub struct FilterManager {
    alias: FilterAlias,
    taxonomy: Taxonomy,
    categories: Vec<Category>,
    education_types: Vec<EducationType>,
}

impl FilterManager {
    pub fn new(alias: FilterAlias, taxonomy: Taxonomy) -> Self {
        Self {
            alias,
            taxonomy,
            categories: Vec::new(),
            education_types: Vec::new(),
        }
    }

    /// Build a manager from a pipeline configuration
    pub fn from_config(config: &Config, taxonomy: Taxonomy) -> Self {
        Self {
            alias: config.filter_alias.clone(),
            taxonomy,
            categories: config.categories.clone(),
            education_types: config.education_types.clone(),
        }
    }

    /// Check if a record should be kept
    pub fn should_keep<T: BillText>(&self, record: &T) -> FilterResult {
        let title = record.title();
        let description = record.description();

        if self.alias == FilterAlias::Default
            && !self.taxonomy.is_education(title, description)
        {
            return FilterResult::FilterOut;
        }

        if !self.categories.is_empty()
            && !self.categories.contains(&self.taxonomy.category(title, description))
        {
            return FilterResult::FilterOut;
        }

        if !self.education_types.is_empty()
            && !self
                .education_types
                .contains(&self.taxonomy.education_type(title, description))
        {
            return FilterResult::FilterOut;
        }

        FilterResult::Keep
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}

/// Apply the relevance filter over a collection of records, keeping only
/// education bills. Order and record contents are preserved.
pub fn filter_education_bills<T: BillText>(records: Vec<T>) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| taxonomy::is_education_bill(record.title(), record.description()))
        .collect()
}
