use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::filter::FilterAlias;
use crate::taxonomy::Taxonomy;
use crate::types::{Category, EducationType};

/// Sort order for classified entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ASC" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// Configuration for the classification pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files containing bill records (JSON array, master list object,
    /// or NDJSON). Empty when records arrive via stdin.
    pub inputs: Vec<PathBuf>,
    /// Optional taxonomy override file
    pub taxonomy_path: Option<PathBuf>,
    pub filter_alias: FilterAlias,
    /// Keep only these categories (empty = all)
    pub categories: Vec<Category>,
    /// Keep only these education types (empty = all)
    pub education_types: Vec<EducationType>,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            taxonomy_path: None,
            filter_alias: FilterAlias::Default,
            categories: Vec::new(),
            education_types: Vec::new(),
            sort_order: SortOrder::Descending,
            limit: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            if !input.exists() {
                return Err(Error::Config(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }
            if !input.is_file() {
                return Err(Error::Config(format!(
                    "Input is not a file: {}",
                    input.display()
                )));
            }
        }

        if let Some(path) = &self.taxonomy_path {
            if !path.exists() {
                return Err(Error::TaxonomyNotFound(path.display().to_string()));
            }
        }

        Ok(())
    }

    /// Resolve the taxonomy for this configuration: the override file when
    /// one is set, the built-in tables otherwise
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::from_yaml_file(path),
            None => Ok(Taxonomy::builtin()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Add an input file
    pub fn add_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.inputs.push(input.into());
        self
    }

    /// Set all input files
    pub fn inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.config.inputs = inputs;
        self
    }

    /// Set the taxonomy override file
    pub fn taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.taxonomy_path = Some(path.into());
        self
    }

    /// Set the filter alias
    pub fn filter_alias(mut self, alias: FilterAlias) -> Self {
        self.config.filter_alias = alias;
        self
    }

    /// Set the filter alias from string
    pub fn filter_alias_str(mut self, alias: &str) -> Self {
        self.config.filter_alias = FilterAlias::from(alias);
        self
    }

    /// Set the sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.sort_order = order;
        self
    }

    /// Set sort order from string
    pub fn sort_order_str(mut self, order: &str) -> Result<Self> {
        self.config.sort_order = SortOrder::from(order);
        Ok(self)
    }

    /// Set the limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Clear the limit
    pub fn no_limit(mut self) -> Self {
        self.config.limit = None;
        self
    }

    /// Keep only the given categories
    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.config.categories = categories;
        self
    }

    /// Set category constraints from comma-separated identifiers
    pub fn categories_str(mut self, categories: &str) -> Result<Self> {
        if categories.is_empty() {
            self.config.categories = vec![];
            return Ok(self);
        }

        let parsed: Result<Vec<Category>> = categories
            .split(',')
            .map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(Error::Config("Empty category value".to_string()));
                }
                Category::from_id(trimmed).ok_or_else(|| {
                    Error::Config(format!(
                        "Invalid category '{}'. Allowed values are: {}",
                        trimmed,
                        Category::all()
                            .iter()
                            .map(|category| category.as_id())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                })
            })
            .collect();

        self.config.categories = parsed?;
        Ok(self)
    }

    /// Keep only the given education types
    pub fn education_types(mut self, education_types: Vec<EducationType>) -> Self {
        self.config.education_types = education_types;
        self
    }

    /// Set education-type constraints from comma-separated identifiers
    pub fn education_types_str(mut self, education_types: &str) -> Result<Self> {
        if education_types.is_empty() {
            self.config.education_types = vec![];
            return Ok(self);
        }

        let parsed: Result<Vec<EducationType>> = education_types
            .split(',')
            .map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(Error::Config("Empty education type value".to_string()));
                }
                EducationType::from_id(trimmed).ok_or_else(|| {
                    Error::Config(format!(
                        "Invalid education type '{}'. Allowed values are: \
                         k12, higher-ed, vocational, mixed",
                        trimmed
                    ))
                })
            })
            .collect();

        self.config.education_types = parsed?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
