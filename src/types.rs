use serde::{Deserialize, Serialize};

/// A bill record as returned by legislative data feeds.
///
/// Only `title` is required; everything else is carried through when present.
/// Classification reads `title` plus `description`, falling back to
/// `last_action` when no description is available (master lists often carry
/// only the latest action text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Provider-assigned numeric bill id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<u64>,
    /// Chamber bill number, e.g. "HB0123" or "SB 42"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Bill title
    pub title: String,
    /// Longer descriptive text, when the feed provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Latest recorded action text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    /// Date of the latest action (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action_date: Option<String>,
    /// Link to the bill on the provider site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BillRecord {
    /// Create a record from a bare title, for callers that have nothing else
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            bill_id: None,
            number: None,
            title: title.into(),
            description: None,
            last_action: None,
            last_action_date: None,
            url: None,
        }
    }

    /// The description-like text used for classification: the description
    /// when present, otherwise the latest action text.
    pub fn classification_text(&self) -> Option<&str> {
        self.description.as_deref().or(self.last_action.as_deref())
    }
}

/// Topical category assigned to an education bill.
///
/// Declaration order is the categorizer scan order: the first category whose
/// keyword list matches wins. `K12Curriculum` doubles as the fallback when
/// nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    K12Funding,
    K12Curriculum,
    Teachers,
    HigherEd,
    SpecialEd,
    SchoolSafety,
    CharterChoice,
    EarlyChildhood,
}

impl Category {
    /// All categories in categorizer scan order
    pub fn all() -> &'static [Category] {
        &[
            Category::K12Funding,
            Category::K12Curriculum,
            Category::Teachers,
            Category::HigherEd,
            Category::SpecialEd,
            Category::SchoolSafety,
            Category::CharterChoice,
            Category::EarlyChildhood,
        ]
    }

    /// The wire identifier for this category
    pub fn as_id(&self) -> &'static str {
        match self {
            Category::K12Funding => "k12-funding",
            Category::K12Curriculum => "k12-curriculum",
            Category::Teachers => "teachers",
            Category::HigherEd => "higher-ed",
            Category::SpecialEd => "special-ed",
            Category::SchoolSafety => "school-safety",
            Category::CharterChoice => "charter-choice",
            Category::EarlyChildhood => "early-childhood",
        }
    }

    /// Strict parser: `None` for unrecognized identifiers
    pub fn from_id(s: &str) -> Option<Category> {
        match s.to_lowercase().as_str() {
            "k12-funding" => Some(Category::K12Funding),
            "k12-curriculum" => Some(Category::K12Curriculum),
            "teachers" => Some(Category::Teachers),
            "higher-ed" => Some(Category::HigherEd),
            "special-ed" => Some(Category::SpecialEd),
            "school-safety" => Some(Category::SchoolSafety),
            "charter-choice" => Some(Category::CharterChoice),
            "early-childhood" => Some(Category::EarlyChildhood),
            _ => None,
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from_id(s).unwrap_or_default()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::K12Curriculum
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_id())
    }
}

/// Coarse education-type classification, distinct from the topical category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationType {
    K12,
    HigherEd,
    Vocational,
    Mixed,
}

impl EducationType {
    /// The wire identifier for this type
    pub fn as_id(&self) -> &'static str {
        match self {
            EducationType::K12 => "k12",
            EducationType::HigherEd => "higher-ed",
            EducationType::Vocational => "vocational",
            EducationType::Mixed => "mixed",
        }
    }

    /// Strict parser: `None` for unrecognized identifiers
    pub fn from_id(s: &str) -> Option<EducationType> {
        match s.to_lowercase().as_str() {
            "k12" => Some(EducationType::K12),
            "higher-ed" => Some(EducationType::HigherEd),
            "vocational" => Some(EducationType::Vocational),
            "mixed" => Some(EducationType::Mixed),
            _ => None,
        }
    }
}

impl From<&str> for EducationType {
    fn from(s: &str) -> Self {
        EducationType::from_id(s).unwrap_or_default()
    }
}

impl Default for EducationType {
    fn default() -> Self {
        EducationType::K12
    }
}

impl std::fmt::Display for EducationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_id())
    }
}

/// A bill record together with its classification, as emitted by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBill {
    /// The original record, unmodified
    pub bill: BillRecord,
    /// Whether the relevance filter accepted the record
    pub is_education: bool,
    /// Topical category (first-match-wins over the taxonomy)
    pub category: Category,
    /// Display label for the category
    pub category_label: String,
    /// Coarse K-12 / higher-ed / vocational / mixed classification
    pub education_type: EducationType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::from_id(category.as_id()), Some(*category));
        }
    }

    #[test]
    fn test_category_from_str_falls_back_to_default() {
        assert_eq!(Category::from("not-a-category"), Category::K12Curriculum);
        assert_eq!(Category::from("TEACHERS"), Category::Teachers);
    }

    #[test]
    fn test_education_type_from_str_falls_back_to_default() {
        assert_eq!(EducationType::from("bogus"), EducationType::K12);
        assert_eq!(EducationType::from("higher-ed"), EducationType::HigherEd);
    }

    #[test]
    fn test_classification_text_prefers_description() {
        let mut record = BillRecord::from_title("Some bill");
        assert_eq!(record.classification_text(), None);

        record.last_action = Some("Referred to committee".to_string());
        assert_eq!(record.classification_text(), Some("Referred to committee"));

        record.description = Some("A longer description".to_string());
        assert_eq!(record.classification_text(), Some("A longer description"));
    }
}
