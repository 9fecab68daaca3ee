use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Category, EducationType};

/// K-12 terms. "school" is deliberately broad; it also covers compound
/// phrases like "public schools" and "school district" via substring match.
const K12_KEYWORDS: &[&str] = &[
    "school",
    "teacher",
    "k-12",
    "kindergarten",
    "elementary",
    "middle school",
    "high school",
    "classroom",
    "pupil",
    "truancy",
    "school district",
    "school board",
];

/// Higher-education terms, including Tennessee-specific program names
const HIGHER_ED_KEYWORDS: &[&str] = &[
    "college",
    "university",
    "tuition",
    "higher education",
    "postsecondary",
    "community college",
    "student loan",
    "financial aid",
    "campus",
    "tennessee promise",
    "tennessee reconnect",
    "hope scholarship",
];

/// Vocational and technical-training terms
const VOCATIONAL_KEYWORDS: &[&str] = &[
    "vocational",
    "career and technical",
    "technical education",
    "tcat",
    "college of applied technology",
    "apprenticeship",
    "workforce development",
    "trade school",
    "job training",
    "skilled trades",
    "certificate program",
];

/// Terms indicating a different domain co-opting the word "education".
/// A match here rejects the record unless an exception term also matches.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "driver education",
    "driver's education",
    "hunter education",
    "hunters education",
    "boater education",
    "continuing legal education",
    "continuing medical education",
    "continuing professional education",
    "prison education",
    "inmate education",
];

/// Terms that mark a superficially-excluded record as genuinely
/// school-related, e.g. driver education taught as part of a curriculum
const EXCEPTION_KEYWORDS: &[&str] = &[
    "school-based",
    "in schools",
    "in public schools",
    "school curriculum",
    "students",
];

/// Per-category keyword lists, in categorizer scan order. The first category
/// whose list matches wins; within a list, earlier terms are checked first.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::K12Funding,
        &[
            "school funding",
            "education funding",
            "basic education program",
            "investment in student achievement",
            "funding formula",
            "per-pupil",
            "school budget",
        ],
    ),
    (
        Category::K12Curriculum,
        &[
            "curriculum",
            "instruction",
            "textbook",
            "academic standards",
            "coursework",
            "literacy",
            "phonics",
            "student testing",
            "assessment",
            "graduation requirements",
            "civics education",
        ],
    ),
    (
        Category::Teachers,
        &[
            "teacher",
            "educator",
            "teaching",
            "tenure",
            "licensure",
            "professional development",
            "paraprofessional",
        ],
    ),
    (
        Category::HigherEd,
        &[
            "college",
            "university",
            "tuition",
            "higher education",
            "postsecondary",
            "campus",
            "student loan",
            "financial aid",
            "scholarship",
        ],
    ),
    (
        Category::SpecialEd,
        &[
            "special education",
            "individualized education",
            "iep",
            "disability",
            "disabilities",
            "dyslexia",
            "504 plan",
        ],
    ),
    (
        Category::SchoolSafety,
        &[
            "school safety",
            "school resource officer",
            "school security",
            "safe schools",
            "bullying",
            "active shooter",
            "student discipline",
            "expulsion",
        ],
    ),
    (
        Category::CharterChoice,
        &[
            "charter",
            "voucher",
            "school choice",
            "education savings account",
            "education freedom",
            "homeschool",
            "home school",
            "open enrollment",
        ],
    ),
    (
        Category::EarlyChildhood,
        &[
            "pre-k",
            "pre-kindergarten",
            "preschool",
            "early childhood",
            "head start",
            "child care",
            "childcare",
            "daycare",
        ],
    ),
];

/// Display metadata for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub label: &'static str,
    pub color: &'static str,
}

/// Indexed by `Category` discriminant; order must match `Category::all()`
const CATEGORY_INFO: &[CategoryInfo] = &[
    CategoryInfo {
        id: Category::K12Funding,
        label: "K-12 Funding",
        color: "emerald",
    },
    CategoryInfo {
        id: Category::K12Curriculum,
        label: "Curriculum & Instruction",
        color: "blue",
    },
    CategoryInfo {
        id: Category::Teachers,
        label: "Teachers & Staffing",
        color: "amber",
    },
    CategoryInfo {
        id: Category::HigherEd,
        label: "Higher Education",
        color: "purple",
    },
    CategoryInfo {
        id: Category::SpecialEd,
        label: "Special Education",
        color: "teal",
    },
    CategoryInfo {
        id: Category::SchoolSafety,
        label: "School Safety",
        color: "red",
    },
    CategoryInfo {
        id: Category::CharterChoice,
        label: "Charters & School Choice",
        color: "orange",
    },
    CategoryInfo {
        id: Category::EarlyChildhood,
        label: "Early Childhood",
        color: "rose",
    },
];

/// Get display metadata for a category
pub fn category_info(category: Category) -> &'static CategoryInfo {
    &CATEGORY_INFO[category as usize]
}

/// Build the lowercase search text from a title and optional description
fn search_text(title: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("{} {}", title, description).to_lowercase(),
        None => title.to_lowercase(),
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

fn to_lowercase_set(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|keyword| keyword.to_lowercase()).collect()
}

/// Keyword sets driving relevance filtering, categorization, and type
/// classification. Immutable once constructed; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    k12: Vec<String>,
    higher_ed: Vec<String>,
    vocational: Vec<String>,
    exclude: Vec<String>,
    exception: Vec<String>,
    categories: Vec<(Category, Vec<String>)>,
}

/// Keyword set overrides, parsed from `edubot.yml`
#[derive(Debug, Default, Deserialize)]
struct RawKeywordSets {
    #[serde(default)]
    k12: Vec<String>,
    #[serde(default, rename = "higher-ed")]
    higher_ed: Vec<String>,
    #[serde(default)]
    vocational: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    exception: Vec<String>,
}

/// Top-level taxonomy override file shape
#[derive(Debug, Default, Deserialize)]
struct RawTaxonomy {
    #[serde(default)]
    keywords: RawKeywordSets,
    #[serde(default)]
    categories: HashMap<String, Vec<String>>,
}

impl Taxonomy {
    /// The built-in keyword tables
    pub fn builtin() -> Self {
        Self {
            k12: to_lowercase_set(K12_KEYWORDS),
            higher_ed: to_lowercase_set(HIGHER_ED_KEYWORDS),
            vocational: to_lowercase_set(VOCATIONAL_KEYWORDS),
            exclude: to_lowercase_set(EXCLUDE_KEYWORDS),
            exception: to_lowercase_set(EXCEPTION_KEYWORDS),
            categories: CATEGORY_KEYWORDS
                .iter()
                .map(|(category, keywords)| (*category, to_lowercase_set(keywords)))
                .collect(),
        }
    }

    /// Load a taxonomy from an `edubot.yml` override file. Non-empty sections
    /// replace the built-in keyword lists; the category set and scan order
    /// are fixed, so unknown category ids are rejected.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::TaxonomyNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse a taxonomy override from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: RawTaxonomy = serde_yaml::from_str(contents)?;

        let mut taxonomy = Self::builtin();
        if !raw.keywords.k12.is_empty() {
            taxonomy.k12 = lowercase_owned(raw.keywords.k12);
        }
        if !raw.keywords.higher_ed.is_empty() {
            taxonomy.higher_ed = lowercase_owned(raw.keywords.higher_ed);
        }
        if !raw.keywords.vocational.is_empty() {
            taxonomy.vocational = lowercase_owned(raw.keywords.vocational);
        }
        if !raw.keywords.exclude.is_empty() {
            taxonomy.exclude = lowercase_owned(raw.keywords.exclude);
        }
        if !raw.keywords.exception.is_empty() {
            taxonomy.exception = lowercase_owned(raw.keywords.exception);
        }

        for (id, keywords) in raw.categories {
            let category = Category::from_id(&id).ok_or(Error::UnknownCategory(id))?;
            let entry = taxonomy
                .categories
                .iter_mut()
                .find(|(candidate, _)| *candidate == category);
            if let Some((_, list)) = entry {
                *list = lowercase_owned(keywords);
            }
        }

        Ok(taxonomy)
    }

    /// Decide whether a record's text is substantively about education.
    ///
    /// An exclude-term match with no exception term rejects immediately;
    /// otherwise at least one K-12, higher-ed, or vocational term must match.
    pub fn is_education(&self, title: &str, description: Option<&str>) -> bool {
        let text = search_text(title, description);

        if contains_any(&text, &self.exclude) && !contains_any(&text, &self.exception) {
            return false;
        }

        contains_any(&text, &self.k12)
            || contains_any(&text, &self.higher_ed)
            || contains_any(&text, &self.vocational)
    }

    /// Assign a topical category by first-match keyword scan.
    ///
    /// Categories are tried in declaration order and each keyword list in
    /// declaration order; the first match wins. Text matching nothing falls
    /// back to the default category.
    pub fn category(&self, title: &str, description: Option<&str>) -> Category {
        let text = search_text(title, description);

        for (category, keywords) in &self.categories {
            if contains_any(&text, keywords) {
                return *category;
            }
        }

        Category::default()
    }

    /// Classify as K-12, higher-ed, vocational, or mixed.
    ///
    /// Unlike `category`, all three keyword sets are evaluated so that
    /// overlap can be detected.
    pub fn education_type(&self, title: &str, description: Option<&str>) -> EducationType {
        let text = search_text(title, description);

        let k12 = contains_any(&text, &self.k12);
        let higher_ed = contains_any(&text, &self.higher_ed);
        let vocational = contains_any(&text, &self.vocational);

        match (k12 as u8) + (higher_ed as u8) + (vocational as u8) {
            0 => EducationType::default(),
            1 if k12 => EducationType::K12,
            1 if higher_ed => EducationType::HigherEd,
            1 => EducationType::Vocational,
            _ => EducationType::Mixed,
        }
    }

    /// The keyword list for one category, in scan order
    pub fn category_keywords(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lowercase_owned(keywords: Vec<String>) -> Vec<String> {
    keywords.into_iter().map(|keyword| keyword.to_lowercase()).collect()
}

/// Get the shared built-in taxonomy, initializing it on first use
pub fn default_taxonomy() -> &'static Taxonomy {
    static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
    BUILTIN.get_or_init(Taxonomy::builtin)
}

/// Decide whether a record is substantively about education, using the
/// built-in taxonomy
pub fn is_education_bill(title: &str, description: Option<&str>) -> bool {
    default_taxonomy().is_education(title, description)
}

/// Assign a topical category, using the built-in taxonomy
pub fn categorize_bill(title: &str, description: Option<&str>) -> Category {
    default_taxonomy().category(title, description)
}

/// Classify as K-12 / higher-ed / vocational / mixed, using the built-in
/// taxonomy
pub fn education_type(title: &str, description: Option<&str>) -> EducationType {
    default_taxonomy().education_type(title, description)
}
