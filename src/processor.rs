use std::cmp::Ordering;
use std::sync::OnceLock;

use async_stream::stream;
use chrono::NaiveDate;
use futures::Stream;
use regex::Regex;

use crate::config::{Config, SortOrder};
use crate::error::{Error, Result};
use crate::filter::{FilterManager, FilterResult};
use crate::selectors::bill_record_select_default;
use crate::taxonomy::{category_info, Taxonomy};
use crate::types::{BillRecord, ClassifiedBill};

/// Classify a single record against a taxonomy
pub fn classify_record(taxonomy: &Taxonomy, bill: BillRecord) -> ClassifiedBill {
    let description = bill.classification_text();
    let is_education = taxonomy.is_education(&bill.title, description);
    let category = taxonomy.category(&bill.title, description);
    let education_type = taxonomy.education_type(&bill.title, description);
    let category_label = category_info(category).label.to_string();

    ClassifiedBill {
        bill,
        is_education,
        category,
        category_label,
        education_type,
    }
}

/// Split a bill number like "HB0123" into a (chamber, value) sort key
pub fn parse_bill_number(number: &str) -> Option<(String, u64)> {
    static BILL_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    let re = BILL_NUMBER_RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)\s*0*(\d+)$").unwrap());

    let caps = re.captures(number.trim())?;
    let chamber = caps.get(1)?.as_str().to_uppercase();
    let value = caps.get(2)?.as_str().parse().ok()?;
    Some((chamber, value))
}

/// Main processor for bill record feeds
pub struct BillProcessor {
    config: Config,
}

impl BillProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process the configured input files and return a reactive stream of
    /// classified entries. Per-input read or parse failures are yielded as
    /// errors without aborting the rest of the stream.
    pub fn process(&self) -> impl Stream<Item = Result<ClassifiedBill>> {
        let config = self.config.clone();
        Box::pin(stream! {
            let taxonomy = match config.load_taxonomy() {
                Ok(taxonomy) => taxonomy,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            let manager = FilterManager::from_config(&config, taxonomy.clone());

            let mut records = Vec::new();
            for input in &config.inputs {
                let contents = match tokio::fs::read_to_string(input).await {
                    Ok(contents) => contents,
                    Err(e) => {
                        yield Err(Error::Io(e));
                        continue;
                    }
                };

                match Self::parse_document(&contents) {
                    Ok(parsed) => records.extend(parsed),
                    Err(e) => yield Err(e),
                }
            }

            for entry in Self::finalize_internal(&config, &taxonomy, &manager, records) {
                yield Ok(entry);
            }
        })
    }

    /// Process NDJSON record lines from stdin
    /// Useful for stdio pipelines: `curl ... | edubot classify --stdin`
    pub fn process_from_stdin(
        config: &Config,
        lines: impl Iterator<Item = String>,
    ) -> impl Stream<Item = Result<ClassifiedBill>> {
        let config = config.clone();
        let lines: Vec<String> = lines.collect();
        Box::pin(stream! {
            let taxonomy = match config.load_taxonomy() {
                Ok(taxonomy) => taxonomy,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            let manager = FilterManager::from_config(&config, taxonomy.clone());

            let mut records = Vec::new();
            for line in lines {
                if line.trim().is_empty() {
                    continue;
                }
                let value: serde_json::Value = match serde_json::from_str(&line) {
                    Ok(value) => value,
                    Err(e) => {
                        yield Err(Error::Json(e));
                        continue;
                    }
                };
                if let Some(record) = bill_record_select_default(&value) {
                    records.push(record);
                }
            }

            for entry in Self::finalize_internal(&config, &taxonomy, &manager, records) {
                yield Ok(entry);
            }
        })
    }

    /// Parse one input document: a JSON array of records, a master list
    /// object (optionally wrapped in {"masterlist": ...}, with its "session"
    /// entry skipped), a single record object, or NDJSON lines.
    fn parse_document(contents: &str) -> Result<Vec<BillRecord>> {
        match serde_json::from_str::<serde_json::Value>(contents) {
            Ok(serde_json::Value::Array(values)) => Ok(values
                .iter()
                .filter_map(bill_record_select_default)
                .collect()),
            Ok(serde_json::Value::Object(map)) => {
                if let Some(serde_json::Value::Object(masterlist)) = map.get("masterlist") {
                    return Ok(Self::collect_master_list(masterlist));
                }
                if let Some(record) = bill_record_select_default(&serde_json::Value::Object(
                    map.clone(),
                )) {
                    return Ok(vec![record]);
                }
                Ok(Self::collect_master_list(&map))
            }
            Ok(_) => Ok(Vec::new()),
            // Not a single JSON document; treat as NDJSON
            Err(_) => {
                let mut records = Vec::new();
                for line in contents.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let value: serde_json::Value = serde_json::from_str(line)?;
                    if let Some(record) = bill_record_select_default(&value) {
                        records.push(record);
                    }
                }
                Ok(records)
            }
        }
    }

    /// Collect records from a master-list object keyed by row index
    fn collect_master_list(map: &serde_json::Map<String, serde_json::Value>) -> Vec<BillRecord> {
        map.iter()
            .filter(|(key, _)| key.as_str() != "session")
            .filter_map(|(_, value)| bill_record_select_default(value))
            .collect()
    }

    /// Filter, classify, sort, and limit a batch of records
    fn finalize_internal(
        config: &Config,
        taxonomy: &Taxonomy,
        manager: &FilterManager,
        records: Vec<BillRecord>,
    ) -> Vec<ClassifiedBill> {
        let entries: Vec<ClassifiedBill> = records
            .into_iter()
            .filter(|record| manager.should_keep(record) == FilterResult::Keep)
            .map(|record| classify_record(taxonomy, record))
            .collect();

        let sorted = Self::sort_entries_internal(config, entries);
        Self::apply_limit_internal(config, sorted)
    }

    /// Sort entries by last-action date according to sort order.
    /// Entries without a parseable date sort last; bill number and title act
    /// as secondary keys to ensure deterministic ordering.
    fn sort_entries_internal(
        config: &Config,
        mut entries: Vec<ClassifiedBill>,
    ) -> Vec<ClassifiedBill> {
        match config.sort_order {
            SortOrder::Descending => {
                entries.sort_by(|a, b| match (Self::date_key(a), Self::date_key(b)) {
                    (Some(date_a), Some(date_b)) => {
                        date_b.cmp(&date_a).then_with(|| Self::tiebreak(a, b))
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Self::tiebreak(a, b),
                });
            }
            SortOrder::Ascending => {
                entries.sort_by(|a, b| match (Self::date_key(a), Self::date_key(b)) {
                    (Some(date_a), Some(date_b)) => {
                        date_a.cmp(&date_b).then_with(|| Self::tiebreak(a, b))
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Self::tiebreak(a, b),
                });
            }
        }
        entries
    }

    fn date_key(entry: &ClassifiedBill) -> Option<NaiveDate> {
        entry
            .bill
            .last_action_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }

    fn tiebreak(a: &ClassifiedBill, b: &ClassifiedBill) -> Ordering {
        Self::number_key(a)
            .cmp(&Self::number_key(b))
            .then_with(|| a.bill.title.cmp(&b.bill.title))
    }

    fn number_key(entry: &ClassifiedBill) -> (String, u64) {
        match entry.bill.number.as_deref() {
            Some(number) => {
                parse_bill_number(number).unwrap_or_else(|| (number.to_uppercase(), 0))
            }
            None => (String::new(), 0),
        }
    }

    /// Apply limit to entries
    fn apply_limit_internal(config: &Config, entries: Vec<ClassifiedBill>) -> Vec<ClassifiedBill> {
        if let Some(limit) = config.limit {
            entries.into_iter().take(limit).collect()
        } else {
            entries
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, EducationType};
    use futures::StreamExt;

    fn ndjson_lines(lines: &[&str]) -> impl Iterator<Item = String> {
        lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_bill_number() {
        assert_eq!(parse_bill_number("HB0123"), Some(("HB".to_string(), 123)));
        assert_eq!(parse_bill_number("sb 42"), Some(("SB".to_string(), 42)));
        assert_eq!(parse_bill_number("SJR0001"), Some(("SJR".to_string(), 1)));
        assert_eq!(parse_bill_number("not a number"), None);
    }

    #[test]
    fn test_parse_document_array() {
        let contents = r#"[
            {"title": "Teacher bonuses", "number": "HB1"},
            {"title": "Memorial highway designation", "number": "HB2"}
        ]"#;
        let records = BillProcessor::parse_document(contents).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Teacher bonuses");
    }

    #[test]
    fn test_parse_document_master_list() {
        let contents = r#"{
            "masterlist": {
                "0": {"bill_id": 1, "number": "HB1", "title": "School safety grants"},
                "1": {"bill_id": 2, "number": "SB2", "title": "Tuition freeze"},
                "session": {"session_id": 2024, "session_name": "114th General Assembly"}
            }
        }"#;
        let records = BillProcessor::parse_document(contents).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_document_single_record() {
        let contents = r#"{"title": "Charter school authorization", "number": "HB77"}"#;
        let records = BillProcessor::parse_document(contents).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number.as_deref(), Some("HB77"));
    }

    #[test]
    fn test_parse_document_ndjson() {
        let contents = "{\"title\": \"Teacher bonuses\"}\n\n{\"title\": \"Pre-k expansion\"}\n";
        let records = BillProcessor::parse_document(contents).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_stdin_pipeline_filters_and_sorts() {
        let config = Config::new();
        let lines = ndjson_lines(&[
            r#"{"title": "Memorial highway designation", "number": "HB9"}"#,
            r#"{"title": "Teacher pay raise", "number": "HB1", "last_action_date": "2025-01-10"}"#,
            r#"{"title": "Community college fee waiver", "number": "SB5", "last_action_date": "2025-02-20"}"#,
        ]);

        let entries: Vec<ClassifiedBill> = tokio_test::block_on(async {
            BillProcessor::process_from_stdin(&config, lines)
                .filter_map(|result| async move { result.ok() })
                .collect()
                .await
        });

        // The highway bill is filtered out; remaining entries sort by date
        // descending
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bill.title, "Community college fee waiver");
        assert_eq!(entries[0].education_type, EducationType::HigherEd);
        assert_eq!(entries[1].bill.title, "Teacher pay raise");
        assert_eq!(entries[1].category, Category::Teachers);
    }

    #[test]
    fn test_stdin_pipeline_respects_limit_and_alias() {
        let config = crate::config::ConfigBuilder::new()
            .filter_alias_str("none")
            .limit(1)
            .build()
            .unwrap();
        let lines = ndjson_lines(&[
            r#"{"title": "Memorial highway designation", "number": "HB9", "last_action_date": "2025-03-01"}"#,
            r#"{"title": "Teacher pay raise", "number": "HB1", "last_action_date": "2025-01-10"}"#,
        ]);

        let entries: Vec<ClassifiedBill> = tokio_test::block_on(async {
            BillProcessor::process_from_stdin(&config, lines)
                .filter_map(|result| async move { result.ok() })
                .collect()
            .await
        });

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bill.title, "Memorial highway designation");
        assert!(!entries[0].is_education);
    }

    #[test]
    fn test_stdin_pipeline_yields_error_for_bad_line() {
        let config = Config::new();
        let lines = ndjson_lines(&[
            "not json at all",
            r#"{"title": "Teacher pay raise"}"#,
        ]);

        let results: Vec<crate::error::Result<ClassifiedBill>> = tokio_test::block_on(async {
            BillProcessor::process_from_stdin(&config, lines).collect().await
        });

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(Error::Json(_))));
        assert!(results[1].is_ok());
    }
}
