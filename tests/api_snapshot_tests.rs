use edubot::prelude::*;
use edubot::processor::classify_record;

use insta;

/// Snapshot test for a single classified entry structure
///
/// To update snapshots after making changes, run:
///   cargo insta review
#[test]
fn test_classified_bill_structure() {
    let taxonomy = Taxonomy::builtin();
    let record = BillRecord {
        bill_id: Some(1234567),
        number: Some("HB0123".to_string()),
        title: "Tennessee Promise Expansion Act".to_string(),
        description: Some(
            "Expands eligibility for the tuition-free community college program".to_string(),
        ),
        last_action: Some("Passed Senate".to_string()),
        last_action_date: Some("2025-03-14".to_string()),
        url: Some("https://legiscan.com/TN/bill/HB0123".to_string()),
    };

    let entry = classify_record(&taxonomy, record);

    // Use assert_json_snapshot! for structured data
    insta::assert_json_snapshot!("classified_bill_structure", &entry);
}

/// Snapshot test for education-type serialization
#[test]
fn test_education_type_serialization() {
    let types = vec![
        EducationType::K12,
        EducationType::HigherEd,
        EducationType::Vocational,
        EducationType::Mixed,
    ];

    insta::assert_json_snapshot!("education_types", &types);
}

/// Snapshot test for the category taxonomy order
#[test]
fn test_category_order() {
    let ids: Vec<&str> = Category::all().iter().map(|category| category.as_id()).collect();

    insta::assert_json_snapshot!("category_order", &ids);
}
