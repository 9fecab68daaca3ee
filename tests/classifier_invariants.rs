use edubot::prelude::*;

#[test]
fn accepts_teacher_text_without_exclusions() {
    assert!(is_education_bill("Teacher licensure reciprocity", None));
    assert!(is_education_bill(
        "An act relating to personnel",
        Some("Revises teacher evaluation procedures")
    ));
}

#[test]
fn rejects_co_opted_education_terms() {
    assert!(!is_education_bill("Continuing legal education", None));
    assert!(!is_education_bill(
        "Hunters Education Safety Course Requirements",
        Some("Requires certification before obtaining a hunting license")
    ));
}

#[test]
fn exception_terms_reopen_excluded_text() {
    // Exception term plus a positive keyword ("school") accepts
    assert!(is_education_bill(
        "Driver education in the school curriculum",
        None
    ));
    // Exception term alone is not enough without a positive keyword
    assert!(!is_education_bill(
        "Driver education programs for students",
        None
    ));
}

#[test]
fn classification_is_case_insensitive() {
    assert_eq!(
        is_education_bill("TEACHER SALARY INCREASE", None),
        is_education_bill("teacher salary increase", None)
    );
    assert_eq!(
        education_type("COMMUNITY COLLEGE TRANSFERS", None),
        education_type("community college transfers", None)
    );
}

#[test]
fn earlier_category_wins_on_overlap() {
    assert_eq!(
        categorize_bill("Teacher tenure review for university faculty", None),
        Category::Teachers
    );
}

#[test]
fn overlapping_type_sets_classify_as_mixed() {
    assert_eq!(
        education_type(
            "Dual credit alignment",
            Some("Aligns high school coursework with university admission requirements")
        ),
        EducationType::Mixed
    );
}

#[test]
fn unmatched_text_falls_back_to_defaults() {
    let title = "Memorial highway designation";
    assert!(!is_education_bill(title, None));
    assert_eq!(categorize_bill(title, None), Category::K12Curriculum);
    assert_eq!(education_type(title, None), EducationType::K12);
}

#[test]
fn batch_filter_preserves_order_and_records() {
    let records = vec![
        BillRecord::from_title("Memorial highway designation"),
        BillRecord::from_title("Teacher pay raise"),
        BillRecord::from_title("Tuition transparency"),
    ];
    let expected: Vec<BillRecord> = records[1..].to_vec();

    let kept = filter_education_bills(records);
    assert_eq!(kept, expected);
}

#[test]
fn tennessee_promise_end_to_end() {
    let title = "Tennessee Promise Expansion Act";
    let description = Some(
        "Expands eligibility for the tuition-free community college program \
         to include part-time students",
    );

    assert!(is_education_bill(title, description));
    assert_eq!(education_type(title, description), EducationType::HigherEd);
    assert_eq!(categorize_bill(title, description), Category::HigherEd);
}

#[test]
fn category_info_covers_every_category() {
    for category in Category::all() {
        let info = category_info(*category);
        assert_eq!(info.id, *category);
        assert!(!info.label.is_empty());
        assert!(!info.color.is_empty());
    }
}
