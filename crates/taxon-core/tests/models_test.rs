use proptest::prelude::*;

use taxon_core::models::*;

fn sample_result(primary: &str) -> ClassificationResult {
    ClassificationResult {
        job_id: "job-1".into(),
        primary: primary.into(),
        confidence: 62,
        secondary: vec![],
        flags: ClassificationFlags::default(),
        reasoning: vec![],
        source: ClassificationSource::Scored,
        top_score: 62.0,
        dictionary_version: 1,
    }
}

#[test]
fn feedback_effective_category_follows_judgement() {
    let job = JobPosting::new("job-1", "Data Analyst");
    let confirmed = FeedbackRecord::confirm(&job, &sample_result("data"));
    assert_eq!(confirmed.effective_category(), "data");
    assert!(confirmed.was_correct());

    let corrected = FeedbackRecord::correct(&job, &sample_result("general"), "data");
    assert_eq!(corrected.effective_category(), "data");
    assert!(!corrected.was_correct());
    assert_eq!(corrected.status, FeedbackStatus::Pending);
}

#[test]
fn feedback_record_serde_roundtrip() {
    let job = JobPosting::new("job-9", "Blockchain Engineer").with_labels("technology");
    let record = FeedbackRecord::correct(&job, &sample_result("general"), "technology");
    let json = serde_json::to_string(&record).unwrap();
    let back: FeedbackRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn category_toml_normalizes_on_request() {
    let mut cat: Category = toml::from_str(
        r#"
id = " technology "
name = "Technology"
core = ["Software", "CLOUD"]
context_pairs = [["software", "developer"]]
"#,
    )
    .unwrap();
    cat.normalize();
    assert_eq!(cat.id, "technology");
    assert!(cat.core.contains("software"));
    assert!(cat.core.contains("cloud"));
    assert_eq!(cat.context_pairs.len(), 1);
}

#[test]
fn suggestion_key_identifies_change() {
    let s = DictionaryUpdateSuggestion {
        category_id: "technology".into(),
        action: SuggestionAction::AddSupportKeyword,
        update: DictionaryUpdate::keyword(KeywordTier::Support, "blockchain"),
        confidence: 0.5,
        supporting_feedback_ids: vec![],
        frequency: 5,
    };
    assert_eq!(s.key(), "technology:keyword:blockchain");
}

proptest! {
    #[test]
    fn prop_clamp_confidence_within_bounds(score in -1000.0f64..1000.0) {
        let c = clamp_confidence(score);
        prop_assert!(c <= 100);
    }

    #[test]
    fn prop_keyword_insert_is_idempotent(word in "[A-Za-z]{1,12}") {
        let mut cat = Category::new("c", "C");
        let first = cat.insert_keyword(KeywordTier::Core, &word);
        let second = cat.insert_keyword(KeywordTier::Core, &word.to_uppercase());
        prop_assert!(first);
        prop_assert!(!second);
        prop_assert_eq!(cat.core.len(), 1);
    }
}
