use serde_json::Value;

use crate::helpers::{founder_body, investor_body, Failure, TestApp};
use founder_match::cohort::CohortStats;
use founder_match::submissions::SubmissionOutcome;

#[tokio::test]
async fn cohort_stats_count_founders_and_investors() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_founder_application(&founder_body("ada@analytical.io"))
        .await;
    test_app
        .post_founder_application(&founder_body("charles@analytical.io"))
        .await;
    test_app
        .post_investor_application(&investor_body("grace@cobol.vc"))
        .await;

    let response = test_app.get_cohort_stats().await;

    assert_eq!(200, response.status().as_u16());

    let outcome: SubmissionOutcome<CohortStats> = response.json().await.unwrap();

    assert_eq!(outcome.data, Some(CohortStats::from_counts(2, 1, 100)));
}

#[tokio::test]
async fn cohort_stats_failure_returns_500() {
    let test_app = TestApp::spawn_app().await;
    test_app.store.fail_with(Failure::Timeout);

    let response = test_app.get_cohort_stats().await;

    assert_eq!(500, response.status().as_u16());

    let body: Value = response.json().await.unwrap();

    assert_eq!(body["error"], "Failed to load cohort stats");
}
