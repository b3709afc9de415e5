use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{failed_fields, investor_body, outcome, TestApp};
use founder_match::domain::investor_application::InvestorApplication;

#[tokio::test]
async fn investor_application_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_investor_application(&investor_body("grace@cobol.vc"))
        .await;

    assert_eq!(201, response.status().as_u16());

    let investor = outcome::<InvestorApplication>(response).await.data.unwrap();

    assert_eq!(investor.work_email, "grace@cobol.vc");
    assert_eq!(investor.other_source, None);
    assert_eq!(test_app.store.investors.lock().unwrap().len(), 1);
    assert_eq!(test_app.wait_for_emails(2).await.len(), 2);
}

#[tokio::test]
async fn investor_application_requires_non_empty_selections() {
    let test_app = TestApp::spawn_app().await;
    let mut body = investor_body("grace@cobol.vc");
    body["investmentFocus"] = json!([]);
    body["targetGeography"] = json!([]);

    let response = test_app.post_investor_application(&body).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        failed_fields(&outcome::<Value>(response).await),
        vec!["investmentFocus", "targetGeography"]
    );
}

#[tokio::test]
async fn investor_application_returns_400_when_body_require_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    let test_cases = vec!["title", "ticketSize", "referralSource"];

    for field in test_cases {
        let mut body = investor_body("grace@cobol.vc");
        body.as_object_mut().unwrap().remove(field);

        let response = test_app.post_investor_application(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when {} was missing",
            field
        );
        assert_eq!(
            failed_fields(&outcome::<Value>(response).await),
            vec![field.to_string()]
        );
    }
}

#[tokio::test]
async fn submitting_the_same_investor_twice_is_rejected() {
    let test_app = TestApp::spawn_app().await;
    let body = investor_body("grace@cobol.vc");

    let first = test_app.post_investor_application(&body).await;
    let second = test_app.post_investor_application(&body).await;

    assert_eq!(201, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
    assert_eq!(
        outcome::<Value>(second).await.error.as_deref(),
        Some("Investor application already exists")
    );
    assert_eq!(test_app.store.investors.lock().unwrap().len(), 1);
}
