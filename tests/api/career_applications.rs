use serde_json::{json, Value};
use wiremock::matchers::{any, method, path_regex};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{career_body, failed_fields, outcome, TestApp};
use founder_match::domain::career_application::CareerApplication;
use founder_match::routes::StoredFile;
use founder_match::submissions::MAX_CV_BYTES;

#[tokio::test]
async fn cv_upload_returns_the_stored_url() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/cvs/.+-linus-cv\.pdf$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://blob.example.com/cvs/linus-cv.pdf"
        })))
        .expect(1)
        .mount(&test_app.blob_server)
        .await;

    let response = test_app
        .upload_cv("linus cv.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await;

    assert_eq!(201, response.status().as_u16());
    assert_eq!(
        outcome::<StoredFile>(response).await.data.unwrap().url,
        "https://blob.example.com/cvs/linus-cv.pdf"
    );
}

#[tokio::test]
async fn cv_upload_failure_is_surfaced() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.blob_server)
        .await;

    let response = test_app
        .upload_cv("cv.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await;

    assert_eq!(502, response.status().as_u16());

    let outcome = outcome::<Value>(response).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Failed to upload file"));
}

#[tokio::test]
async fn cv_upload_rejects_unsupported_files() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.blob_server)
        .await;

    let unsupported = test_app
        .upload_cv("cv.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
        .await;
    let empty = test_app.upload_cv("cv.pdf", "application/pdf", Vec::new()).await;

    assert_eq!(415, unsupported.status().as_u16());
    assert_eq!(
        outcome::<Value>(unsupported).await.error.as_deref(),
        Some("Unsupported file type")
    );
    assert_eq!(400, empty.status().as_u16());
    assert_eq!(failed_fields(&outcome::<Value>(empty).await), vec!["file"]);
}

#[tokio::test]
async fn career_application_returns_201_and_keeps_the_cv_url() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_career_application(&career_body("linus@kernel.org", "Backend Engineer"))
        .await;

    assert_eq!(201, response.status().as_u16());

    let candidate = outcome::<CareerApplication>(response).await.data.unwrap();

    assert_eq!(
        candidate.cv_url.as_deref(),
        Some("https://blob.example.com/cvs/linus.pdf")
    );
    assert_eq!(candidate.position, "Backend Engineer");
}

#[tokio::test]
async fn same_email_may_apply_to_different_positions_once() {
    let test_app = TestApp::spawn_app().await;

    let first = test_app
        .post_career_application(&career_body("linus@kernel.org", "Backend Engineer"))
        .await;
    let other_position = test_app
        .post_career_application(&career_body("linus@kernel.org", "Platform Engineer"))
        .await;
    let duplicate = test_app
        .post_career_application(&career_body("linus@kernel.org", "Backend Engineer"))
        .await;

    assert_eq!(201, first.status().as_u16());
    assert_eq!(201, other_position.status().as_u16());
    assert_eq!(409, duplicate.status().as_u16());
    assert_eq!(
        outcome::<Value>(duplicate).await.error.as_deref(),
        Some("Career application already exists")
    );
    assert_eq!(test_app.store.careers.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn general_application_requires_motivation() {
    let test_app = TestApp::spawn_app().await;
    let mut body = career_body("linus@kernel.org", "general");
    body.as_object_mut().unwrap().remove("motivation");

    let response = test_app.post_career_application(&body).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        failed_fields(&outcome::<Value>(response).await),
        vec!["motivation"]
    );
}

#[tokio::test]
async fn malformed_portfolio_url_does_not_block_the_application() {
    let test_app = TestApp::spawn_app().await;
    let mut body = career_body("linus@kernel.org", "Backend Engineer");
    body["portfolioUrl"] = json!("my github");

    let response = test_app.post_career_application(&body).await;

    assert_eq!(201, response.status().as_u16());
    assert_eq!(
        test_app.store.careers.lock().unwrap()[0].portfolio_url.as_deref(),
        Some("my github")
    );
}

#[tokio::test]
async fn oversized_cv_is_rejected_with_a_result_object() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.blob_server)
        .await;

    let response = test_app
        .upload_cv("cv.pdf", "application/pdf", vec![b'a'; MAX_CV_BYTES + 1])
        .await;

    assert_eq!(413, response.status().as_u16());

    let outcome = outcome::<Value>(response).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("File is too large"));
}

#[tokio::test]
async fn cv_content_type_parameters_are_ignored() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/cvs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://blob.example.com/cvs/cv.pdf"
        })))
        .expect(1)
        .mount(&test_app.blob_server)
        .await;

    let response = test_app
        .upload_cv(
            "cv.pdf",
            "application/pdf; charset=binary",
            b"%PDF-1.4".to_vec(),
        )
        .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn mistyped_career_fields_are_reported_per_field() {
    let test_app = TestApp::spawn_app().await;
    let mut body = career_body("linus@kernel.org", "Backend Engineer");
    body["phone"] = json!(358_400_000);
    body["lastName"] = Value::Null;

    let response = test_app.post_career_application(&body).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        failed_fields(&outcome::<Value>(response).await),
        vec!["lastName", "phone"]
    );
}
