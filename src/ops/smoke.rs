use reqwest::Client;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{CheckReport, CheckResult};
use crate::submissions::SubmissionOutcome;

/// What a submission endpoint must answer for a check to pass.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedResponse<'a> {
    pub status: u16,
    /// Substring the `error` field must contain, for expected failures.
    pub error: Option<&'a str>,
}

#[tracing::instrument(name = "Running a smoke test submission", skip(client, body))]
pub async fn check_submission(
    client: &Client,
    base_url: &str,
    path: &str,
    body: &Value,
    expected: ExpectedResponse<'_>,
    name: &str,
) -> CheckResult {
    let response = match client
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => return CheckResult::fail(name, err.to_string()),
    };

    let status = response.status().as_u16();
    let outcome: SubmissionOutcome<Value> = match response.json().await {
        Ok(outcome) => outcome,
        Err(err) => return CheckResult::fail(name, format!("unexpected body: {}", err)),
    };

    if status != expected.status {
        return CheckResult::fail(
            name,
            format!(
                "expected status {}, got {} ({})",
                expected.status,
                status,
                outcome.error.unwrap_or_default()
            ),
        );
    }

    match (expected.error, outcome.error) {
        (None, _) if outcome.success => CheckResult::pass(name, format!("status {}", status)),
        (Some(needle), Some(error)) if !outcome.success && error.contains(needle) => {
            CheckResult::pass(name, error)
        }
        (_, error) => CheckResult::fail(
            name,
            format!(
                "unexpected result: success={} error={:?}",
                outcome.success, error
            ),
        ),
    }
}

fn founder_body(email: &str) -> Value {
    json!({
        "fullName": "Smoke Test",
        "workEmail": email,
        "companyName": "Smoke Test Inc",
        "website": "https://example.com",
        "sector": ["Other"],
        "fundingStage": "Pre-seed",
        "location": "Remote",
        "shortPitch": "Automated post-deployment smoke test submission."
    })
}

/// Submits real records through the public API, then deletes them.
pub async fn run_smoke_test(db_pool: &PgPool, client: &Client, base_url: &str) -> CheckReport {
    let email = format!("smoke-test-{}@example.com", Uuid::new_v4());
    let founder = founder_body(&email);
    let subscription = json!({ "email": email, "source": "smoke-test" });
    let mut report = CheckReport::new();

    let created = ExpectedResponse {
        status: 201,
        error: None,
    };

    report.push(
        check_submission(
            client,
            base_url,
            "/applications/founders",
            &founder,
            created,
            "founder submission",
        )
        .await,
    );
    report.push(
        check_submission(
            client,
            base_url,
            "/applications/founders",
            &founder,
            ExpectedResponse {
                status: 409,
                error: Some("already exists"),
            },
            "founder duplicate prevention",
        )
        .await,
    );
    report.push(
        check_submission(
            client,
            base_url,
            "/newsletter/subscriptions",
            &subscription,
            created,
            "newsletter subscription",
        )
        .await,
    );
    report.push(
        check_submission(
            client,
            base_url,
            "/newsletter/subscriptions",
            &subscription,
            ExpectedResponse {
                status: 409,
                error: Some("already subscribed"),
            },
            "newsletter duplicate prevention",
        )
        .await,
    );
    report.push(clean_up(db_pool, &email).await);

    report
}

#[tracing::instrument(name = "Deleting smoke test records", skip(db_pool))]
async fn clean_up(db_pool: &PgPool, email: &str) -> CheckResult {
    let deleted = async {
        let founders = sqlx::query("DELETE FROM founder_applications WHERE work_email = $1")
            .bind(email)
            .execute(db_pool)
            .await?
            .rows_affected();
        let subscriptions = sqlx::query("DELETE FROM newsletter_subscriptions WHERE email = $1")
            .bind(email)
            .execute(db_pool)
            .await?
            .rows_affected();

        Ok::<u64, sqlx::Error>(founders + subscriptions)
    }
    .await;

    match deleted {
        Ok(rows) => CheckResult::pass("cleanup", format!("{} rows deleted", rows)),
        Err(err) => CheckResult::fail("cleanup", err.to_string()),
    }
}
