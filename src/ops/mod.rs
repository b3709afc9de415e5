//! Post-deployment checks run by the `ops` binary against a live instance.

mod health;
mod smoke;

pub use health::{check_database, check_route, run_health_check};
pub use smoke::{check_submission, run_smoke_test, ExpectedResponse};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {}: {}", status, self.name, self.detail)
    }
}

#[derive(Debug, Default)]
pub struct CheckReport {
    checks: Vec<CheckResult>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    pub fn merge(&mut self, other: CheckReport) {
        self.checks.extend(other.checks);
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    /// An empty report counts as failed: nothing was verified.
    pub fn all_passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|check| check.passed)
    }
}
