//! Per-scenario reports, as text or JSON lines.

use std::fmt::Write;

use serde::Serialize;

use errwrap_dao::{NoRowsPolicy, Scenario, absorb_no_rows, is_no_rows, retry_query};
use errwrap_error::{chain, describe, describe_level};

/// What the business layer concluded about one scenario.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub kind: &'static str,
    pub message: String,
    pub no_rows: bool,
    pub status: &'static str,
    pub retryable: bool,
    pub chain: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl ScenarioReport {
    /// Run `scenario`, retrying transient failures up to `retries` times, and
    /// inspect the error it ends with.
    ///
    /// Returns `None` if the stub unexpectedly succeeds.
    pub fn collect(
        scenario: Scenario,
        policy: Option<NoRowsPolicy>,
        retries: u32,
    ) -> Option<Self> {
        let err = retry_query(retries, || scenario.run()).err()?;

        let mut report = Self {
            scenario: scenario.as_str(),
            kind: err.kind().as_str(),
            message: describe(&err),
            no_rows: is_no_rows(&err),
            status: err.status().as_str(),
            retryable: err.is_retryable(),
            chain: chain(&err).map(describe_level).collect(),
            outcome: None,
        };

        if let Some(policy) = policy {
            report.outcome = Some(match absorb_no_rows(Err::<(), _>(err), policy) {
                Ok(_) => "continue".to_string(),
                Err(err) => format!("abort ({})", err.context()),
            });
        }

        Some(report)
    }

    pub fn to_text(&self, with_chain: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}] {}", self.scenario, self.message);
        let _ = writeln!(out, "  kind: {}", self.kind);
        let _ = writeln!(out, "  no rows: {}", self.no_rows);
        let _ = writeln!(out, "  status: {}", self.status);
        if let Some(outcome) = &self.outcome {
            let _ = writeln!(out, "  outcome: {outcome}");
        }
        if with_chain {
            let _ = writeln!(out, "  chain:");
            for (depth, level) in self.chain.iter().enumerate() {
                let _ = writeln!(out, "    {depth}: {level}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_no_rows() {
        let report = ScenarioReport::collect(Scenario::NoRows, None, 0).unwrap();
        assert_eq!(report.kind, "NoRows");
        assert!(report.no_rows);
        assert_eq!(report.status, "permanent");
        assert_eq!(
            report.chain,
            vec![
                "query_returning_no_rows (dao::query_returning_no_rows)",
                "no rows in result set"
            ]
        );
        assert_eq!(report.outcome, None);
    }

    #[test]
    fn test_outcome_by_policy() {
        let ignore =
            ScenarioReport::collect(Scenario::NoRows, Some(NoRowsPolicy::Ignore), 0).unwrap();
        assert_eq!(ignore.outcome.as_deref(), Some("continue"));

        let fail =
            ScenarioReport::collect(Scenario::NoRows, Some(NoRowsPolicy::Fail), 0).unwrap();
        assert_eq!(fail.outcome.as_deref(), Some("abort (required record missing)"));
    }

    #[test]
    fn test_text_without_chain() {
        let report = ScenarioReport::collect(Scenario::InvalidQuery, None, 0).unwrap();
        let text = report.to_text(false);
        assert!(text.starts_with("[invalid-query] err: dao: invalid query"));
        assert!(text.contains("no rows: false"));
        assert!(!text.contains("chain:"));
    }

    #[test]
    fn test_refused_connection_persists_after_retries() {
        let once = ScenarioReport::collect(Scenario::ConnectionRefused, None, 0).unwrap();
        assert_eq!(once.status, "temporary");
        assert!(once.retryable);

        let retried = ScenarioReport::collect(Scenario::ConnectionRefused, None, 2).unwrap();
        assert_eq!(retried.status, "persistent");
        assert!(!retried.retryable);
        assert!(!retried.no_rows);
    }
}
