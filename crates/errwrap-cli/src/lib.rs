//! errwrap command-line interface.
//!
pub mod report;

use std::str::FromStr;

use anyhow::{Result, bail};
use strum::IntoEnumIterator;
use tracing::debug;

use errwrap_dao::{NoRowsPolicy, Scenario};

pub use report::ScenarioReport;

/// Options for running errwrap.
#[derive(Debug, Clone, Default)]
pub struct ErrwrapOptions {
    /// Scenario names; empty runs all of them.
    pub scenarios: Vec<String>,
    pub chain: bool,
    pub json: bool,
    pub policy: Option<String>,
    /// Extra attempts for transient failures.
    pub retries: u32,
}

fn select_scenarios(names: &[String]) -> Result<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(Scenario::iter().collect());
    }

    names
        .iter()
        .map(|name| match Scenario::from_str(name) {
            Ok(scenario) => Ok(scenario),
            Err(_) => {
                let known: Vec<&str> = Scenario::iter().map(|s| s.as_str()).collect();
                bail!("Unknown scenario: {name}. Use one of: {}", known.join(", "))
            }
        })
        .collect()
}

fn parse_policy(policy: Option<&str>) -> Result<Option<NoRowsPolicy>> {
    match policy {
        None => Ok(None),
        Some(name) => match NoRowsPolicy::from_str(name) {
            Ok(policy) => Ok(Some(policy)),
            Err(_) => bail!("Unknown policy: {name}. Use 'ignore' or 'fail'"),
        },
    }
}

/// Main entry point
pub fn run_main(opts: &ErrwrapOptions) -> Result<String> {
    let scenarios = select_scenarios(&opts.scenarios)?;
    let policy = parse_policy(opts.policy.as_deref())?;

    let mut output = String::new();
    for scenario in scenarios {
        let Some(report) = ScenarioReport::collect(scenario, policy, opts.retries) else {
            debug!(%scenario, "scenario returned no error");
            continue;
        };
        debug!(%scenario, no_rows = report.no_rows, "scenario inspected");

        if opts.json {
            output.push_str(&serde_json::to_string(&report)?);
            output.push('\n');
        } else {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&report.to_text(opts.chain));
        }
    }

    Ok(output)
}
