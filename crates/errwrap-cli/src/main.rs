use clap::Parser;

use errwrap_cli::{ErrwrapOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "errwrap",
    about = "errwrap: see which data-layer errors hide a 'no rows' underneath",
    version
)]
pub struct Cli {
    /// Scenario to run (repeatable): 'no-rows', 'invalid-query', 'no-rows-wrapped',
    /// 'connection-refused'
    #[arg(
        short = 's',
        long = "scenario",
        value_name = "NAME",
        action = clap::ArgAction::Append
    )]
    scenarios: Vec<String>,

    /// Print every level of each error chain
    #[arg(long, default_value_t = false)]
    chain: bool,

    /// Emit one JSON object per scenario
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show what the business layer does on no rows: 'ignore' or 'fail'
    #[arg(long, value_name = "POLICY")]
    policy: Option<String>,

    /// Re-run a query this many times while it fails transiently
    #[arg(long, value_name = "N", default_value_t = 0)]
    retries: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = ErrwrapOptions {
        scenarios: args.scenarios,
        chain: args.chain,
        json: args.json,
        policy: args.policy,
        retries: args.retries,
    };

    let output = run_main(&opts)?;
    print!("{output}");
    tracing::info!(bytes = output.len(), "complete");
    Ok(())
}
