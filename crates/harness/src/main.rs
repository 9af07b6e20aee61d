use std::process::ExitCode;

use anyhow::Context;

use composite_smoke::{EXIT_HARNESS_ERROR, RunSummary, SmokeConfig, SmokeRunner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    composite_smoke_observability::init();

    match run().await {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "smoke run aborted");
            eprintln!("composite-smoke: {err:#}");
            ExitCode::from(EXIT_HARNESS_ERROR)
        }
    }
}

async fn run() -> anyhow::Result<RunSummary> {
    let config = SmokeConfig::from_env().context("failed to load configuration")?;
    let runner = SmokeRunner::new(config).context("failed to build http client")?;

    let stdout = std::io::stdout();
    let summary = runner
        .run(stdout.lock())
        .await
        .context("failed to write report")?;

    Ok(summary)
}
