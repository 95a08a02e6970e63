// Entrypoint for the CLI application.
// - Usage problems print the usage text and exit with status 1 before any
//   request is made.
// - Service failures are printed to stderr; the exit status stays 0.

use anyhow::Context;
use gmail_settings::api::ApiClient;
use gmail_settings::cli::{self, Args, Plan, Request, UsageError};
use gmail_settings::config::ServiceConfig;
use gmail_settings::service::Result as ServiceResult;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (request, plan) = match prepare(std::env::args_os()) {
        Ok(ready) => ready,
        Err(err) => {
            tracing::debug!(%err, "usage error");
            if let Some(preamble) = cli::usage_preamble(&err) {
                println!("{}", preamble);
            }
            println!("{}", cli::USAGE);
            return Ok(ExitCode::from(1));
        }
    };

    let api = ApiClient::new(ServiceConfig::from_env(), &request.domain)
        .context("Failed to build HTTP client")?;
    if let Err(err) = run(api, &request, &plan) {
        eprintln!("{}", err);
    }
    Ok(ExitCode::SUCCESS)
}

fn prepare(args: std::env::ArgsOs) -> Result<(Request, Plan), UsageError> {
    let request = Request::from_args(Args::parse_from_args(args)?)?;
    let plan = request.plan()?;
    Ok((request, plan))
}

/// Log in and perform the planned operation. The spinner is drawn on
/// stderr and cleared before results are printed.
fn run(mut api: ApiClient, request: &Request, plan: &Plan) -> ServiceResult<()> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Logging in...");

    let result = api.login(&request.username, &request.password).and_then(|()| {
        spinner.set_message("Talking to the settings service...");
        let mut out = Vec::new();
        cli::execute(plan, &api, &mut out).map(|()| out)
    });
    spinner.finish_and_clear();

    let out = result?;
    print!("{}", String::from_utf8_lossy(&out));
    Ok(())
}
