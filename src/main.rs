mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::github::GithubActionOutput;

#[derive(Parser)]
#[command(
    name = "relnotes",
    author,
    version,
    about = "Assemble a release changelog from git commit trailers"
)]
struct Cli {
    /// Run against this directory instead of the current one.
    #[arg(short = 'C', long = "dir")]
    dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    // RUNNER_DEBUG is how the Actions runner asks for verbose step logs.
    let default_level = if std::env::var_os("RUNNER_DEBUG").is_some_and(|value| value == "1") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.dir)?;

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let outputs = Arc::new(GithubActionOutput::new(config.github_output.clone()));
    let context = AppContext::new(config, git, outputs);

    let outcome = workflow::changelog::build_release_notes(&context).await?;

    context.outputs.set_output("changes", &outcome.changes)?;
    context.outputs.set_output("subject", &outcome.subject)?;

    Ok(())
}
