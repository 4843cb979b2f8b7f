#![warn(missing_docs)]

//! `rosa` is a CLI to create and list managed services on Red Hat OpenShift Service on AWS

use std::process;

use anyhow::Result;
use clap::Parser;
use rosa_services::{Cli, Commands};
use tracing::error;
use tracing_log::AsTrace;
use tracing_subscriber::FmtSubscriber;

#[cfg(not(tarpaulin_include))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let subscriber = FmtSubscriber::builder()
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .with_target(false)
    .with_writer(std::io::stderr)
    .without_time()
    .finish();
  tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

  let result = match &cli.commands {
    Commands::Create(args) => rosa_services::create(args, cli.config.as_deref()).await,
    Commands::List(args) => rosa_services::list(args, cli.config.as_deref()).await,
  };

  if let Err(err) = result {
    error!("{err:#}");
    process::exit(1);
  }

  Ok(())
}
