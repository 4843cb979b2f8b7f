pub mod aws;
pub mod cli;
pub mod clients;
pub mod config;
pub mod ocm;
pub mod output;
pub mod service;
pub mod version;

use std::env;

use anyhow::{Context, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_types::region::Region;
pub use cli::{Cli, Commands, Create, CreateCommands, List, ListCommands, Service, Services};
use tracing::{error, info};

use crate::{clients::RealAwsClients, ocm::Connection};

/// Get the configuration to authn/authz with AWS that will be used across AWS clients
pub async fn get_config(region: &Option<String>) -> Result<aws_config::SdkConfig> {
  let aws_region = match region {
    Some(region) => Some(Region::new(region.to_owned())),
    None => env::var("AWS_REGION").ok().map(Region::new),
  };

  let region_provider = RegionProviderChain::first_try(aws_region).or_default_provider();

  Ok(aws_config::from_env().region(region_provider).load().await)
}

/// Open a connection to the OpenShift Cluster Manager API
fn connect(config_path: Option<&str>) -> Result<Connection> {
  let config = config::load(config_path)?;

  Connection::from_config(&config).context("Failed to create OCM connection")
}

/// Close the connection, reporting but not escalating any failure
fn disconnect(connection: Connection) {
  if let Err(err) = connection.close() {
    error!("Failed to close OCM connection: {err}");
  }
}

/// Create a managed service and print the commands required to finish the installation
pub async fn create(args: &Create, config_path: Option<&str>) -> Result<()> {
  match &args.command {
    CreateCommands::Service(svc) => {
      let connection = connect(config_path)?;
      let aws_config = get_config(&svc.region).await?;
      let aws_clients = RealAwsClients::new(&aws_config);

      let result = service::create_service(&aws_clients, &connection, svc).await;
      disconnect(connection);
      let created = result?;

      info!("{}", serde_json::to_string_pretty(&created)?);

      let steps: Vec<String> = service::next_steps(&svc.cluster_name)
        .iter()
        .map(|step| format!("\t{step}"))
        .collect();
      info!(
        "Run the following commands to continue the cluster creation:\n\n{}\n",
        steps.join("\n")
      );
    }
  }

  Ok(())
}

/// List the managed services
pub async fn list(args: &List, config_path: Option<&str>) -> Result<()> {
  match &args.command {
    ListCommands::Services(svcs) => {
      let connection = connect(config_path)?;

      let result = service::list_services(&connection).await;
      disconnect(connection);
      let found = result?;

      output::output(&found, &svcs.format, &svcs.output)?;
    }
  }

  Ok(())
}
